use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::app::{App, AppMode};

/// Single-line `:` prompt rendered below the status bar in command mode.
pub struct CommandBar<'a> {
    pub app: &'a App,
}

impl<'a> CommandBar<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        if self.app.mode != AppMode::Command {
            return;
        }

        let display = format!(":{}\u{2588}", self.app.command_input);
        let max_width = area.width as usize;
        // Show the rightmost portion while typing past the edge.
        let chars: Vec<char> = display.chars().collect();
        let visible: String = if chars.len() > max_width {
            chars[chars.len() - max_width..].iter().collect()
        } else {
            display
        };

        buf.set_string(area.x, area.y, &visible, self.app.theme.base());
    }
}
