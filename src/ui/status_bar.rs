use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::app::{App, AppMode};

/// Bottom bar: mode, page, current location, loading flag, status message.
pub struct StatusBar<'a> {
    pub app: &'a App,
}

impl<'a> StatusBar<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let theme = self.app.theme;
        let bar_style = theme.accent();
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_style(bar_style);
        }

        let mode_str = match self.app.mode {
            AppMode::Normal => " NORMAL ",
            AppMode::Command => " COMMAND ",
        };

        let mut spans = vec![
            Span::styled(mode_str, theme.highlight()),
            Span::styled(format!(" {} ", self.app.nav.page().title()), bar_style),
            Span::styled(location_label(self.app.nav.location()), bar_style),
        ];

        if self.app.posts_loading || self.app.content_loading {
            spans.push(Span::styled(" [loading...]", bar_style));
        }

        // Status message, right-aligned.
        if let Some(ref msg) = self.app.status_message {
            let left_width: usize = spans.iter().map(|s| s.width()).sum();
            let msg_width = msg.chars().count().min(area.width as usize);
            let padding = (area.width as usize).saturating_sub(left_width + msg_width);
            if padding > 0 {
                spans.push(Span::styled(" ".repeat(padding), bar_style));
            }
            spans.push(Span::styled(msg.clone(), theme.base()));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}

/// The address-bar rendering of the location: `/` for the root, `/?query`
/// otherwise.
fn location_label(location: &str) -> String {
    if location.is_empty() {
        "/".to_string()
    } else {
        format!("/?{location}")
    }
}
