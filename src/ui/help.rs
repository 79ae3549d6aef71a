use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::theme::Theme;

/// Centered keybinding overlay.
pub struct HelpView {
    theme: Theme,
}

impl HelpView {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = 52u16.min(area.width.saturating_sub(4));
        let height = 20u16.min(area.height.saturating_sub(2));
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        let panel = Rect::new(x, y, width, height);

        Clear.render(panel, buf);

        let theme = self.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .title_style(theme.base().add_modifier(Modifier::BOLD))
            .border_style(theme.border());

        let inner = block.inner(panel);
        block.render(panel, buf);

        let key_style = theme.base().add_modifier(Modifier::BOLD);
        let desc_style = theme.accent();
        let section_style = theme.base().add_modifier(Modifier::BOLD);

        let bindings: Vec<Line<'_>> = vec![
            Line::from(Span::styled("Navigation", section_style)),
            binding_line("j/k", "Move selection / scroll", key_style, desc_style),
            binding_line("Enter", "Open selected item", key_style, desc_style),
            binding_line("Esc/q", "Close post / quit", key_style, desc_style),
            binding_line("[ / ]", "History back / forward", key_style, desc_style),
            Line::from(""),
            Line::from(Span::styled("Pages", section_style)),
            binding_line("1", "Home", key_style, desc_style),
            binding_line("2", "Work", key_style, desc_style),
            binding_line("3", "Blog", key_style, desc_style),
            binding_line("4", "Contact", key_style, desc_style),
            Line::from(""),
            Line::from(Span::styled("Other", section_style)),
            binding_line("t", "Toggle dark/light theme", key_style, desc_style),
            binding_line(":", "Command mode", key_style, desc_style),
            binding_line("?", "This help screen", key_style, desc_style),
            binding_line("Ctrl-C", "Quit", key_style, desc_style),
        ];

        Paragraph::new(bindings)
            .style(theme.base())
            .render(inner, buf);
    }
}

fn binding_line<'a>(key: &'a str, desc: &'a str, key_style: Style, desc_style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {key:<10}"), key_style),
        Span::styled(desc, desc_style),
    ])
}
