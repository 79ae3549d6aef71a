use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::app::App;
use crate::projects::CONTACT;

/// Contact page: a handful of labeled links.
pub struct ContactView<'a> {
    pub selected_index: usize,
    pub app: &'a App,
}

impl<'a> ContactView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self {
            selected_index: app.contact_selected,
            app,
        }
    }
}

impl Widget for ContactView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.app.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Contact ")
            .title_style(theme.base().add_modifier(Modifier::BOLD))
            .border_style(theme.border());

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Get in touch",
                theme.base().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (idx, entry) in CONTACT.iter().enumerate() {
            let selected = idx == self.selected_index;
            let marker = if selected { "\u{203A} " } else { "  " };
            let value_style = if selected {
                theme.highlight()
            } else {
                theme.base()
            };
            lines.push(Line::from(vec![
                Span::styled(marker.to_string(), theme.accent()),
                Span::styled(format!("{:<10}", entry.label), theme.accent()),
                Span::styled(entry.value.to_string(), value_style),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter opens the selected link",
            theme.accent(),
        )));

        Paragraph::new(lines).style(theme.base()).render(
            Rect::new(
                inner.x + 1,
                inner.y,
                inner.width.saturating_sub(2),
                inner.height,
            ),
            buf,
        );
    }
}
