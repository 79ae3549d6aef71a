use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::app::App;
use crate::projects::PROJECTS;

/// Landing page: short introduction plus a couple of featured projects.
pub struct HomeView<'a> {
    pub app: &'a App,
}

impl<'a> HomeView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for HomeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.app.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Home ")
            .title_style(theme.base().add_modifier(Modifier::BOLD))
            .border_style(theme.border());

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Programmer & Developer",
                theme.base().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Building software with intention. Less, but better.",
                theme.accent(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Featured work",
                theme.base().add_modifier(Modifier::BOLD),
            )),
        ];

        for project in PROJECTS.iter().take(2) {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}", project.title), theme.base()),
                Span::styled(format!("  {}", project.year), theme.accent()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", project.desc),
                theme.accent(),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "2 work \u{00B7} 3 blog \u{00B7} 4 contact \u{00B7} ? help",
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
