use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::app::App;
use crate::projects::PROJECTS;

/// Project list. Enter opens the selected project in the browser.
pub struct WorkView<'a> {
    pub selected_index: usize,
    pub app: &'a App,
}

impl<'a> WorkView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self {
            selected_index: app.work_selected,
            app,
        }
    }
}

impl Widget for WorkView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.app.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Work ")
            .title_style(theme.base().add_modifier(Modifier::BOLD))
            .border_style(theme.border());

        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from("")];
        for (idx, project) in PROJECTS.iter().enumerate() {
            let selected = idx == self.selected_index;
            let marker = if selected { "\u{203A} " } else { "  " };
            let title_style = if selected {
                theme.highlight()
            } else {
                theme.base().add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(vec![
                Span::styled(marker.to_string(), theme.accent()),
                Span::styled(project.title.to_string(), title_style),
                Span::styled(format!("  {}", project.year), theme.accent()),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", project.desc),
                theme.accent(),
            )));
            if selected {
                lines.push(Line::from(Span::styled(
                    format!("    {}", project.url),
                    theme.accent().add_modifier(Modifier::UNDERLINED),
                )));
            }
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "Enter opens the project in your browser",
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
