use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::api::types::PostSummary;
use crate::app::App;
use crate::ui::blocks::content_lines;

/// A single post: header from the list summary, body from content blocks.
pub struct PostView<'a> {
    pub summary: Option<&'a PostSummary>,
    pub post_id: &'a str,
    pub app: &'a App,
}

impl<'a> PostView<'a> {
    pub fn new(app: &'a App, post_id: &'a str) -> Self {
        Self {
            summary: app.posts.iter().find(|p| p.id == post_id),
            post_id,
            app,
        }
    }
}

impl Widget for PostView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.app.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Blog ")
            .title_style(theme.base().add_modifier(Modifier::BOLD))
            .border_style(theme.border());

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let content_width = inner.width.saturating_sub(2);
        let mut lines: Vec<Line<'static>> = Vec::new();

        // Header: title and date from the list, or just the id if the list
        // has not resolved yet.
        match self.summary {
            Some(summary) => {
                lines.push(Line::from(Span::styled(
                    summary.title.clone(),
                    theme.base().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(
                    summary.date.clone(),
                    theme.accent(),
                )));
            }
            None => {
                lines.push(Line::from(Span::styled(
                    self.post_id.to_string(),
                    theme.accent(),
                )));
            }
        }
        lines.push(Line::from(Span::styled(
            "\u{2500}".repeat(content_width.min(40) as usize),
            theme.accent(),
        )));
        lines.push(Line::from(""));

        if self.app.content_loading && self.app.blocks.is_empty() {
            lines.push(Line::from(Span::styled("Loading...", theme.accent())));
        } else if self.app.blocks.is_empty() {
            lines.push(Line::from(Span::styled(
                "No content available for this post yet.",
                theme.accent(),
            )));
        } else {
            lines.extend(content_lines(&self.app.blocks, content_width, &theme));
        }

        // Clamp the scroll so the last line stays reachable but the view
        // never runs past the body.
        let max_scroll = lines.len().saturating_sub(inner.height as usize);
        let scroll = self.app.detail_scroll.min(max_scroll).min(u16::MAX as usize) as u16;

        Paragraph::new(lines)
            .style(theme.base())
            .scroll((scroll, 0))
            .render(
                Rect::new(inner.x + 1, inner.y, content_width, inner.height),
                buf,
            );
    }
}
