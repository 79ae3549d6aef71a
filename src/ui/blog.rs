use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Widget};

use crate::api::types::PostSummary;
use crate::app::App;

/// Scrollable post list with a selection highlight.
pub struct BlogView<'a> {
    pub posts: &'a [PostSummary],
    pub selected_index: usize,
    pub loading: bool,
    pub used_fallback: bool,
    pub app: &'a App,
}

impl<'a> BlogView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self {
            posts: &app.posts,
            selected_index: app.blog_selected,
            loading: app.posts_loading,
            used_fallback: app.used_fallback,
            app,
        }
    }
}

impl Widget for BlogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.app.theme;
        let title = if self.used_fallback {
            " Blog (offline) "
        } else {
            " Blog "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(theme.base().add_modifier(Modifier::BOLD))
            .border_style(theme.border());

        let inner = block.inner(area);
        block.render(area, buf);

        if self.posts.is_empty() {
            let msg = if self.loading {
                "Loading..."
            } else {
                "No posts to display"
            };
            buf.set_string(inner.x + 1, inner.y, msg, theme.accent());
            return;
        }

        let content_width = inner.width.saturating_sub(2);
        let heights: Vec<u16> = self
            .posts
            .iter()
            .map(|p| post_card_height(p, content_width) + 1)
            .collect();

        let start = first_visible(&heights, self.selected_index, inner.height);

        let mut y = inner.y;
        for (idx, post) in self.posts.iter().enumerate().skip(start) {
            if y >= inner.y + inner.height {
                break;
            }
            let remaining = inner.y + inner.height - y;
            let render_h = heights[idx].min(remaining);

            let card_area = Rect::new(
                inner.x + 1,
                y,
                content_width,
                render_h.saturating_sub(1).max(1),
            );
            render_post_card(post, idx == self.selected_index, &self.app.theme, card_area, buf);
            y += render_h;

            if y < inner.y + inner.height && idx + 1 < self.posts.len() {
                let sep = "\u{2500}".repeat(content_width as usize);
                buf.set_string(inner.x + 1, y.saturating_sub(1), &sep, theme.accent());
            }
        }
    }
}

/// One post card: title, date, preview (wrapped).
fn render_post_card(
    post: &PostSummary,
    selected: bool,
    theme: &crate::theme::Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let title_style = if selected {
        theme.highlight()
    } else {
        theme.base().add_modifier(Modifier::BOLD)
    };

    let mut y = area.y;
    let marker = if selected { "\u{203A} " } else { "  " };
    let header = Line::from(vec![
        Span::styled(marker.to_string(), theme.accent()),
        Span::styled(post.title.clone(), title_style),
        Span::styled(format!("  {}", post.date), theme.accent()),
    ]);
    buf.set_line(area.x, y, &header, area.width);
    y += 1;

    let preview_width = area.width.saturating_sub(2) as usize;
    for text in wrap_plain(&post.preview, preview_width) {
        if y >= area.y + area.height {
            break;
        }
        buf.set_string(area.x + 2, y, &text, theme.accent());
        y += 1;
    }
}

/// Lines a post card occupies at `width` columns, separator not included.
fn post_card_height(post: &PostSummary, width: u16) -> u16 {
    let preview_lines = if post.preview.is_empty() {
        0
    } else {
        wrap_plain(&post.preview, width.saturating_sub(2) as usize).len() as u16
    };
    1 + preview_lines
}

fn wrap_plain(text: &str, width: usize) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Index of the first card to draw so the selected card fits on screen,
/// packing as many earlier cards above it as the height allows.
fn first_visible(heights: &[u16], selected: usize, available: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let selected = selected.min(heights.len() - 1);
    if available == 0 {
        return selected;
    }

    let mut start = selected;
    let mut used = heights[selected];
    while start > 0 {
        let with_prev = used.saturating_add(heights[start - 1]);
        if with_prev > available {
            break;
        }
        start -= 1;
        used = with_prev;
    }
    start
}
