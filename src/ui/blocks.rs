use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::api::types::{ContentBlock, HeadingLevel, RichText};
use crate::theme::Theme;

/// Render a post body as terminal lines, wrapped to `width` columns.
///
/// Blocks are separated by a blank line. Consecutive numbered items share a
/// counter; any other block starts the next run at 1 again.
pub fn content_lines(blocks: &[ContentBlock], width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let width = width as usize;
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut numbered = 0usize;

    for block in blocks {
        if !matches!(block, ContentBlock::NumberedItem { .. }) {
            numbered = 0;
        }

        match block {
            ContentBlock::Paragraph { spans, .. } => {
                lines.extend(wrap_spans(&styled_parts(spans, theme.base()), width));
            }
            ContentBlock::Heading { level, spans, .. } => {
                let style = heading_style(*level, theme);
                lines.extend(wrap_spans(&styled_parts(spans, style), width));
            }
            ContentBlock::BulletedItem { spans, .. } => {
                let body = wrap_spans(&styled_parts(spans, theme.base()), width.saturating_sub(2));
                lines.extend(prefixed("\u{2022} ", "  ", body, theme.accent()));
            }
            ContentBlock::NumberedItem { spans, .. } => {
                numbered += 1;
                let marker = format!("{numbered}. ");
                let indent = " ".repeat(marker.len());
                let body = wrap_spans(
                    &styled_parts(spans, theme.base()),
                    width.saturating_sub(marker.len()),
                );
                lines.extend(prefixed(&marker, &indent, body, theme.accent()));
            }
            ContentBlock::Code {
                spans, language, ..
            } => {
                if let Some(language) = language {
                    lines.push(Line::from(Span::styled(
                        format!("\u{250C}\u{2500} {language}"),
                        theme.accent(),
                    )));
                }
                // Code keeps its own line breaks; no word wrapping.
                let text: String = spans.iter().map(|s| s.text.as_str()).collect();
                for code_line in text.lines() {
                    lines.push(Line::from(Span::styled(
                        format!("  {code_line}"),
                        theme.accent(),
                    )));
                }
            }
            ContentBlock::Quote { spans, .. } => {
                let body = wrap_spans(
                    &styled_parts(spans, theme.accent().add_modifier(Modifier::ITALIC)),
                    width.saturating_sub(2),
                );
                lines.extend(prefixed("\u{2502} ", "\u{2502} ", body, theme.accent()));
            }
            ContentBlock::Divider { .. } => {
                lines.push(Line::from(Span::styled(
                    "\u{2500}".repeat(width.min(40)),
                    theme.accent(),
                )));
            }
            ContentBlock::Image { url, caption, .. } => {
                lines.push(Line::from(Span::styled(
                    format!("[image] {url}"),
                    theme.accent().add_modifier(Modifier::UNDERLINED),
                )));
                if let Some(caption) = caption {
                    lines.extend(wrap_spans(
                        &[(
                            caption.clone(),
                            theme.accent().add_modifier(Modifier::ITALIC),
                        )],
                        width,
                    ));
                }
            }
        }

        lines.push(Line::from(""));
    }

    // Drop the trailing separator so the body ends on content.
    if matches!(lines.last(), Some(line) if line.width() == 0) {
        lines.pop();
    }
    lines
}

fn heading_style(level: HeadingLevel, theme: &Theme) -> Style {
    match level {
        HeadingLevel::H1 => theme
            .base()
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => theme.base().add_modifier(Modifier::BOLD),
        HeadingLevel::H3 => theme.base().add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}

/// Pair each span's text with its display style. Linked spans are underlined.
fn styled_parts(spans: &[RichText], base: Style) -> Vec<(String, Style)> {
    spans
        .iter()
        .map(|span| {
            let style = if span.href.is_some() {
                base.add_modifier(Modifier::UNDERLINED)
            } else {
                base
            };
            (span.text.clone(), style)
        })
        .collect()
}

/// Greedy word wrap that keeps each word's style. Words from different spans
/// may share a line; whitespace inside spans collapses to single spaces.
fn wrap_spans(parts: &[(String, Style)], width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0usize;

    for (text, style) in parts {
        for word in text.split_whitespace() {
            let w = word.width();
            if current.is_empty() {
                current.push(Span::styled(word.to_string(), *style));
                used = w;
            } else if used + 1 + w <= width {
                current.push(Span::styled(format!(" {word}"), *style));
                used += 1 + w;
            } else {
                lines.push(Line::from(std::mem::take(&mut current)));
                current.push(Span::styled(word.to_string(), *style));
                used = w;
            }
        }
    }

    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    if lines.is_empty() {
        lines.push(Line::from(""));
    }
    lines
}

/// Prepend `first` to the first line and `rest` to continuation lines.
fn prefixed(
    first: &str,
    rest: &str,
    body: Vec<Line<'static>>,
    marker_style: Style,
) -> Vec<Line<'static>> {
    body.into_iter()
        .enumerate()
        .map(|(i, mut line)| {
            let prefix = if i == 0 { first } else { rest };
            line.spans
                .insert(0, Span::styled(prefix.to_string(), marker_style));
            line
        })
        .collect()
}
