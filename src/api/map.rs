//! Versioned mapping from raw provider records to domain types.
//!
//! The provider's records arrive with every field optional. This module is
//! the single place that decides which fields a v1 record must carry,
//! failing with a [`MapError`] instead of papering over gaps with defaults.

use thiserror::Error;
use tracing::debug;

use super::types::{
    ContentBlock, HeadingLevel, PostSummary, RawBlock, RawPost, RawTextPayload, RichText,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("post record is missing required field `{0}`")]
    MissingPostField(&'static str),
    #[error("block record is missing required field `{0}`")]
    MissingBlockField(&'static str),
    #[error("block {id} declares type `{kind}` but carries no `{kind}` payload")]
    MissingPayload { id: String, kind: String },
    #[error("image block {id} has neither a file url nor an external url")]
    MissingImageUrl { id: String },
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// `id`, `title` and `date` are required; `preview` is presentational and
/// defaults to empty.
pub fn map_post_v1(raw: RawPost) -> Result<PostSummary, MapError> {
    let id = raw.id.ok_or(MapError::MissingPostField("id"))?;
    let title = raw.title.ok_or(MapError::MissingPostField("title"))?;
    let date = raw.date.ok_or(MapError::MissingPostField("date"))?;
    Ok(PostSummary {
        id,
        title,
        date,
        preview: raw.preview.unwrap_or_default(),
    })
}

pub fn map_posts_v1(raw: Vec<RawPost>) -> Result<Vec<PostSummary>, MapError> {
    raw.into_iter().map(map_post_v1).collect()
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

fn map_spans(payload: RawTextPayload) -> Vec<RichText> {
    payload
        .rich_text
        .into_iter()
        .map(|span| RichText {
            text: span.plain_text.unwrap_or_default(),
            href: span.href,
        })
        .collect()
}

/// Map one raw block. `Ok(None)` means the type is one this version does not
/// know; callers drop such blocks rather than failing the whole sequence.
pub fn map_block_v1(raw: RawBlock) -> Result<Option<ContentBlock>, MapError> {
    let id = raw.id.ok_or(MapError::MissingBlockField("id"))?;
    let kind = raw.type_.ok_or(MapError::MissingBlockField("type"))?;

    fn payload_or_err(
        payload: Option<RawTextPayload>,
        id: &str,
        kind: &str,
    ) -> Result<RawTextPayload, MapError> {
        payload.ok_or_else(|| MapError::MissingPayload {
            id: id.to_string(),
            kind: kind.to_string(),
        })
    }

    let block = match kind.as_str() {
        "paragraph" => ContentBlock::Paragraph {
            spans: map_spans(payload_or_err(raw.paragraph, &id, &kind)?),
            id,
        },
        "heading_1" => ContentBlock::Heading {
            level: HeadingLevel::H1,
            spans: map_spans(payload_or_err(raw.heading_1, &id, &kind)?),
            id,
        },
        "heading_2" => ContentBlock::Heading {
            level: HeadingLevel::H2,
            spans: map_spans(payload_or_err(raw.heading_2, &id, &kind)?),
            id,
        },
        "heading_3" => ContentBlock::Heading {
            level: HeadingLevel::H3,
            spans: map_spans(payload_or_err(raw.heading_3, &id, &kind)?),
            id,
        },
        "bulleted_list_item" => ContentBlock::BulletedItem {
            spans: map_spans(payload_or_err(raw.bulleted_list_item, &id, &kind)?),
            id,
        },
        "numbered_list_item" => ContentBlock::NumberedItem {
            spans: map_spans(payload_or_err(raw.numbered_list_item, &id, &kind)?),
            id,
        },
        "code" => {
            let payload = raw.code.ok_or_else(|| MapError::MissingPayload {
                id: id.clone(),
                kind: kind.clone(),
            })?;
            ContentBlock::Code {
                id,
                spans: map_spans(RawTextPayload {
                    rich_text: payload.rich_text,
                }),
                language: payload.language,
            }
        }
        "quote" => ContentBlock::Quote {
            spans: map_spans(payload_or_err(raw.quote, &id, &kind)?),
            id,
        },
        "divider" => ContentBlock::Divider { id },
        "image" => {
            let payload = raw.image.ok_or_else(|| MapError::MissingPayload {
                id: id.clone(),
                kind: kind.clone(),
            })?;
            let url = payload
                .file
                .and_then(|f| f.url)
                .or_else(|| payload.external.and_then(|f| f.url))
                .ok_or_else(|| MapError::MissingImageUrl { id: id.clone() })?;
            let caption: String = payload
                .caption
                .into_iter()
                .filter_map(|span| span.plain_text)
                .collect();
            ContentBlock::Image {
                id,
                url,
                caption: (!caption.is_empty()).then_some(caption),
            }
        }
        _ => {
            debug!("skipping block {id} of unsupported type `{kind}`");
            return Ok(None);
        }
    };
    Ok(Some(block))
}

/// Map a whole block sequence, preserving order and dropping unknown types.
pub fn map_blocks_v1(raw: Vec<RawBlock>) -> Result<Vec<ContentBlock>, MapError> {
    let mut blocks = Vec::with_capacity(raw.len());
    for record in raw {
        if let Some(block) = map_block_v1(record)? {
            blocks.push(block);
        }
    }
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{RawFileRef, RawImagePayload, RawRichText};

    fn text_payload(text: &str) -> RawTextPayload {
        RawTextPayload {
            rich_text: vec![RawRichText {
                plain_text: Some(text.to_string()),
                href: None,
            }],
        }
    }

    #[test]
    fn maps_a_complete_post() {
        let raw = RawPost {
            id: Some("p1".into()),
            title: Some("On minimalism".into()),
            date: Some("Dec 2024".into()),
            preview: Some("Less is more.".into()),
        };
        let post = map_post_v1(raw).unwrap();
        assert_eq!(post.id, "p1");
        assert_eq!(post.title, "On minimalism");
        assert_eq!(post.date, "Dec 2024");
        assert_eq!(post.preview, "Less is more.");
    }

    #[test]
    fn post_without_title_is_an_error() {
        let raw = RawPost {
            id: Some("p1".into()),
            date: Some("Dec 2024".into()),
            ..Default::default()
        };
        assert_eq!(map_post_v1(raw), Err(MapError::MissingPostField("title")));
    }

    #[test]
    fn post_without_preview_defaults_to_empty() {
        let raw = RawPost {
            id: Some("p1".into()),
            title: Some("t".into()),
            date: Some("d".into()),
            preview: None,
        };
        assert_eq!(map_post_v1(raw).unwrap().preview, "");
    }

    #[test]
    fn one_bad_post_fails_the_batch() {
        let good = RawPost {
            id: Some("p1".into()),
            title: Some("t".into()),
            date: Some("d".into()),
            preview: None,
        };
        let bad = RawPost::default();
        assert!(map_posts_v1(vec![good, bad]).is_err());
    }

    #[test]
    fn maps_every_known_block_type_in_order() {
        let raw = vec![
            RawBlock {
                id: Some("b1".into()),
                type_: Some("heading_1".into()),
                heading_1: Some(text_payload("Title")),
                ..Default::default()
            },
            RawBlock {
                id: Some("b2".into()),
                type_: Some("paragraph".into()),
                paragraph: Some(text_payload("Body")),
                ..Default::default()
            },
            RawBlock {
                id: Some("b3".into()),
                type_: Some("divider".into()),
                ..Default::default()
            },
            RawBlock {
                id: Some("b4".into()),
                type_: Some("quote".into()),
                quote: Some(text_payload("Said")),
                ..Default::default()
            },
        ];
        let blocks = map_blocks_v1(raw).unwrap();
        assert_eq!(
            blocks.iter().map(|b| b.id()).collect::<Vec<_>>(),
            vec!["b1", "b2", "b3", "b4"]
        );
        assert!(matches!(
            blocks[0],
            ContentBlock::Heading {
                level: HeadingLevel::H1,
                ..
            }
        ));
    }

    #[test]
    fn unknown_block_type_is_skipped() {
        let raw = vec![
            RawBlock {
                id: Some("b1".into()),
                type_: Some("table_of_contents".into()),
                ..Default::default()
            },
            RawBlock {
                id: Some("b2".into()),
                type_: Some("paragraph".into()),
                paragraph: Some(text_payload("kept")),
                ..Default::default()
            },
        ];
        let blocks = map_blocks_v1(raw).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id(), "b2");
    }

    #[test]
    fn known_type_without_its_payload_is_an_error() {
        let raw = RawBlock {
            id: Some("b1".into()),
            type_: Some("paragraph".into()),
            ..Default::default()
        };
        assert_eq!(
            map_block_v1(raw),
            Err(MapError::MissingPayload {
                id: "b1".into(),
                kind: "paragraph".into()
            })
        );
    }

    #[test]
    fn image_url_prefers_file_then_external() {
        let raw = RawBlock {
            id: Some("b1".into()),
            type_: Some("image".into()),
            image: Some(RawImagePayload {
                file: None,
                external: Some(RawFileRef {
                    url: Some("https://cdn.example/x.png".into()),
                }),
                caption: vec![],
            }),
            ..Default::default()
        };
        match map_block_v1(raw).unwrap().unwrap() {
            ContentBlock::Image { url, caption, .. } => {
                assert_eq!(url, "https://cdn.example/x.png");
                assert_eq!(caption, None);
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn image_without_any_url_is_an_error() {
        let raw = RawBlock {
            id: Some("b1".into()),
            type_: Some("image".into()),
            image: Some(RawImagePayload::default()),
            ..Default::default()
        };
        assert_eq!(
            map_block_v1(raw),
            Err(MapError::MissingImageUrl { id: "b1".into() })
        );
    }

    #[test]
    fn code_block_keeps_its_language() {
        let raw = RawBlock {
            id: Some("b1".into()),
            type_: Some("code".into()),
            code: Some(crate::api::types::RawCodePayload {
                rich_text: vec![RawRichText {
                    plain_text: Some("fn main() {}".into()),
                    href: None,
                }],
                language: Some("rust".into()),
            }),
            ..Default::default()
        };
        match map_block_v1(raw).unwrap().unwrap() {
            ContentBlock::Code {
                spans, language, ..
            } => {
                assert_eq!(spans, vec![RichText::plain("fn main() {}")]);
                assert_eq!(language.as_deref(), Some("rust"));
            }
            other => panic!("expected code, got {other:?}"),
        }
    }
}
