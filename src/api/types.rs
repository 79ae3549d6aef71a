use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// One entry in the blog list. Immutable once fetched; identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub date: String,
    pub preview: String,
}

/// One span of rich text inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    pub text: String,
    #[serde(default)]
    pub href: Option<String>,
}

impl RichText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

/// One unit of structured post content. Order within a post's block sequence
/// is significant and preserved exactly as the provider returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Paragraph {
        id: String,
        spans: Vec<RichText>,
    },
    Heading {
        id: String,
        level: HeadingLevel,
        spans: Vec<RichText>,
    },
    BulletedItem {
        id: String,
        spans: Vec<RichText>,
    },
    NumberedItem {
        id: String,
        spans: Vec<RichText>,
    },
    Code {
        id: String,
        spans: Vec<RichText>,
        #[serde(default)]
        language: Option<String>,
    },
    Quote {
        id: String,
        spans: Vec<RichText>,
    },
    Divider {
        id: String,
    },
    Image {
        id: String,
        url: String,
        #[serde(default)]
        caption: Option<String>,
    },
}

impl ContentBlock {
    pub fn id(&self) -> &str {
        match self {
            Self::Paragraph { id, .. }
            | Self::Heading { id, .. }
            | Self::BulletedItem { id, .. }
            | Self::NumberedItem { id, .. }
            | Self::Code { id, .. }
            | Self::Quote { id, .. }
            | Self::Divider { id }
            | Self::Image { id, .. } => id,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw wire payloads
// ---------------------------------------------------------------------------

/// Generic `{ "results": [...] }` envelope both provider endpoints use.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultsPayload<T> {
    #[serde(default)]
    pub results: Vec<T>,
}

/// Post record as the provider sends it. Every field is optional at the wire
/// level; the versioned mapping decides which are required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPost {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRichText {
    #[serde(default)]
    pub plain_text: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTextPayload {
    #[serde(default)]
    pub rich_text: Vec<RawRichText>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCodePayload {
    #[serde(default)]
    pub rich_text: Vec<RawRichText>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFileRef {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImagePayload {
    #[serde(default)]
    pub file: Option<RawFileRef>,
    #[serde(default)]
    pub external: Option<RawFileRef>,
    #[serde(default)]
    pub caption: Vec<RawRichText>,
}

/// Block record as the provider sends it: a `type` discriminator plus one
/// payload field named after the type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawBlock {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub type_: Option<String>,
    #[serde(default)]
    pub paragraph: Option<RawTextPayload>,
    #[serde(default)]
    pub heading_1: Option<RawTextPayload>,
    #[serde(default)]
    pub heading_2: Option<RawTextPayload>,
    #[serde(default)]
    pub heading_3: Option<RawTextPayload>,
    #[serde(default)]
    pub bulleted_list_item: Option<RawTextPayload>,
    #[serde(default)]
    pub numbered_list_item: Option<RawTextPayload>,
    #[serde(default)]
    pub code: Option<RawCodePayload>,
    #[serde(default)]
    pub quote: Option<RawTextPayload>,
    #[serde(default)]
    pub image: Option<RawImagePayload>,
}
