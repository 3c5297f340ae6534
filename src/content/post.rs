//! Normalized post models
//!
//! These are the strict shapes the rest of the crate works with. Anything
//! optional here is genuinely optional in the published content; everything
//! else is guaranteed present once `normalize` has run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// A fully loaded blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// URL-safe identifier, unique per post
    pub uid: String,

    /// First publication date, absent on never-published drafts
    pub first_publication_date: Option<DateTime<Utc>>,

    /// Last publication date
    pub last_publication_date: Option<DateTime<Utc>>,

    /// Post title
    pub title: String,

    /// Short teaser shown in listings
    pub subtitle: String,

    /// Author display name
    pub author: String,

    /// Header image
    pub banner: Option<Banner>,

    /// Body sections in document order
    pub content: Vec<ContentBlock>,
}

/// Header image of a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub url: String,
}

/// One titled section of a post body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Section heading, may be empty
    pub heading: String,

    /// Rich text runs under the heading
    pub body: Vec<RichTextSpan>,
}

/// A single rich text run
///
/// Only `kind` and `text` are interpreted at the model level; inline span
/// annotations and other markup details ride along in `extra` until the
/// render layer applies them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextSpan {
    /// Block kind, e.g. `paragraph`, `heading2`, `list-item`
    #[serde(rename = "type")]
    pub kind: String,

    /// Plain text of the run
    #[serde(default)]
    pub text: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl RichTextSpan {
    /// A plain paragraph run
    pub fn paragraph(text: &str) -> Self {
        Self {
            kind: "paragraph".to_string(),
            text: text.to_string(),
            extra: serde_json::Map::new(),
        }
    }
}

/// The listing shape of a post, as shown on the home page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub uid: String,
    pub first_publication_date: Option<DateTime<Utc>>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// One loaded batch of the home page listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostListing {
    /// Summaries in repository order
    pub posts: Vec<PostSummary>,

    /// Cursor for the following batch, `None` once exhausted
    pub next_page: Option<Url>,
}

/// Previous and next post relative to one post in repository order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NeighborPair {
    pub previous: Option<PostSummary>,
    pub next: Option<PostSummary>,
}

/// Everything needed to render a single post page
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub post: Post,
    /// Estimated reading time in whole minutes
    pub reading_minutes: u32,
    pub neighbors: NeighborPair,
    /// Whether the page was assembled from a preview ref
    pub preview: bool,
}
