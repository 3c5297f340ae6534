//! Wire-level shapes returned by the CMS API
//!
//! The repository schema is owned by the CMS, so the `data` payload stays an
//! opaque JSON map here. Interpreting it into the strict content model is the
//! job of `content::normalize`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Repository metadata, served at the API root
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryInfo {
    #[serde(default)]
    pub refs: Vec<RepositoryRef>,
}

impl RepositoryInfo {
    /// The ref pointing at the currently published content
    pub fn master_ref(&self) -> Option<&str> {
        self.refs
            .iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference.as_str())
    }
}

/// One entry of the repository ref list
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryRef {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}

/// A document as the CMS hands it over
///
/// Everything is optional on purpose. Broken documents must survive
/// deserialization so normalization can decide what is fatal and what
/// falls back to a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type", default)]
    pub doc_type: Option<String>,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub last_publication_date: Option<String>,
    /// Schema-defined fields, opaque at this level
    #[serde(default)]
    pub data: serde_json::Map<String, Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One page of a paginated document query
#[derive(Debug, Clone, Deserialize)]
pub struct RawListingPage {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub results_per_page: Option<u32>,
    #[serde(default)]
    pub total_results_size: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// Absolute URL of the next page, absent on the last one
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub results: Vec<RawDocument>,
}
