//! HTTP client for the CMS Document API
//!
//! Every query runs against an explicit ref. Published content goes through
//! the repository master ref, which is resolved fresh per call; a preview
//! session substitutes its own ref to make drafts visible.

use crate::cms::document::{RawDocument, RawListingPage, RepositoryInfo};
use crate::config::CmsConfig;
use crate::error::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// User-Agent string for CMS requests.
const USER_AGENT: &str = concat!("voyager-rs/", env!("CARGO_PKG_VERSION"));

/// Page size used when walking the whole repository listing
const SCAN_PAGE_SIZE: usize = 100;

/// Client for one CMS repository
pub struct CmsClient {
    config: CmsConfig,
    client: Client,
}

impl CmsClient {
    /// Create a client for the repository named in `config`
    pub fn new(config: CmsConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// The custom type this client queries
    pub fn post_type(&self) -> &str {
        &self.config.post_type
    }

    /// Fetch repository metadata from the API root
    pub async fn repository(&self) -> Result<RepositoryInfo> {
        let mut url = self.endpoint_url()?;
        if let Some(token) = &self.config.access_token {
            url.query_pairs_mut().append_pair("access_token", token);
        }
        self.get_json(&url).await
    }

    /// Resolve the ref of the currently published content
    pub async fn master_ref(&self) -> Result<String> {
        let info = self.repository().await?;
        info.master_ref()
            .map(str::to_string)
            .ok_or_else(|| Error::Network(format!("{}: no master ref", self.config.endpoint)))
    }

    /// First page of the post listing, in repository order
    pub async fn query_by_type(&self, preview_ref: Option<&str>) -> Result<RawListingPage> {
        let reference = self.resolve_ref(preview_ref).await?;
        let url = self.search_url(
            &reference,
            &self.type_predicate(),
            self.config.page_size,
            true,
        )?;
        self.get_json(&url).await
    }

    /// Walk the full post listing and return every document, in order
    pub async fn all_documents(&self, preview_ref: Option<&str>) -> Result<Vec<RawDocument>> {
        let reference = self.resolve_ref(preview_ref).await?;
        let mut url = self.search_url(&reference, &self.type_predicate(), SCAN_PAGE_SIZE, true)?;

        let mut docs = Vec::new();
        loop {
            let page: RawListingPage = self.get_json(&url).await?;
            docs.extend(page.results);
            match page.next_page {
                Some(next) => {
                    url = Url::parse(&next)
                        .map_err(|e| Error::InvalidCursor(format!("{next}: {e}")))?;
                }
                None => break,
            }
        }
        Ok(docs)
    }

    /// Fetch a single document by uid
    pub async fn get_by_uid(&self, uid: &str, preview_ref: Option<&str>) -> Result<RawDocument> {
        let reference = self.resolve_ref(preview_ref).await?;
        let predicate = format!(
            "[[at(my.{}.uid,\"{}\")]]",
            self.config.post_type,
            escape_predicate(uid)
        );
        let url = self.search_url(&reference, &predicate, 1, false)?;
        let page: RawListingPage = self.get_json(&url).await?;
        page.results
            .into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(uid.to_string()))
    }

    /// Fetch one listing page through an opaque cursor handed back earlier
    ///
    /// Cursors reach this method from the outside, so anything not pointing
    /// back at the repository host is refused instead of fetched.
    pub async fn fetch_page(&self, cursor: &Url) -> Result<RawListingPage> {
        let endpoint = self.endpoint_url()?;
        if cursor.host_str() != endpoint.host_str()
            || cursor.port_or_known_default() != endpoint.port_or_known_default()
        {
            return Err(Error::InvalidCursor(format!(
                "{cursor}: outside the repository"
            )));
        }
        self.get_json(cursor).await
    }

    /// Validate a preview token and work out where it should land
    ///
    /// Returns `None` when the CMS rejects the token. A valid token pointing
    /// at a document resolves through `resolver`; a valid token without a
    /// target falls back to the site root.
    pub async fn resolve_preview<F>(
        &self,
        token: &str,
        document_id: Option<&str>,
        resolver: F,
    ) -> Result<Option<String>>
    where
        F: Fn(&RawDocument) -> String,
    {
        let predicate = document_id
            .map(|id| format!("[[at(document.id,\"{}\")]]", escape_predicate(id)))
            .unwrap_or_default();
        let url = self.search_url(token, &predicate, 1, false)?;

        debug!(%url, "resolving preview token");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if status.is_client_error() {
            // The CMS does not know this ref
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::Network(format!("{url}: HTTP {status}")));
        }

        let page: RawListingPage = response
            .json()
            .await
            .map_err(|e| Error::Network(format!("{url}: malformed response: {e}")))?;

        Ok(Some(match page.results.first() {
            Some(doc) => resolver(doc),
            None => "/".to_string(),
        }))
    }

    async fn resolve_ref(&self, preview_ref: Option<&str>) -> Result<String> {
        match preview_ref {
            Some(reference) => Ok(reference.to_string()),
            None => self.master_ref().await,
        }
    }

    fn type_predicate(&self) -> String {
        format!("[[at(document.type,\"{}\")]]", self.config.post_type)
    }

    fn endpoint_url(&self) -> Result<Url> {
        Url::parse(&self.config.endpoint)
            .map_err(|e| Error::Network(format!("invalid CMS endpoint {}: {e}", self.config.endpoint)))
    }

    /// Build a `documents/search` URL for one query
    fn search_url(
        &self,
        reference: &str,
        predicate: &str,
        page_size: usize,
        summaries_only: bool,
    ) -> Result<Url> {
        let mut url = self.endpoint_url()?;
        url.path_segments_mut()
            .map_err(|_| Error::Network(format!("invalid CMS endpoint {}", self.config.endpoint)))?
            .pop_if_empty()
            .push("documents")
            .push("search");

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("ref", reference);
            if !predicate.is_empty() {
                pairs.append_pair("q", predicate);
            }
            pairs.append_pair("pageSize", &page_size.to_string());
            if summaries_only {
                let t = &self.config.post_type;
                pairs.append_pair("fetch", &format!("{t}.title,{t}.subtitle,{t}.author"));
            }
            if let Some(token) = &self.config.access_token {
                pairs.append_pair("access_token", token);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        debug!(%url, "cms request");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(format!("{url}: HTTP {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Network(format!("{url}: malformed response: {e}")))
    }
}

/// Keep quotes out of predicate string literals
fn escape_predicate(value: &str) -> String {
    value.replace('"', "")
}
