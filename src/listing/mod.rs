//! Live post listing with incremental loading
//!
//! [`LiveListing`] models one reader session over the paginated home feed:
//! an append-only list of summaries plus the cursor for the next batch.
//! Loads serialize on the internal lock, so concurrent triggers append
//! whole batches in trigger order and the cursor only advances after the
//! triggering load succeeded.

use crate::cms::CmsClient;
use crate::content::{normalize_listing, PostListing, PostSummary};
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;

/// One incrementally loaded listing session
pub struct LiveListing {
    client: Arc<CmsClient>,
    state: Mutex<ListingState>,
}

struct ListingState {
    posts: Vec<PostSummary>,
    next_page: Option<Url>,
}

impl LiveListing {
    /// Start a session from an already fetched first batch
    pub fn new(client: Arc<CmsClient>, initial: PostListing) -> Self {
        Self {
            client,
            state: Mutex::new(ListingState {
                posts: initial.posts,
                next_page: initial.next_page,
            }),
        }
    }

    /// Fetch the first batch and start a session from it
    pub async fn open(client: Arc<CmsClient>, preview_ref: Option<&str>) -> Result<Self> {
        let page = client.query_by_type(preview_ref).await?;
        let initial = normalize_listing(&page)?;
        Ok(Self::new(client, initial))
    }

    /// Load the next batch, if any
    ///
    /// Returns `Ok(false)` without touching the CMS when the listing is
    /// already exhausted. On failure the session is left exactly as it was,
    /// so the same call can simply be retried.
    pub async fn load_more(&self) -> Result<bool> {
        let mut state = self.state.lock().await;
        let Some(cursor) = state.next_page.clone() else {
            debug!("listing exhausted, nothing to load");
            return Ok(false);
        };

        let page = self.client.fetch_page(&cursor).await?;
        let batch = normalize_listing(&page)?;

        info!(loaded = batch.posts.len(), "loaded more posts");
        state.posts.extend(batch.posts);
        state.next_page = batch.next_page;
        Ok(true)
    }

    /// Whether another batch can still be loaded
    pub async fn has_more(&self) -> bool {
        self.state.lock().await.next_page.is_some()
    }

    /// Everything loaded so far, plus the current cursor
    pub async fn snapshot(&self) -> PostListing {
        let state = self.state.lock().await;
        PostListing {
            posts: state.posts.clone(),
            next_page: state.next_page.clone(),
        }
    }
}
