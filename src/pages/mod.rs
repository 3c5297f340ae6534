//! Page assembly
//!
//! Pulls documents from the CMS and derives everything a page needs:
//! normalized content, reading time, neighbor links and the preview flag.
//! Passing a preview ref switches every fetch in the assembly to draft
//! content.

use crate::cms::CmsClient;
use crate::content::{
    neighbors, normalize_listing, normalize_post, normalize_summary, reading_time, PostListing,
    PostPage,
};
use crate::error::Result;
use url::Url;

/// Assemble one batch of the home page listing
///
/// Without a cursor this is the first batch in repository order; with one
/// it is the batch the cursor points at.
pub async fn home(
    client: &CmsClient,
    preview_ref: Option<&str>,
    cursor: Option<&Url>,
) -> Result<PostListing> {
    let page = match cursor {
        Some(url) => client.fetch_page(url).await?,
        None => client.query_by_type(preview_ref).await?,
    };
    normalize_listing(&page)
}

/// Assemble a full post page for `uid`
pub async fn post_page(client: &CmsClient, uid: &str, preview_ref: Option<&str>) -> Result<PostPage> {
    let (doc, all_docs) = tokio::try_join!(
        client.get_by_uid(uid, preview_ref),
        client.all_documents(preview_ref),
    )?;

    let post = normalize_post(&doc)?;
    let ordered = all_docs
        .iter()
        .map(normalize_summary)
        .collect::<Result<Vec<_>>>()?;
    let neighbors = neighbors::resolve(uid, &ordered)?;
    let reading_minutes = reading_time::reading_minutes(&post.content);

    Ok(PostPage {
        post,
        reading_minutes,
        neighbors,
        preview: preview_ref.is_some(),
    })
}
