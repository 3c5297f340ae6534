//! Content normalization
//!
//! Converts loosely typed CMS documents into the strict [`Post`] family.
//! A document without a uid cannot be addressed and is rejected as
//! malformed. Every other gap maps to a stable default, so running the
//! normalizer over its own output changes nothing.

use crate::cms::{RawDocument, RawListingPage};
use crate::content::post::{Banner, ContentBlock, Post, PostListing, PostSummary, RichTextSpan};
use crate::error::{Error, Result};
use crate::render::rich_text;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use url::Url;

/// Normalize a full document into a [`Post`]
pub fn normalize_post(doc: &RawDocument) -> Result<Post> {
    let uid = require_uid(doc)?;
    Ok(Post {
        uid: uid.to_string(),
        first_publication_date: parse_date(doc.first_publication_date.as_deref()),
        last_publication_date: parse_date(doc.last_publication_date.as_deref()),
        title: text_field(&doc.data, "title"),
        subtitle: text_field(&doc.data, "subtitle"),
        author: text_field(&doc.data, "author"),
        banner: banner_field(&doc.data),
        content: content_field(&doc.data),
    })
}

/// Normalize a document into its listing shape
pub fn normalize_summary(doc: &RawDocument) -> Result<PostSummary> {
    let uid = require_uid(doc)?;
    Ok(PostSummary {
        uid: uid.to_string(),
        first_publication_date: parse_date(doc.first_publication_date.as_deref()),
        title: text_field(&doc.data, "title"),
        subtitle: text_field(&doc.data, "subtitle"),
        author: text_field(&doc.data, "author"),
    })
}

/// Normalize one listing page, including its pagination cursor
///
/// A single malformed document fails the whole batch so a broken repository
/// shows up immediately instead of silently thinning the listing.
pub fn normalize_listing(page: &RawListingPage) -> Result<PostListing> {
    let posts = page
        .results
        .iter()
        .map(normalize_summary)
        .collect::<Result<Vec<_>>>()?;
    let next_page = match page.next_page.as_deref() {
        Some(raw) => Some(parse_cursor(raw)?),
        None => None,
    };
    Ok(PostListing { posts, next_page })
}

/// Parse a pagination cursor handed back by the CMS
pub fn parse_cursor(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::InvalidCursor(format!("{raw}: {e}")))
}

fn require_uid(doc: &RawDocument) -> Result<&str> {
    doc.uid
        .as_deref()
        .filter(|uid| !uid.is_empty())
        .ok_or(Error::MalformedDocument("uid"))
}

/// Extract a text field that may arrive as a plain string or as rich text
fn text_field(data: &Map<String, Value>, key: &str) -> String {
    match data.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(_)) => rich_text_value(&data[key])
            .map(|spans| rich_text::as_text(&spans))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn banner_field(data: &Map<String, Value>) -> Option<Banner> {
    let url = data.get("banner")?.get("url")?.as_str()?;
    if url.is_empty() {
        return None;
    }
    Some(Banner {
        url: url.to_string(),
    })
}

fn content_field(data: &Map<String, Value>) -> Vec<ContentBlock> {
    let Some(Value::Array(sections)) = data.get("content") else {
        return Vec::new();
    };
    sections
        .iter()
        .map(|section| ContentBlock {
            heading: match section.get("heading") {
                Some(Value::String(s)) => s.clone(),
                Some(v @ Value::Array(_)) => rich_text_value(v)
                    .map(|spans| rich_text::as_text(&spans))
                    .unwrap_or_default(),
                _ => String::new(),
            },
            body: section
                .get("body")
                .and_then(|v| rich_text_value(v))
                .unwrap_or_default(),
        })
        .collect()
}

/// Parse a rich text array, dropping runs that do not carry a `type`
fn rich_text_value(value: &Value) -> Option<Vec<RichTextSpan>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .collect(),
    )
}

/// Parse a publication timestamp
///
/// The CMS emits offsets without a colon (`+0000`), which RFC 3339 parsing
/// rejects, so try both forms.
fn parse_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_doc(value: Value) -> RawDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_full_document() {
        let doc = raw_doc(json!({
            "uid": "voyager-one",
            "type": "posts",
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "last_publication_date": "2021-03-16T10:00:00+0000",
            "data": {
                "title": "Voyager One",
                "subtitle": "A spacecraft leaves home",
                "author": "Ada",
                "banner": { "url": "https://images.example/banner.png" },
                "content": [
                    {
                        "heading": "Launch",
                        "body": [
                            { "type": "paragraph", "text": "It left in 1977." },
                            { "type": "paragraph", "text": "It kept going." }
                        ]
                    }
                ]
            }
        }));

        let post = normalize_post(&doc).unwrap();
        assert_eq!(post.uid, "voyager-one");
        assert_eq!(post.title, "Voyager One");
        assert_eq!(post.author, "Ada");
        assert_eq!(post.banner.as_ref().unwrap().url, "https://images.example/banner.png");
        assert_eq!(post.content.len(), 1);
        assert_eq!(post.content[0].heading, "Launch");
        assert_eq!(post.content[0].body.len(), 2);
        let date = post.first_publication_date.unwrap();
        assert_eq!(date.to_rfc3339(), "2021-03-15T19:25:28+00:00");
    }

    #[test]
    fn test_missing_uid_is_malformed() {
        let doc = raw_doc(json!({ "type": "posts", "data": { "title": "No uid" } }));
        let err = normalize_post(&doc).unwrap_err();
        assert!(matches!(err, Error::MalformedDocument("uid")));

        let doc = raw_doc(json!({ "uid": "", "data": {} }));
        assert!(normalize_summary(&doc).is_err());
    }

    #[test]
    fn test_gaps_map_to_stable_defaults() {
        let doc = raw_doc(json!({ "uid": "sparse", "data": {} }));
        let post = normalize_post(&doc).unwrap();
        assert_eq!(post.title, "");
        assert_eq!(post.subtitle, "");
        assert_eq!(post.author, "");
        assert_eq!(post.banner, None);
        assert!(post.content.is_empty());
        assert_eq!(post.first_publication_date, None);
    }

    #[test]
    fn test_rich_text_title_flattened() {
        let doc = raw_doc(json!({
            "uid": "rich",
            "data": {
                "title": [
                    { "type": "heading1", "text": "Rich" },
                    { "type": "heading1", "text": "Title" }
                ]
            }
        }));
        let post = normalize_post(&doc).unwrap();
        assert_eq!(post.title, "Rich Title");
    }

    #[test]
    fn test_body_runs_without_type_are_dropped() {
        let doc = raw_doc(json!({
            "uid": "odd",
            "data": {
                "content": [
                    { "heading": null, "body": [
                        { "type": "paragraph", "text": "kept" },
                        { "text": "no type" },
                        "not even an object"
                    ] }
                ]
            }
        }));
        let post = normalize_post(&doc).unwrap();
        assert_eq!(post.content[0].heading, "");
        let texts: Vec<_> = post.content[0].body.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["kept"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let doc = raw_doc(json!({
            "uid": "stable",
            "first_publication_date": "2021-04-20T08:00:00+0000",
            "data": {
                "title": "Stable",
                "subtitle": "Same in, same out",
                "author": "Ada",
                "banner": { "url": "https://images.example/s.png" },
                "content": [
                    { "heading": "H", "body": [ { "type": "paragraph", "text": "T" } ] }
                ]
            }
        }));
        let once = normalize_post(&doc).unwrap();

        // Rebuild the wire shape from the normalized post and normalize again
        let rebuilt = raw_doc(json!({
            "uid": once.uid,
            "first_publication_date": once.first_publication_date.map(|d| d.to_rfc3339()),
            "data": {
                "title": once.title,
                "subtitle": once.subtitle,
                "author": once.author,
                "banner": { "url": once.banner.as_ref().unwrap().url },
                "content": serde_json::to_value(&once.content).unwrap()
            }
        }));
        let twice = normalize_post(&rebuilt).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_listing() {
        let page: RawListingPage = serde_json::from_value(json!({
            "next_page": "https://repo.example/api/v2/documents/search?page=2",
            "results": [
                { "uid": "a", "data": { "title": "A" } },
                { "uid": "b", "data": { "title": "B" } }
            ]
        }))
        .unwrap();
        let listing = normalize_listing(&page).unwrap();
        assert_eq!(listing.posts.len(), 2);
        assert_eq!(listing.posts[0].uid, "a");
        assert!(listing.next_page.is_some());
    }

    #[test]
    fn test_listing_fails_on_malformed_member() {
        let page: RawListingPage = serde_json::from_value(json!({
            "results": [
                { "uid": "ok", "data": {} },
                { "data": { "title": "no uid" } }
            ]
        }))
        .unwrap();
        assert!(normalize_listing(&page).is_err());
    }

    #[test]
    fn test_listing_rejects_bad_cursor() {
        let page: RawListingPage = serde_json::from_value(json!({
            "next_page": "not a url",
            "results": []
        }))
        .unwrap();
        let err = normalize_listing(&page).unwrap_err();
        assert!(matches!(err, Error::InvalidCursor(_)));
    }
}
