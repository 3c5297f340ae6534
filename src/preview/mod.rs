//! Preview session gate
//!
//! Entering preview mode hands a token and an optional document id to the
//! CMS. A rejected token never creates a session. A valid one yields the
//! ref to store in the session cookie plus the route to redirect to.
//! Leaving preview mode is a plain session clear and is idempotent, so it
//! happens entirely at the HTTP layer.

use crate::cms::{CmsClient, RawDocument};
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::info;

/// Validates preview tokens and resolves their landing route
pub struct PreviewGate {
    client: Arc<CmsClient>,
}

/// A successfully opened preview session
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewSession {
    /// Ref to carry in the session cookie for subsequent draft fetches
    pub preview_ref: String,
    /// Route the entry request redirects to
    pub location: String,
}

impl PreviewGate {
    pub fn new(client: Arc<CmsClient>) -> Self {
        Self { client }
    }

    /// Validate `token` and open a session
    ///
    /// A token the CMS rejects fails with [`Error::InvalidToken`]. A valid
    /// token pointing at a post lands on that post; one without a target
    /// lands on the home page.
    pub async fn enter(&self, token: &str, document_id: Option<&str>) -> Result<PreviewSession> {
        let post_type = self.client.post_type().to_string();
        let location = self
            .client
            .resolve_preview(token, document_id, |doc| link_resolver(&post_type, doc))
            .await?
            .ok_or(Error::InvalidToken)?;

        info!(%location, "preview session opened");
        Ok(PreviewSession {
            preview_ref: token.to_string(),
            location,
        })
    }
}

/// Site route for a document
///
/// Posts resolve to their page, anything else to the home page.
pub fn link_resolver(post_type: &str, doc: &RawDocument) -> String {
    match (doc.doc_type.as_deref(), doc.uid.as_deref()) {
        (Some(t), Some(uid)) if t == post_type => format!("/post/{uid}"),
        _ => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CmsConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn doc(value: serde_json::Value) -> RawDocument {
        serde_json::from_value(value).unwrap()
    }

    fn gate_for(server: &MockServer) -> PreviewGate {
        PreviewGate::new(Arc::new(
            CmsClient::new(CmsConfig {
                endpoint: format!("{}/api/v2", server.uri()),
                access_token: None,
                post_type: "posts".to_string(),
                page_size: 2,
            })
            .unwrap(),
        ))
    }

    #[test]
    fn test_link_resolver_routes_posts() {
        let post = doc(json!({ "type": "posts", "uid": "my-post" }));
        assert_eq!(link_resolver("posts", &post), "/post/my-post");
    }

    #[test]
    fn test_link_resolver_falls_back() {
        let page = doc(json!({ "type": "about_page", "uid": "about" }));
        assert_eq!(link_resolver("posts", &page), "/");

        let no_uid = doc(json!({ "type": "posts" }));
        assert_eq!(link_resolver("posts", &no_uid), "/");
    }

    #[tokio::test]
    async fn test_enter_opens_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .and(query_param("ref", "tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [ { "id": "X1", "type": "posts", "uid": "hello", "data": {} } ]
            })))
            .mount(&server)
            .await;

        let session = gate_for(&server).enter("tok-1", Some("X1")).await.unwrap();
        assert_eq!(session.preview_ref, "tok-1");
        assert_eq!(session.location, "/post/hello");
    }

    #[tokio::test]
    async fn test_enter_rejects_bad_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = gate_for(&server).enter("stale", Some("X1")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidToken));
    }

    #[tokio::test]
    async fn test_enter_without_target_lands_home() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
            .mount(&server)
            .await;

        let session = gate_for(&server).enter("tok-2", None).await.unwrap();
        assert_eq!(session.location, "/");
    }
}
