//! Blog HTTP server
//!
//! Four routes: the home listing, single post pages, and the two preview
//! endpoints. Handlers return crate errors and let [`Error`] render the
//! HTTP shape, except for missing posts which get the themed 404 page.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::cms::CmsClient;
use crate::config::SiteConfig;
use crate::content::parse_cursor;
use crate::error::{Error, Result};
use crate::pages;
use crate::preview::PreviewGate;
use crate::render::html;

pub mod session;

/// Server state shared across handlers
pub struct ServerState {
    config: SiteConfig,
    client: Arc<CmsClient>,
    gate: PreviewGate,
}

impl ServerState {
    pub fn new(config: SiteConfig) -> Result<Self> {
        let client = Arc::new(CmsClient::new(config.cms.clone())?);
        let gate = PreviewGate::new(client.clone());
        Ok(Self {
            config,
            client,
            gate,
        })
    }

    fn cookie_name(&self) -> &str {
        &self.config.preview.cookie
    }
}

/// Build the application router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/post/:uid", get(post_handler))
        .route("/api/preview", get(preview_handler))
        .route("/api/exit-preview", get(exit_preview_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the blog server
pub async fn start(config: SiteConfig, addr: SocketAddr) -> Result<()> {
    let state = Arc::new(ServerState::new(config)?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("Server running at http://{}", addr);
    println!("Press Ctrl+C to stop.");
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Deserialize)]
struct HomeQuery {
    cursor: Option<String>,
}

async fn home_handler(
    State(state): State<Arc<ServerState>>,
    jar: CookieJar,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>> {
    let preview_ref = session::preview_ref(&jar, state.cookie_name());
    let cursor = query.cursor.as_deref().map(parse_cursor).transpose()?;

    let listing = pages::home(&state.client, preview_ref.as_deref(), cursor.as_ref()).await?;
    Ok(Html(html::home_page(
        &state.config,
        &listing,
        preview_ref.is_some(),
    )))
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    jar: CookieJar,
    Path(uid): Path<String>,
) -> Response {
    let preview_ref = session::preview_ref(&jar, state.cookie_name());

    match pages::post_page(&state.client, &uid, preview_ref.as_deref()).await {
        Ok(page) => Html(html::post_page(&state.config, &page)).into_response(),
        Err(Error::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Html(html::not_found(&state.config)),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

#[derive(Deserialize)]
struct PreviewQuery {
    token: Option<String>,
    #[serde(rename = "documentId")]
    document_id: Option<String>,
}

/// Enter preview mode
///
/// A token the CMS accepts opens a session and redirects to the resolved
/// route. A rejected or missing token answers 401 without touching the
/// session.
async fn preview_handler(
    State(state): State<Arc<ServerState>>,
    jar: CookieJar,
    Query(query): Query<PreviewQuery>,
) -> Result<(CookieJar, Response)> {
    let token = query.token.as_deref().ok_or(Error::InvalidToken)?;
    let session = state.gate.enter(token, query.document_id.as_deref()).await?;

    let jar = session::set_preview(jar, state.cookie_name(), &session.preview_ref);
    Ok((jar, found(&session.location)))
}

/// Leave preview mode, whether or not a session exists
async fn exit_preview_handler(
    State(state): State<Arc<ServerState>>,
    jar: CookieJar,
) -> (CookieJar, Response) {
    let jar = session::clear_preview(jar, state.cookie_name());
    (jar, found("/"))
}

/// 302 redirect; axum's `Redirect` only offers 303/307/308
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
