//! voyager-rs: a blog server backed by a headless CMS
//!
//! This crate pulls blog content from a Prismic-style Document API,
//! normalizes it into a strict post model and serves it over HTTP,
//! including incremental listing pagination and draft previews.

pub mod cms;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod listing;
pub mod pages;
pub mod preview;
pub mod render;
pub mod server;

use crate::cms::CmsClient;
use crate::error::Result;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

/// The main Voyager application
pub struct Voyager {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Client for the configured repository
    pub client: Arc<CmsClient>,
}

impl Voyager {
    /// Create an instance from a directory holding `_config.yml`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        let client = Arc::new(CmsClient::new(config.cms.clone())?);

        Ok(Self { config, client })
    }

    /// Serve the blog over HTTP
    pub async fn serve(&self, addr: SocketAddr) -> Result<()> {
        server::start(self.config.clone(), addr).await
    }

    /// List repository content on stdout
    pub async fn list(&self) -> Result<()> {
        commands::list::run(self).await
    }
}
