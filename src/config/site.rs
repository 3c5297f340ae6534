//! Site configuration (_config.yml)

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,

    // Content source
    #[serde(default)]
    pub cms: CmsConfig,

    // Preview sessions
    #[serde(default)]
    pub preview: PreviewConfig,

    // Comments
    #[serde(default)]
    pub comments: CommentsConfig,

    // Server
    #[serde(default)]
    pub server: ServerConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Voyager".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),

            cms: CmsConfig::default(),
            preview: PreviewConfig::default(),
            comments: CommentsConfig::default(),
            server: ServerConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Headless CMS repository configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    /// Repository API endpoint, e.g. `https://myblog.cdn.prismic.io/api/v2`
    pub endpoint: String,
    /// Access token for private repositories
    pub access_token: Option<String>,
    /// Custom type holding blog posts
    pub post_type: String,
    /// Listing page size
    pub page_size: usize,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8091/api/v2".to_string(),
            access_token: None,
            post_type: "posts".to_string(),
            page_size: 10,
        }
    }
}

/// Preview session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Name of the session cookie carrying the preview ref
    pub cookie: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            cookie: "voyager_preview".to_string(),
        }
    }
}

/// Utterances comments configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    pub enable: bool,
    /// GitHub repository backing the comment threads, e.g. `user/blog`
    pub repo: String,
    pub issue_term: String,
    pub theme: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            enable: false,
            repo: String::new(),
            issue_term: "pathname".to_string(),
            theme: "preferred-color-scheme".to_string(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Voyager");
        assert_eq!(config.cms.post_type, "posts");
        assert_eq!(config.cms.page_size, 10);
        assert_eq!(config.server.port, 4000);
        assert!(!config.comments.enable);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
cms:
  endpoint: https://myblog.cdn.prismic.io/api/v2
  post_type: posts
  page_size: 2
comments:
  enable: true
  repo: user/blog
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.cms.endpoint, "https://myblog.cdn.prismic.io/api/v2");
        assert_eq!(config.cms.page_size, 2);
        assert!(config.comments.enable);
        assert_eq!(config.comments.repo, "user/blog");
        assert_eq!(config.comments.issue_term, "pathname");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: Disk Blog\ncms:\n  access_token: secret\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "Disk Blog");
        assert_eq!(config.cms.access_token.as_deref(), Some("secret"));
    }
}
