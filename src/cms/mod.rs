//! CMS module - Document API client and wire shapes

mod client;
mod document;

pub use client::CmsClient;
pub use document::{RawDocument, RawListingPage, RepositoryInfo, RepositoryRef};
