//! Content module - normalization and per-post derivations

pub mod neighbors;
mod normalize;
mod post;
pub mod reading_time;

pub use normalize::{normalize_listing, normalize_post, normalize_summary, parse_cursor};
pub use post::{
    Banner, ContentBlock, NeighborPair, Post, PostListing, PostPage, PostSummary, RichTextSpan,
};
