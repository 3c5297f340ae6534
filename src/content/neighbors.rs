//! Previous/next post resolution
//!
//! Neighbors are defined by position in the repository-ordered listing,
//! not by publication date.

use crate::content::post::{NeighborPair, PostSummary};
use crate::error::{Error, Result};

/// Find the posts directly before and after `uid` in `ordered`
///
/// Fails with [`Error::NotFound`] when `uid` is not part of the listing.
pub fn resolve(uid: &str, ordered: &[PostSummary]) -> Result<NeighborPair> {
    let pos = ordered
        .iter()
        .position(|p| p.uid == uid)
        .ok_or_else(|| Error::NotFound(uid.to_string()))?;

    let previous = if pos > 0 {
        Some(ordered[pos - 1].clone())
    } else {
        None
    };
    let next = if pos + 1 < ordered.len() {
        Some(ordered[pos + 1].clone())
    } else {
        None
    };

    Ok(NeighborPair { previous, next })
}
