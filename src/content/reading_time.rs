//! Reading time estimation
//!
//! Counts whitespace-delimited words across headings and body runs, then
//! divides by a fixed reading speed, rounding up. Every post reads for at
//! least one minute, even an empty one.

use crate::content::ContentBlock;

/// Assumed reading speed in words per minute
pub const WORDS_PER_MINUTE: usize = 200;

/// Estimated reading time in whole minutes, never zero
pub fn reading_minutes(content: &[ContentBlock]) -> u32 {
    word_count(content).div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

/// Number of words in all section headings and body runs
pub fn word_count(content: &[ContentBlock]) -> usize {
    content
        .iter()
        .map(|block| {
            block.heading.split_whitespace().count()
                + block
                    .body
                    .iter()
                    .map(|run| run.text.split_whitespace().count())
                    .sum::<usize>()
        })
        .sum()
}
