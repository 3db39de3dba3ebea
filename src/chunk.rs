//! Partitioning content for batched submission.
//!
//! A translation service accepts a bounded number of text items per request.
//! [`chunk`] cuts a content sequence into contiguous slices of at most
//! `max_size` items; [`unchunk`] concatenates the service's replies back
//! together.
//!
//! ```rust
//! use serde_tokseq::{chunk, unchunk};
//!
//! let content: Vec<String> = (0..300).map(|i| i.to_string()).collect();
//! let chunks = chunk(&content, 128).unwrap();
//! let sizes: Vec<_> = chunks.iter().map(Vec::len).collect();
//! assert_eq!(sizes, vec![128, 128, 44]);
//! assert_eq!(unchunk(chunks), content);
//! ```

use crate::{Error, Result};

/// Default maximum number of content items per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 128;

/// A bounded, ordered run of content items.
pub type Chunk = Vec<String>;

/// Splits `content` into chunks of exactly `max_size` items, except the last,
/// which holds the remainder.
///
/// An empty input yields no chunks, and a length that is an exact multiple of
/// `max_size` yields no trailing empty chunk.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `max_size` is zero.
pub fn chunk(content: &[String], max_size: usize) -> Result<Vec<Chunk>> {
    if max_size == 0 {
        return Err(Error::invalid_argument("chunk size must be at least 1"));
    }
    Ok(content
        .chunks(max_size)
        .map(<[String]>::to_vec)
        .collect())
}

/// Concatenates chunks in order.
#[must_use]
pub fn unchunk<I>(chunks: I) -> Vec<String>
where
    I: IntoIterator<Item = Chunk>,
{
    chunks.into_iter().flatten().collect()
}
