//! Content-addressed caches for parsing and rendering

pub mod parse_cache;
pub mod render_cache;

pub use parse_cache::ParseCache;
pub use render_cache::{render_png_cached, RenderCache};

use sha2::{Digest, Sha256};

/// Hex SHA-256 of `bytes`, used as the cache key
pub fn content_key(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
