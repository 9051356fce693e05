use serde::Serialize;
use std::path::{Path, PathBuf};

use super::content_key;
use crate::deck::CardLabels;
use crate::error::Result;
use crate::image_export::{encode_png, render_matrix_image, ImageLayout};
use crate::matrix::Matrix;

/// Persistent cache for rendered matrix images
/// Stores PNG files named after the hash of what was rendered
pub struct RenderCache {
    cache_dir: PathBuf,
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct RenderKey<'a> {
    matrix: &'a Matrix,
    column_labels: Vec<&'a str>,
    layout: ImageLayout,
}

impl RenderCache {
    /// Cache under the user cache directory
    pub fn new() -> Self {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sideboarder")
            .join("renders");
        Self::with_dir(cache_dir)
    }

    /// Cache in an explicit directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        if let Err(e) = std::fs::create_dir_all(&cache_dir) {
            log::warn!("Failed to create render cache directory: {}", e);
        }

        log::info!("Render cache directory: {:?}", cache_dir);
        Self { cache_dir }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Key for one rendering: hash of the canonical JSON of the matrix, the
    /// column labels and the layout
    pub fn key(matrix: &Matrix, labels: &CardLabels, layout: ImageLayout) -> Result<String> {
        let key = RenderKey {
            matrix,
            column_labels: matrix.column_labels(labels),
            layout,
        };
        Ok(content_key(&serde_json::to_vec(&key)?))
    }

    fn path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.png", key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.path(key).exists()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        match std::fs::read(self.path(key)) {
            Ok(bytes) => {
                log::debug!("Render cache hit for {}", key);
                Some(bytes)
            }
            Err(_) => None,
        }
    }

    pub fn insert(&self, key: &str, bytes: &[u8]) {
        if let Err(e) = std::fs::write(self.path(key), bytes) {
            log::warn!("Failed to cache render: {}", e);
        } else {
            log::debug!("Cached render {}", key);
        }
    }
}

/// Render `matrix` to PNG bytes, checking the cache first when one is given
pub fn render_png_cached(
    cache: Option<&RenderCache>,
    matrix: &Matrix,
    labels: &CardLabels,
    layout: ImageLayout,
) -> Result<Vec<u8>> {
    let Some(cache) = cache else {
        return encode_png(&render_matrix_image(matrix, labels, layout)?);
    };

    let key = RenderCache::key(matrix, labels, layout)?;
    if let Some(bytes) = cache.get(&key) {
        return Ok(bytes);
    }

    log::info!("Render cache miss, drawing {}x{} matrix", matrix.height(), matrix.width());
    let bytes = encode_png(&render_matrix_image(matrix, labels, layout)?)?;
    cache.insert(&key, &bytes);

    Ok(bytes)
}
