//! Load-once registry of parsed fonts.
//!
//! Parsing a font is the only costly, I/O-bound step of the pipeline, so a
//! `FontCache` hands out the same `Arc<FontResource>` for every request that
//! names the same file. The cache is an ordinary value: create it at startup
//! and pass it by reference to whoever needs fonts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::FontLoadError;
use crate::font_resource::FontResource;

/// Thread-safe cache of loaded fonts keyed by `(canonical path, face index)`.
#[derive(Default)]
pub struct FontCache {
    fonts: Mutex<HashMap<(PathBuf, u32), Arc<FontResource>>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached font for `path`, loading face 0 on first use.
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<Arc<FontResource>, FontLoadError> {
        self.get_or_load_with_index(path, 0)
    }

    /// Return the cached face `face_index` of `path`, loading it on first use.
    ///
    /// Failed loads are not cached; the next call retries.
    pub fn get_or_load_with_index(
        &self,
        path: impl AsRef<Path>,
        face_index: u32,
    ) -> Result<Arc<FontResource>, FontLoadError> {
        let path = path.as_ref();
        let canonical = std::fs::canonicalize(path).map_err(|source| FontLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let key = (canonical, face_index);

        // Held across the load so concurrent first requests parse only once.
        let mut fonts = self.fonts.lock();
        if let Some(font) = fonts.get(&key) {
            log::trace!("Font cache hit: {:?}", key.0);
            return Ok(Arc::clone(font));
        }

        let font = Arc::new(FontResource::load_with_index(&key.0, face_index)?);
        fonts.insert(key, Arc::clone(&font));
        Ok(font)
    }

    /// Number of distinct faces loaded.
    pub fn len(&self) -> usize {
        self.fonts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.lock().is_empty()
    }

    /// Drop all cached fonts. Outstanding `Arc`s stay valid.
    pub fn clear(&self) {
        self.fonts.lock().clear();
    }
}

impl std::fmt::Debug for FontCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontCache")
            .field("fonts", &self.len())
            .finish()
    }
}
