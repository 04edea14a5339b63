//! Parsed font binary with immutable metrics and glyph outline access.
//!
//! A `FontResource` owns the raw font bytes together with a rustybuzz face
//! that borrows them. Once loaded it is read-only and can be shared across
//! threads behind an `Arc` (see [`FontCache`](crate::FontCache)).

mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rustybuzz::ttf_parser::{self, FaceParsingError, GlyphId};

use crate::error::{FontLoadError, GlyphNotFoundError};

pub use types::{FontMetrics, OutlineRef};

/// A loaded, validated font face.
pub struct FontResource {
    /// Shaping face borrowing `data`. Declared first so it is dropped first.
    face: rustybuzz::Face<'static>,
    /// Raw font file bytes (TTF/OTF/TTC).
    data: Arc<Vec<u8>>,
    face_index: u32,
    metrics: FontMetrics,
    /// File the bytes came from, if loaded from disk.
    source: Option<PathBuf>,
}

impl std::fmt::Debug for FontResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontResource")
            .field("source", &self.source)
            .field("face_index", &self.face_index)
            .field("data_len", &self.data.len())
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl FontResource {
    /// Read and parse the first face of the font file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontLoadError> {
        Self::load_with_index(path, 0)
    }

    /// Read and parse face `face_index` of the font file at `path`.
    ///
    /// The index matters for TrueType Collection (.ttc) files only.
    pub fn load_with_index(path: impl AsRef<Path>, face_index: u32) -> Result<Self, FontLoadError> {
        let path = path.as_ref();
        log::info!("Loading font {:?} (face {})", path, face_index);
        let data = std::fs::read(path).map_err(|source| FontLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut font = Self::from_bytes(data, face_index)?;
        font.source = Some(path.to_path_buf());
        log::info!(
            "Loaded font {:?}: {} glyphs, unitsPerEm {}",
            path,
            font.glyph_count(),
            font.metrics.units_per_em
        );
        Ok(font)
    }

    /// Parse an in-memory font binary.
    pub fn from_bytes(data: Vec<u8>, face_index: u32) -> Result<Self, FontLoadError> {
        let data = Arc::new(data);

        // SAFETY: The bytes live in an `Arc` owned by the returned struct, so
        // the heap allocation does not move and outlives `face`. The face is
        // never handed out with the `'static` lifetime: public accessors
        // reborrow it for the lifetime of `&self`.
        let static_bytes: &'static [u8] =
            unsafe { std::mem::transmute::<&[u8], &'static [u8]>(data.as_slice()) };

        let ttf = ttf_parser::Face::parse(static_bytes, face_index).map_err(|e| match e {
            FaceParsingError::NoHeadTable => FontLoadError::MissingTable { table: "head" },
            FaceParsingError::NoHheaTable => FontLoadError::MissingTable { table: "hhea" },
            FaceParsingError::NoMaxpTable => FontLoadError::MissingTable { table: "maxp" },
            other => FontLoadError::Parse {
                face_index,
                reason: other.to_string(),
            },
        })?;

        let metrics = Self::read_metrics(&ttf)?;
        let face = rustybuzz::Face::from_face(ttf);

        Ok(FontResource {
            face,
            data,
            face_index,
            metrics,
            source: None,
        })
    }

    fn read_metrics(ttf: &ttf_parser::Face<'_>) -> Result<FontMetrics, FontLoadError> {
        let units_per_em = ttf.units_per_em();
        if units_per_em == 0 {
            return Err(FontLoadError::InvalidUnitsPerEm);
        }
        let os2 = ttf
            .tables()
            .os2
            .ok_or(FontLoadError::MissingTable { table: "OS/2" })?;
        Ok(FontMetrics {
            units_per_em,
            ascender: os2.typographic_ascender(),
            descender: os2.typographic_descender(),
        })
    }

    /// Units-per-em, ascender and descender.
    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    /// Resolve a glyph id to an outline handle.
    pub fn outline(&self, glyph_id: u32) -> Result<OutlineRef<'_>, GlyphNotFoundError> {
        let glyph_count = self.glyph_count();
        match u16::try_from(glyph_id) {
            Ok(id) if id < glyph_count => Ok(OutlineRef {
                font: self,
                id: GlyphId(id),
            }),
            _ => Err(GlyphNotFoundError::Id {
                id: glyph_id,
                glyph_count,
            }),
        }
    }

    /// Resolve a glyph name (e.g. `"uniFB01"`) to an outline handle.
    pub fn outline_by_name(&self, name: &str) -> Result<OutlineRef<'_>, GlyphNotFoundError> {
        self.ttf()
            .glyph_index_by_name(name)
            .map(|id| OutlineRef { font: self, id })
            .ok_or_else(|| GlyphNotFoundError::Name(name.to_string()))
    }

    /// Map a character through the font's cmap.
    pub fn glyph_for_char(&self, c: char) -> Option<u16> {
        self.ttf().glyph_index(c).map(|id| id.0)
    }

    /// Number of glyphs declared in `maxp`.
    pub fn glyph_count(&self) -> u16 {
        self.ttf().number_of_glyphs()
    }

    /// Face index within the font binary.
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    /// File the font was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Raw font bytes.
    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Face for the shaping engine.
    pub fn shaping_face(&self) -> &rustybuzz::Face<'_> {
        &self.face
    }

    pub(crate) fn ttf(&self) -> &ttf_parser::Face<'_> {
        self.face.as_ref()
    }
}
