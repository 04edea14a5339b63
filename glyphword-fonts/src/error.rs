//! Typed error types for glyphword-fonts.
//!
//! Each failure category of the shaping pipeline gets its own type so callers
//! can tell a fatal startup problem (`FontLoadError`) apart from per-request
//! failures (`ShapingError`, `GlyphNotFoundError`).

use std::path::PathBuf;

use thiserror::Error;

/// A font binary could not be turned into a usable [`FontResource`].
///
/// Fatal at initialization: the pipeline cannot run without a valid font.
///
/// [`FontResource`]: crate::FontResource
#[derive(Debug, Error)]
pub enum FontLoadError {
    /// The font file could not be read from disk.
    #[error("Font file read failed for '{path}': {source}")]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a parseable TrueType/OpenType face.
    #[error("Font data could not be parsed (face index {face_index}): {reason}")]
    Parse {
        /// Face index that was requested within the binary.
        face_index: u32,
        /// Parser diagnostic.
        reason: String,
    },

    /// A table the pipeline depends on is absent.
    #[error("Font is missing the required '{table}' table")]
    MissingTable {
        /// OpenType table tag, e.g. `"OS/2"`.
        table: &'static str,
    },

    /// The `head` table declares a zero units-per-em.
    #[error("Font declares an invalid unitsPerEm of 0")]
    InvalidUnitsPerEm,

    /// A font family name could not be resolved to a file.
    #[error("Font family '{0}' not found on this system")]
    FamilyNotFound(String),
}

/// A glyph identifier has no entry in the loaded font's glyph table.
///
/// When produced during shaping this means the shaping engine and the font
/// disagree, which is an invariant violation and must be surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlyphNotFoundError {
    /// Numeric glyph id is outside `0..number_of_glyphs`.
    #[error("Glyph id {id} not present in font ({glyph_count} glyphs)")]
    Id {
        /// Requested glyph id.
        id: u32,
        /// Number of glyphs the font declares.
        glyph_count: u16,
    },

    /// No glyph carries this name in the `post`/`CFF` tables.
    #[error("Glyph named '{0}' not present in font")]
    Name(String),
}

/// The shaping request was rejected, either by validation or by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapingError {
    /// Not an OpenType script tag the engine knows.
    #[error("Invalid script tag '{0}': expected an OpenType script tag (e.g. \"latn\", \"dev2\")")]
    InvalidScript(String),

    /// Not a known OpenType language-system tag.
    #[error("Invalid language tag '{0}': expected an OpenType language system tag (e.g. \"TRK\")")]
    InvalidLanguage(String),

    /// The shaping engine refused the request.
    #[error("Shaping engine rejected the request: {0}")]
    Rejected(String),
}

/// Any failure of [`Shaper::process`](crate::Shaper::process).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error(transparent)]
    Shaping(#[from] ShapingError),

    #[error(transparent)]
    GlyphNotFound(#[from] GlyphNotFoundError),
}
