//! Font loading and OpenType text shaping for glyphword.
//!
//! This crate provides:
//! - `FontResource`: a parsed font binary with immutable metrics and
//!   per-glyph outline access
//! - `FontCache`: load-once sharing of parsed fonts across requests
//! - `FeatureSet`: OpenType feature toggles (kern, locl, liga, calt, ...)
//! - `ShapingEngine`: the shaping capability, bound to rustybuzz by default
//! - `Shaper`: turns a word into an ordered sequence of `GlyphRecord`s
//!
//! # Architecture
//!
//! ```text
//! word ──> Shaper::process ──> ShapingEngine::shape ──> FontResource::outline
//!                                                          │
//!                                      Vec<GlyphRecord> <──┘
//! ```

pub mod discovery;
pub mod error;
pub mod features;
pub mod font_cache;
pub mod font_resource;
pub mod shaper;
pub mod shaping_engine;

// Re-export main types for convenience
pub use error::{FontLoadError, GlyphNotFoundError, ShapeError, ShapingError};
pub use features::{DEFAULT_FEATURES, FeatureSet};
pub use font_cache::FontCache;
pub use font_resource::{FontMetrics, FontResource, OutlineRef};
pub use shaper::{GlyphRecord, Shaper, total_x_advance};
pub use shaping_engine::{Direction, EngineGlyph, RustybuzzEngine, ShapeRequest, ShapingEngine};

/// Outline sink trait used by [`OutlineRef::draw`].
pub use rustybuzz::ttf_parser::OutlineBuilder;
