//! SVG emission for shaped glyph runs.
//!
//! - `SvgPathPen`: collects a glyph outline as SVG path data
//! - `PathEmitter`: lays out a `GlyphRecord` sequence as one SVG document

pub mod path_emitter;
pub mod svg_pen;

pub use path_emitter::PathEmitter;
pub use svg_pen::SvgPathPen;
