//! glyphword: typeset single words into self-contained SVG documents.
//!
//! The pipeline is
//!
//! ```text
//! word ──> Shaper::process ──> Vec<GlyphRecord> ──> PathEmitter::render ──> SVG
//! ```
//!
//! [`Typesetter`] wires the pieces together from a [`config::Config`]; the
//! building blocks are re-exported from the workspace crates.

pub mod cli;
pub mod debug;
pub mod typeset;

pub use glyphword_config as config;
pub use glyphword_fonts as fonts;
pub use glyphword_render as render;

pub use typeset::{TypesetError, Typesetter, typeset};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
