//! Core `Config` struct, its defaults, builders and validation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use glyphword_fonts::{Direction, FeatureSet, ShapeRequest, ShapingError};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::LogLevel;

/// Configuration for the typesetting pipeline.
///
/// Every field has a serde default, so a partial YAML file (or an empty one)
/// is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    // ========================================================================
    // Font
    // ========================================================================
    /// Font file to typeset with. Takes precedence over `font_family`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    /// Installed font family to look up when no `font_path` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// Face index inside a font collection (`.ttc` / `.otc`)
    #[serde(default)]
    pub face_index: u32,

    // ========================================================================
    // Shaping
    // ========================================================================
    /// OpenType feature tag → enabled
    #[serde(default = "crate::defaults::features")]
    pub features: BTreeMap<String, bool>,

    /// OpenType script tag (e.g. "latn", "dev2"); guessed from the text when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,

    /// OpenType language-system tag (e.g. "TRK"), used for localized forms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Shape words as right-to-left runs
    #[serde(default)]
    pub right_to_left: bool,

    // ========================================================================
    // Output
    // ========================================================================
    /// SVG fill applied to every glyph path
    #[serde(default = "crate::defaults::fill")]
    pub fill: String,

    /// Apply per-glyph placements and vertical advances when emitting paths.
    /// `false` draws every glyph on a fixed baseline.
    #[serde(default = "crate::defaults::bool_true")]
    pub apply_glyph_offsets: bool,

    // ========================================================================
    // Debug Logging
    // ========================================================================
    /// Verbosity of the stderr log bridge
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_path: None,
            font_family: None,
            face_index: 0,
            features: crate::defaults::features(),
            script: None,
            language: None,
            right_to_left: false,
            fill: crate::defaults::fill(),
            apply_glyph_offsets: crate::defaults::bool_true(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the font file at `path` (clears any family lookup)
    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_path = Some(path.into());
        self.font_family = None;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_feature(mut self, tag: impl Into<String>, enabled: bool) -> Self {
        self.features.insert(tag.into(), enabled);
        self
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_right_to_left(mut self, right_to_left: bool) -> Self {
        self.right_to_left = right_to_left;
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Check field values that serde cannot express as types.
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tag) = self
            .features
            .keys()
            .find(|tag| !FeatureSet::is_valid_tag(tag))
        {
            return Err(ConfigError::Validation(format!(
                "features: '{tag}' is not a 4-character OpenType tag"
            )));
        }

        // Same check the shaper runs per call, so a bad tag fails at load.
        ShapeRequest::new(
            self.script.as_deref(),
            self.language.as_deref(),
            Direction::from_rtl(self.right_to_left),
        )
        .map_err(|e| match e {
            ShapingError::InvalidScript(_) => ConfigError::Validation(format!("script: {e}")),
            _ => ConfigError::Validation(format!("language: {e}")),
        })?;

        if self.fill.trim().is_empty() {
            return Err(ConfigError::Validation("fill: must not be empty".to_string()));
        }
        if self.fill.contains(['"', '<', '>', '&']) {
            return Err(ConfigError::Validation(format!(
                "fill: '{}' contains characters not allowed in an SVG attribute",
                self.fill
            )));
        }

        if self.font_path.is_some() && self.font_family.is_some() {
            log::warn!("Both font_path and font_family are set; font_path takes precedence");
        }

        Ok(())
    }
}
