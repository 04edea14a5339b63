//! Word → SVG facade over font loading, shaping and path emission.

use std::sync::Arc;

use glyphword_config::{Config, ConfigError};
use glyphword_fonts::{
    FeatureSet, FontCache, FontLoadError, FontResource, GlyphRecord, ShapeError, Shaper,
    discovery,
};
use glyphword_render::PathEmitter;
use thiserror::Error;

/// Any failure of the typesetting facade.
#[derive(Debug, Error)]
pub enum TypesetError {
    /// Input is not a single word.
    #[error("Invalid word {0:?}: whitespace and control characters are not allowed")]
    InvalidWord(String),

    /// The config names neither a font file nor a font family.
    #[error("No font configured: set font_path or font_family in the config, or pass --font")]
    NoFont,

    #[error(transparent)]
    Font(#[from] FontLoadError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Typesets words against one loaded font.
///
/// Holds the immutable font plus the default shaping options; each call
/// shapes with a fresh [`Shaper`] so calls never affect each other.
#[derive(Debug, Clone)]
pub struct Typesetter {
    font: Arc<FontResource>,
    features: FeatureSet,
    script: Option<String>,
    language: Option<String>,
    right_to_left: bool,
    emitter: PathEmitter,
}

impl Typesetter {
    /// Typesetter with default features, guessed script, LTR and black fill.
    pub fn new(font: Arc<FontResource>) -> Self {
        Self {
            font,
            features: FeatureSet::default(),
            script: None,
            language: None,
            right_to_left: false,
            emitter: PathEmitter::default(),
        }
    }

    /// Resolve the configured font through `cache` and apply the config's
    /// shaping and output options.
    pub fn from_config(config: &Config, cache: &FontCache) -> Result<Self, TypesetError> {
        config.validate()?;

        let font = match (&config.font_path, &config.font_family) {
            (Some(path), _) => cache.get_or_load_with_index(path, config.face_index)?,
            (None, Some(family)) => {
                let location = discovery::find_family(family)
                    .ok_or_else(|| FontLoadError::FamilyNotFound(family.clone()))?;
                cache.get_or_load_with_index(&location.path, location.face_index)?
            }
            (None, None) => return Err(TypesetError::NoFont),
        };

        let features = config
            .features
            .iter()
            .map(|(tag, &enabled)| (tag.as_str(), enabled))
            .collect();

        Ok(Self {
            font,
            features,
            script: config.script.clone(),
            language: config.language.clone(),
            right_to_left: config.right_to_left,
            emitter: PathEmitter::new()
                .with_fill(config.fill.clone())
                .with_glyph_offsets(config.apply_glyph_offsets),
        })
    }

    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self
    }

    pub fn with_script(mut self, script: Option<String>) -> Self {
        self.script = script;
        self
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn with_right_to_left(mut self, right_to_left: bool) -> Self {
        self.right_to_left = right_to_left;
        self
    }

    pub fn with_emitter(mut self, emitter: PathEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn font(&self) -> &Arc<FontResource> {
        &self.font
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn features_mut(&mut self) -> &mut FeatureSet {
        &mut self.features
    }

    /// Shape `word` into glyph records (visual order).
    pub fn shape(&self, word: &str) -> Result<Vec<GlyphRecord<'_>>, TypesetError> {
        validate_word(word)?;
        let shaper = Shaper::with_features(&self.font, self.features.clone());
        let records = shaper.process(
            word,
            self.script.as_deref(),
            self.language.as_deref(),
            self.right_to_left,
        )?;
        Ok(records)
    }

    /// Shape and render `word`. An empty word yields an empty string.
    pub fn typeset(&self, word: &str) -> Result<String, TypesetError> {
        let records = self.shape(word)?;
        Ok(self.emitter.render(&records, self.font.metrics()))
    }
}

/// One-shot typesetting with the font and options from `config`.
///
/// The font is parsed once per `cache`; later calls with the same cache
/// reuse it.
pub fn typeset(
    config: &Config,
    cache: &FontCache,
    word: &str,
) -> Result<String, TypesetError> {
    Typesetter::from_config(config, cache)?.typeset(word)
}

fn validate_word(word: &str) -> Result<(), TypesetError> {
    if word.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(TypesetError::InvalidWord(word.to_string()));
    }
    Ok(())
}
