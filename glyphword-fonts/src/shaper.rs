//! Shaping orchestration: feature state + engine + font → glyph records.
//!
//! A `Shaper` is cheap to build (a font reference and a small feature map),
//! so the intended pattern is one shaper per request on top of a shared
//! [`FontResource`]. Records borrow the font, not the shaper, so feature
//! state can be changed while earlier results are still alive.

use crate::error::ShapeError;
use crate::features::FeatureSet;
use crate::font_resource::{FontResource, OutlineRef};
use crate::shaping_engine::{Direction, RustybuzzEngine, ShapeRequest, ShapingEngine};

/// One shaped glyph resolved to an outline of the loaded font.
///
/// Values are in font design units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRecord<'font> {
    pub outline: OutlineRef<'font>,
    /// Byte offset of the source cluster in the shaped text.
    pub cluster: u32,
    /// Horizontal offset applied before drawing (mark attachment).
    pub x_placement: i32,
    /// Vertical offset applied before drawing (mark stacking).
    pub y_placement: i32,
    /// Pen advance after drawing, along x.
    pub x_advance: i32,
    /// Pen advance after drawing, along y (0 for horizontal runs).
    pub y_advance: i32,
}

/// Sum of x advances over a record sequence.
pub fn total_x_advance(records: &[GlyphRecord<'_>]) -> i64 {
    records.iter().map(|r| r.x_advance as i64).sum()
}

/// Shapes words against one font with a mutable OpenType feature set.
pub struct Shaper<'font, E = RustybuzzEngine> {
    font: &'font FontResource,
    features: FeatureSet,
    /// Set restored by `reset_features`.
    initial_features: FeatureSet,
    engine: E,
}

impl<'font> Shaper<'font> {
    /// Shaper with the default feature set and the rustybuzz engine.
    pub fn new(font: &'font FontResource) -> Self {
        Self::with_features(font, FeatureSet::default())
    }

    pub fn with_features(font: &'font FontResource, features: FeatureSet) -> Self {
        Self::with_engine(font, features, RustybuzzEngine)
    }
}

impl<'font, E: ShapingEngine> Shaper<'font, E> {
    /// Shaper bound to a specific engine implementation.
    pub fn with_engine(font: &'font FontResource, features: FeatureSet, engine: E) -> Self {
        Self {
            font,
            initial_features: features.clone(),
            features,
            engine,
        }
    }

    pub fn font(&self) -> &'font FontResource {
        self.font
    }

    /// Current feature state.
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    /// Restore the feature set the shaper was built with.
    pub fn reset_features(&mut self) {
        self.features = self.initial_features.clone();
    }

    /// Set one feature for subsequent calls. Returns `false` for an invalid tag.
    pub fn set_feature(&mut self, tag: &str, enabled: bool) -> bool {
        self.features.set(tag, enabled)
    }

    /// Flip one feature for subsequent calls.
    pub fn toggle_feature(&mut self, tag: &str) -> Option<bool> {
        self.features.toggle(tag)
    }

    /// Shape `text` into glyph records in visual order.
    ///
    /// # Arguments
    /// * `text` - A single word; empty text yields an empty Vec
    /// * `script` - OpenType script tag (`"latn"`, `"dev2"`), guessed from
    ///   the text when `None`
    /// * `lang` - OpenType language-system tag (`"TRK"`), used for localized
    ///   forms (`locl`)
    /// * `right_to_left` - Shape as a right-to-left run
    ///
    /// # Errors
    /// `ShapeError::Shaping` for malformed tags or an engine rejection,
    /// `ShapeError::GlyphNotFound` if the engine returns a glyph id the font
    /// does not contain.
    pub fn process(
        &self,
        text: &str,
        script: Option<&str>,
        lang: Option<&str>,
        right_to_left: bool,
    ) -> Result<Vec<GlyphRecord<'font>>, ShapeError> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let request = ShapeRequest::new(script, lang, Direction::from_rtl(right_to_left))?;
        let shaped = self
            .engine
            .shape(self.font, text, &request, &self.features)?;

        log::debug!(
            "Shaped {:?} ({:?}, script={:?}, lang={:?}) into {} glyphs",
            text,
            request.direction(),
            request.script(),
            request.language(),
            shaped.len()
        );

        shaped
            .into_iter()
            .map(|glyph| -> Result<GlyphRecord<'font>, ShapeError> {
                let outline = self.font.outline(glyph.glyph_id).inspect_err(|e| {
                    log::error!("Shaping engine returned a glyph missing from the font: {e}");
                })?;
                Ok(GlyphRecord {
                    outline,
                    cluster: glyph.cluster,
                    x_placement: glyph.x_offset,
                    y_placement: glyph.y_offset,
                    x_advance: glyph.x_advance,
                    y_advance: glyph.y_advance,
                })
            })
            .collect()
    }
}
