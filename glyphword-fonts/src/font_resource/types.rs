//! Metric and outline handle types for [`FontResource`](super::FontResource).

use rustybuzz::ttf_parser::{GlyphId, OutlineBuilder};

use super::FontResource;

/// Vertical metrics and coordinate scale read from a font's metadata tables.
///
/// All values are in font design units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontMetrics {
    /// Coordinate scale of the glyph outlines (`head.unitsPerEm`). Always > 0.
    pub units_per_em: u16,
    /// Typographic ascender (`OS/2.sTypoAscender`).
    pub ascender: i16,
    /// Typographic descender (`OS/2.sTypoDescender`), usually negative.
    pub descender: i16,
}

impl FontMetrics {
    /// Vertical offset applied to every glyph so the run sits inside the
    /// `0..units_per_em` box after the y-flip.
    pub fn baseline_shift(&self) -> i32 {
        -(self.ascender as i32 + self.descender as i32)
    }
}

/// Handle to one glyph of a loaded font.
///
/// Borrows the [`FontResource`] it was resolved from, so it can never
/// outlive it.
#[derive(Clone, Copy)]
pub struct OutlineRef<'font> {
    pub(super) font: &'font FontResource,
    pub(super) id: GlyphId,
}

impl<'font> OutlineRef<'font> {
    /// Glyph index within the font.
    pub fn glyph_id(&self) -> u16 {
        self.id.0
    }

    /// Glyph name from the `post` or `CFF` table, if the font carries names.
    pub fn name(&self) -> Option<&'font str> {
        self.font.ttf().glyph_name(self.id)
    }

    /// Horizontal advance recorded in `hmtx`, in font units.
    pub fn advance(&self) -> Option<u16> {
        self.font.ttf().glyph_hor_advance(self.id)
    }

    /// Stream the glyph's contours into `builder` in font units (y-up).
    ///
    /// Returns `false` when the glyph has no contours (e.g. a space). That
    /// is a valid glyph, the builder simply receives no commands.
    pub fn draw(&self, builder: &mut dyn OutlineBuilder) -> bool {
        self.font.ttf().outline_glyph(self.id, builder).is_some()
    }

    /// The font this outline belongs to.
    pub fn font(&self) -> &'font FontResource {
        self.font
    }
}

impl PartialEq for OutlineRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.font, other.font) && self.id == other.id
    }
}

impl Eq for OutlineRef<'_> {}

impl std::fmt::Debug for OutlineRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineRef")
            .field("glyph_id", &self.id.0)
            .field("name", &self.name())
            .finish()
    }
}
