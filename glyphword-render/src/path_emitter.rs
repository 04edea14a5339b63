//! Glyph run → SVG document.
//!
//! Each record becomes one `<path>` whose outline is drawn in font units and
//! positioned with a per-glyph transform:
//!
//! ```text
//! scale(1 -1) translate(x_run + x_placement, -(ascender + descender) + y_run + y_placement)
//! ```
//!
//! `x_run`/`y_run` are the sums of the advances of all earlier records. The
//! flip turns the font's y-up coordinates into SVG's y-down space, and the
//! baseline shift centers the typographic extent in a viewBox that is one em
//! tall and as wide as the summed x advances.

use std::fmt::Write;

use glyphword_fonts::{FontMetrics, GlyphRecord, total_x_advance};

use crate::svg_pen::SvgPathPen;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Converts glyph records into a standalone SVG document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEmitter {
    fill: String,
    apply_glyph_offsets: bool,
}

impl Default for PathEmitter {
    fn default() -> Self {
        Self {
            fill: "black".to_string(),
            apply_glyph_offsets: true,
        }
    }
}

impl PathEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill paint for every path (any SVG paint value, e.g. `"#333"`).
    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Whether to apply x/y placements and vertical advances.
    ///
    /// With `false` every glyph sits on the same baseline at its running x
    /// advance; combining marks then render unattached.
    pub fn with_glyph_offsets(mut self, apply: bool) -> Self {
        self.apply_glyph_offsets = apply;
        self
    }

    pub fn fill(&self) -> &str {
        &self.fill
    }

    pub fn applies_glyph_offsets(&self) -> bool {
        self.apply_glyph_offsets
    }

    /// Render `records` (in visual order) as an SVG document.
    ///
    /// Returns an empty string for an empty run.
    pub fn render(&self, records: &[GlyphRecord<'_>], metrics: FontMetrics) -> String {
        if records.is_empty() {
            return String::new();
        }

        let width = total_x_advance(records);
        let baseline_shift = metrics.baseline_shift() as i64;
        let fill = escape_attr(&self.fill);

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="{SVG_NS}" viewBox="0 0 {width} {}">"#,
            metrics.units_per_em
        );

        let mut x_run: i64 = 0;
        let mut y_run: i64 = 0;
        for record in records {
            let mut pen = SvgPathPen::new();
            if !record.outline.draw(&mut pen) {
                log::trace!("Glyph {} has no contours", record.outline.glyph_id());
            }

            let (dx, dy) = if self.apply_glyph_offsets {
                (
                    x_run + record.x_placement as i64,
                    baseline_shift + y_run + record.y_placement as i64,
                )
            } else {
                (x_run, baseline_shift)
            };

            let _ = write!(
                svg,
                r#"<path transform="scale(1 -1) translate({dx} {dy})" d="{}" fill="{fill}"/>"#,
                pen.as_str()
            );

            x_run += record.x_advance as i64;
            y_run += record.y_advance as i64;
        }

        svg.push_str("</svg>");
        log::debug!(
            "Rendered {} glyphs into a {}x{} SVG",
            records.len(),
            width,
            metrics.units_per_em
        );
        svg
    }
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
