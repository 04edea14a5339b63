//! Outline sink that records contours as SVG path data.

use std::fmt::Write;

use glyphword_fonts::OutlineBuilder;

/// Collects `M`/`L`/`Q`/`C`/`Z` commands in font units.
///
/// Coordinates are written with the shortest exact formatting (`100`, not
/// `100.0`), commands back to back: `M10 0L20 0Z`.
#[derive(Debug, Default, Clone)]
pub struct SvgPathPen {
    d: String,
}

impl SvgPathPen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path data collected so far.
    pub fn as_str(&self) -> &str {
        &self.d
    }

    pub fn into_string(self) -> String {
        self.d
    }

    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }

    fn push(&mut self, command: char, coords: &[f32]) {
        self.d.push(command);
        for (i, value) in coords.iter().enumerate() {
            if i > 0 {
                self.d.push(' ');
            }
            // Writing to a String cannot fail.
            let _ = write!(self.d, "{}", value);
        }
    }
}

impl OutlineBuilder for SvgPathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.push('M', &[x, y]);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.push('L', &[x, y]);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.push('Q', &[x1, y1, x, y]);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.push('C', &[x1, y1, x2, y2, x, y]);
    }

    fn close(&mut self) {
        self.d.push('Z');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_are_compact() {
        let mut pen = SvgPathPen::new();
        pen.move_to(10.0, 0.0);
        pen.line_to(20.5, -3.0);
        pen.quad_to(1.0, 2.0, 3.0, 4.0);
        pen.curve_to(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        pen.close();
        assert_eq!(pen.as_str(), "M10 0L20.5 -3Q1 2 3 4C1 2 3 4 5 6Z");
    }

    #[test]
    fn test_new_pen_is_empty() {
        let pen = SvgPathPen::new();
        assert!(pen.is_empty());
        assert_eq!(pen.into_string(), "");
    }
}
