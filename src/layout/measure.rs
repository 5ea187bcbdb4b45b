//! Glyph-width measurement.
//!
//! Layout correctness depends on measurement and rendering sharing metrics,
//! so the font/style descriptor is always an explicit parameter rather than
//! a hidden global.

use std::fmt;

use unicode_width::UnicodeWidthStr;

/// Advance width of one monospace cell relative to the font size. Typical
/// monospace faces advance at ~0.6em per glyph.
const MONOSPACE_ADVANCE_RATIO: f64 = 0.6;

/// Font descriptor shared by measurement and rendering.
///
/// Displays in CSS shorthand order (`14px monospace`) so the same string can
/// be handed to a pixel-based render target.
#[derive(Debug, Clone, PartialEq)]
pub struct FontStyle {
    pub family: String,
    pub size_px: f64,
}

impl FontStyle {
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
        }
    }
}

impl Default for FontStyle {
    fn default() -> Self {
        Self::new("monospace", 14.0)
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

/// Measure the rendered width of a text run under a given style.
///
/// Implementations are pure: the same text and style always measure the
/// same, and a measurer holds no mutable state, so it is safe to share
/// across concurrent layout passes.
pub trait WidthMeasure: Send + Sync {
    fn measure(&self, text: &str, style: &FontStyle) -> f64;
}

/// Width measurement for monospace rendering.
///
/// Glyph advance is uniform, so width is the Unicode display-cell count
/// scaled by a per-cell advance. [`MonospaceMeasure::terminal`] uses one
/// unit per cell (terminal layout); [`MonospaceMeasure::for_pixels`] derives
/// the advance from the style's pixel size.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasure {
    mode: AdvanceMode,
}

#[derive(Debug, Clone, Copy)]
enum AdvanceMode {
    /// One layout unit per display cell, independent of the font size.
    Cell,
    /// `size_px * MONOSPACE_ADVANCE_RATIO` units per display cell.
    Pixel,
}

impl MonospaceMeasure {
    /// Terminal-cell measurement: one unit per display cell.
    pub fn terminal() -> Self {
        Self {
            mode: AdvanceMode::Cell,
        }
    }

    /// Pixel-space measurement derived from the style's font size.
    pub fn for_pixels() -> Self {
        Self {
            mode: AdvanceMode::Pixel,
        }
    }

    fn advance(&self, style: &FontStyle) -> f64 {
        match self.mode {
            AdvanceMode::Cell => 1.0,
            AdvanceMode::Pixel => style.size_px * MONOSPACE_ADVANCE_RATIO,
        }
    }
}

impl WidthMeasure for MonospaceMeasure {
    fn measure(&self, text: &str, style: &FontStyle) -> f64 {
        text.width() as f64 * self.advance(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_style_display() {
        assert_eq!(FontStyle::default().to_string(), "14px monospace");
        assert_eq!(FontStyle::new("Menlo", 12.0).to_string(), "12px Menlo");
    }

    #[test]
    fn test_terminal_measure_counts_cells() {
        let measure = MonospaceMeasure::terminal();
        let style = FontStyle::default();
        assert_eq!(measure.measure("", &style), 0.0);
        assert_eq!(measure.measure("hello", &style), 5.0);
        assert_eq!(measure.measure("a b", &style), 3.0);
    }

    #[test]
    fn test_terminal_measure_wide_glyphs() {
        let measure = MonospaceMeasure::terminal();
        let style = FontStyle::default();
        // CJK glyphs occupy two cells each.
        assert_eq!(measure.measure("漢字", &style), 4.0);
    }

    #[test]
    fn test_pixel_measure_scales_with_font_size() {
        let measure = MonospaceMeasure::for_pixels();
        let small = FontStyle::new("monospace", 10.0);
        let large = FontStyle::new("monospace", 20.0);
        let at_small = measure.measure("word", &small);
        let at_large = measure.measure("word", &large);
        assert!((at_large - at_small * 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_measure_is_deterministic() {
        let measure = MonospaceMeasure::for_pixels();
        let style = FontStyle::default();
        assert_eq!(
            measure.measure("same text", &style),
            measure.measure("same text", &style)
        );
    }
}
