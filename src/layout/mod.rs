//! Deterministic text layout: glyph-width measurement, greedy word-wrap,
//! and the viewport width budget.

mod measure;
mod segment;
mod viewport;

pub use measure::{FontStyle, MonospaceMeasure, WidthMeasure};
pub use segment::segment_message;
pub use viewport::{ReservedColumns, Viewport};
