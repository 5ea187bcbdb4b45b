//! Greedy word-wrap of a message into width-bounded lines.

use super::measure::{FontStyle, WidthMeasure};

/// Split `message` into display lines no wider than `max_width`.
///
/// Words are taken on whitespace boundaries and packed greedily: each word
/// is tried on the current line (with a trailing space); when the candidate
/// would overflow and the current line already has content, the line is
/// committed and the word starts the next one. Committed lines keep their
/// trailing space, matching how the render target joins the gutter.
///
/// Edge behavior:
/// - a word wider than `max_width` is never split; it gets a line to itself
/// - an empty message yields no lines
/// - a non-positive `max_width` degenerates to one word per line
///
/// Pure function: safe to call concurrently from multiple rendering passes,
/// and re-invoked on every width change.
pub fn segment_message(
    message: &str,
    max_width: f64,
    style: &FontStyle,
    measure: &dyn WidthMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in message.split_whitespace() {
        let candidate = format!("{}{} ", current, word);
        if measure.measure(&candidate, style) > max_width && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, format!("{} ", word)));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
