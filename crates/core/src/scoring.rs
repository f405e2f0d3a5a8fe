//! Scoring module - line clear points
//!
//! A placement that clears N rows awards `LINE_SCORES[N]`. A single piece is
//! at most four rows tall, so larger counts are clamped to the four-row value.

use crate::types::LINE_SCORES;

/// Points awarded for clearing `lines` rows with one placement.
pub fn calculate_line_score(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}
