//! Psycho-emotional stress scoring for the defense-reaction questionnaire.
//!
//! Answers are matched against the question blocks of each category, the
//! matches that are also listed under effective thinking are discounted, and
//! the remainder is folded into a per-category stress factor and a
//! respondent-level stress index.

mod catalog;
mod engine;
mod report;
mod severity;
mod table;

pub use catalog::{read_bulk, Answer, AnswerSet, Category, CategoryCatalog, CategoryProvider};
pub use engine::{CategoryMetrics, CategoryResult, Diagnosis, Diagnostics, ScoreSummary, StatRow};
pub use report::{Page, Report};
pub use severity::{describe_severity, Severity};
pub use table::{ReactionEntry, ReactionTable, EFFECTIVE_THINKING, REACTION_TABLE};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    /// A question id that is not a non-negative integer.
    #[error("illegal question id: {0:?}")]
    IllegalQuestion(String),
    #[error("duplicate category id: {0}")]
    DuplicateCategory(u32),
    #[error("invalid reaction table: {0}")]
    InvalidTable(String),
}

/// Rounds half away from zero to `places` decimals.
///
/// The scaled value is first snapped to six decimals so that binary
/// representation error does not decide the direction, e.g. `1.005` rounds
/// to `1.01`.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = ((value * factor) * 1e6).round() / 1e6;
    scaled.round() / factor
}

pub(crate) fn nan_to_zero(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}
