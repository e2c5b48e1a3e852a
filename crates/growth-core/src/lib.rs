//! # Growth Core
//!
//! The deterministic evaluation engine behind Growth Hub.
//!
//! Two components carry the real logic:
//!
//! - [`wizard::EvaluationWizard`]: a linear stage machine collecting 1-5
//!   competency ratings, where extreme ratings need a written justification
//!   before the evaluation can be submitted.
//! - [`grid::TalentGrid`]: the 9-box classifier placing individuals into
//!   performance/potential cells without overlap.
//!
//! Everything else (dashboard, team overview, development goals, user
//! directory, feedback sign-off) is plain record keeping owned by a [`session::Session`].
//!
//! ## Design Principles
//!
//! - No I/O and no async. Boundaries are the [`records::RecordSource`] and
//!   [`sink::EvaluationSink`] traits.
//! - `BTreeMap` for every keyed collection so output order is stable.

pub mod competency;
pub mod dashboard;
pub mod directory;
pub mod error;
pub mod feedback;
pub mod grid;
pub mod pdi;
pub mod records;
pub mod session;
pub mod sink;
pub mod team;
pub mod wizard;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use competency::{Competency, CompetencyCatalog, Stage};
pub use dashboard::DashboardSummary;
pub use error::{GrowthError, Issue, IssueKind, ValidationError};
pub use grid::{Bucket, Cell, GridSummary, Individual, Placement, TalentGrid, bucket};
pub use records::{RecordSource, SeedRecords};
pub use session::Session;
pub use sink::{EvaluationRecord, EvaluationSink, MemorySink, Receipt, ReceiptSink, SinkError};
pub use wizard::{EvaluationWizard, StageChange, Transition, WizardPhase};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a competency, unique within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetencyId(pub String);

impl CompetencyId {
    /// Create a new competency identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompetencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompetencyId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// =============================================================================
// SCORE
// =============================================================================

/// A competency rating on the 1-5 scale.
///
/// Construction clamps into range, so a `Score` is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Lowest rating ("Below Expectations").
    pub const MIN: Score = Score(1);
    /// Highest rating ("Exceeds Expectations").
    pub const MAX: Score = Score(5);
    /// Midpoint shown for a competency that has not been rated yet.
    pub const NEUTRAL: Score = Score(3);

    /// Create a score, clamping into `1..=5`.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value.clamp(1, 5) as u8)
    }

    /// The raw value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Scores at either end of the scale need a written justification.
    #[must_use]
    pub fn is_extreme(self) -> bool {
        self == Self::MIN || self == Self::MAX
    }
}

impl From<i64> for Score {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_clamps_into_range() {
        assert_eq!(Score::new(0), Score::MIN);
        assert_eq!(Score::new(-7), Score::MIN);
        assert_eq!(Score::new(9), Score::MAX);
        assert_eq!(Score::new(4).value(), 4);
    }

    #[test]
    fn only_ends_of_scale_are_extreme() {
        let extremes: Vec<u8> = (1..=5)
            .map(Score::new)
            .filter(|s| s.is_extreme())
            .map(Score::value)
            .collect();
        assert_eq!(extremes, vec![1, 5]);
    }

    #[test]
    fn score_deserializes_with_clamping() {
        let score: Score = serde_json::from_str("12").unwrap();
        assert_eq!(score, Score::MAX);
        assert_eq!(serde_json::to_string(&Score::new(2)).unwrap(), "2");
    }

    #[test]
    fn competency_id_is_transparent_in_json() {
        let id = CompetencyId::new("leadership");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"leadership\"");
        assert_eq!(id.to_string(), "leadership");
    }
}
