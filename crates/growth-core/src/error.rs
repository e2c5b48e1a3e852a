//! # Error Types
//!
//! Validation failures are ordinary, recoverable outcomes: they carry the
//! full list of offending subjects so the caller can point at each one.
//! Sink failures are passed through verbatim.

use crate::sink::SinkError;
use crate::wizard::{Transition, WizardPhase};
use crate::CompetencyId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a subject failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// The competency was never rated.
    MissingScore,
    /// An extreme rating has no written justification.
    MissingJustification,
    /// A required form field is empty.
    MissingField,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingScore => "missing score",
            Self::MissingJustification => "justification required",
            Self::MissingField => "required field is empty",
        };
        f.write_str(text)
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Competency id or form field name.
    pub subject: String,
    pub kind: IssueKind,
}

impl Issue {
    #[must_use]
    pub fn new(subject: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            subject: subject.into(),
            kind,
        }
    }

    /// Issue against a competency.
    #[must_use]
    pub fn competency(id: &CompetencyId, kind: IssueKind) -> Self {
        Self::new(id.as_str(), kind)
    }

    /// Issue against an empty form field.
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::new(field, IssueKind::MissingField)
    }
}

fn render_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(|i| format!("{} ({})", i.subject, i.kind))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validation failure naming every offending subject, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("validation failed: {}", render_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<Issue>,
}

impl ValidationError {
    #[must_use]
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// `Ok(())` when there is nothing to report.
    pub fn check(issues: Vec<Issue>) -> Result<(), Self> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Self::new(issues))
        }
    }

    /// Subjects mentioned by at least one issue, deduplicated, first-seen order.
    #[must_use]
    pub fn subjects(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for issue in &self.issues {
            if !seen.contains(&issue.subject.as_str()) {
                seen.push(issue.subject.as_str());
            }
        }
        seen
    }

    /// Check whether a given subject has a specific issue.
    #[must_use]
    pub fn has(&self, subject: &str, kind: IssueKind) -> bool {
        self.issues
            .iter()
            .any(|i| i.subject == subject && i.kind == kind)
    }
}

/// Main error type for the core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrowthError {
    /// Completeness or presence rules not met.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The evaluation sink rejected a submission.
    #[error("persistence failed: {0}")]
    Persistence(#[from] SinkError),

    /// The competency is not part of the catalog.
    #[error("unknown competency: {0}")]
    UnknownCompetency(CompetencyId),

    /// The evaluation was already submitted and is read-only.
    #[error("evaluation already submitted")]
    AlreadySubmitted,

    /// The requested transition is not in the transition table.
    #[error("illegal transition {transition:?} from {from:?}")]
    IllegalTransition {
        from: WizardPhase,
        transition: Transition,
    },

    /// No user with this id in the directory.
    #[error("unknown user: {0}")]
    UnknownUser(u64),

    /// Feedback must be acknowledged before it can be signed.
    #[error("feedback must be acknowledged before signing")]
    FeedbackNotAcknowledged,
}

/// Result alias for core operations.
pub type GrowthResult<T> = Result<T, GrowthError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_issue_list_passes() {
        assert!(ValidationError::check(Vec::new()).is_ok());
    }

    #[test]
    fn display_lists_every_issue() {
        let err = ValidationError::new(vec![
            Issue::new("leadership", IssueKind::MissingScore),
            Issue::new("impact", IssueKind::MissingJustification),
        ]);
        assert_eq!(
            err.to_string(),
            "validation failed: leadership (missing score); impact (justification required)"
        );
    }

    #[test]
    fn validation_error_is_a_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(ValidationError::new(vec![Issue::missing_field("title")]));
        assert_eq!(err.to_string(), "validation failed: title (required field is empty)");
        assert!(err.source().is_none());
    }

    #[test]
    fn subjects_are_deduplicated_in_order() {
        let err = ValidationError::new(vec![
            Issue::new("b", IssueKind::MissingScore),
            Issue::new("a", IssueKind::MissingField),
            Issue::new("b", IssueKind::MissingJustification),
        ]);
        assert_eq!(err.subjects(), vec!["b", "a"]);
        assert!(err.has("b", IssueKind::MissingJustification));
        assert!(!err.has("a", IssueKind::MissingScore));
    }

    #[test]
    fn sink_error_converts_to_persistence() {
        let err: GrowthError = SinkError::new("disk full").into();
        assert_eq!(err.to_string(), "persistence failed: disk full");
    }
}
