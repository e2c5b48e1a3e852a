//! # Session
//!
//! Everything one user edits during a visit: the evaluation form, their
//! development goals, the settings user list and the feedback sign-off.
//! A session is a plain owned value; nothing is shared between sessions.

use crate::directory::UserDirectory;
use crate::feedback::FeedbackSheet;
use crate::pdi::GoalBoard;
use crate::records::{RecordSource, SeedRecords};
use crate::wizard::EvaluationWizard;

#[derive(Debug, Clone)]
pub struct Session {
    pub wizard: EvaluationWizard,
    pub goals: GoalBoard,
    pub directory: UserDirectory,
    pub feedback: FeedbackSheet,
}

impl Session {
    /// Seed a fresh session from a record source.
    #[must_use]
    pub fn from_source<R: RecordSource + ?Sized>(source: &R) -> Self {
        Self {
            wizard: EvaluationWizard::new(source.catalog(), source.cycle()),
            goals: GoalBoard::new(source.goals()),
            directory: UserDirectory::new(source.users()),
            feedback: source.feedback(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::from_source(&SeedRecords)
    }
}

// =============================================================================
// TESTS
// =============================================================================
