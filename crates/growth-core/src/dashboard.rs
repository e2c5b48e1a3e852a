//! # Dashboard
//!
//! Landing-page summary for one person: cycle status and progress, the
//! actions still waiting on them, and goal/review counters.

use crate::pdi::GoalStatus;
use crate::session::Session;
use crate::team::{PEER_EVALS_EXPECTED, TeamMember};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    SelfEvaluation,
    PeerEvaluation,
    FeedbackSignature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionState {
    Ready,
    InProgress,
    Done,
    /// Waiting on someone else.
    Locked,
}

/// One card of the pending-actions row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub kind: ActionKind,
    pub title: String,
    pub detail: String,
    pub state: ActionState,
}

impl PendingAction {
    fn new(kind: ActionKind, title: &str, detail: impl Into<String>, state: ActionState) -> Self {
        Self {
            kind,
            title: title.to_string(),
            detail: detail.into(),
            state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStatus {
    pub cycle: String,
    pub deadline: NaiveDate,
    /// Open through the deadline day.
    pub open: bool,
    /// Evaluation progress, 0-100.
    pub progress: u8,
}

/// Counter row under the actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpis {
    /// Goals not yet completed, overdue ones included.
    pub active_goals: usize,
    pub overdue_goals: usize,
    /// Completed goals plus actions already done.
    pub completed_tasks: usize,
    /// Team members still missing peer evaluations.
    pub pending_peer_reviews: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub cycle: CycleStatus,
    pub actions: Vec<PendingAction>,
    pub kpis: Kpis,
}

impl DashboardSummary {
    #[must_use]
    pub fn build(
        session: &Session,
        team: &[TeamMember],
        deadline: NaiveDate,
        today: NaiveDate,
    ) -> Self {
        let wizard = &session.wizard;
        let awaiting_peers: Vec<&TeamMember> = team
            .iter()
            .filter(|m| m.peer_evals < PEER_EVALS_EXPECTED)
            .collect();

        let self_eval = if wizard.is_submitted() {
            ActionState::Done
        } else if wizard.ratings().is_empty() {
            ActionState::Ready
        } else {
            ActionState::InProgress
        };
        let peer = match awaiting_peers.first() {
            Some(m) => PendingAction::new(
                ActionKind::PeerEvaluation,
                "Peer Evaluation",
                format!("Evaluate: {}", m.name),
                ActionState::Ready,
            ),
            None => PendingAction::new(
                ActionKind::PeerEvaluation,
                "Peer Evaluation",
                "All peer reviews submitted",
                ActionState::Done,
            ),
        };
        let signature = match session.feedback.signed_on {
            Some(date) => (format!("Signed on {date}"), ActionState::Done),
            None if !wizard.is_submitted() => {
                ("Awaiting manager feedback".to_string(), ActionState::Locked)
            }
            None => ("Review and sign your feedback".to_string(), ActionState::Ready),
        };
        let actions = vec![
            PendingAction::new(
                ActionKind::SelfEvaluation,
                "Self-Evaluation",
                "Complete your self-assessment",
                self_eval,
            ),
            peer,
            PendingAction::new(
                ActionKind::FeedbackSignature,
                "Feedback Signature",
                signature.0,
                signature.1,
            ),
        ];

        let completed_goals = session
            .goals
            .goals()
            .filter(|g| g.status == GoalStatus::Completed)
            .count();
        let kpis = Kpis {
            active_goals: session.goals.len() - completed_goals,
            overdue_goals: session.goals.overdue(today).count(),
            completed_tasks: completed_goals
                + actions.iter().filter(|a| a.state == ActionState::Done).count(),
            pending_peer_reviews: awaiting_peers.len(),
        };

        Self {
            cycle: CycleStatus {
                cycle: wizard.cycle().to_string(),
                deadline,
                open: today <= deadline,
                progress: wizard.progress(),
            },
            actions,
            kpis,
        }
    }

    #[must_use]
    pub fn action(&self, kind: ActionKind) -> Option<&PendingAction> {
        self.actions.iter().find(|a| a.kind == kind)
    }
}

// =============================================================================
// TESTS
// =============================================================================
