//! # Team Overview
//!
//! Evaluation progress per team member and the headline counts above the
//! member table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Peer evaluations expected per member.
pub const PEER_EVALS_EXPECTED: u8 = 3;

/// Overall evaluation status of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationStatus {
    Completed,
    InProgress,
    NotStarted,
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::NotStarted => "Not Started",
        })
    }
}

/// Status of one evaluation step (self or manager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    Completed,
    InProgress,
    Pending,
    NotStarted,
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::Pending => "Pending",
            Self::NotStarted => "Not Started",
        })
    }
}

/// One row of the team table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: u64,
    pub name: String,
    pub role: String,
    pub status: EvaluationStatus,
    /// 0-100.
    pub progress: u8,
    pub self_eval: StepStatus,
    pub peer_evals: u8,
    pub manager_eval: StepStatus,
}

impl TeamMember {
    /// "2 of 3" style peer counter.
    #[must_use]
    pub fn peer_label(&self) -> String {
        format!("{} of {}", self.peer_evals.min(PEER_EVALS_EXPECTED), PEER_EVALS_EXPECTED)
    }
}

/// Counts shown above the team table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
}

impl TeamSummary {
    #[must_use]
    pub fn from_members(members: &[TeamMember]) -> Self {
        members.iter().fold(
            Self {
                total: members.len(),
                ..Self::default()
            },
            |mut acc, m| {
                match m.status {
                    EvaluationStatus::Completed => acc.completed += 1,
                    EvaluationStatus::InProgress => acc.in_progress += 1,
                    EvaluationStatus::NotStarted => acc.not_started += 1,
                }
                acc
            },
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: u64, status: EvaluationStatus, peers: u8) -> TeamMember {
        TeamMember {
            id,
            name: format!("Member {id}"),
            role: "Consultant".to_string(),
            status,
            progress: 0,
            self_eval: StepStatus::NotStarted,
            peer_evals: peers,
            manager_eval: StepStatus::Pending,
        }
    }

    #[test]
    fn summary_counts_each_status() {
        let members = vec![
            member(1, EvaluationStatus::InProgress, 2),
            member(2, EvaluationStatus::Completed, 3),
            member(3, EvaluationStatus::NotStarted, 0),
            member(4, EvaluationStatus::InProgress, 2),
        ];
        let summary = TeamSummary::from_members(&members);
        assert_eq!(
            summary,
            TeamSummary {
                total: 4,
                completed: 1,
                in_progress: 2,
                not_started: 1,
            }
        );
    }

    #[test]
    fn peer_label_is_capped() {
        assert_eq!(member(1, EvaluationStatus::Completed, 2).peer_label(), "2 of 3");
        assert_eq!(member(1, EvaluationStatus::Completed, 7).peer_label(), "3 of 3");
    }

    #[test]
    fn status_uses_kebab_case_on_the_wire() {
        let json = serde_json::to_string(&EvaluationStatus::InProgress).unwrap_or_default();
        assert_eq!(json, "\"in-progress\"");
        assert_eq!(EvaluationStatus::NotStarted.to_string(), "Not Started");
    }
}
