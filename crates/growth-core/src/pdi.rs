//! # Personal Development Plan
//!
//! Development goals with deadlines, optional certification links and
//! progress. New goals come from a draft form that only checks presence.

use crate::error::{Issue, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Certifications a goal can be linked to: `(key, display name)`.
pub const CERTIFICATIONS: [(&str, &str); 3] = [
    ("aws", "AWS Solutions Architect"),
    ("pmp", "PMP Certification"),
    ("scrum", "Scrum Master"),
];

/// Resolve a certification key to its display name. Unknown keys are taken
/// as free text; `"none"` and blank mean no certification.
#[must_use]
pub fn resolve_certification(key: &str) -> Option<String> {
    let key = key.trim();
    if key.is_empty() || key.eq_ignore_ascii_case("none") {
        return None;
    }
    let name = CERTIFICATIONS
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, name)| *name)
        .unwrap_or(key);
    Some(name.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    Completed,
    InProgress,
    Overdue,
}

/// Colour of a goal's progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTone {
    OnTrack,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevelopmentGoal {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub certification: Option<String>,
    pub status: GoalStatus,
    /// 0-100.
    pub progress: u8,
}

impl DevelopmentGoal {
    /// Deadline strictly before `today`.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.deadline < today
    }

    /// Status as displayed on `today`: a goal past its deadline shows as
    /// overdue unless it was completed.
    #[must_use]
    pub fn display_status(&self, today: NaiveDate) -> GoalStatus {
        match self.status {
            GoalStatus::Completed => GoalStatus::Completed,
            _ if self.is_overdue(today) => GoalStatus::Overdue,
            status => status,
        }
    }

    #[must_use]
    pub fn progress_tone(&self, today: NaiveDate) -> ProgressTone {
        if self.status != GoalStatus::Completed && self.is_overdue(today) {
            ProgressTone::Alert
        } else {
            ProgressTone::OnTrack
        }
    }
}

/// Contents of the "Create New Goal" dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub deadline: Option<NaiveDate>,
    /// Certification key (`aws`, `pmp`, `scrum`, `none`) or free text.
    pub certification: String,
}

/// A person's goals keyed by id. Ids are handed out in increasing order, so
/// iteration follows creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalBoard {
    goals: BTreeMap<u64, DevelopmentGoal>,
    next_id: u64,
}

impl GoalBoard {
    #[must_use]
    pub fn new(goals: Vec<DevelopmentGoal>) -> Self {
        let goals: BTreeMap<u64, DevelopmentGoal> = goals.into_iter().map(|g| (g.id, g)).collect();
        let next_id = goals.keys().next_back().copied().unwrap_or(0) + 1;
        Self { goals, next_id }
    }

    pub fn goals(&self) -> impl Iterator<Item = &DevelopmentGoal> {
        self.goals.values()
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&DevelopmentGoal> {
        self.goals.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Goals displayed as overdue on `today`.
    pub fn overdue(&self, today: NaiveDate) -> impl Iterator<Item = &DevelopmentGoal> {
        self.goals()
            .filter(move |g| g.display_status(today) == GoalStatus::Overdue)
    }

    /// Create a goal from the dialog. Title and deadline are required.
    pub fn add_goal(&mut self, draft: GoalDraft) -> Result<&DevelopmentGoal, ValidationError> {
        let mut issues = Vec::new();
        if draft.title.trim().is_empty() {
            issues.push(Issue::missing_field("title"));
        }
        let Some(deadline) = draft.deadline else {
            issues.push(Issue::missing_field("deadline"));
            return Err(ValidationError::new(issues));
        };
        ValidationError::check(issues)?;

        let id = self.next_id;
        self.next_id += 1;
        Ok(self.goals.entry(id).or_insert(DevelopmentGoal {
            id,
            title: draft.title.trim().to_string(),
            description: draft.description,
            deadline,
            certification: resolve_certification(&draft.certification),
            status: GoalStatus::InProgress,
            progress: 0,
        }))
    }
}

// =============================================================================
// TESTS
// =============================================================================
