//! # Feedback Sign-off
//!
//! Manager feedback for a period, compared against the self-assessment,
//! which the employee acknowledges and then signs.

use crate::error::{GrowthError, GrowthResult};
use crate::Score;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Manager vs self score for one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillComparison {
    pub skill: String,
    pub manager: Score,
    #[serde(rename = "self")]
    pub self_score: Score,
}

impl SkillComparison {
    #[must_use]
    pub fn new(skill: impl Into<String>, manager: i64, self_score: i64) -> Self {
        Self {
            skill: skill.into(),
            manager: Score::new(manager),
            self_score: Score::new(self_score),
        }
    }

    /// Positive when the manager rated higher than the employee did.
    #[must_use]
    pub fn gap(&self) -> i8 {
        self.manager.value() as i8 - self.self_score.value() as i8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackSheet {
    /// Evaluation period, e.g. "2025.1".
    pub period: String,
    pub comparisons: Vec<SkillComparison>,
    pub strengths: String,
    pub development_areas: String,
    pub next_cycle_goals: Vec<String>,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub signed_on: Option<NaiveDate>,
}

impl FeedbackSheet {
    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.signed_on.is_some()
    }

    /// Tick or untick the acknowledgment box. Ignored once signed.
    pub fn acknowledge(&mut self, acknowledged: bool) {
        if !self.is_signed() {
            self.acknowledged = acknowledged;
        }
    }

    /// Sign the feedback. Requires acknowledgment; signing again returns the
    /// original date.
    pub fn sign(&mut self, today: NaiveDate) -> GrowthResult<NaiveDate> {
        if let Some(date) = self.signed_on {
            return Ok(date);
        }
        if !self.acknowledged {
            return Err(GrowthError::FeedbackNotAcknowledged);
        }
        self.signed_on = Some(today);
        Ok(today)
    }

    /// Skills where the two views differ, largest gap first.
    #[must_use]
    pub fn divergent_skills(&self) -> Vec<&SkillComparison> {
        let mut out: Vec<_> = self.comparisons.iter().filter(|c| c.gap() != 0).collect();
        out.sort_by_key(|c| std::cmp::Reverse(c.gap().unsigned_abs()));
        out
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> FeedbackSheet {
        FeedbackSheet {
            period: "2025.1".to_string(),
            comparisons: vec![
                SkillComparison::new("Leadership", 4, 4),
                SkillComparison::new("Communication", 5, 4),
                SkillComparison::new("Innovation", 3, 5),
            ],
            strengths: String::new(),
            development_areas: String::new(),
            next_cycle_goals: Vec::new(),
            acknowledged: false,
            signed_on: None,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap_or(NaiveDate::MIN)
    }

    #[test]
    fn signing_requires_acknowledgment() {
        let mut sheet = sheet();
        assert_eq!(sheet.sign(day(1)), Err(GrowthError::FeedbackNotAcknowledged));
        sheet.acknowledge(true);
        assert_eq!(sheet.sign(day(2)), Ok(day(2)));
        assert!(sheet.is_signed());
    }

    #[test]
    fn second_signature_keeps_first_date() {
        let mut sheet = sheet();
        sheet.acknowledge(true);
        let _ = sheet.sign(day(2));
        assert_eq!(sheet.sign(day(9)), Ok(day(2)));
        sheet.acknowledge(false);
        assert!(sheet.acknowledged);
    }

    #[test]
    fn gaps_and_divergence_order() {
        let sheet = sheet();
        let gaps: Vec<i8> = sheet.comparisons.iter().map(SkillComparison::gap).collect();
        assert_eq!(gaps, vec![0, 1, -2]);
        let skills: Vec<&str> = sheet
            .divergent_skills()
            .iter()
            .map(|c| c.skill.as_str())
            .collect();
        assert_eq!(skills, vec!["Innovation", "Communication"]);
    }
}
