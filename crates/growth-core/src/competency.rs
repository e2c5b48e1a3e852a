//! # Competency Catalog
//!
//! Competencies grouped into ordered evaluation stages. The catalog is
//! read-only once built; the wizard only ever looks things up in it.

use crate::CompetencyId;
use serde::{Deserialize, Serialize};

/// A named evaluation dimension rated 1-5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competency {
    pub id: CompetencyId,
    pub name: String,
    /// One-line description shown under the name.
    pub description: String,
    /// Longer guidance shown on hover.
    pub help: String,
}

impl Competency {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        help: impl Into<String>,
    ) -> Self {
        Self {
            id: CompetencyId::new(id),
            name: name.into(),
            description: description.into(),
            help: help.into(),
        }
    }
}

/// A group of competencies evaluated together, in wizard order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub label: String,
    pub competencies: Vec<Competency>,
}

impl Stage {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, competencies: Vec<Competency>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            competencies,
        }
    }

    /// Ids of this stage's competencies, in display order.
    pub fn competency_ids(&self) -> impl Iterator<Item = &CompetencyId> {
        self.competencies.iter().map(|c| &c.id)
    }
}

/// Ordered stages making up one evaluation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyCatalog {
    stages: Vec<Stage>,
}

impl CompetencyCatalog {
    /// Build a catalog from ordered stages.
    ///
    /// Empty stages are dropped; a wizard always has at least one stage to
    /// stand on, so an empty catalog gets a single empty stage.
    #[must_use]
    pub fn new(stages: Vec<Stage>) -> Self {
        let mut stages: Vec<Stage> = stages
            .into_iter()
            .filter(|s| !s.competencies.is_empty())
            .collect();
        if stages.is_empty() {
            stages.push(Stage::new("empty", "Empty", Vec::new()));
        }
        Self { stages }
    }

    /// The behavioral → technical → results form used for every cycle.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(vec![
            Stage::new(
                "behavioral",
                "Behavioral",
                vec![
                    Competency::new(
                        "leadership",
                        "Leadership",
                        "Ability to guide, inspire, and motivate team members",
                        "Evaluate how well the person takes initiative, makes decisions, and influences others positively.",
                    ),
                    Competency::new(
                        "communication",
                        "Communication",
                        "Effectiveness in conveying information clearly",
                        "Consider both verbal and written communication skills, active listening, and clarity of expression.",
                    ),
                    Competency::new(
                        "teamwork",
                        "Teamwork",
                        "Collaboration and contribution to team success",
                        "Assess cooperation with colleagues, willingness to help others, and contribution to team goals.",
                    ),
                ],
            ),
            Stage::new(
                "technical",
                "Technical",
                vec![
                    Competency::new(
                        "expertise",
                        "Technical Expertise",
                        "Proficiency in required technical skills",
                        "Evaluate the depth and breadth of technical knowledge relevant to the role.",
                    ),
                    Competency::new(
                        "innovation",
                        "Innovation",
                        "Ability to develop creative solutions",
                        "Consider new ideas proposed, process improvements, and creative problem-solving.",
                    ),
                ],
            ),
            Stage::new(
                "results",
                "Results",
                vec![
                    Competency::new(
                        "delivery",
                        "Delivery Quality",
                        "Quality and timeliness of work output",
                        "Assess the consistency of high-quality deliverables and meeting deadlines.",
                    ),
                    Competency::new(
                        "impact",
                        "Business Impact",
                        "Contribution to organizational goals",
                        "Evaluate the measurable impact on business objectives and key results.",
                    ),
                ],
            ),
        ])
    }

    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn stage(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    pub fn stages(&self) -> impl Iterator<Item = &Stage> {
        self.stages.iter()
    }

    /// Every competency across every stage, in wizard order.
    pub fn competencies(&self) -> impl Iterator<Item = &Competency> {
        self.stages.iter().flat_map(|s| s.competencies.iter())
    }

    #[must_use]
    pub fn competency(&self, id: &CompetencyId) -> Option<&Competency> {
        self.competencies().find(|c| &c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &CompetencyId) -> bool {
        self.competency(id).is_some()
    }

    /// Index of the stage holding a competency.
    #[must_use]
    pub fn stage_of(&self, id: &CompetencyId) -> Option<usize> {
        self.stages
            .iter()
            .position(|s| s.competencies.iter().any(|c| &c.id == id))
    }
}

impl Default for CompetencyCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

// =============================================================================
// TESTS
// =============================================================================
