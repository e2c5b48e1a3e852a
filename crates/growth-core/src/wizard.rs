//! # Evaluation Wizard
//!
//! Linear stage machine for collecting competency ratings.
//!
//! ```text
//! Stage(0) ──Next──► Stage(1) ──Next──► … ──Next──► Stage(n-1) ──Submit──► Submitted
//!          ◄Previous─         ◄Previous─   ◄Previous─
//! ```
//!
//! Transitions are looked up in a fixed table ([`WizardPhase::target`]).
//! Navigation saturates at both ends; only `Submit` is validated, with
//! [`EvaluationWizard::try_advance`] available for callers that want every
//! `Next` gated the same way.

use crate::competency::{Competency, CompetencyCatalog};
use crate::error::{GrowthError, GrowthResult, Issue, IssueKind, ValidationError};
use crate::sink::{EvaluationRecord, EvaluationSink, Receipt};
use crate::{CompetencyId, Score};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// STATE MACHINE
// =============================================================================

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "stage", rename_all = "snake_case")]
pub enum WizardPhase {
    /// Filling in the stage at this index.
    Stage(usize),
    /// Submitted; terminal.
    Submitted,
}

/// User-triggered transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Next,
    Previous,
    Submit,
}

impl WizardPhase {
    /// Transition table for a wizard with `stage_count` stages.
    ///
    /// Returns `None` when the transition is not defined from this phase.
    #[must_use]
    pub fn target(self, transition: Transition, stage_count: usize) -> Option<WizardPhase> {
        let last = stage_count.saturating_sub(1);
        match (self, transition) {
            (Self::Stage(i), Transition::Next) if i < last => Some(Self::Stage(i + 1)),
            (Self::Stage(i), Transition::Previous) if i > 0 => Some(Self::Stage(i - 1)),
            (Self::Stage(i), Transition::Submit) if i == last => Some(Self::Submitted),
            _ => None,
        }
    }

    /// Every transition defined from this phase.
    #[must_use]
    pub fn allowed_transitions(self, stage_count: usize) -> Vec<Transition> {
        [Transition::Next, Transition::Previous, Transition::Submit]
            .into_iter()
            .filter(|t| self.target(*t, stage_count).is_some())
            .collect()
    }

    /// Look up a transition, failing when it is not in the table.
    pub fn validate_transition(
        self,
        transition: Transition,
        stage_count: usize,
    ) -> GrowthResult<WizardPhase> {
        self.target(transition, stage_count)
            .ok_or(GrowthError::IllegalTransition {
                from: self,
                transition,
            })
    }
}

// =============================================================================
// RATINGS
// =============================================================================

/// One competency's rating and justification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyRating {
    /// `None` until the rating is first changed.
    pub score: Option<Score>,
    /// Kept across score changes even when no longer required.
    #[serde(default)]
    pub justification: String,
}

impl CompetencyRating {
    /// True exactly when the current score is 1 or 5.
    #[must_use]
    pub fn needs_justification(&self) -> bool {
        self.score.is_some_and(Score::is_extreme)
    }

    fn has_justification(&self) -> bool {
        !self.justification.trim().is_empty()
    }

    /// Issue preventing this rating from being submitted, if any.
    #[must_use]
    pub fn issue(&self) -> Option<IssueKind> {
        if self.score.is_none() {
            Some(IssueKind::MissingScore)
        } else if self.needs_justification() && !self.has_justification() {
            Some(IssueKind::MissingJustification)
        } else {
            None
        }
    }
}

/// Stage index movement reported back to the surrounding shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageChange {
    pub from: usize,
    pub to: usize,
}

impl StageChange {
    #[must_use]
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

// =============================================================================
// VIEWS
// =============================================================================

/// One row of a rendered stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyView {
    pub competency: Competency,
    /// Score the slider sits on: the rating, or the neutral midpoint.
    pub displayed_score: Score,
    pub rated: bool,
    pub justification: String,
    pub justification_required: bool,
}

/// Stepper entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepMarker {
    pub id: String,
    pub label: String,
    /// Current or already passed.
    pub reached: bool,
}

/// Everything needed to render one stage of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageView {
    pub index: usize,
    pub id: String,
    pub label: String,
    pub phase: WizardPhase,
    pub is_first: bool,
    pub is_last: bool,
    pub steps: Vec<StepMarker>,
    pub competencies: Vec<CompetencyView>,
}

// =============================================================================
// WIZARD
// =============================================================================

/// Session-scoped state of one evaluation form.
#[derive(Debug, Clone)]
pub struct EvaluationWizard {
    catalog: CompetencyCatalog,
    cycle: String,
    phase: WizardPhase,
    ratings: BTreeMap<CompetencyId, CompetencyRating>,
}

impl EvaluationWizard {
    /// Start a wizard at the first stage.
    #[must_use]
    pub fn new(catalog: CompetencyCatalog, cycle: impl Into<String>) -> Self {
        Self {
            catalog,
            cycle: cycle.into(),
            phase: WizardPhase::Stage(0),
            ratings: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &CompetencyCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn cycle(&self) -> &str {
        &self.cycle
    }

    #[must_use]
    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.phase == WizardPhase::Submitted
    }

    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.catalog.stage_count()
    }

    /// Index of the stage on screen. After submission this stays on the
    /// final stage.
    #[must_use]
    pub fn current_stage_index(&self) -> usize {
        match self.phase {
            WizardPhase::Stage(i) => i,
            WizardPhase::Submitted => self.stage_count().saturating_sub(1),
        }
    }

    #[must_use]
    pub fn ratings(&self) -> &BTreeMap<CompetencyId, CompetencyRating> {
        &self.ratings
    }

    #[must_use]
    pub fn rating(&self, id: &CompetencyId) -> Option<&CompetencyRating> {
        self.ratings.get(id)
    }

    fn editable_entry(&mut self, id: &CompetencyId) -> GrowthResult<&mut CompetencyRating> {
        if self.is_submitted() {
            return Err(GrowthError::AlreadySubmitted);
        }
        if !self.catalog.contains(id) {
            return Err(GrowthError::UnknownCompetency(id.clone()));
        }
        Ok(self.ratings.entry(id.clone()).or_default())
    }

    /// Overwrite a competency's score. The justification is left untouched.
    pub fn set_rating(&mut self, id: &CompetencyId, score: Score) -> GrowthResult<()> {
        self.editable_entry(id)?.score = Some(score);
        Ok(())
    }

    /// Replace a competency's justification text.
    pub fn set_justification(&mut self, id: &CompetencyId, text: impl Into<String>) -> GrowthResult<()> {
        self.editable_entry(id)?.justification = text.into();
        Ok(())
    }

    /// True exactly when the competency's current score is 1 or 5.
    #[must_use]
    pub fn needs_justification(&self, id: &CompetencyId) -> bool {
        self.ratings
            .get(id)
            .is_some_and(CompetencyRating::needs_justification)
    }

    fn step(&mut self, transition: Transition) -> StageChange {
        let from = self.current_stage_index();
        if let Some(next) = self.phase.target(transition, self.stage_count()) {
            self.phase = next;
        }
        StageChange {
            from,
            to: self.current_stage_index(),
        }
    }

    /// Move to the next stage; stays put on the final stage.
    pub fn advance(&mut self) -> StageChange {
        self.step(Transition::Next)
    }

    /// Move to the previous stage; stays put on the first stage.
    pub fn retreat(&mut self) -> StageChange {
        self.step(Transition::Previous)
    }

    /// Gated `Next`: the current stage must be complete before moving on.
    pub fn try_advance(&mut self) -> GrowthResult<StageChange> {
        if self.is_submitted() {
            return Err(GrowthError::AlreadySubmitted);
        }
        ValidationError::check(self.stage_issues(self.current_stage_index()))?;
        Ok(self.advance())
    }

    /// Issues blocking one stage, in display order.
    #[must_use]
    pub fn stage_issues(&self, index: usize) -> Vec<Issue> {
        let Some(stage) = self.catalog.stage(index) else {
            return Vec::new();
        };
        stage
            .competency_ids()
            .filter_map(|id| self.issue_for(id).map(|kind| Issue::competency(id, kind)))
            .collect()
    }

    fn issue_for(&self, id: &CompetencyId) -> Option<IssueKind> {
        match self.ratings.get(id) {
            Some(rating) => rating.issue(),
            None => Some(IssueKind::MissingScore),
        }
    }

    /// Check every competency across every stage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let issues = (0..self.stage_count())
            .flat_map(|i| self.stage_issues(i))
            .collect();
        ValidationError::check(issues)
    }

    /// Share of competencies with no open issue, in whole percent rounded
    /// down. A submitted evaluation is always 100.
    #[must_use]
    pub fn progress(&self) -> u8 {
        if self.is_submitted() {
            return 100;
        }
        let total = self.catalog.competencies().count();
        if total == 0 {
            return 0;
        }
        let open: usize = (0..self.stage_count())
            .map(|i| self.stage_issues(i).len())
            .sum();
        u8::try_from(total.saturating_sub(open) * 100 / total).unwrap_or(100)
    }

    /// Snapshot of the ratings as handed to a sink.
    #[must_use]
    pub fn record(&self) -> EvaluationRecord {
        EvaluationRecord {
            cycle: self.cycle.clone(),
            ratings: self.ratings.clone(),
        }
    }

    /// Submit from the final stage.
    ///
    /// Fails with [`GrowthError::Validation`] listing every incomplete
    /// competency, or [`GrowthError::Persistence`] when the sink refuses. In
    /// both cases the wizard stays on the final stage.
    pub fn submit<S: EvaluationSink>(&mut self, mut sink: S) -> GrowthResult<Receipt> {
        if self.is_submitted() {
            return Err(GrowthError::AlreadySubmitted);
        }
        let next = self
            .phase
            .validate_transition(Transition::Submit, self.stage_count())?;
        self.validate()?;
        let receipt = sink.save(&self.record())?;
        self.phase = next;
        Ok(receipt)
    }

    /// Stepper markers for all stages.
    #[must_use]
    pub fn steps(&self) -> Vec<StepMarker> {
        let current = self.current_stage_index();
        self.catalog
            .stages()
            .enumerate()
            .map(|(i, stage)| StepMarker {
                id: stage.id.clone(),
                label: stage.label.clone(),
                reached: i <= current,
            })
            .collect()
    }

    /// Render data for one stage.
    #[must_use]
    pub fn stage_view(&self, index: usize) -> Option<StageView> {
        let stage = self.catalog.stage(index)?;
        let competencies = stage
            .competencies
            .iter()
            .map(|competency| {
                let rating = self.ratings.get(&competency.id);
                let score = rating.and_then(|r| r.score);
                CompetencyView {
                    competency: competency.clone(),
                    displayed_score: score.unwrap_or(Score::NEUTRAL),
                    rated: score.is_some(),
                    justification: rating.map(|r| r.justification.clone()).unwrap_or_default(),
                    justification_required: rating.is_some_and(CompetencyRating::needs_justification),
                }
            })
            .collect();
        Some(StageView {
            index,
            id: stage.id.clone(),
            label: stage.label.clone(),
            phase: self.phase,
            is_first: index == 0,
            is_last: index + 1 == self.stage_count(),
            steps: self.steps(),
            competencies,
        })
    }

    /// Render data for the stage on screen.
    #[must_use]
    pub fn current_view(&self) -> Option<StageView> {
        self.stage_view(self.current_stage_index())
    }
}

impl Default for EvaluationWizard {
    fn default() -> Self {
        Self::new(CompetencyCatalog::standard(), "2025.1")
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use proptest::prelude::*;

    fn id(s: &str) -> CompetencyId {
        CompetencyId::new(s)
    }

    /// Rate every competency with a non-extreme score.
    fn fill_neutral(wizard: &mut EvaluationWizard) {
        let ids: Vec<_> = wizard.catalog().competencies().map(|c| c.id.clone()).collect();
        for cid in ids {
            wizard.set_rating(&cid, Score::new(3)).unwrap();
        }
    }

    fn go_to_last(wizard: &mut EvaluationWizard) {
        while wizard.advance().moved() {}
    }

    #[test]
    fn progress_counts_complete_competencies() {
        let mut wizard = EvaluationWizard::default();
        assert_eq!(wizard.progress(), 0);
        wizard.set_rating(&id("leadership"), Score::new(3)).unwrap();
        wizard.set_rating(&id("communication"), Score::new(5)).unwrap();
        // 1 of 7 complete; the unjustified 5 still counts as open.
        assert_eq!(wizard.progress(), 14);
        fill_neutral(&mut wizard);
        assert_eq!(wizard.progress(), 100);
    }

    #[test]
    fn transition_table() {
        let n = 3;
        assert_eq!(
            WizardPhase::Stage(0).allowed_transitions(n),
            vec![Transition::Next]
        );
        assert_eq!(
            WizardPhase::Stage(1).allowed_transitions(n),
            vec![Transition::Next, Transition::Previous]
        );
        assert_eq!(
            WizardPhase::Stage(2).allowed_transitions(n),
            vec![Transition::Previous, Transition::Submit]
        );
        assert!(WizardPhase::Submitted.allowed_transitions(n).is_empty());
    }

    #[test]
    fn single_stage_wizard_can_only_submit() {
        assert_eq!(
            WizardPhase::Stage(0).allowed_transitions(1),
            vec![Transition::Submit]
        );
    }

    #[test]
    fn illegal_transition_is_reported() {
        let err = WizardPhase::Stage(0)
            .validate_transition(Transition::Submit, 3)
            .unwrap_err();
        assert_eq!(
            err,
            GrowthError::IllegalTransition {
                from: WizardPhase::Stage(0),
                transition: Transition::Submit,
            }
        );
    }

    #[test]
    fn navigation_saturates() {
        let mut wizard = EvaluationWizard::default();
        assert!(!wizard.retreat().moved());
        assert_eq!(wizard.current_stage_index(), 0);

        assert_eq!(wizard.advance(), StageChange { from: 0, to: 1 });
        assert_eq!(wizard.advance(), StageChange { from: 1, to: 2 });
        assert_eq!(wizard.advance(), StageChange { from: 2, to: 2 });
        assert_eq!(wizard.retreat(), StageChange { from: 2, to: 1 });
    }

    #[test]
    fn needs_justification_only_for_extremes() {
        let mut wizard = EvaluationWizard::default();
        let lead = id("leadership");
        assert!(!wizard.needs_justification(&lead));
        for value in 1..=5 {
            wizard.set_rating(&lead, Score::new(value)).unwrap();
            assert_eq!(wizard.needs_justification(&lead), value == 1 || value == 5);
        }
    }

    #[test]
    fn justification_survives_score_changes() {
        let mut wizard = EvaluationWizard::default();
        fill_neutral(&mut wizard);
        go_to_last(&mut wizard);

        let lead = id("leadership");
        wizard.set_rating(&lead, Score::MAX).unwrap();
        wizard.set_justification(&lead, "Led the migration").unwrap();
        wizard.set_rating(&lead, Score::new(3)).unwrap();

        assert!(!wizard.needs_justification(&lead));
        assert_eq!(
            wizard.rating(&lead).map(|r| r.justification.as_str()),
            Some("Led the migration")
        );

        let mut sink = MemorySink::new();
        assert!(wizard.submit(&mut sink).is_ok());
        assert!(wizard.is_submitted());
    }

    #[test]
    fn extreme_score_requires_justification_again() {
        let mut wizard = EvaluationWizard::default();
        fill_neutral(&mut wizard);
        go_to_last(&mut wizard);
        let impact = id("impact");

        wizard.set_rating(&impact, Score::MIN).unwrap();
        let err = wizard.validate().unwrap_err();
        assert!(err.has("impact", IssueKind::MissingJustification));

        wizard.set_justification(&impact, "   ").unwrap();
        assert!(wizard.validate().is_err());

        wizard.set_justification(&impact, "Missed both launches").unwrap();
        assert!(wizard.validate().is_ok());
    }

    #[test]
    fn submit_names_every_incomplete_competency() {
        let mut wizard = EvaluationWizard::default();
        wizard.set_rating(&id("leadership"), Score::new(4)).unwrap();
        wizard.set_rating(&id("teamwork"), Score::MAX).unwrap();
        go_to_last(&mut wizard);

        let mut sink = MemorySink::new();
        let err = wizard.submit(&mut sink).unwrap_err();
        let GrowthError::Validation(validation) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(
            validation.subjects(),
            vec!["communication", "teamwork", "expertise", "innovation", "delivery", "impact"]
        );
        assert!(validation.has("teamwork", IssueKind::MissingJustification));
        assert!(validation.has("communication", IssueKind::MissingScore));
        assert!(sink.is_empty());
        assert_eq!(wizard.phase(), WizardPhase::Stage(2));
    }

    #[test]
    fn submit_from_middle_stage_is_illegal() {
        let mut wizard = EvaluationWizard::default();
        fill_neutral(&mut wizard);
        let result = wizard.submit(MemorySink::new());
        assert!(matches!(result, Err(GrowthError::IllegalTransition { .. })));
    }

    #[test]
    fn sink_rejection_is_surfaced_and_state_kept() {
        let mut wizard = EvaluationWizard::default();
        fill_neutral(&mut wizard);
        go_to_last(&mut wizard);

        let err = wizard
            .submit(MemorySink::rejecting("HR service offline"))
            .unwrap_err();
        assert_eq!(err.to_string(), "persistence failed: HR service offline");
        assert_eq!(wizard.phase(), WizardPhase::Stage(2));

        let mut sink = MemorySink::new();
        let receipt = wizard.submit(&mut sink).unwrap();
        assert_eq!(receipt.id, 1);
        assert_eq!(sink.saved()[0].ratings.len(), 7);
    }

    #[test]
    fn submitted_wizard_is_read_only() {
        let mut wizard = EvaluationWizard::default();
        fill_neutral(&mut wizard);
        go_to_last(&mut wizard);
        wizard.submit(MemorySink::new()).unwrap();

        assert_eq!(
            wizard.set_rating(&id("impact"), Score::new(2)),
            Err(GrowthError::AlreadySubmitted)
        );
        assert_eq!(
            wizard.submit(MemorySink::new()).unwrap_err(),
            GrowthError::AlreadySubmitted
        );
        assert!(!wizard.advance().moved());
        assert!(!wizard.retreat().moved());
        assert_eq!(wizard.current_stage_index(), 2);
    }

    #[test]
    fn unknown_competency_is_rejected() {
        let mut wizard = EvaluationWizard::default();
        assert_eq!(
            wizard.set_rating(&id("juggling"), Score::new(2)),
            Err(GrowthError::UnknownCompetency(id("juggling")))
        );
        assert!(wizard.ratings().is_empty());
    }

    #[test]
    fn gated_advance_checks_current_stage_only() {
        let mut wizard = EvaluationWizard::default();
        let err = wizard.try_advance().unwrap_err();
        let GrowthError::Validation(validation) = err else {
            panic!("expected validation error");
        };
        assert_eq!(validation.subjects(), vec!["leadership", "communication", "teamwork"]);

        for cid in ["leadership", "communication", "teamwork"] {
            wizard.set_rating(&id(cid), Score::new(4)).unwrap();
        }
        assert_eq!(wizard.try_advance().unwrap(), StageChange { from: 0, to: 1 });
    }

    #[test]
    fn stage_view_shows_neutral_default() {
        let mut wizard = EvaluationWizard::default();
        wizard.set_rating(&id("communication"), Score::MIN).unwrap();

        let view = wizard.current_view().unwrap();
        assert!(view.is_first);
        assert!(!view.is_last);
        assert_eq!(view.label, "Behavioral");

        let lead = &view.competencies[0];
        assert_eq!(lead.displayed_score, Score::NEUTRAL);
        assert!(!lead.rated);

        let comm = &view.competencies[1];
        assert!(comm.rated);
        assert!(comm.justification_required);

        let reached: Vec<bool> = view.steps.iter().map(|s| s.reached).collect();
        assert_eq!(reached, vec![true, false, false]);
    }

    #[test]
    fn phase_serializes_with_stage_index() {
        let json = serde_json::to_string(&WizardPhase::Stage(1)).unwrap();
        assert_eq!(json, r#"{"phase":"stage","stage":1}"#);
        let json = serde_json::to_string(&WizardPhase::Submitted).unwrap();
        assert_eq!(json, r#"{"phase":"submitted"}"#);
    }

    proptest! {
        #[test]
        fn stage_index_stays_in_bounds(moves in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut wizard = EvaluationWizard::default();
            for forward in moves {
                let change = if forward { wizard.advance() } else { wizard.retreat() };
                prop_assert!(change.to < wizard.stage_count());
                prop_assert!(change.from.abs_diff(change.to) <= 1);
            }
        }

        #[test]
        fn justification_rule_matches_score(value in -10i64..20) {
            let mut wizard = EvaluationWizard::default();
            let lead = CompetencyId::new("leadership");
            let score = Score::new(value);
            wizard.set_rating(&lead, score).unwrap();
            prop_assert_eq!(
                wizard.needs_justification(&lead),
                score.value() == 1 || score.value() == 5
            );
        }
    }
}
