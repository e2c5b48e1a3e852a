//! JSON payloads shared by the HTTP handlers and the CLI's `--json` output.

use chrono::NaiveDate;
use growth_core::competency::CompetencyCatalog;
use growth_core::directory::UserDirectory;
use growth_core::feedback::FeedbackSheet;
use growth_core::pdi::{DevelopmentGoal, GoalStatus};
use growth_core::team::{TeamMember, TeamSummary};
use growth_core::{EvaluationWizard, Individual, Placement, TalentGrid};
use serde_json::{Value, json};

fn placement(p: &Placement) -> Value {
    json!({
        "id": p.individual.id,
        "name": p.individual.display_name,
        "first_name": p.individual.first_name(),
        "initials": p.individual.initials(),
        "performance": p.individual.performance,
        "potential": p.individual.potential,
        "slot": p.slot,
        "left_pct": p.slot.left_pct(),
        "top_pct": p.slot.top_pct(),
    })
}

/// Nine cells in render order plus the headline counts.
pub fn grid(individuals: &[Individual]) -> Value {
    let grid = TalentGrid::classify(individuals);
    let summary = grid.summary();
    let cells: Vec<Value> = grid
        .view()
        .map(|cell| {
            json!({
                "x": cell.x,
                "y": cell.y,
                "label": cell.info.label,
                "tier": cell.info.tier,
                "color": cell.info.color,
                "members": cell.members.iter().map(placement).collect::<Vec<_>>(),
            })
        })
        .collect();
    json!({
        "cells": cells,
        "summary": {
            "total": summary.total,
            "high_potential": summary.high_potential,
            "high_potential_pct": summary.percent(summary.high_potential),
            "stars": summary.stars,
            "stars_pct": summary.percent(summary.stars),
            "development_focus": summary.development_focus,
            "development_focus_pct": summary.percent(summary.development_focus),
        },
    })
}

pub fn team(members: &[TeamMember]) -> Value {
    let rows: Vec<Value> = members
        .iter()
        .map(|m| {
            json!({
                "id": m.id,
                "name": m.name,
                "role": m.role,
                "status": m.status,
                "progress": m.progress,
                "self_eval": m.self_eval,
                "peer_evals": m.peer_label(),
                "manager_eval": m.manager_eval,
            })
        })
        .collect();
    json!({ "summary": TeamSummary::from_members(members), "members": rows })
}

/// Full wizard state: phase, allowed moves, current stage and open issues.
pub fn wizard(wizard: &EvaluationWizard) -> Value {
    let issues = wizard.validate().err().map(|e| e.issues).unwrap_or_default();
    json!({
        "cycle": wizard.cycle(),
        "phase": wizard.phase(),
        "submitted": wizard.is_submitted(),
        "stage_count": wizard.stage_count(),
        "allowed_transitions": wizard.phase().allowed_transitions(wizard.stage_count()),
        "stage": wizard.current_view(),
        "issues": issues,
    })
}

pub fn catalog(catalog: &CompetencyCatalog) -> Value {
    let stages: Vec<Value> = catalog
        .stages()
        .map(|s| json!({ "id": s.id, "label": s.label, "competencies": s.competencies }))
        .collect();
    json!({ "stages": stages })
}

pub fn goals<'a>(goals: impl IntoIterator<Item = &'a DevelopmentGoal>, today: NaiveDate) -> Value {
    let rows: Vec<Value> = goals
        .into_iter()
        .map(|g| {
            let mut shown = g.clone();
            shown.status = g.display_status(today);
            json!({
                "goal": shown,
                "overdue": shown.status == GoalStatus::Overdue,
                "tone": g.progress_tone(today),
            })
        })
        .collect();
    json!({ "today": today, "goals": rows })
}

pub fn directory(directory: &UserDirectory) -> Value {
    let by_role: Vec<Value> = directory
        .count_by_role()
        .into_iter()
        .map(|(role, count)| json!({ "role": role.label(), "count": count }))
        .collect();
    json!({
        "users": directory.users().collect::<Vec<_>>(),
        "by_role": by_role,
    })
}

pub fn feedback(sheet: &FeedbackSheet) -> Value {
    let comparisons: Vec<Value> = sheet
        .comparisons
        .iter()
        .map(|c| json!({ "comparison": c, "gap": c.gap() }))
        .collect();
    json!({
        "period": sheet.period,
        "comparisons": comparisons,
        "strengths": sheet.strengths,
        "development_areas": sheet.development_areas,
        "next_cycle_goals": sheet.next_cycle_goals,
        "acknowledged": sheet.acknowledged,
        "signed": sheet.is_signed(),
        "signed_on": sheet.signed_on,
    })
}
