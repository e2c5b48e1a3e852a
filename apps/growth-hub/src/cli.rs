//! # Command Line
//!
//! `clap` definitions plus one function per command. Commands return their
//! output as a `String` so tests can inspect it without capturing stdout.

use crate::adapters::{JsonFileSink, read_json, record_source};
use crate::api::{AppState, SHELL_ROUTES, create_router, views};
use crate::config::{HubConfig, ServeArgs};
use crate::error::AppError;
use clap::{Parser, Subcommand};
use growth_core::competency::CompetencyCatalog;
use growth_core::records::DEFAULT_CYCLE;
use growth_core::team::TeamSummary;
use growth_core::{
    CompetencyId, EvaluationWizard, GrowthError, RecordSource, Score, SeedRecords, TalentGrid,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "growth-hub", version, about = "Performance growth hub")]
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Classify individuals on the 9-box grid
    Grid {
        /// JSON array of individuals (seeded population when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Fill in and submit an evaluation from a ratings file
    Evaluate {
        /// JSON file: {"cycle": "...", "ratings": {"<competency>": {"score": 1-5, "justification": "..."}}}
        ratings: PathBuf,

        /// Where the submitted evaluation is written
        #[arg(long, short)]
        output: PathBuf,

        /// Require each stage to be complete before moving to the next one
        #[arg(long)]
        gate_next: bool,
    },

    /// Show evaluation progress of the team
    Team,

    /// List the pages of the application shell
    Routes,
}

// =============================================================================
// GRID
// =============================================================================

pub fn cmd_grid(input: Option<&Path>, json: bool) -> Result<String, AppError> {
    let individuals = record_source(input)?.individuals();
    if json {
        return Ok(serde_json::to_string_pretty(&views::grid(&individuals))?);
    }

    let grid = TalentGrid::classify(&individuals);
    let mut lines = vec![format!("9-Box Talent Matrix ({} people)", grid.len())];
    for cell in grid.view() {
        let names: Vec<&str> = cell.members.iter().map(|p| p.individual.first_name()).collect();
        lines.push(format!(
            "  [{},{}] {:<30} {}",
            cell.x,
            cell.y,
            cell.info.label,
            if names.is_empty() { "-".to_string() } else { names.join(", ") }
        ));
    }
    let summary = grid.summary();
    lines.push(format!(
        "High potential: {} ({}%)",
        summary.high_potential,
        summary.percent(summary.high_potential)
    ));
    lines.push(format!("Stars: {} ({}%)", summary.stars, summary.percent(summary.stars)));
    lines.push(format!(
        "Development focus: {} ({}%)",
        summary.development_focus,
        summary.percent(summary.development_focus)
    ));
    Ok(lines.join("\n"))
}

// =============================================================================
// EVALUATE
// =============================================================================

#[derive(Debug, Deserialize)]
struct RatingsFile {
    #[serde(default)]
    cycle: Option<String>,
    ratings: BTreeMap<CompetencyId, RatingEntry>,
}

#[derive(Debug, Deserialize)]
struct RatingEntry {
    score: i64,
    #[serde(default)]
    justification: String,
}

/// Walk the wizard stage by stage with the ratings from `ratings`, then
/// submit to a JSON file at `output`.
pub fn cmd_evaluate(
    ratings: &Path,
    output: &Path,
    gate_next: bool,
    json: bool,
) -> Result<String, AppError> {
    let file: RatingsFile = read_json(ratings)?;
    let catalog = CompetencyCatalog::standard();
    if let Some(unknown) = file.ratings.keys().find(|id| !catalog.contains(id)) {
        return Err(GrowthError::UnknownCompetency(unknown.clone()).into());
    }

    let cycle = file.cycle.unwrap_or_else(|| DEFAULT_CYCLE.to_string());
    let mut wizard = EvaluationWizard::new(catalog, cycle);
    loop {
        let index = wizard.current_stage_index();
        let ids: Vec<CompetencyId> = wizard
            .catalog()
            .stage(index)
            .map(|s| s.competency_ids().cloned().collect())
            .unwrap_or_default();
        for id in &ids {
            if let Some(entry) = file.ratings.get(id) {
                wizard.set_rating(id, Score::new(entry.score))?;
                wizard.set_justification(id, entry.justification.clone())?;
            }
        }
        let change = if gate_next {
            wizard.try_advance()?
        } else {
            wizard.advance()
        };
        if !change.moved() {
            break;
        }
        tracing::debug!(from = change.from, to = change.to, "stage advanced");
    }

    let mut sink = JsonFileSink::new(output);
    let receipt = wizard.submit(&mut sink)?;
    if json {
        return Ok(serde_json::to_string_pretty(&json!({
            "receipt": receipt,
            "record": wizard.record(),
        }))?);
    }
    Ok(format!(
        "Evaluation for cycle {} submitted ({} ratings)\n{}",
        wizard.cycle(),
        wizard.ratings().len(),
        receipt.message
    ))
}

// =============================================================================
// TEAM / ROUTES
// =============================================================================

pub fn cmd_team(json: bool) -> Result<String, AppError> {
    let members = SeedRecords.team();
    if json {
        return Ok(serde_json::to_string_pretty(&views::team(&members))?);
    }

    let summary = TeamSummary::from_members(&members);
    let mut lines = vec![format!(
        "Team: {} members, {} completed, {} in progress, {} not started",
        summary.total, summary.completed, summary.in_progress, summary.not_started
    )];
    for m in &members {
        lines.push(format!(
            "  {:<20} {:<22} {:<12} {:>3}%  self: {:<12} peers: {:<7} manager: {}",
            m.name,
            m.role,
            m.status.to_string(),
            m.progress,
            m.self_eval.to_string(),
            m.peer_label(),
            m.manager_eval
        ));
    }
    Ok(lines.join("\n"))
}

pub fn cmd_routes(json: bool) -> Result<String, AppError> {
    if json {
        return Ok(serde_json::to_string_pretty(&SHELL_ROUTES)?);
    }
    Ok(SHELL_ROUTES
        .iter()
        .map(|r| format!("{:<12} {}", r.path, r.title))
        .collect::<Vec<_>>()
        .join("\n"))
}

// =============================================================================
// SERVE
// =============================================================================

pub async fn run_server(config: HubConfig) -> Result<(), AppError> {
    let records = record_source(config.individuals.as_deref())?;
    let addr = config.addr;
    let gate_next = config.gate_next;
    let max_sessions = config.max_sessions;
    let app = create_router(AppState::new(config, records));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, gate_next, max_sessions, "growth hub listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

// =============================================================================
// TESTS
// =============================================================================
