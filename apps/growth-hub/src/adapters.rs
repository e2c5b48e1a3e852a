//! # File Adapters
//!
//! JSON-file implementations of the core's boundary traits. The core stays
//! free of I/O; everything touching the filesystem lives here.

use crate::error::AppError;
use growth_core::competency::CompetencyCatalog;
use growth_core::directory::User;
use growth_core::feedback::FeedbackSheet;
use growth_core::pdi::DevelopmentGoal;
use growth_core::team::TeamMember;
use growth_core::{
    EvaluationRecord, EvaluationSink, Individual, Receipt, RecordSource, SeedRecords, SinkError,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Read and decode a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| AppError::json(path, e))
}

/// Load a JSON array of individuals for the talent grid.
pub fn load_individuals(path: &Path) -> Result<Vec<Individual>, AppError> {
    let individuals: Vec<Individual> = read_json(path)?;
    tracing::debug!(path = %path.display(), count = individuals.len(), "loaded individuals");
    Ok(individuals)
}

// =============================================================================
// RECORD SOURCE
// =============================================================================

/// Seed data with the talent-grid population replaced from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonRecords {
    individuals: Vec<Individual>,
}

impl JsonRecords {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        Ok(Self {
            individuals: load_individuals(path)?,
        })
    }
}

impl RecordSource for JsonRecords {
    fn catalog(&self) -> CompetencyCatalog {
        SeedRecords.catalog()
    }

    fn individuals(&self) -> Vec<Individual> {
        self.individuals.clone()
    }

    fn team(&self) -> Vec<TeamMember> {
        SeedRecords.team()
    }

    fn goals(&self) -> Vec<DevelopmentGoal> {
        SeedRecords.goals()
    }

    fn users(&self) -> Vec<User> {
        SeedRecords.users()
    }

    fn feedback(&self) -> FeedbackSheet {
        SeedRecords.feedback()
    }
}

/// Pick the record source for a run: a JSON population when given, seeds
/// otherwise.
pub fn record_source(
    individuals: Option<&Path>,
) -> Result<Box<dyn RecordSource + Send + Sync>, AppError> {
    match individuals {
        Some(path) => Ok(Box::new(JsonRecords::load(path)?)),
        None => Ok(Box::new(SeedRecords)),
    }
}

// =============================================================================
// EVALUATION SINK
// =============================================================================

/// Writes each submitted evaluation as pretty JSON to a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
    written: u64,
}

impl JsonFileSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            written: 0,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EvaluationSink for JsonFileSink {
    fn save(&mut self, record: &EvaluationRecord) -> Result<Receipt, SinkError> {
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| SinkError::new(format!("encode failed: {e}")))?;
        std::fs::write(&self.path, json)
            .map_err(|e| SinkError::new(format!("cannot write {}: {e}", self.path.display())))?;
        self.written += 1;
        tracing::info!(path = %self.path.display(), cycle = %record.cycle, "evaluation written");
        Ok(Receipt {
            id: self.written,
            message: format!("Evaluation saved to {}", self.path.display()),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn json_sink_writes_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut sink = JsonFileSink::new(&path);
        let record = EvaluationRecord {
            cycle: "2025.1".to_string(),
            ratings: BTreeMap::new(),
        };
        let receipt = sink.save(&record).unwrap();
        assert_eq!(receipt.id, 1);

        let back: EvaluationRecord = read_json(&path).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn json_sink_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = JsonFileSink::new(dir.path().join("missing").join("out.json"));
        let record = EvaluationRecord {
            cycle: "2025.1".to_string(),
            ratings: BTreeMap::new(),
        };
        let err = sink.save(&record).unwrap_err();
        assert!(err.message.starts_with("cannot write"));
    }

    #[test]
    fn json_records_replace_only_individuals() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("people.json");
        std::fs::write(
            &path,
            r#"[{"id": 9, "display_name": "Ada Lovelace", "performance": 95, "potential": 99}]"#,
        )
        .unwrap();

        let records = JsonRecords::load(&path).unwrap();
        assert_eq!(records.individuals().len(), 1);
        assert_eq!(records.team().len(), SeedRecords.team().len());
    }

    #[test]
    fn malformed_individuals_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_individuals(&path), Err(AppError::Json { .. })));
        assert!(matches!(
            load_individuals(&dir.path().join("absent.json")),
            Err(AppError::Io { .. })
        ));
    }
}
