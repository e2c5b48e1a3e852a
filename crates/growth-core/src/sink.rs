//! # Evaluation Sink
//!
//! The outward boundary a submitted evaluation is handed to. The core makes
//! exactly one call per successful submit and reports whatever the sink
//! answers; retries and delivery guarantees belong to the implementation.

use crate::wizard::CompetencyRating;
use crate::CompetencyId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A completed evaluation as handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Evaluation cycle label, e.g. "2025.1".
    pub cycle: String,
    pub ratings: BTreeMap<CompetencyId, CompetencyRating>,
}

/// Acknowledgment returned by a sink that accepted a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Sink-assigned sequence number.
    pub id: u64,
    /// User-facing status line, shown as-is.
    pub message: String,
}

/// Rejection reported by a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct SinkError {
    pub message: String,
}

impl SinkError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Destination for submitted evaluations.
pub trait EvaluationSink {
    /// Persist or forward a completed evaluation.
    fn save(&mut self, record: &EvaluationRecord) -> Result<Receipt, SinkError>;
}

impl<S: EvaluationSink + ?Sized> EvaluationSink for &mut S {
    fn save(&mut self, record: &EvaluationRecord) -> Result<Receipt, SinkError> {
        (**self).save(record)
    }
}

/// In-memory sink keeping every accepted record.
///
/// Can be switched into rejecting mode to exercise failure paths.
#[derive(Debug, Default)]
pub struct MemorySink {
    saved: Vec<EvaluationRecord>,
    reject_with: Option<String>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that refuses every submission with the given message.
    #[must_use]
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            saved: Vec::new(),
            reject_with: Some(message.into()),
        }
    }

    /// Records accepted so far, oldest first.
    #[must_use]
    pub fn saved(&self) -> &[EvaluationRecord] {
        &self.saved
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}

impl EvaluationSink for MemorySink {
    fn save(&mut self, record: &EvaluationRecord) -> Result<Receipt, SinkError> {
        if let Some(message) = &self.reject_with {
            return Err(SinkError::new(message.clone()));
        }
        self.saved.push(record.clone());
        Ok(Receipt {
            id: self.saved.len() as u64,
            message: format!("Evaluation for cycle {} submitted", record.cycle),
        })
    }
}

/// Acknowledges every record with a numbered receipt and keeps nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiptSink {
    issued: u64,
}

impl ReceiptSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Receipts handed out so far.
    #[must_use]
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

impl EvaluationSink for ReceiptSink {
    fn save(&mut self, record: &EvaluationRecord) -> Result<Receipt, SinkError> {
        self.issued += 1;
        Ok(Receipt {
            id: self.issued,
            message: format!("Evaluation for cycle {} submitted", record.cycle),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
