//! Canonical JSON export of a step sequence
//!
//! Export fills defaults so the written document is fully populated:
//! absent strings become `""`, absent state `{}`, absent db `[]`. The one
//! exception is `line_number`, which is omitted entirely when the source
//! step has none rather than written as a zero range. The engine only
//! produces bytes plus a suggested filename; writing is the file
//! capability's job.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{DbSnapshot, LineRange, StateMap, Step};

use super::DocumentError;

/// Default basename used when the caller supplies none
const DEFAULT_BASENAME: &str = "codestoryboard-export";

/// One step in wire order, defaults filled
#[derive(Debug, Serialize, PartialEq)]
pub struct ExportStep {
    pub key: String,
    pub code: String,
    pub location: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<LineRange>,
    pub state: StateMap,
    pub db: Vec<DbSnapshot>,
}

impl From<&Step> for ExportStep {
    fn from(step: &Step) -> Self {
        Self {
            key: step.key.clone(),
            code: step.code.clone().unwrap_or_default(),
            location: step.location.clone().unwrap_or_default(),
            description: step.description.clone().unwrap_or_default(),
            line_number: step.line_number,
            state: step.state.clone().unwrap_or_default(),
            db: step.db.clone().unwrap_or_default(),
        }
    }
}

/// The document as written to disk
#[derive(Debug, Serialize, PartialEq)]
pub struct ExportDocument {
    pub steps: Vec<ExportStep>,
}

/// Build the wire representation of a step sequence
pub fn export_document(steps: &[Step]) -> ExportDocument {
    ExportDocument {
        steps: steps.iter().map(ExportStep::from).collect(),
    }
}

/// Serialize a step sequence as a pretty-printed document
pub fn export_steps(steps: &[Step]) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(&export_document(steps))?)
}

/// Serialize a step sequence without indentation
pub fn export_steps_compact(steps: &[Step]) -> Result<String, DocumentError> {
    Ok(serde_json::to_string(&export_document(steps))?)
}

/// Filename suggested for an export at `now` (UTC).
///
/// With a basename the stamp carries the time (`base_2024-06-01T12-30-00`),
/// without one it is the date-only default.
pub fn suggested_filename(basename: Option<&str>, now: DateTime<Utc>) -> String {
    match basename {
        Some(base) => format!("{}_{}.json", base, now.format("%Y-%m-%dT%H-%M-%S")),
        None => format!("{}-{}.json", DEFAULT_BASENAME, now.format("%Y-%m-%d")),
    }
}
