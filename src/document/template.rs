//! Template import bridge
//!
//! Merges an externally supplied template document into one step's
//! snapshot list. The merge is a wholesale replacement of the step's db
//! sequence; any parse or shape failure leaves the store untouched.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::model::{normalize_snapshot, DbSnapshot};
use crate::store::{StepStore, StoreError};

use super::DocumentError;

#[derive(Debug, Error)]
pub enum TemplateImportError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parse a `{"dbTemplates": [...]}` document into snapshots.
///
/// Entries go through the same normalization as step snapshots, so legacy
/// bare-string columns and numeric type tags are accepted.
pub fn parse_templates(bytes: &[u8]) -> Result<Vec<DbSnapshot>, DocumentError> {
    let document: Value = serde_json::from_slice(bytes).map_err(DocumentError::Parse)?;

    let entries = document
        .get("dbTemplates")
        .and_then(Value::as_array)
        .ok_or(DocumentError::InvalidTemplateDocument)?;

    Ok(entries.iter().filter_map(normalize_snapshot).collect())
}

/// Replace the snapshot list of the step at `step_index` with the
/// templates carried by `bytes`.
///
/// Parsing happens first; an invalid document or out-of-range index
/// returns an error with the input store value still intact.
pub fn import_templates_into(
    store: &StepStore,
    step_index: usize,
    bytes: &[u8],
) -> Result<StepStore, TemplateImportError> {
    let templates = parse_templates(bytes)?;
    let count = templates.len();
    let store = store.replace_db(step_index, templates)?;
    debug!(step_index, count, "Replaced step snapshots from template document");
    Ok(store)
}
