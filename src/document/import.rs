//! Import of storyboard documents, tolerant of historical shapes

use serde_json::Value;
use tracing::debug;

use crate::model::{normalize_step, Step};

use super::DocumentError;

/// Parse a storyboard document into a canonical step sequence.
///
/// Structurally invalid JSON fails with [`DocumentError::Parse`]; a valid
/// payload whose top-level `steps` field is missing or not an array fails
/// with [`DocumentError::MalformedImport`]. Each entry is normalized
/// through the entity model, so any of the historically-seen step shapes
/// is accepted. Import is all-or-nothing; the caller decides how the
/// returned sequence replaces the live store.
pub fn import_steps(bytes: &[u8]) -> Result<Vec<Step>, DocumentError> {
    let document: Value = serde_json::from_slice(bytes)?;

    let entries = document
        .get("steps")
        .and_then(Value::as_array)
        .ok_or(DocumentError::MalformedImport)?;

    let steps: Vec<Step> = entries
        .iter()
        .enumerate()
        .map(|(position, raw)| normalize_step(raw, position))
        .collect();

    debug!(count = steps.len(), "Imported storyboard document");
    Ok(steps)
}
