//! Top-level session owning the live stores
//!
//! The session is the single writer: it holds the current step and
//! template collection values, delegates every mutation to the pure store
//! operations, and swaps in the returned value on success. It also drives
//! the async file capability for document import and export, and holds
//! the ephemeral editing pointer while a step edit is in flight.

use std::path::PathBuf;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::document::{
    export_steps, import_steps, import_templates_into, suggested_filename, DocumentError,
    TemplateImportError,
};
use crate::io::{FileAccess, PickOutcome, SaveOutcome};
use crate::model::{DbSnapshot, DbTemplate, Step, StepPatch};
use crate::store::{StepStore, StoreError, SyncOutcome, TemplateStore};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("snapshot table name must not be empty")]
    EmptyTableName,
    #[error("file access failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TemplateImportError> for SessionError {
    fn from(err: TemplateImportError) -> Self {
        match err {
            TemplateImportError::Document(e) => SessionError::Document(e),
            TemplateImportError::Store(e) => SessionError::Store(e),
        }
    }
}

/// Whether a step commit creates a new step or edits an existing one.
///
/// The mode travels with the command; it is never inferred from whether
/// the editing pointer happens to be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    Create,
    Edit(usize),
}

/// Whether a snapshot commit appends or replaces an existing slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotMode {
    Append,
    Replace(usize),
}

/// Ephemeral pointer held while a step is open for editing; never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct EditingStep {
    pub index: usize,
    pub step: Step,
}

/// Result of driving an export through the file capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved(PathBuf),
    Cancelled,
}

/// Result of driving an import through the file capability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The whole step collection was replaced with `count` imported steps
    Replaced { count: usize },
    Cancelled,
}

/// Live storyboard session: empty at init, discarded at teardown
#[derive(Debug, Default)]
pub struct Session {
    steps: StepStore,
    templates: TemplateStore,
    editing: Option<EditingStep>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session over an existing step collection (for example one
    /// parsed from a document on disk)
    pub fn seeded(steps: StepStore) -> Self {
        Self {
            steps,
            ..Self::default()
        }
    }

    pub fn steps(&self) -> &StepStore {
        &self.steps
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn editing(&self) -> Option<&EditingStep> {
        self.editing.as_ref()
    }

    /// Stage the step at `index` for editing
    pub fn begin_edit(&mut self, index: usize) -> Result<(), SessionError> {
        let step = self
            .steps
            .get(index)
            .cloned()
            .ok_or(StoreError::IndexOutOfRange {
                index,
                len: self.steps.len(),
            })?;
        self.editing = Some(EditingStep { index, step });
        Ok(())
    }

    /// Drop the editing pointer without committing
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Commit a step draft: create appends, edit merges over the target.
    /// Either way the edit session ends.
    pub fn commit_step(&mut self, mode: StepMode, draft: StepPatch) -> Result<(), SessionError> {
        match mode {
            StepMode::Create => {
                self.steps = self.steps.create(draft.into_step(None));
                debug!(len = self.steps.len(), "Created step");
            }
            StepMode::Edit(index) => {
                self.steps = self.steps.update(index, draft).map_err(|e| {
                    warn!(index, "Step edit targeted a missing step");
                    e
                })?;
                debug!(index, "Updated step");
            }
        }
        self.editing = None;
        Ok(())
    }

    pub fn duplicate_step(&mut self, index: usize) -> Result<(), SessionError> {
        self.steps = self.steps.duplicate(index).map_err(log_index_error)?;
        debug!(index, "Duplicated step");
        Ok(())
    }

    pub fn delete_step(&mut self, index: usize) -> Result<(), SessionError> {
        self.steps = self.steps.delete(index).map_err(log_index_error)?;
        // indices after the deletion shifted; a staged edit would be stale
        self.editing = None;
        debug!(index, "Deleted step");
        Ok(())
    }

    pub fn sync_state(&mut self, index: usize) -> Result<SyncOutcome, SessionError> {
        let (steps, outcome) = self.steps.sync_state(index).map_err(log_index_error)?;
        self.steps = steps;
        debug!(index, ?outcome, "Synced state from previous step");
        Ok(outcome)
    }

    pub fn sync_db(&mut self, index: usize) -> Result<SyncOutcome, SessionError> {
        let (steps, outcome) = self.steps.sync_db(index).map_err(log_index_error)?;
        self.steps = steps;
        debug!(index, ?outcome, "Synced snapshots from previous step");
        Ok(outcome)
    }

    pub fn clear_states(&mut self, index: usize) -> Result<(), SessionError> {
        self.steps = self.steps.clear_states(index).map_err(log_index_error)?;
        Ok(())
    }

    pub fn clear_db(&mut self, index: usize) -> Result<(), SessionError> {
        self.steps = self.steps.clear_db(index).map_err(log_index_error)?;
        Ok(())
    }

    /// Attach or replace a snapshot on the step at `step_index`.
    ///
    /// Drafts may carry an empty table name while being edited, but a
    /// snapshot needs one before it lands on a step.
    pub fn commit_snapshot(
        &mut self,
        step_index: usize,
        snapshot: DbSnapshot,
        mode: SnapshotMode,
    ) -> Result<(), SessionError> {
        if snapshot.table_name.is_empty() {
            return Err(SessionError::EmptyTableName);
        }
        let slot = match mode {
            SnapshotMode::Append => None,
            SnapshotMode::Replace(i) => Some(i),
        };
        self.steps = self
            .steps
            .add_or_update_snapshot(step_index, snapshot, slot)
            .map_err(log_index_error)?;
        Ok(())
    }

    /// Add a template to the library (same non-empty table-name rule as
    /// step snapshots)
    pub fn add_template(&mut self, template: DbTemplate) -> Result<(), SessionError> {
        if template.table_name.is_empty() {
            return Err(SessionError::EmptyTableName);
        }
        self.templates = self.templates.add(template);
        Ok(())
    }

    /// Replace the snapshots of the step at `step_index` with the
    /// templates carried by `bytes`
    pub fn import_templates(
        &mut self,
        step_index: usize,
        bytes: &[u8],
    ) -> Result<(), SessionError> {
        self.steps = import_templates_into(&self.steps, step_index, bytes)?;
        Ok(())
    }

    /// Serialize the current steps and hand them to the file capability.
    ///
    /// A cancelled save resolves as [`ExportOutcome::Cancelled`]; nothing
    /// in the session changes either way.
    pub async fn export_to(
        &self,
        file_access: &dyn FileAccess,
        basename: Option<&str>,
    ) -> Result<ExportOutcome, SessionError> {
        let json = export_steps(self.steps.steps())?;
        let name = suggested_filename(basename, Utc::now());

        match file_access.save_document(&name, json.as_bytes()).await? {
            SaveOutcome::Saved(path) => {
                debug!(path = %path.display(), steps = self.steps.len(), "Exported storyboard");
                Ok(ExportOutcome::Saved(path))
            }
            SaveOutcome::Cancelled => Ok(ExportOutcome::Cancelled),
        }
    }

    /// Ask the file capability for a document and replace the whole step
    /// collection with its contents.
    ///
    /// A cancelled pick resolves as [`ImportOutcome::Cancelled`] with no
    /// mutation; a parse or shape failure is an error, also with no
    /// mutation.
    pub async fn import_from(
        &mut self,
        file_access: &dyn FileAccess,
    ) -> Result<ImportOutcome, SessionError> {
        let (name, bytes) = match file_access.open_document().await? {
            PickOutcome::Selected { name, bytes } => (name, bytes),
            PickOutcome::Cancelled => return Ok(ImportOutcome::Cancelled),
        };

        let steps = import_steps(&bytes)?;
        let count = steps.len();
        self.steps = StepStore::from_steps(steps);
        // the previous collection is gone; any staged edit with it
        self.editing = None;
        debug!(document = %name, count, "Replaced steps from imported document");
        Ok(ImportOutcome::Replaced { count })
    }
}

fn log_index_error(err: StoreError) -> StoreError {
    warn!(error = %err, "Store operation skipped");
    err
}
