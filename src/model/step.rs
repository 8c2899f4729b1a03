//! Step entity and the patch type used to edit it

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::db::DbSnapshot;

/// Line range attached to a step; either bound may be absent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LineRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
}

/// Variable name to scalar value, insertion order preserved for display
pub type StateMap = serde_json::Map<String, serde_json::Value>;

/// One storyboard entry.
///
/// Every field except `key` is optional: a step carrying nothing but its
/// key is legal and renders as a legacy placeholder. The key is assigned
/// once at creation and never regenerated by an edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<LineRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<StateMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db: Option<Vec<DbSnapshot>>,
}

impl Step {
    /// Create an empty step with a fresh unique key
    pub fn new() -> Self {
        Self::with_key(Uuid::new_v4().to_string())
    }

    /// Create an empty step with the given key
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: None,
            code: None,
            location: None,
            line_number: None,
            state: None,
            db: None,
        }
    }

    /// Whether the step carries no content beyond its key
    pub fn is_placeholder(&self) -> bool {
        self.description.is_none()
            && self.code.is_none()
            && self.location.is_none()
            && self.line_number.is_none()
            && self.state.is_none()
            && self.db.is_none()
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::new()
    }
}

/// Field-wise edit applied over an existing step.
///
/// `None` retains the current value, `Some` replaces it; the step's key is
/// never touched. Clearing `state` or `db` outright goes through the
/// dedicated store operations, not a patch.
#[derive(Debug, Clone, Default)]
pub struct StepPatch {
    pub description: Option<String>,
    pub code: Option<String>,
    pub location: Option<String>,
    pub line_number: Option<LineRange>,
    pub state: Option<StateMap>,
    pub db: Option<Vec<DbSnapshot>>,
}

impl StepPatch {
    /// Merge this patch over `existing`, preserving its key
    pub fn apply(self, existing: &Step) -> Step {
        Step {
            key: existing.key.clone(),
            description: self.description.or_else(|| existing.description.clone()),
            code: self.code.or_else(|| existing.code.clone()),
            location: self.location.or_else(|| existing.location.clone()),
            line_number: self.line_number.or(existing.line_number),
            state: self.state.or_else(|| existing.state.clone()),
            db: self.db.or_else(|| existing.db.clone()),
        }
    }

    /// Build a new step from this patch, with an empty key for the store
    /// to fill in (or `key` if the caller already has one)
    pub fn into_step(self, key: Option<String>) -> Step {
        Step {
            key: key.unwrap_or_default(),
            description: self.description,
            code: self.code,
            location: self.location,
            line_number: self.line_number,
            state: self.state,
            db: self.db,
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn code(mut self, text: impl Into<String>) -> Self {
        self.code = Some(text.into());
        self
    }

    pub fn location(mut self, text: impl Into<String>) -> Self {
        self.location = Some(text.into());
        self
    }

    pub fn line_number(mut self, range: LineRange) -> Self {
        self.line_number = Some(range);
        self
    }

    pub fn state(mut self, state: StateMap) -> Self {
        self.state = Some(state);
        self
    }

    pub fn db(mut self, db: Vec<DbSnapshot>) -> Self {
        self.db = Some(db);
        self
    }
}
