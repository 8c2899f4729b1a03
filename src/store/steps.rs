//! Ordered step collection with pure copy-on-write operations
//!
//! Every operation borrows the store and returns a fresh value; the input
//! is never mutated. The caller (normally the session) holds the single
//! live store value and swaps it on success.

use thiserror::Error;
use uuid::Uuid;

use crate::model::{DbSnapshot, Step, StepPatch};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("step index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result of a sync operation; skips are reported, never fatal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Content was copied from the previous step
    Applied,
    /// Index 0 has no previous step to copy from
    NoPrevious,
    /// One side lacked the content the sync needed
    NothingToCopy,
}

/// Ordered collection of steps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepStore {
    steps: Vec<Step>,
}

impl StepStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_steps(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index < self.steps.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.steps.len(),
            })
        }
    }

    /// Append a step, assigning a fresh unique key only when the caller
    /// did not supply one
    pub fn create(&self, mut step: Step) -> Self {
        if step.key.is_empty() {
            step.key = Uuid::new_v4().to_string();
        }
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// Merge `patch` over the step at `index`, preserving its key
    pub fn update(&self, index: usize, patch: StepPatch) -> Result<Self, StoreError> {
        self.check_index(index)?;
        let mut steps = self.steps.clone();
        steps[index] = patch.apply(&steps[index]);
        Ok(Self { steps })
    }

    /// Insert a copy of the step at `index` immediately after it.
    ///
    /// The copy keeps the original's key; positions, not keys, are what
    /// disambiguate duplicates in a rendered list.
    pub fn duplicate(&self, index: usize) -> Result<Self, StoreError> {
        self.check_index(index)?;
        let mut steps = self.steps.clone();
        let copy = steps[index].clone();
        steps.insert(index + 1, copy);
        Ok(Self { steps })
    }

    pub fn delete(&self, index: usize) -> Result<Self, StoreError> {
        self.check_index(index)?;
        let mut steps = self.steps.clone();
        steps.remove(index);
        Ok(Self { steps })
    }

    /// Copy the previous step's state over the step at `index`.
    ///
    /// Applies only when both sides carry a non-empty state; index 0 and
    /// missing state are reported skips, not errors.
    pub fn sync_state(&self, index: usize) -> Result<(Self, SyncOutcome), StoreError> {
        self.check_index(index)?;
        if index == 0 {
            return Ok((self.clone(), SyncOutcome::NoPrevious));
        }

        let has_state = |step: &Step| step.state.as_ref().is_some_and(|s| !s.is_empty());
        if !has_state(&self.steps[index]) || !has_state(&self.steps[index - 1]) {
            return Ok((self.clone(), SyncOutcome::NothingToCopy));
        }

        let mut steps = self.steps.clone();
        steps[index].state = steps[index - 1].state.clone();
        Ok((Self { steps }, SyncOutcome::Applied))
    }

    /// Copy the previous step's snapshots over the step at `index`.
    ///
    /// The copy is deep: mutating the target's snapshots afterwards never
    /// reaches the source step.
    pub fn sync_db(&self, index: usize) -> Result<(Self, SyncOutcome), StoreError> {
        self.check_index(index)?;
        if index == 0 {
            return Ok((self.clone(), SyncOutcome::NoPrevious));
        }

        let has_db = self.steps[index - 1]
            .db
            .as_ref()
            .is_some_and(|db| !db.is_empty());
        if !has_db {
            return Ok((self.clone(), SyncOutcome::NothingToCopy));
        }

        let mut steps = self.steps.clone();
        steps[index].db = steps[index - 1].db.clone();
        Ok((Self { steps }, SyncOutcome::Applied))
    }

    /// Remove the state mapping entirely (absent, not empty)
    pub fn clear_states(&self, index: usize) -> Result<Self, StoreError> {
        self.check_index(index)?;
        let mut steps = self.steps.clone();
        steps[index].state = None;
        Ok(Self { steps })
    }

    /// Remove the snapshot list entirely (absent, not empty)
    pub fn clear_db(&self, index: usize) -> Result<Self, StoreError> {
        self.check_index(index)?;
        let mut steps = self.steps.clone();
        steps[index].db = None;
        Ok(Self { steps })
    }

    /// Replace the snapshot at `slot` when given and in range, otherwise
    /// append, initializing the list when absent
    pub fn add_or_update_snapshot(
        &self,
        index: usize,
        snapshot: DbSnapshot,
        slot: Option<usize>,
    ) -> Result<Self, StoreError> {
        self.check_index(index)?;
        let mut steps = self.steps.clone();
        let db = steps[index].db.get_or_insert_with(Vec::new);
        match slot {
            Some(i) if i < db.len() => db[i] = snapshot,
            _ => db.push(snapshot),
        }
        Ok(Self { steps })
    }

    /// Wholesale replacement of a step's snapshot list (template import)
    pub fn replace_db(&self, index: usize, snapshots: Vec<DbSnapshot>) -> Result<Self, StoreError> {
        self.check_index(index)?;
        let mut steps = self.steps.clone();
        steps[index].db = Some(snapshots);
        Ok(Self { steps })
    }
}
