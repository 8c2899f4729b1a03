//! Mock file capability for deterministic testing
//!
//! Implements [`FileAccess`] with scripted outcomes instead of touching
//! the filesystem. Use this in session tests that need to verify how the
//! core reacts to picks, cancellations, and I/O failures.

use std::io;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{FileAccess, PickOutcome, SaveOutcome};

/// Scripted file capability
#[derive(Debug, Default)]
pub struct MockFileAccess {
    open_outcome: Mutex<Option<PickOutcome>>,
    fail_open: bool,
    cancel_save: bool,
    saves: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MockFileAccess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next open to resolve with this document
    pub fn with_document(self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        *self.open_outcome.lock() = Some(PickOutcome::Selected {
            name: name.into(),
            bytes: bytes.into(),
        });
        self
    }

    /// Script opens to resolve as cancelled
    pub fn with_cancelled_open(self) -> Self {
        *self.open_outcome.lock() = Some(PickOutcome::Cancelled);
        self
    }

    /// Script opens to fail with an I/O error
    pub fn with_failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Script saves to resolve as cancelled
    pub fn with_cancelled_save(mut self) -> Self {
        self.cancel_save = true;
        self
    }

    /// Documents recorded by `save_document`, in call order
    pub fn saved_documents(&self) -> Vec<(String, Vec<u8>)> {
        self.saves.lock().clone()
    }
}

#[async_trait]
impl FileAccess for MockFileAccess {
    async fn open_document(&self) -> io::Result<PickOutcome> {
        if self.fail_open {
            return Err(io::Error::new(io::ErrorKind::Other, "scripted open failure"));
        }
        Ok(self
            .open_outcome
            .lock()
            .clone()
            .unwrap_or(PickOutcome::Cancelled))
    }

    async fn save_document(&self, suggested_name: &str, bytes: &[u8]) -> io::Result<SaveOutcome> {
        if self.cancel_save {
            return Ok(SaveOutcome::Cancelled);
        }
        self.saves
            .lock()
            .push((suggested_name.to_string(), bytes.to_vec()));
        Ok(SaveOutcome::Saved(suggested_name.into()))
    }
}
