//! File capability boundary
//!
//! Opening and saving documents are the only operations that leave the
//! synchronous core. They are modeled as an async capability whose
//! resolution is atomic: either the whole document is available or the
//! operation failed. A user cancelling a picker is a normal outcome, not
//! an error, and must never leave the session stuck.

pub mod disk;
pub mod mock;

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

pub use disk::DiskFileAccess;
pub use mock::MockFileAccess;

/// Result of asking the user to pick a document to open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickOutcome {
    Selected { name: String, bytes: Vec<u8> },
    Cancelled,
}

/// Result of asking the user where to save a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(PathBuf),
    Cancelled,
}

/// Capability for opening and saving storyboard documents.
///
/// Implemented by the surrounding view layer; the core only sees bytes
/// in, bytes out.
#[async_trait]
pub trait FileAccess: Send + Sync {
    /// Ask for a document to open, resolving with its full contents
    async fn open_document(&self) -> io::Result<PickOutcome>;

    /// Save `bytes` under `suggested_name` (the implementation may let
    /// the user rename or redirect it)
    async fn save_document(&self, suggested_name: &str, bytes: &[u8]) -> io::Result<SaveOutcome>;
}
