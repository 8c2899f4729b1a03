//! Path-backed file capability used by the CLI

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{FileAccess, PickOutcome, SaveOutcome};

/// File capability reading from a fixed source path and writing into a
/// fixed target directory.
///
/// The CLI has no picker, so "open" means reading the path given on the
/// command line; a missing source resolves as a cancelled pick rather
/// than an error, mirroring an interactive user backing out.
#[derive(Debug, Clone)]
pub struct DiskFileAccess {
    source: Option<PathBuf>,
    target_dir: PathBuf,
}

impl DiskFileAccess {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: None,
            target_dir: target_dir.into(),
        }
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }
}

#[async_trait]
impl FileAccess for DiskFileAccess {
    async fn open_document(&self) -> io::Result<PickOutcome> {
        let Some(path) = &self.source else {
            return Ok(PickOutcome::Cancelled);
        };

        let bytes = fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!(path = %path.display(), len = bytes.len(), "Read storyboard document");
        Ok(PickOutcome::Selected { name, bytes })
    }

    async fn save_document(&self, suggested_name: &str, bytes: &[u8]) -> io::Result<SaveOutcome> {
        fs::create_dir_all(&self.target_dir).await?;
        let path = self.target_dir.join(suggested_name);
        fs::write(&path, bytes).await?;
        debug!(path = %path.display(), len = bytes.len(), "Wrote storyboard document");
        Ok(SaveOutcome::Saved(path))
    }
}
