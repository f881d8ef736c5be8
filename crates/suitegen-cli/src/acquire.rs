//! Fetching a corpus into a temporary checkout.

use std::path::Path;
use std::process::{Command, ExitStatus};

use tempfile::TempDir;

#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    #[error("Failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),
    #[error("Failed to run git: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("git clone of {url} failed ({status})")]
    Clone { url: String, status: ExitStatus },
}

/// Shallow clone living in a temporary directory.
///
/// The checkout is removed when this value is dropped, on success and on
/// every error path alike.
#[derive(Debug)]
pub struct ClonedCorpus {
    dir: TempDir,
}

impl ClonedCorpus {
    pub fn fetch(url: &str) -> Result<Self, AcquireError> {
        let dir = tempfile::Builder::new()
            .prefix("suitegen-corpus-")
            .tempdir()
            .map_err(AcquireError::TempDir)?;
        log::info!("Cloning {url} into {}", dir.path().display());

        let status = Command::new("git")
            .args(["clone", "--depth", "1", "--quiet", url])
            .arg(dir.path())
            .status()
            .map_err(AcquireError::Spawn)?;
        if !status.success() {
            return Err(AcquireError::Clone {
                url: url.to_string(),
                status,
            });
        }

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
