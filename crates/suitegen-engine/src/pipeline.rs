//! Loading a whole corpus and turning it into one spec.
//!
//! Every fixture file is read and resolved before the first line of output is
//! produced. A broken file stops the run with an error naming that file.

use std::path::{Path, PathBuf};

use crate::diagnostics::Diagnostics;
use crate::emit::{EmitOptions, Emission, emit_spec};
use crate::fixture::{FixtureError, read_fixture_file};
use crate::io::{IoError, scan_fixture_files};
use crate::models::Suite;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

/// Reads every fixture file of one corpus.
#[derive(Debug, Clone)]
pub struct SuiteLoader {
    corpus_root: PathBuf,
}

impl SuiteLoader {
    pub fn new(corpus_root: impl Into<PathBuf>) -> Self {
        Self {
            corpus_root: corpus_root.into(),
        }
    }

    pub fn corpus_root(&self) -> &Path {
        &self.corpus_root
    }

    /// Load all fixture files in path order.
    pub fn load(&self, diagnostics: &mut Diagnostics) -> Result<Suite, LoadError> {
        let paths = scan_fixture_files(&self.corpus_root)?;
        let mut suite = Suite::new();
        for path in paths {
            suite.push(read_fixture_file(&path, diagnostics)?);
        }
        Ok(suite)
    }
}

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct Generated {
    pub emission: Emission,
    pub diagnostics: Diagnostics,
}

/// Load, resolve and emit the corpus at `options.corpus_root`.
pub fn generate(options: &EmitOptions) -> Result<Generated, LoadError> {
    let mut diagnostics = Diagnostics::default();
    let suite = SuiteLoader::new(&options.corpus_root).load(&mut diagnostics)?;
    let cases = suite.resolve()?;
    log::info!("{} tests found in {} files", cases.len(), suite.len());

    let emission = emit_spec(&cases, options, &mut diagnostics);
    Ok(Generated {
        emission,
        diagnostics,
    })
}
