use std::path::PathBuf;

use crate::fixture::{
    FixtureError,
    inherit::{ResolvedCase, resolve},
};

use super::CanonicalTestCase;

/// All canonical units read from one fixture file, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureFile {
    pub path: PathBuf,
    pub file: String,
    pub cases: Vec<CanonicalTestCase>,
}

/// Every fixture file of a corpus, in discovery order.
#[derive(Debug, Default)]
pub struct Suite {
    files: Vec<FixtureFile>,
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: FixtureFile) {
        self.files.push(file);
    }

    pub fn files(&self) -> &[FixtureFile] {
        &self.files
    }

    /// Number of fixture files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of units across all files
    pub fn case_count(&self) -> usize {
        self.files.iter().map(|f| f.cases.len()).sum()
    }

    /// Resolve inheritance for every file, file order first, then unit order.
    ///
    /// Fails on the first file that cannot be resolved, so nothing downstream
    /// ever sees a partial suite.
    pub fn resolve(&self) -> Result<Vec<ResolvedCase<'_>>, FixtureError> {
        let mut resolved = Vec::with_capacity(self.case_count());
        for file in &self.files {
            resolved.extend(resolve(file)?);
        }
        Ok(resolved)
    }
}

impl FromIterator<FixtureFile> for Suite {
    fn from_iter<I: IntoIterator<Item = FixtureFile>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}
