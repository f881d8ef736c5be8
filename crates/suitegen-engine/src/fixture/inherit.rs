//! Default inheritance between the units of one fixture file.
//!
//! The first unit of a file is the default for every later unit. Instead of
//! copying its values around, a [`ResolvedCase`] keeps a reference to its own
//! record and to the default, and every accessor falls back from one to the
//! other. The default record is never touched.

use relative_path::RelativePathBuf;

use super::FixtureError;
use crate::models::{CanonicalTestCase, FixtureFile};

/// A canonical case seen through its file's default unit.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedCase<'a> {
    own: &'a CanonicalTestCase,
    default: Option<&'a CanonicalTestCase>,
    unit_index: Option<usize>,
}

impl<'a> ResolvedCase<'a> {
    fn pick<T: ?Sized>(
        &self,
        field: impl Fn(&'a CanonicalTestCase) -> Option<&'a T>,
    ) -> Option<&'a T> {
        field(self.own).or_else(|| self.default.and_then(|default| field(default)))
    }

    pub fn file(&self) -> &'a str {
        &self.own.file
    }

    pub fn name(&self) -> &'a str {
        self.pick(|c| c.name.as_deref()).unwrap_or_default()
    }

    pub fn source(&self) -> Option<&'a str> {
        self.pick(|c| c.source.as_deref())
    }

    pub fn tags(&self) -> &'a [String] {
        self.pick(|c| c.tags.as_deref()).unwrap_or_default()
    }

    pub fn fail(&self) -> bool {
        self.pick(|c| c.fail.as_ref()).copied().unwrap_or(false)
    }

    pub fn yaml(&self) -> Option<&'a str> {
        self.pick(|c| c.yaml.as_deref())
    }

    pub fn tree(&self) -> Option<&'a str> {
        self.pick(|c| c.tree.as_deref())
    }

    pub fn json(&self) -> Option<&'a str> {
        self.pick(|c| c.json.as_deref())
    }

    pub fn dump(&self) -> Option<&'a str> {
        self.pick(|c| c.dump.as_deref())
    }

    pub fn emit(&self) -> Option<&'a str> {
        self.pick(|c| c.emit.as_deref())
    }

    /// Two-digit sequence number (`"00"`, `"01"`, ...) for multi-unit files;
    /// `None` when the file has one unit.
    pub fn sequence(&self) -> Option<String> {
        self.unit_index.map(|index| format!("{index:02}"))
    }

    /// Logical identity of the case, also its directory under `data/`:
    /// `229Q` for a single-unit file, `229Q/01` for the second of several.
    pub fn reference(&self) -> RelativePathBuf {
        let mut reference = RelativePathBuf::from(self.file());
        if let Some(sequence) = self.sequence() {
            reference.push(sequence);
        }
        reference
    }
}

/// Resolve the units of one fixture file against its first unit.
///
/// Unit 0 must carry a `name`, since every other unit may inherit it.
pub fn resolve(fixture: &FixtureFile) -> Result<Vec<ResolvedCase<'_>>, FixtureError> {
    let Some(first) = fixture.cases.first() else {
        return Ok(Vec::new());
    };
    if first.name.is_none() {
        return Err(FixtureError::MissingName {
            path: fixture.path.clone(),
        });
    }

    let multi_unit = fixture.cases.len() > 1;
    Ok(fixture
        .cases
        .iter()
        .enumerate()
        .map(|(index, own)| ResolvedCase {
            own,
            default: (index > 0).then_some(first),
            unit_index: multi_unit.then_some(index),
        })
        .collect())
}
