//! Reading fixture files into canonical test cases.
//!
//! A fixture file is YAML holding one or more units. Loading is split in
//! three steps that each live in their own module:
//!
//! - [`load_units`] / [`parse_units`]: YAML text to raw mappings
//! - [`canonical`]: raw mapping to [`CanonicalTestCase`]
//! - [`inherit`]: later units of a file fall back to the first one

pub mod canonical;
pub mod inherit;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml_ng::{Mapping, Value};

use crate::diagnostics::Diagnostics;
use crate::models::{CanonicalTestCase, FixtureFile};
use canonical::{UnitOrigin, canonicalize};

/// One document inside a fixture file, exactly as the YAML loader produced it.
pub type RawUnit = Mapping;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Fixture {path} is not valid YAML: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },

    #[error("Fixture {path} has an unexpected shape: {reason}")]
    Schema { path: PathBuf, reason: String },

    #[error("Fixture {path}, unit {unit}: field `{key}` must be {expected}")]
    FieldType {
        path: PathBuf,
        unit: usize,
        key: String,
        expected: &'static str,
    },

    #[error("Fixture {path} has no `name` on its first unit")]
    MissingName { path: PathBuf },
}

impl FixtureError {
    /// Path of the fixture the error is about
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. }
            | Self::Parse { path, .. }
            | Self::Schema { path, .. }
            | Self::FieldType { path, .. }
            | Self::MissingName { path } => path,
        }
    }
}

/// Read a fixture file and split it into raw units.
pub fn load_units(path: &Path) -> Result<Vec<RawUnit>, FixtureError> {
    let content = fs::read_to_string(path).map_err(|source| FixtureError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_units(path, &content)
}

/// Split YAML text into raw units.
///
/// Each YAML document contributes units: a sequence contributes its elements,
/// a mapping contributes itself and an empty document contributes nothing.
/// `path` is only used to label errors.
pub fn parse_units(path: &Path, content: &str) -> Result<Vec<RawUnit>, FixtureError> {
    let mut units = Vec::new();

    for (doc_index, document) in serde_yaml_ng::Deserializer::from_str(content).enumerate() {
        let value = Value::deserialize(document).map_err(|source| FixtureError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        match value {
            Value::Null => {}
            Value::Mapping(unit) => units.push(unit),
            Value::Sequence(items) => {
                for (item_index, item) in items.into_iter().enumerate() {
                    match item {
                        Value::Mapping(unit) => units.push(unit),
                        other => {
                            return Err(FixtureError::Schema {
                                path: path.to_path_buf(),
                                reason: format!(
                                    "item {item_index} of document {doc_index} is {}, expected a mapping",
                                    describe(&other)
                                ),
                            });
                        }
                    }
                }
            }
            other => {
                return Err(FixtureError::Schema {
                    path: path.to_path_buf(),
                    reason: format!(
                        "document {doc_index} is {}, expected a sequence of mappings",
                        describe(&other)
                    ),
                });
            }
        }
    }

    Ok(units)
}

/// Load one fixture file and canonicalize all of its units.
///
/// The file identifier is the file stem. Unrecognized keys end up in
/// `diagnostics`.
pub fn read_fixture_file(
    path: &Path,
    diagnostics: &mut Diagnostics,
) -> Result<FixtureFile, FixtureError> {
    let file = file_stem(path)?;
    let units = load_units(path)?;
    log::debug!("{}: {} unit(s)", path.display(), units.len());

    let cases = units
        .iter()
        .enumerate()
        .map(|(unit, raw)| {
            let origin = UnitOrigin {
                path,
                file: &file,
                unit,
            };
            canonicalize(raw, &origin, diagnostics)
        })
        .collect::<Result<Vec<CanonicalTestCase>, _>>()?;

    Ok(FixtureFile {
        path: path.to_path_buf(),
        file,
        cases,
    })
}

fn file_stem(path: &Path) -> Result<String, FixtureError> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| FixtureError::Schema {
            path: path.to_path_buf(),
            reason: "file name is not valid UTF-8".to_string(),
        })
}

pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
