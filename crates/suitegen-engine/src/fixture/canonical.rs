use std::path::Path;

use serde_yaml_ng::Value;

use super::{FixtureError, RawUnit, describe};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::models::CanonicalTestCase;

/// Keys the canonicalizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    From,
    Tags,
    Fail,
    Json,
    Dump,
    Emit,
    Yaml,
    Tree,
}

impl Field {
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "name" => Field::Name,
            "from" => Field::From,
            "tags" => Field::Tags,
            "fail" => Field::Fail,
            "json" => Field::Json,
            "dump" => Field::Dump,
            "emit" => Field::Emit,
            "yaml" => Field::Yaml,
            "tree" => Field::Tree,
            _ => return None,
        })
    }
}

/// Where a raw unit came from.
#[derive(Debug, Clone, Copy)]
pub struct UnitOrigin<'a> {
    pub path: &'a Path,
    /// File stem, becomes [`CanonicalTestCase::file`]
    pub file: &'a str,
    /// Position of the unit within its file
    pub unit: usize,
}

/// Map the recognized keys of `raw` onto a [`CanonicalTestCase`].
///
/// Unknown keys are recorded in `diagnostics` and otherwise ignored. A known
/// key holding the wrong kind of value is an error.
pub fn canonicalize(
    raw: &RawUnit,
    origin: &UnitOrigin<'_>,
    diagnostics: &mut Diagnostics,
) -> Result<CanonicalTestCase, FixtureError> {
    let mut case = CanonicalTestCase::new(origin.file);

    for (key, value) in raw {
        let field = match key {
            Value::String(key) => Field::from_key(key).ok_or_else(|| key.clone()),
            other => Err(format!("{other:?}")),
        };

        let field = match field {
            Ok(field) => field,
            Err(key) => {
                diagnostics.push(Diagnostic::UnrecognizedField {
                    file: origin.file.to_string(),
                    unit: origin.unit,
                    key,
                });
                continue;
            }
        };

        match field {
            Field::Name => case.name = Some(text(value, origin, "name")?),
            Field::From => case.source = Some(text(value, origin, "from")?),
            Field::Tags => case.tags = Some(tags(value, origin)?),
            Field::Fail => case.fail = Some(!matches!(value, Value::Bool(false))),
            Field::Json => case.json = Some(text(value, origin, "json")?),
            Field::Dump => case.dump = Some(text(value, origin, "dump")?),
            Field::Emit => case.emit = Some(text(value, origin, "emit")?),
            Field::Yaml => case.yaml = Some(text(value, origin, "yaml")?),
            Field::Tree => case.tree = Some(text(value, origin, "tree")?),
        }
    }

    Ok(case)
}

fn text(value: &Value, origin: &UnitOrigin<'_>, key: &str) -> Result<String, FixtureError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(type_error(origin, key, "a string")),
    }
}

fn tags(value: &Value, origin: &UnitOrigin<'_>) -> Result<Vec<String>, FixtureError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(s.split_whitespace().map(str::to_string).collect()),
        Value::Sequence(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(type_error(origin, "tags", "a string or a list of strings")),
            })
            .collect(),
        _ => Err(type_error(origin, "tags", "a string or a list of strings")),
    }
}

fn type_error(origin: &UnitOrigin<'_>, key: &str, expected: &'static str) -> FixtureError {
    FixtureError::FieldType {
        path: origin.path.to_path_buf(),
        unit: origin.unit,
        key: key.to_string(),
        expected,
    }
}
