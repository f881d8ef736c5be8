/// One fixture unit after key canonicalization.
///
/// Every field except `file` is optional here: units after the first one in a
/// fixture file usually only carry what differs from the first unit, and
/// [`crate::fixture::inherit`] supplies the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalTestCase {
    /// Stem of the owning fixture file (`229Q` for `src/229Q.yaml`)
    pub file: String,
    pub name: Option<String>,
    /// Provenance, from the raw `from` key
    pub source: Option<String>,
    pub tags: Option<Vec<String>>,
    /// `Some(false)` only when a unit says `fail: false` explicitly
    pub fail: Option<bool>,
    /// Parser input, still glyph-encoded
    pub yaml: Option<String>,
    /// Expected event stream
    pub tree: Option<String>,
    pub json: Option<String>,
    pub dump: Option<String>,
    pub emit: Option<String>,
}

impl CanonicalTestCase {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }
}
