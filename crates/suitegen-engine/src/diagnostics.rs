use std::fmt;

/// Why a resolved case produced no test block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Neither `fail` nor any expected output is present
    NoExpectation,
    /// The case needs embedded input but has no `yaml`
    NoInput,
}

/// Non-fatal findings collected while loading and emitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A raw key the canonicalizer does not know about
    UnrecognizedField {
        file: String,
        unit: usize,
        key: String,
    },
    SkippedCase {
        reference: String,
        reason: SkipReason,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnrecognizedField { file, unit, key } => {
                write!(f, "{file} unit {unit}: unrecognized field `{key}`")
            }
            Diagnostic::SkippedCase { reference, reason } => match reason {
                SkipReason::NoExpectation => {
                    write!(f, "{reference}: skipped, nothing to assert")
                }
                SkipReason::NoInput => write!(f, "{reference}: skipped, no `yaml` input"),
            },
        }
    }
}

/// Ordered list of [`Diagnostic`]s. Every entry is logged as it is recorded.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UnrecognizedField { .. } => log::warn!("{diagnostic}"),
            Diagnostic::SkippedCase { .. } => log::info!("{diagnostic}"),
        }
        self.items.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unrecognized_fields(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnrecognizedField { .. }))
    }

    pub fn skipped_cases(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items
            .iter()
            .filter(|d| matches!(d, Diagnostic::SkippedCase { .. }))
    }
}
