//! Emission of busted/luassert spec files from resolved cases.
//!
//! Every case gets exactly one block, and the block kind follows from which
//! fields the case has (see [`EmissionMode::select`]). Cases that have nothing
//! to assert are skipped and reported through [`Diagnostics`].

pub mod lua;
pub mod normalize;

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, Diagnostics, SkipReason};
use crate::escape::{escape, long_bracket};
use crate::fixture::inherit::ResolvedCase;
use crate::sentinel::decode;
use crate::tags::format_tag_list;
pub use normalize::LineNormalization;

/// Assertion strategy of one emitted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmissionMode {
    /// The parser must reject the input
    Fail,
    /// Event stream compared against `tree`
    Tree,
    /// Decoded value compared against `json`
    Json,
    /// Listing only, no assertion
    PromptDump,
}

impl EmissionMode {
    /// Pick the block kind for a case, or `None` when it has nothing to assert.
    ///
    /// `fail` always wins. Then the preferred comparison, then the other
    /// one, then `dump` or `emit` as a listing.
    pub fn select(case: &ResolvedCase<'_>, compare: Compare) -> Option<Self> {
        let tree = case.tree().is_some().then_some(EmissionMode::Tree);
        let json = case.json().is_some().then_some(EmissionMode::Json);
        let (first, second) = match compare {
            Compare::Tree => (tree, json),
            Compare::Json => (json, tree),
        };

        if case.fail() {
            Some(EmissionMode::Fail)
        } else if let Some(mode) = first.or(second) {
            Some(mode)
        } else if case.dump().is_some() || case.emit().is_some() {
            Some(EmissionMode::PromptDump)
        } else {
            None
        }
    }
}

impl fmt::Display for EmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EmissionMode::Fail => "fail",
            EmissionMode::Tree => "tree",
            EmissionMode::Json => "json",
            EmissionMode::PromptDump => "prompt-dump",
        };
        f.write_str(name)
    }
}

/// Where the generated spec takes parser input and expected output from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputSource {
    /// Decoded fixture text inlined as string literals
    #[default]
    Embedded,
    /// `load_file` calls into `<corpus_root>/data/<reference>/`
    File,
}

impl FromStr for InputSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "embedded" => Ok(InputSource::Embedded),
            "file" => Ok(InputSource::File),
            other => Err(format!(
                "unknown input source `{other}` (expected embedded or file)"
            )),
        }
    }
}

/// Comparison preferred for cases that carry both `tree` and `json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compare {
    /// Event streams
    #[default]
    Tree,
    /// Decoded values
    Json,
}

impl FromStr for Compare {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree" => Ok(Compare::Tree),
            "json" => Ok(Compare::Json),
            other => Err(format!("unknown comparison `{other}` (expected tree or json)")),
        }
    }
}

/// Overall shape of the generated spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecStyle {
    /// One assertion block per case
    #[default]
    Assertions,
    /// Every case rendered as a readable, non-executing listing
    Listing,
}

impl FromStr for SpecStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assertions" => Ok(SpecStyle::Assertions),
            "listing" => Ok(SpecStyle::Listing),
            other => Err(format!(
                "unknown spec style `{other}` (expected assertions or listing)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Module providing `stream` and `decode`
    pub parser_module: String,
    /// Module providing `decode` for expected JSON
    pub json_module: String,
    pub input: InputSource,
    /// Only read with [`InputSource::File`]
    pub corpus_root: PathBuf,
    /// Extension of the input file under `data/` (`in.<ext>`)
    pub input_extension: String,
    pub normalization: LineNormalization,
    pub style: SpecStyle,
    pub compare: Compare,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            parser_module: "yalua".to_string(),
            json_module: "rapidjson".to_string(),
            input: InputSource::default(),
            corpus_root: PathBuf::new(),
            input_extension: "yaml".to_string(),
            normalization: LineNormalization::default(),
            style: SpecStyle::default(),
            compare: Compare::default(),
        }
    }
}

/// Counts of what ended up in the spec.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub emitted: usize,
    pub skipped: usize,
    pub by_mode: BTreeMap<EmissionMode, usize>,
}

/// Generated spec text together with its [`EmitReport`].
#[derive(Debug, Clone)]
pub struct Emission {
    pub spec: String,
    pub report: EmitReport,
}

/// Label used for `it`/`pending` and the progress `print`.
///
/// Holds the case name, the file as a `#` tag, the unit number of multi-unit
/// files and the case tags, so runners can filter on any of them.
pub fn label(case: &ResolvedCase<'_>) -> String {
    let mut label = format!(
        "should parse the {}, file: #{}",
        escape(case.name()),
        escape(case.file())
    );
    if let Some(sequence) = case.sequence() {
        label.push_str(" unit: ");
        label.push_str(&sequence);
    }
    let tags = format_tag_list(case.tags());
    if !tags.is_empty() {
        label.push_str(" tags: ");
        label.push_str(&tags);
    }
    label
}

/// Choose the mode a case is emitted with under `options`.
fn plan(case: &ResolvedCase<'_>, options: &EmitOptions) -> Result<EmissionMode, SkipReason> {
    let mode = EmissionMode::select(case, options.compare).ok_or(SkipReason::NoExpectation)?;
    let mode = match options.style {
        SpecStyle::Assertions => mode,
        SpecStyle::Listing => EmissionMode::PromptDump,
    };
    if mode != EmissionMode::PromptDump
        && options.input == InputSource::Embedded
        && case.yaml().is_none()
    {
        return Err(SkipReason::NoInput);
    }
    Ok(mode)
}

/// Append-only text sink with two-space indentation.
#[derive(Default)]
struct SpecWriter {
    out: String,
}

impl SpecWriter {
    fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn block(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}

/// Writes one spec file for a list of resolved cases.
pub struct SpecEmitter<'o> {
    options: &'o EmitOptions,
    parser: String,
    json: String,
    writer: SpecWriter,
}

impl<'o> SpecEmitter<'o> {
    pub fn new(options: &'o EmitOptions) -> Self {
        Self {
            options,
            parser: lua::identifier(&options.parser_module),
            json: lua::identifier(&options.json_module),
            writer: SpecWriter::default(),
        }
    }

    /// Emit every case in order.
    ///
    /// Skipped cases are pushed to `diagnostics`; they never produce output.
    pub fn emit(mut self, cases: &[ResolvedCase<'_>], diagnostics: &mut Diagnostics) -> Emission {
        let mut report = EmitReport::default();
        let mut planned = Vec::with_capacity(cases.len());

        for case in cases {
            match plan(case, self.options) {
                Ok(mode) => {
                    *report.by_mode.entry(mode).or_default() += 1;
                    planned.push((case, mode));
                }
                Err(reason) => {
                    report.skipped += 1;
                    diagnostics.push(Diagnostic::SkippedCase {
                        reference: case.reference().to_string(),
                        reason,
                    });
                }
            }
        }
        report.emitted = planned.len();

        self.header(&report);
        self.writer
            .line(0, "describe(\"Run the YAML test #suite\", function()");
        for (case, mode) in planned {
            match mode {
                EmissionMode::Fail => self.fail_block(case),
                EmissionMode::Tree => self.tree_block(case),
                EmissionMode::Json => self.json_block(case),
                EmissionMode::PromptDump => self.prompt_block(case),
            }
        }
        self.writer.line(0, "end)");

        Emission {
            spec: self.writer.out,
            report,
        }
    }

    fn header(&mut self, report: &EmitReport) {
        let uses = |mode: EmissionMode| report.by_mode.contains_key(&mode);
        let asserts =
            uses(EmissionMode::Fail) || uses(EmissionMode::Tree) || uses(EmissionMode::Json);

        self.writer.line(0, "local assert = require(\"luassert\")");
        self.writer.line(0, lua::require(&self.options.parser_module));
        if uses(EmissionMode::Json) {
            self.writer.line(0, lua::require(&self.options.json_module));
        }
        if asserts && self.options.input == InputSource::File {
            self.writer.blank();
            self.writer.block(&lua::load_file_helper());
        }
        if uses(EmissionMode::Tree) {
            self.writer.blank();
            self.writer
                .block(&lua::normalize_helpers(self.options.normalization));
        }
        self.writer.blank();
    }

    fn open(&mut self, case: &ResolvedCase<'_>) {
        let label = label(case);
        let input = self.input_expr(case);
        self.writer.line(1, format!("it(\"{label}\", function()"));
        self.writer.line(2, format!("print(\"### {label}\")"));
        self.writer.line(2, format!("local input = {input}"));
    }

    fn close(&mut self) {
        self.writer.line(1, "end)");
    }

    fn fail_block(&mut self, case: &ResolvedCase<'_>) {
        self.open(case);
        let stream = format!("local result = {}.stream(input)", self.parser);
        self.writer.line(2, stream);
        self.writer.line(2, "assert.Equal(nil, result)");
        self.close();
    }

    fn tree_block(&mut self, case: &ResolvedCase<'_>) {
        self.open(case);
        let expected = match self.options.input {
            InputSource::Embedded => {
                let tree = self
                    .options
                    .normalization
                    .apply(case.tree().unwrap_or_default());
                format!("\"{}\"", escape(&tree))
            }
            InputSource::File => self.data_file(case, "test.event"),
        };
        let stream = format!("local result = {}.stream(input)", self.parser);
        self.writer.line(2, format!("local tree = {expected}"));
        self.writer.line(2, stream);
        self.writer.line(
            2,
            format!(
                "assert.is.Same({n}(tree), {n}(result))",
                n = lua::NORMALIZE_FN
            ),
        );
        self.close();
    }

    fn json_block(&mut self, case: &ResolvedCase<'_>) {
        self.open(case);
        let expected = match self.options.input {
            InputSource::Embedded => format!("\"{}\"", escape(case.json().unwrap_or_default())),
            InputSource::File => self.data_file(case, "in.json"),
        };
        let decode_input = format!("local result = {}.decode(input)", self.parser);
        let assertion = format!("assert.is.Same({}.decode(expected), result)", self.json);
        self.writer.line(2, format!("local expected = {expected}"));
        self.writer.line(2, decode_input);
        self.writer.line(2, assertion);
        self.close();
    }

    fn prompt_block(&mut self, case: &ResolvedCase<'_>) {
        self.writer
            .line(1, format!("pending(\"{}\", function()", label(case)));
        let listing = [
            ("input", case.yaml().map(decode)),
            ("tree", case.tree().map(str::to_string)),
            ("json", case.json().map(str::to_string)),
            ("dump", case.dump().map(str::to_string)),
            ("emit", case.emit().map(str::to_string)),
        ];
        for (name, text) in listing {
            if let Some(text) = text {
                self.writer
                    .line(2, format!("local {name} = {}", listing_literal(&text)));
            }
        }
        self.close();
    }

    fn input_expr(&self, case: &ResolvedCase<'_>) -> String {
        match self.options.input {
            InputSource::Embedded => {
                format!("\"{}\"", escape(&decode(case.yaml().unwrap_or_default())))
            }
            InputSource::File => {
                self.data_file(case, &format!("in.{}", self.options.input_extension))
            }
        }
    }

    /// `load_file("<corpus_root>/data/<reference>/<name>")`
    fn data_file(&self, case: &ResolvedCase<'_>, name: &str) -> String {
        let path = case
            .reference()
            .join(name)
            .to_path(self.options.corpus_root.join("data"));
        format!(
            "{}(\"{}\")",
            lua::LOAD_FILE_FN,
            escape(&path.to_string_lossy())
        )
    }
}

/// Literal for a listed field.
///
/// Lua turns `\r` and `\r\n` into `\n` inside long brackets, so text holding a
/// carriage return is written as a quoted string instead.
fn listing_literal(text: &str) -> String {
    if text.contains('\r') {
        format!("\"{}\"", escape(text))
    } else {
        long_bracket(text)
    }
}

/// Emit a spec for `cases` with `options`.
pub fn emit_spec(
    cases: &[ResolvedCase<'_>],
    options: &EmitOptions,
    diagnostics: &mut Diagnostics,
) -> Emission {
    SpecEmitter::new(options).emit(cases, diagnostics)
}
