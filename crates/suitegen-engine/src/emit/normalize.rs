//! Line normalization for event-stream comparison.
//!
//! Expected event trees in fixture files are indented for readability while
//! parsers print them flush left, so both sides are normalized line by line
//! before they are compared. The same rule exists twice: [`LineNormalization::apply`]
//! runs at generation time, and the Lua helper produced by
//! [`super::lua::normalize_helpers`] runs inside the generated spec. Both
//! must agree, which is why the whitespace set below is Lua's `%s` minus the
//! line breaks that are split on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Characters Lua's `%s` class matches, apart from `\r` and `\n`.
const LUA_SPACE: [char; 4] = [' ', '\t', '\x0B', '\x0C'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineNormalization {
    /// Strip indentation from every line
    #[default]
    Leading,
    /// Strip whitespace at the end of every line
    Trailing,
}

impl LineNormalization {
    /// Strip one line on the configured side.
    pub fn strip(self, line: &str) -> &str {
        match self {
            LineNormalization::Leading => line.trim_start_matches(LUA_SPACE),
            LineNormalization::Trailing => line.trim_end_matches(LUA_SPACE),
        }
    }

    /// Normalize a multi-line text.
    ///
    /// Lines are split on `\r` and `\n`, stripped, lines left empty are
    /// dropped, and every remaining line ends with `\n`. Applying it twice
    /// gives the same result as applying it once.
    pub fn apply(self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for line in text.split(['\r', '\n']) {
            let line = self.strip(line);
            if !line.is_empty() {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }

    /// Name of the per-line Lua helper
    pub fn lua_helper_name(self) -> &'static str {
        match self {
            LineNormalization::Leading => "strip_leading_space",
            LineNormalization::Trailing => "strip_trailing_space",
        }
    }

    /// Lua pattern removing the whitespace
    pub fn lua_pattern(self) -> &'static str {
        match self {
            LineNormalization::Leading => "^%s+",
            LineNormalization::Trailing => "%s+$",
        }
    }
}

impl fmt::Display for LineNormalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineNormalization::Leading => write!(f, "leading"),
            LineNormalization::Trailing => write!(f, "trailing"),
        }
    }
}

impl FromStr for LineNormalization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "leading" => Ok(LineNormalization::Leading),
            "trailing" => Ok(LineNormalization::Trailing),
            other => Err(format!(
                "unknown normalization `{other}` (expected leading or trailing)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const TREE: &str = "+STR\n +DOC\n  +MAP  \n   =VAL :a\n\n  -MAP\n -DOC\n-STR";

    #[test]
    fn test_leading_strips_indentation() {
        assert_eq!(
            LineNormalization::Leading.apply(TREE),
            "+STR\n+DOC\n+MAP  \n=VAL :a\n-MAP\n-DOC\n-STR\n"
        );
    }

    #[test]
    fn test_trailing_keeps_indentation() {
        assert_eq!(
            LineNormalization::Trailing.apply(TREE),
            "+STR\n +DOC\n  +MAP\n   =VAL :a\n  -MAP\n -DOC\n-STR\n"
        );
    }

    #[test]
    fn test_the_two_interpretations_differ() {
        let line = "  =VAL :b  ";
        assert_eq!(LineNormalization::Leading.apply(line), "=VAL :b  \n");
        assert_eq!(LineNormalization::Trailing.apply(line), "  =VAL :b\n");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(LineNormalization::Leading.apply(""), "");
        assert_eq!(LineNormalization::Leading.apply(" \n\t\r\n"), "");
        assert_eq!(LineNormalization::Trailing.apply("\n\n"), "");
    }

    #[test]
    fn test_non_lua_whitespace_is_kept() {
        assert_eq!(
            LineNormalization::Leading.apply("\u{A0}=VAL"),
            "\u{A0}=VAL\n"
        );
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("leading".parse(), Ok(LineNormalization::Leading));
        assert_eq!("trailing".parse(), Ok(LineNormalization::Trailing));
        assert!("both".parse::<LineNormalization>().is_err());
        assert_eq!(LineNormalization::Trailing.to_string(), "trailing");
    }

    fn mode() -> impl Strategy<Value = LineNormalization> {
        prop_oneof![
            Just(LineNormalization::Leading),
            Just(LineNormalization::Trailing)
        ]
    }

    proptest! {
        #[test]
        fn prop_leading_output_has_no_indentation(text in "[ \t+=a-z:\r\n]*") {
            let out = LineNormalization::Leading.apply(&text);
            for line in out.lines() {
                prop_assert!(!line.starts_with([' ', '\t']));
                prop_assert!(!line.is_empty());
            }
        }

        #[test]
        fn prop_trailing_output_has_no_trailing_space(text in "[ \t+=a-z:\r\n]*") {
            let out = LineNormalization::Trailing.apply(&text);
            for line in out.lines() {
                prop_assert!(!line.ends_with([' ', '\t']));
                prop_assert!(!line.is_empty());
            }
        }

        #[test]
        fn prop_apply_is_idempotent(norm in mode(), text in "[ \t+=a-z:\r\n]*") {
            let once = norm.apply(&text);
            prop_assert_eq!(norm.apply(&once), once.clone());
        }

        #[test]
        fn prop_non_space_content_is_preserved(norm in mode(), text in "[ \t+=a-z:\r\n]*") {
            let squash = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
            prop_assert_eq!(squash(&norm.apply(&text)), squash(&text));
        }
    }
}
