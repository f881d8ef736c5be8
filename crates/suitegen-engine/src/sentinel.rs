//! Placeholder glyphs used by the fixture corpus.
//!
//! Fixture authors write invisible or ambiguous characters as visible glyphs so
//! the files stay readable. [`decode`] turns them back into the literal
//! characters a parser has to see.

/// Glyph table, tried in order at every position of the input.
///
/// Tab runs are listed longest first: the shorter runs are suffixes of the
/// longer ones, so any other order would decode `——»` as a dash pair plus a
/// single tab.
pub const GLYPHS: &[(&str, &str)] = &[
    ("␣", " "),
    ("———»", "\t\t\t\t"),
    ("——»", "\t\t\t"),
    ("—»", "\t\t"),
    ("»", "\t"),
    ("↵", "\n"),
    ("∎", ""),
    ("←", "\r"),
    ("⇔", "\u{FEFF}"),
];

/// Replace every placeholder glyph with the characters it stands for.
///
/// All other characters are copied unchanged.
pub fn decode(text: &str) -> String {
    if !contains_glyph(text) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    'scan: while let Some(c) = rest.chars().next() {
        for (glyph, replacement) in GLYPHS {
            if let Some(tail) = rest.strip_prefix(glyph) {
                out.push_str(replacement);
                rest = tail;
                continue 'scan;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// True when `text` holds at least one placeholder glyph.
pub fn contains_glyph(text: &str) -> bool {
    GLYPHS.iter().any(|(glyph, _)| text.contains(glyph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("␣", " ")]
    #[case("↵", "\n")]
    #[case("∎", "")]
    #[case("←", "\r")]
    #[case("⇔", "\u{FEFF}")]
    fn decodes_single_glyph(#[case] glyph: &str, #[case] expected: &str) {
        assert_eq!(decode(glyph), expected);
    }

    #[rstest]
    #[case("»", 1)]
    #[case("—»", 2)]
    #[case("——»", 3)]
    #[case("———»", 4)]
    fn tab_runs_decode_to_exact_tab_count(#[case] glyph: &str, #[case] tabs: usize) {
        assert_eq!(decode(glyph), "\t".repeat(tabs));
    }

    #[test]
    fn decodes_glyphs_inside_text() {
        assert_eq!(decode("a:␣b"), "a: b");
        assert_eq!(decode("key:↵——»value∎"), "key:\n\t\t\tvalue");
        assert_eq!(decode("⇔---←↵"), "\u{FEFF}---\r\n");
    }

    #[test]
    fn dash_without_tab_marker_is_kept() {
        assert_eq!(decode("a — b"), "a — b");
        assert_eq!(decode("————»"), "—\t\t\t\t");
    }

    #[test]
    fn contains_glyph_detects_table_entries() {
        assert!(contains_glyph("x␣"));
        assert!(contains_glyph("—»"));
        assert!(!contains_glyph("plain text\twith tab"));
    }

    proptest! {
        #[test]
        fn prop_glyph_free_text_is_unchanged(text in "[a-zA-Z0-9 :\\-\\[\\]{}#\t\n]*") {
            prop_assert_eq!(decode(&text), text.clone());
        }

        #[test]
        fn prop_decode_is_idempotent(text in "[a-z ␣↵∎←⇔»—]*") {
            let once = decode(&text);
            prop_assert!(!contains_glyph(&once));
            prop_assert_eq!(decode(&once), once.clone());
        }
    }
}
