/// Escape `text` for use inside a single- or double-quoted Lua string literal.
///
/// Backslashes are doubled, both quote kinds and line breaks are written as
/// escape sequences. Working per character means an inserted backslash is never
/// escaped a second time.
///
/// This is a one-shot transformation: escaping already escaped text doubles
/// the backslashes again.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            // Lua ends a quoted string at a bare carriage return as well.
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// Wrap `text` in a Lua long-bracket literal (`[[...]]`, `[=[...]=]`, ...).
///
/// The bracket level is the smallest one whose closing sequence cannot be
/// formed by the text. A newline follows the opening bracket because Lua drops
/// the first newline of a long string.
pub fn long_bracket(text: &str) -> String {
    let mut level = 0;
    loop {
        let equals = "=".repeat(level);
        let close = format!("]{equals}]");
        if !text.contains(&close) && !text.ends_with(&format!("]{equals}")) {
            return format!("[{equals}[\n{text}]{equals}]");
        }
        level += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    /// Find a `"` or `'` that is not preceded by an odd run of backslashes.
    fn has_unescaped_quote(s: &str) -> bool {
        let mut backslashes = 0;
        for c in s.chars() {
            match c {
                '\\' => backslashes += 1,
                '"' | '\'' if backslashes % 2 == 0 => return true,
                _ => backslashes = 0,
            }
        }
        false
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case(r"a\b", r"a\\b")]
    #[case(r#"say "hi""#, r#"say \"hi\""#)]
    #[case("it's", r"it\'s")]
    #[case("a\nb", r"a\nb")]
    #[case("a\r\nb", r"a\r\nb")]
    #[case("\\\"", r#"\\\""#)]
    #[case("\t\u{FEFF}", "\t\u{FEFF}")]
    fn escapes_special_characters(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape(input), expected);
    }

    #[test]
    fn escape_is_not_idempotent() {
        let once = escape(r"\n");
        assert_eq!(once, r"\\n");
        assert_ne!(escape(&once), once);
    }

    #[test]
    fn long_bracket_uses_plain_level_when_possible() {
        assert_eq!(long_bracket("a: b\n"), "[[\na: b\n]]");
    }

    #[test]
    fn long_bracket_raises_level_for_closing_sequences() {
        assert_eq!(long_bracket("x]]y"), "[=[\nx]]y]=]");
        assert_eq!(long_bracket("x]]y]=]"), "[==[\nx]]y]=]]==]");
    }

    #[test]
    fn long_bracket_avoids_trailing_bracket_merge() {
        assert_eq!(long_bracket("[a]"), "[=[\n[a]]=]");
    }

    proptest! {
        #[test]
        fn prop_escape_leaves_no_bare_quote_or_newline(text in "[a-z\"'\\\\\n\r ]*") {
            let escaped = escape(&text);
            prop_assert!(!escaped.contains('\n'));
            prop_assert!(!escaped.contains('\r'));
            prop_assert!(!has_unescaped_quote(&escaped));
        }

        #[test]
        fn prop_long_bracket_closes_only_at_end(text in "[a\\]=\n]*") {
            let literal = long_bracket(&text);
            let level = literal[1..].find('[').unwrap_or(0);
            let close = format!("]{}]", "=".repeat(level));
            let body_start = level + 3;
            let first_close = literal[body_start..].find(&close).map(|i| i + body_start);
            prop_assert_eq!(first_close, Some(literal.len() - close.len()));
        }
    }
}
