/// Prefix that lets test runners select blocks by tag (`--tags=mapping`).
pub const FILTER_MARKER: char = '#';

/// Turn a whitespace-separated tag string into filterable tokens.
///
/// `"spec mapping"` becomes `"#spec #mapping"`; blank input gives an empty
/// string. Tokens are not escaped.
pub fn format_tags(tag_string: &str) -> String {
    tag_string
        .split_whitespace()
        .map(|tag| format!("{FILTER_MARKER}{tag}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Same as [`format_tags`] for tags that are already split.
pub fn format_tag_list<S: AsRef<str>>(tags: &[S]) -> String {
    let joined = tags.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");
    format_tags(&joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("mapping", "#mapping")]
    #[case("spec  flow\tsequence", "#spec #flow #sequence")]
    #[case("", "")]
    #[case("   ", "")]
    fn formats_tag_string(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_tags(input), expected);
    }

    #[test]
    fn formats_tag_list_in_order() {
        assert_eq!(format_tag_list(&["spec", "mapping"]), "#spec #mapping");
        assert_eq!(format_tag_list::<&str>(&[]), "");
    }
}
