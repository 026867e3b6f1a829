use super::models::Entry;

/// Extracts the valid entries from uploaded text, one candidate per line.
///
/// Lines are trimmed; blank and invalid lines are dropped without being
/// reported. Order is preserved and duplicates are kept.
pub fn parse_entries(content: &str) -> Vec<Entry> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(Entry::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_strs(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(Entry::as_str).collect()
    }

    #[test]
    fn drops_blank_and_invalid_lines() {
        let entries = parse_entries("a@b.com\n\nbad\nc@d.org");
        assert_eq!(as_strs(&entries), ["a@b.com", "c@d.org"]);
    }

    #[test]
    fn trims_whitespace_and_windows_line_endings() {
        let entries = parse_entries("  example.com  \r\n\tuser@example.org\r\n");
        assert_eq!(as_strs(&entries), ["example.com", "user@example.org"]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        let entries = parse_entries("abc.com\nx@y.io\nabc.com");
        assert_eq!(as_strs(&entries), ["abc.com", "x@y.io", "abc.com"]);
    }

    #[test]
    fn parsing_is_idempotent() {
        let first = parse_entries("  a@b.com\nnot valid\n\nexample.net\n  \nfoo@bar.baz\n");
        let joined = as_strs(&first).join("\n");
        assert_eq!(parse_entries(&joined), first);
    }

    #[test]
    fn empty_content_yields_nothing() {
        assert!(parse_entries("").is_empty());
        assert!(parse_entries("\n\n  \n").is_empty());
    }
}
