use crate::book::tune::Tune;
use crate::parser::tune_parser::parse_tune;

/// Header opening every tune
pub const TUNE_START: &str = "X:";

const TUNE_DELIMITER: &str = "\nX:";

/// Split a decoded tunebook into tune blocks.
///
/// Splitting on the delimiter strips `X:` from every fragment after the first
/// one, so it is put back. Whitespace-only fragments are dropped, and so is
/// any leading matter (comments, directives) found before the first tune.
pub fn split_tune_blocks(abc: &str) -> Vec<String> {
    let starts_with_tune = abc.trim().starts_with(TUNE_START);
    let mut fragments = abc.split(TUNE_DELIMITER);

    let mut blocks = Vec::new();
    if let Some(first) = fragments.next() {
        if starts_with_tune && !first.trim().is_empty() {
            blocks.push(first.to_string());
        } else if !first.trim().is_empty() {
            log::debug!("Discarding {} bytes of leading matter", first.len());
        }
    }
    blocks.extend(
        fragments
            .filter(|fragment| !fragment.trim().is_empty())
            .map(|fragment| format!("{TUNE_START}{fragment}")),
    );
    blocks
}

/// Parse all tunes of a decoded tunebook, in file order.
pub fn parse_tunebook(abc: &str) -> Vec<Tune> {
    split_tune_blocks(abc)
        .iter()
        .map(|block| parse_tune(block))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_without_leading_matter() {
        let blocks = split_tune_blocks("X:1\nT:One\nK:G\n\nX:2\nT:Two\nK:D\n");
        assert_eq!(blocks, ["X:1\nT:One\nK:G\n", "X:2\nT:Two\nK:D\n"]);
    }

    #[test]
    fn test_split_discards_leading_matter() {
        let blocks = split_tune_blocks("%abc-2.1\n%%pagewidth 21cm\n\nX:1\nT:Song\nK:G\n");
        assert_eq!(blocks, ["X:1\nT:Song\nK:G\n"]);
    }

    #[test]
    fn test_split_leading_blank_lines_are_not_leading_matter() {
        let blocks = split_tune_blocks("\n\n  \nX:1\nT:Song\n");
        assert_eq!(blocks, ["X:1\nT:Song\n"]);
    }

    #[test]
    fn test_split_indented_first_tune_is_kept_as_is() {
        let blocks = split_tune_blocks("  X:1\nT:Song\n");
        assert_eq!(blocks, ["  X:1\nT:Song\n"]);
    }

    #[test]
    fn test_split_leading_matter_only() {
        assert!(split_tune_blocks("% just a comment\n").is_empty());
        assert!(split_tune_blocks("").is_empty());
        assert!(split_tune_blocks("\n\n").is_empty());
    }

    #[test]
    fn test_split_drops_empty_fragments() {
        // a bare `X:` with nothing after it is not a tune
        let blocks = split_tune_blocks("X:1\nT:A\nX:\n\nX:2\nT:B");
        assert_eq!(blocks, ["X:1\nT:A", "X:2\nT:B"]);

        let blocks = split_tune_blocks("X:1\nT:A\n\nX:   \n");
        assert_eq!(blocks, ["X:1\nT:A\n"]);
    }

    #[test]
    fn test_split_crlf() {
        let blocks = split_tune_blocks("X:1\r\nT:A\r\n\r\nX:2\r\nT:B\r\n");
        assert_eq!(blocks, ["X:1\r\nT:A\r\n\r", "X:2\r\nT:B\r\n"]);
    }

    #[test]
    fn test_parse_tunebook() {
        let tunes = parse_tunebook("some comment\nX:1\nT:Song\nK:G\n");
        assert_eq!(tunes.len(), 1);
        assert_eq!(tunes[0].title(), "Song");

        let tunes = parse_tunebook("X:1\nT:Song\nK:G\n");
        assert_eq!(tunes.len(), 1);
        assert_eq!(tunes[0].title(), "Song");
        assert_eq!(tunes[0].raw_text(), "X:1\nT:Song\nK:G");
    }
}
