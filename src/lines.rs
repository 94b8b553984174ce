//! Line-level primitives shared by every section parser.
//!
//! None of these functions fail: a missing pattern yields `false` or an
//! empty collection.

use crate::config::SeparatorPolicy;

/// The literal token that marks a markdown table separator.
pub const SEPARATOR_TOKEN: &str = "---";

const LITERAL_SEPARATORS: [&str; 2] = [
    "---|---|---|---|---|---|---|---|---|---|---|---|---",
    "---|---|---|---|---|---|---|---|---|---|---|---",
];

/// Splits the trimmed blob into lines, keeping blank lines so that absolute
/// line positions stay meaningful.
pub fn all_lines(text: &str) -> Vec<&str> {
    text.trim().lines().map(str::trim).collect()
}

/// Splits the trimmed blob into trimmed lines, dropping blank ones.
pub fn non_blank_lines(text: &str) -> Vec<&str> {
    text.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Splits a line on `|`, trims every cell and drops the empty ones.
pub fn tokenize_row(line: &str) -> Vec<String> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a data row on `|`, keeping interior empty cells so values stay
/// aligned with the header. Only the empties produced by a leading or
/// trailing pipe are removed.
pub fn split_cells(line: &str) -> Vec<String> {
    let mut cells: Vec<String> = line.split('|').map(|c| c.trim().to_string()).collect();
    if line.trim_end().ends_with('|') && cells.last().is_some_and(String::is_empty) {
        cells.pop();
    }
    if line.trim_start().starts_with('|') && cells.first().is_some_and(String::is_empty) {
        cells.remove(0);
    }
    cells
}

pub fn contains_separator_token(line: &str) -> bool {
    line.contains(SEPARATOR_TOKEN)
}

/// Exact match against the two table widths the source site has published.
pub fn is_literal_separator_row(line: &str) -> bool {
    let line = line.trim();
    LITERAL_SEPARATORS.iter().any(|pattern| *pattern == line)
}

/// A line made only of dashes, pipes, alignment colons and spaces that
/// carries at least one `---` run.
pub fn is_separator_row(line: &str) -> bool {
    let line = line.trim();
    contains_separator_token(line)
        && line
            .chars()
            .all(|c| matches!(c, '-' | '|' | ':' | ' ' | '\t'))
}

/// Number of dash columns in a separator row.
pub fn separator_arity(line: &str) -> usize {
    line.split('|').filter(|cell| cell.contains('-')).count()
}

/// Separator check against a known header width. The separator may carry
/// one extra column for the unlabeled metric-name column.
pub fn is_separator_for(line: &str, header_arity: usize, policy: SeparatorPolicy) -> bool {
    match policy {
        SeparatorPolicy::Literal => is_literal_separator_row(line),
        SeparatorPolicy::Structural => {
            if !is_separator_row(line) {
                return false;
            }
            let arity = separator_arity(line);
            arity == header_arity || arity == header_arity + 1
        }
    }
}

/// One step of a single-line lookback over a line stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWindow<'a> {
    pub index: usize,
    pub previous: Option<&'a str>,
    pub current: &'a str,
}

/// Pairs every line with the one before it.
pub fn windows<'a>(lines: &'a [&'a str]) -> impl Iterator<Item = LineWindow<'a>> + 'a {
    lines.iter().enumerate().map(move |(index, current)| LineWindow {
        index,
        previous: index.checked_sub(1).map(|prev| lines[prev]),
        current,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_row_drops_edge_and_empty_cells() {
        assert_eq!(
            tokenize_row("| Mar 2013 | | Mar 2014 |"),
            vec!["Mar 2013".to_string(), "Mar 2014".to_string()]
        );
        assert!(tokenize_row("").is_empty());
        assert!(tokenize_row("| |").is_empty());
    }

    #[test]
    fn test_split_cells_keeps_interior_gaps() {
        assert_eq!(split_cells("Sales | 100 |  | 120"), vec!["Sales", "100", "", "120"]);
        assert_eq!(split_cells("| Sales | 100 |"), vec!["Sales", "100"]);
        assert_eq!(split_cells("Sales"), vec!["Sales"]);
    }

    #[test]
    fn test_literal_separator_variants() {
        assert!(is_literal_separator_row(
            "---|---|---|---|---|---|---|---|---|---|---|---|---"
        ));
        assert!(is_literal_separator_row(
            "  ---|---|---|---|---|---|---|---|---|---|---|---  "
        ));
        assert!(!is_literal_separator_row("---|---|---"));
    }

    #[test]
    fn test_structural_separator() {
        assert!(is_separator_row("---|---|---"));
        assert!(is_separator_row("| :--- | ---: |"));
        assert!(!is_separator_row("Sales | 100 | 120"));
        assert!(!is_separator_row("--"));
        assert!(!is_separator_row("Net - 10 --- x"));
    }

    #[test]
    fn test_separator_for_header_width() {
        assert!(is_separator_for("---|---|---", 3, SeparatorPolicy::Structural));
        assert!(is_separator_for("---|---|---", 2, SeparatorPolicy::Structural));
        assert!(!is_separator_for("---|---|---", 5, SeparatorPolicy::Structural));
        assert!(!is_separator_for("---|---|---", 3, SeparatorPolicy::Literal));
    }

    #[test]
    fn test_blank_line_handling() {
        let text = "\n\na\n\n b \n\n";
        assert_eq!(all_lines(text), vec!["a", "", "b"]);
        assert_eq!(non_blank_lines(text), vec!["a", "b"]);
    }

    #[test]
    fn test_windows_lookback() {
        let lines = vec!["h", "---", "r"];
        let collected: Vec<_> = windows(&lines).collect();
        assert_eq!(collected[0].previous, None);
        assert_eq!(collected[2].previous, Some("---"));
        assert_eq!(collected[2].index, 2);
    }
}
