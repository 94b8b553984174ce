//! Peer comparison: a table with no anchor phrase. The first `---` line is
//! the separator and the line just before it is the header.

use crate::config::ParserConfig;
use crate::error::{Result, SectionError};
use crate::lines::{contains_separator_token, non_blank_lines, split_cells, tokenize_row, windows};
use crate::schema::{PeerComparison, PeerRow};
use crate::sections::SectionId;
use log::debug;

const FOOTER_PREFIX: &str = "Detailed Comparison with:";
const MEDIAN_PREFIX: &str = "Median:";
const MEDIAN_LABEL: &str = "Median";

fn zip_row(headers: &[String], cells: Vec<String>) -> PeerRow {
    headers.iter().cloned().zip(cells).collect()
}

/// Builds one row, enforcing the header arity. Blank cells keep their
/// column. A `Median:` row one cell short gets a synthesized `"Median"`
/// label in the first column.
fn peer_row(headers: &[String], line: &str) -> Result<PeerRow> {
    if let Some(rest) = line.strip_prefix(MEDIAN_PREFIX) {
        let mut cells = split_cells(rest);
        if cells.len() + 1 == headers.len() {
            cells.insert(0, MEDIAN_LABEL.to_string());
        }
        if cells.len() != headers.len() {
            return Err(SectionError::ArityMismatch {
                expected: headers.len(),
                found: cells.len(),
                line: line.to_string(),
            });
        }
        return Ok(zip_row(headers, cells));
    }

    let cells = split_cells(line);
    if cells.len() != headers.len() {
        return Err(SectionError::ArityMismatch {
            expected: headers.len(),
            found: cells.len(),
            line: line.to_string(),
        });
    }
    Ok(zip_row(headers, cells))
}

pub fn parse_peer_comparison(text: &str, config: &ParserConfig) -> Result<PeerComparison> {
    let section = SectionId::PeerComparison;
    let min_lines = config.min_table_lines;
    let lines = non_blank_lines(text);
    if lines.len() < min_lines {
        return Err(SectionError::no_data(
            section.label(),
            format!("{} non-blank lines, need at least {}", lines.len(), min_lines),
        ));
    }

    let separator = windows(&lines)
        .find(|window| contains_separator_token(window.current))
        .ok_or_else(|| SectionError::no_data(section.label(), "no separator row"))?;

    let headers = separator
        .previous
        .map(tokenize_row)
        .filter(|headers| !headers.is_empty())
        .ok_or_else(|| SectionError::no_data(section.label(), "no header row before separator"))?;

    let mut rows = Vec::new();
    for line in &lines[separator.index + 1..] {
        if line.starts_with(FOOTER_PREFIX) {
            continue;
        }
        match peer_row(&headers, line) {
            Ok(row) => rows.push(row),
            Err(err) => debug!("{}: dropping row: {}", section, err),
        }
    }

    Ok(PeerComparison(rows))
}
