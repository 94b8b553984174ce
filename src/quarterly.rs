//! Quarterly results: a table whose header and first data row sit at fixed
//! line positions, followed by an optional upcoming-result-date line.

use crate::anchor_table::metric_row;
use crate::config::ParserConfig;
use crate::error::{Result, SectionError};
use crate::lines::{all_lines, contains_separator_token, tokenize_row};
use crate::schema::{MetricRows, QuarterlyResults, QuarterlyTable};
use crate::sections::SectionId;
use log::debug;

const UPCOMING_MARKER: &str = "Upcoming result date:";

/// `"Upcoming result date: **15 May 2024**"` → `"15 May 2024"`.
fn upcoming_date(line: &str) -> Option<String> {
    let (_, value) = line.split_once(": **")?;
    let value = value.strip_suffix("**").unwrap_or(value);
    Some(value.trim().to_string())
}

pub fn parse_quarterly_results(text: &str, config: &ParserConfig) -> Result<QuarterlyResults> {
    let section = SectionId::QuarterlyResults;
    let header_line = config.quarterly_results_header_line;
    let first_data_line = config.quarterly_results_first_data_line;

    let lines = all_lines(text);
    if lines.len() < first_data_line {
        return Err(SectionError::no_data(
            section.label(),
            format!("{} lines, need at least {}", lines.len(), first_data_line),
        ));
    }

    let quarters = lines
        .get(header_line)
        .map(|line| tokenize_row(line))
        .unwrap_or_default();
    if quarters.is_empty() {
        return Err(SectionError::no_data(
            section.label(),
            format!("no quarter headers on line {}", header_line),
        ));
    }

    let mut metrics = MetricRows::new();
    let mut upcoming_result_date = None;

    for (index, line) in lines.iter().enumerate() {
        if line.contains(UPCOMING_MARKER) {
            upcoming_result_date = upcoming_date(line);
            if upcoming_result_date.is_none() {
                debug!("{}: unreadable result date '{}'", section, line);
            }
            continue;
        }
        if index < first_data_line || line.is_empty() || contains_separator_token(line) {
            continue;
        }
        match metric_row(line) {
            Some((name, values)) if !values.is_empty() => {
                metrics.insert(name, values);
            }
            _ => debug!("{}: skipping '{}'", section, line),
        }
    }

    Ok(QuarterlyResults {
        table: QuarterlyTable { quarters, metrics },
        upcoming_result_date,
    })
}
