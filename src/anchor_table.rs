//! Year-column tables located by an anchor phrase in their header row.
//!
//! Balance sheet, cash flow and ratios are all this one layout with a
//! different set of excluded roll-up rows. Profit & loss builds on the same
//! pieces (see [`crate::profit_loss`]).

use crate::config::{ParserConfig, SeparatorPolicy};
use crate::error::{Result, SectionError};
use crate::lines::{is_separator_for, non_blank_lines, split_cells, tokenize_row};
use crate::schema::{MetricRows, YearlyTable};
use crate::sections::SectionId;
use log::debug;

/// Everything the anchor-table scan needs to know about one section.
#[derive(Debug, Clone)]
pub struct AnchorTableSpec<'a> {
    pub section: SectionId,
    pub anchor_phrase: &'a str,
    pub stop_phrases: &'a [String],
    pub separator_policy: SeparatorPolicy,
    pub min_lines: usize,
}

impl<'a> AnchorTableSpec<'a> {
    pub fn for_section(section: SectionId, config: &'a ParserConfig) -> Self {
        let stop_phrases: &'a [String] = match section {
            SectionId::BalanceSheet => config.balance_sheet_stop_phrases.as_slice(),
            SectionId::CashFlow => config.cash_flow_stop_phrases.as_slice(),
            SectionId::Ratios => config.ratios_stop_phrases.as_slice(),
            SectionId::ProfitLoss => config.profit_loss_stop_phrases.as_slice(),
            _ => &[],
        };

        Self {
            section,
            anchor_phrase: &config.anchor_phrase,
            stop_phrases,
            separator_policy: config.separator_policy,
            min_lines: config.min_table_lines,
        }
    }
}

/// Tracks whether the scan has crossed the header/body separator.
#[derive(Debug)]
pub(crate) struct BodyScanner {
    header_arity: usize,
    policy: SeparatorPolicy,
    in_body: bool,
}

impl BodyScanner {
    pub(crate) fn new(header_arity: usize, policy: SeparatorPolicy) -> Self {
        Self {
            header_arity,
            policy,
            in_body: false,
        }
    }

    /// Returns true for lines that belong to the table body. Separator rows
    /// open the body and are never body lines themselves.
    pub(crate) fn accept(&mut self, line: &str) -> bool {
        if is_separator_for(line, self.header_arity, self.policy) {
            self.in_body = true;
            return false;
        }
        self.in_body
    }

    pub(crate) fn in_body(&self) -> bool {
        self.in_body
    }
}

/// Index of the first line containing the anchor phrase.
pub(crate) fn locate_header(lines: &[&str], anchor_phrase: &str) -> Option<usize> {
    lines.iter().position(|line| line.contains(anchor_phrase))
}

/// Splits a body line into `(metric name, values)`. Lines whose first cell
/// is empty carry no metric.
pub(crate) fn metric_row(line: &str) -> Option<(String, Vec<String>)> {
    let mut cells = split_cells(line);
    if cells.first().map_or(true, String::is_empty) {
        return None;
    }
    let name = cells.remove(0);
    Some((name, cells))
}

pub(crate) fn is_stop_row(metric: &str, stop_phrases: &[String]) -> bool {
    stop_phrases
        .iter()
        .any(|phrase| metric.contains(phrase.as_str()))
}

pub(crate) fn check_min_lines(section: SectionId, non_blank: usize, min: usize) -> Result<()> {
    if non_blank < min {
        return Err(SectionError::no_data(
            section.label(),
            format!("{} non-blank lines, need at least {}", non_blank, min),
        ));
    }
    Ok(())
}

/// Parses an anchor-located year table.
///
/// The first line containing the anchor phrase is the header (stored under
/// `"Years"`). Lines after the separator row are metric rows; rows whose
/// metric name contains a stop phrase are left out.
pub fn parse_anchor_table(text: &str, spec: &AnchorTableSpec<'_>) -> Result<YearlyTable> {
    let lines = non_blank_lines(text);
    check_min_lines(spec.section, lines.len(), spec.min_lines)?;

    let header_idx = locate_header(&lines, spec.anchor_phrase).ok_or_else(|| {
        SectionError::no_data(
            spec.section.label(),
            format!("anchor phrase '{}' not found", spec.anchor_phrase),
        )
    })?;

    let years = tokenize_row(lines[header_idx]);
    let mut metrics = MetricRows::new();
    let mut body = BodyScanner::new(years.len(), spec.separator_policy);

    for line in &lines[header_idx + 1..] {
        if !body.accept(line) {
            continue;
        }
        let Some((name, values)) = metric_row(line) else {
            continue;
        };
        if is_stop_row(&name, spec.stop_phrases) {
            debug!("{}: skipping roll-up row '{}'", spec.section, name);
            continue;
        }
        metrics.insert(name, values);
    }

    if !body.in_body() {
        debug!(
            "{}: no separator row matched a {}-column header",
            spec.section,
            years.len()
        );
    }

    Ok(YearlyTable { years, metrics })
}

/// Anchor-table parse with the default separator policy and line minimum.
/// Not tied to a section, so a `NoData` error always carries the
/// balance-sheet label; use [`parse_anchor_table`] to choose another.
pub fn parse_with_anchor(
    text: &str,
    anchor_phrase: &str,
    stop_phrases: &[String],
) -> Result<YearlyTable> {
    let defaults = ParserConfig::default();
    let spec = AnchorTableSpec {
        section: SectionId::BalanceSheet,
        anchor_phrase,
        stop_phrases,
        separator_policy: defaults.separator_policy,
        min_lines: defaults.min_table_lines,
    };
    parse_anchor_table(text, &spec)
}

pub fn parse_balance_sheet(text: &str, config: &ParserConfig) -> Result<YearlyTable> {
    parse_anchor_table(
        text,
        &AnchorTableSpec::for_section(SectionId::BalanceSheet, config),
    )
}

pub fn parse_cash_flow(text: &str, config: &ParserConfig) -> Result<YearlyTable> {
    parse_anchor_table(
        text,
        &AnchorTableSpec::for_section(SectionId::CashFlow, config),
    )
}

pub fn parse_ratios(text: &str, config: &ParserConfig) -> Result<YearlyTable> {
    parse_anchor_table(text, &AnchorTableSpec::for_section(SectionId::Ratios, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BALANCE_SHEET: &str = "\
| Mar 2013 | Mar 2014 | Mar 2015
---|---|---|---
Equity Capital | 10 | 10 | 12
Reserves | 100 | 120 | 150
Total Liabilities | 200 | 230 | 260
Total Assets | 200 | 230 | 260
";

    #[test]
    fn test_anchor_table_with_stop_phrase() {
        let text = "Metric | Mar 2013 | Mar 2014\n---|---|---\nSales | 100 | 120\nTotal Assets | 500 | 600";
        let table = parse_with_anchor(text, "Mar 2013", &["Total Assets".to_string()]).unwrap();

        assert_eq!(table.years, vec!["Metric", "Mar 2013", "Mar 2014"]);
        assert_eq!(table.metric("Sales").unwrap(), ["100", "120"]);
        assert!(table.metric("Total Assets").is_none());
        assert_eq!(table.metrics.len(), 1);
    }

    #[test]
    fn test_parse_with_anchor_reports_balance_sheet_label() {
        let err = parse_with_anchor("Sales | 1 | 2\nCosts | 3 | 4\nNet | 5 | 6", "Mar 2013", &[])
            .unwrap_err();
        assert!(err.is_no_data());
        assert!(err.to_string().contains("balance sheet"));
    }

    #[test]
    fn test_balance_sheet_defaults() {
        let table = parse_balance_sheet(BALANCE_SHEET, &ParserConfig::default()).unwrap();

        assert_eq!(table.years, vec!["Mar 2013", "Mar 2014", "Mar 2015"]);
        let names: Vec<_> = table.metrics.keys().cloned().collect();
        assert_eq!(names, vec!["Equity Capital", "Reserves", "Total Liabilities"]);
        for values in table.metrics.values() {
            assert_eq!(values.len(), table.years.len());
        }
    }

    #[test]
    fn test_ratios_keep_every_row() {
        let table = parse_ratios(BALANCE_SHEET, &ParserConfig::default()).unwrap();
        assert!(table.metric("Total Assets").is_some());
    }

    #[test]
    fn test_missing_anchor_is_no_data() {
        let text = "| Mar 2020 | Mar 2021\n---|---|---\nSales | 1 | 2";
        let err = parse_balance_sheet(text, &ParserConfig::default()).unwrap_err();
        assert!(err.is_no_data());
    }

    #[test]
    fn test_too_few_lines_is_no_data() {
        let text = "| Mar 2013 | Mar 2014\n---|---|---\n\n";
        assert!(parse_cash_flow(text, &ParserConfig::default())
            .unwrap_err()
            .is_no_data());
    }

    #[test]
    fn test_rows_before_separator_are_ignored() {
        let text = "| Mar 2013 | Mar 2014\nStray | 1 | 2\n---|---|---\nSales | 3 | 4";
        let table = parse_ratios(text, &ParserConfig::default()).unwrap();
        assert!(table.metric("Stray").is_none());
        assert_eq!(table.metric("Sales").unwrap(), ["3", "4"]);
    }

    #[test]
    fn test_literal_policy_needs_exact_width() {
        let config = ParserConfig {
            separator_policy: SeparatorPolicy::Literal,
            ..ParserConfig::default()
        };
        let table = parse_ratios(BALANCE_SHEET, &config).unwrap();
        assert_eq!(table.years.len(), 3);
        assert!(table.metrics.is_empty());
    }

    #[test]
    fn test_blank_value_cells_keep_alignment() {
        let text = "| Mar 2013 | Mar 2014 | Mar 2015\n---|---|---|---\nCWIP |  | 5 | 7";
        let table = parse_ratios(text, &ParserConfig::default()).unwrap();
        assert_eq!(table.metric("CWIP").unwrap(), ["", "5", "7"]);
    }
}
