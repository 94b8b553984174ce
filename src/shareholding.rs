//! Shareholding pattern: a quarterly and a yearly table in one blob,
//! told apart by the `Quarterly` / `Yearly` marker lines.
//!
//! Headers are positional. Once a mode is active and the absolute line
//! index has reached that mode's threshold, the first data line takes the
//! header from the lookback buffer (the previous non-blank, non-separator
//! line) and is then read as the first metric row. Blank lines are kept in
//! the stream so the index thresholds count them.

use crate::anchor_table::metric_row;
use crate::config::ParserConfig;
use crate::error::{Result, SectionError};
use crate::lines::{all_lines, contains_separator_token, tokenize_row};
use crate::schema::{MetricRows, QuarterlyTable, Shareholding, YearlyTable};
use crate::sections::SectionId;
use log::debug;

const QUARTERLY_MARKER: &str = "Quarterly";
const YEARLY_MARKER: &str = "Yearly";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    None,
    Quarterly,
    Yearly,
}

#[derive(Debug, Default)]
struct PeriodTable {
    headers: Vec<String>,
    metrics: MetricRows,
}

impl PeriodTable {
    /// Re-entering a mode clears its header but keeps collected metrics.
    fn reopen(slot: &mut Option<PeriodTable>) {
        slot.get_or_insert_with(PeriodTable::default).headers.clear();
    }
}

pub fn parse_shareholding(text: &str, config: &ParserConfig) -> Result<Shareholding> {
    let section = SectionId::Shareholding;
    let lines = all_lines(text);
    let non_blank = lines.iter().filter(|line| !line.is_empty()).count();
    if non_blank < config.min_shareholding_lines {
        return Err(SectionError::no_data(
            section.label(),
            format!(
                "{} non-blank lines, need at least {}",
                non_blank, config.min_shareholding_lines
            ),
        ));
    }

    let mut mode = Mode::None;
    let mut quarterly: Option<PeriodTable> = None;
    let mut yearly: Option<PeriodTable> = None;
    let mut lookback: Option<&str> = None;

    for (index, &line) in lines.iter().enumerate() {
        if line.contains(QUARTERLY_MARKER) {
            mode = Mode::Quarterly;
            PeriodTable::reopen(&mut quarterly);
            lookback = Some(line);
            continue;
        }
        if line.contains(YEARLY_MARKER) {
            mode = Mode::Yearly;
            PeriodTable::reopen(&mut yearly);
            lookback = Some(line);
            continue;
        }
        if line.is_empty() || contains_separator_token(line) {
            continue;
        }

        let (threshold, slot) = match mode {
            Mode::None => {
                lookback = Some(line);
                continue;
            }
            Mode::Quarterly => (config.quarterly_header_threshold, &mut quarterly),
            Mode::Yearly => (config.yearly_header_threshold, &mut yearly),
        };

        if index < threshold {
            lookback = Some(line);
            continue;
        }

        let table = slot.get_or_insert_with(PeriodTable::default);
        if table.headers.is_empty() {
            let header = lookback
                .filter(|prev| prev.contains('|'))
                .map(tokenize_row)
                .unwrap_or_default();
            if header.is_empty() {
                lookback = Some(line);
                continue;
            }
            debug!("{}: {:?} header taken from line before {}", section, mode, index);
            table.headers = header;
        }

        if let Some((name, values)) = metric_row(line) {
            table.metrics.insert(name, values);
        }
        lookback = Some(line);
    }

    let record = Shareholding {
        quarterly: quarterly
            .filter(|t| !t.metrics.is_empty())
            .map(|t| QuarterlyTable {
                quarters: t.headers,
                metrics: t.metrics,
            }),
        yearly: yearly
            .filter(|t| !t.metrics.is_empty())
            .map(|t| YearlyTable {
                years: t.headers,
                metrics: t.metrics,
            }),
    };

    if record.quarterly.is_none() && record.yearly.is_none() {
        return Err(SectionError::no_data(
            section.label(),
            "neither a quarterly nor a yearly table produced metrics",
        ));
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAREHOLDING: &str = "\
## Shareholding Pattern
Numbers in percentages
Quarterly
| Mar 2024 | Jun 2024 | Sep 2024
---|---|---|---
Promoters + | 72.30% | 72.30% | 71.77%
FIIs + | 12.50% | 12.70% | 12.94%
Public + | 15.20% | 15.00% | 15.29%
No. of Shareholders | 1,20,000 | 1,25,000 | 1,31,000

Yearly
| Mar 2022 | Mar 2023 | Mar 2024
---|---|---|---
Promoters + | 72.30% | 72.30% | 72.30%
Public + | 27.70% | 27.70% | 27.70%
";

    #[test]
    fn test_quarterly_and_yearly_tables() {
        let record = parse_shareholding(SHAREHOLDING, &ParserConfig::default()).unwrap();

        let quarterly = record.quarterly.as_ref().unwrap();
        assert_eq!(quarterly.quarters, vec!["Mar 2024", "Jun 2024", "Sep 2024"]);
        assert_eq!(quarterly.metrics.len(), 4);
        assert_eq!(
            quarterly.metric("Promoters +").unwrap(),
            ["72.30%", "72.30%", "71.77%"]
        );

        let yearly = record.yearly.as_ref().unwrap();
        assert_eq!(yearly.years, vec!["Mar 2022", "Mar 2023", "Mar 2024"]);
        assert_eq!(yearly.metric("Public +").unwrap(), ["27.70%", "27.70%", "27.70%"]);
        assert!(yearly.metric("FIIs +").is_none());
    }

    #[test]
    fn test_output_keys() {
        let record = parse_shareholding(SHAREHOLDING, &ParserConfig::default()).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["Quarterly Shareholding"]["Quarters"].is_array());
        assert!(json["Yearly Shareholding"]["Years"].is_array());
    }

    #[test]
    fn test_quarterly_only() {
        let text = SHAREHOLDING.split("\nYearly").next().unwrap();
        let record = parse_shareholding(text, &ParserConfig::default()).unwrap();
        assert!(record.quarterly.is_some());
        assert!(record.yearly.is_none());
    }

    #[test]
    fn test_lines_before_threshold_only_feed_the_lookback() {
        let text = "Quarterly\n| Q1 | Q2\nPromoters | 1 | 2\nPublic | 3 | 4\nFIIs | 5 | 6";
        let record = parse_shareholding(text, &ParserConfig::default()).unwrap();

        let quarterly = record.quarterly.unwrap();
        assert_eq!(quarterly.quarters, vec!["Promoters", "1", "2"]);
        assert!(quarterly.metric("Promoters").is_none());
        assert_eq!(quarterly.metric("Public").unwrap(), ["3", "4"]);
    }

    #[test]
    fn test_yearly_lines_before_threshold_are_not_read() {
        let text = "Yearly\n| Mar 2022 | Mar 2023\n---|---|---\nPromoters | 1 | 2\nPublic | 3 | 4\nFIIs | 5 | 6";
        let err = parse_shareholding(text, &ParserConfig::default()).unwrap_err();
        assert!(err.is_no_data());
    }

    #[test]
    fn test_yearly_header_taken_at_threshold() {
        let text = "\
Yearly
Numbers in percentages
Holding by category
As reported to the exchange
Source: BSE filings
Last updated Mar 2024
---|---|---
| Mar 2022 | Mar 2023
Promoters | 1 | 2
Public | 3 | 4";
        let record = parse_shareholding(text, &ParserConfig::default()).unwrap();

        let yearly = record.yearly.unwrap();
        assert_eq!(yearly.years, vec!["Mar 2022", "Mar 2023"]);
        assert_eq!(yearly.metric("Promoters").unwrap(), ["1", "2"]);
        assert_eq!(yearly.metric("Public").unwrap(), ["3", "4"]);
        assert!(record.quarterly.is_none());

        let shifted = text.replace("Holding by category\n", "");
        let yearly = parse_shareholding(&shifted, &ParserConfig::default())
            .unwrap()
            .yearly
            .unwrap();
        assert_eq!(yearly.years, vec!["Promoters", "1", "2"]);
        assert!(yearly.metric("Promoters").is_none());
        assert_eq!(yearly.metric("Public").unwrap(), ["3", "4"]);
    }

    #[test]
    fn test_without_markers_is_no_data() {
        let text = "a | b\n---|---\nc | 1\nd | 2\ne | 3";
        assert!(parse_shareholding(text, &ParserConfig::default())
            .unwrap_err()
            .is_no_data());
    }

    #[test]
    fn test_short_input_is_no_data() {
        let text = "Quarterly\n| Q1\n---|---\nPromoters | 1";
        assert!(parse_shareholding(text, &ParserConfig::default())
            .unwrap_err()
            .is_no_data());
    }
}
