//! Profit & loss: an anchor table followed by compounded-growth blocks.
//!
//! A growth block opens on one of the configured titles and collects
//! `label: value` lines until a blank line closes it. Outside a block,
//! lines are ordinary metric rows.

use crate::anchor_table::{check_min_lines, is_stop_row, locate_header, metric_row, BodyScanner};
use crate::config::ParserConfig;
use crate::error::{Result, SectionError};
use crate::lines::{all_lines, tokenize_row};
use crate::schema::{GrowthRatios, MetricRows, ProfitLoss, YearlyTable};
use crate::sections::SectionId;
use indexmap::IndexMap;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GrowthState<'a> {
    Idle,
    InSection(&'a str),
}

fn growth_title<'a>(line: &str, titles: &'a [String]) -> Option<&'a str> {
    titles
        .iter()
        .find(|title| line.contains(title.as_str()))
        .map(String::as_str)
}

fn trim_growth_cell(s: &str) -> String {
    s.trim_matches(|c: char| c == '|' || c.is_whitespace())
        .to_string()
}

/// Splits `label: value` on the first colon.
fn growth_entry(line: &str) -> Option<(String, String)> {
    let (label, value) = line.split_once(':')?;
    let label = trim_growth_cell(label);
    if label.is_empty() {
        return None;
    }
    Some((label, trim_growth_cell(value)))
}

pub fn parse_profit_loss(text: &str, config: &ParserConfig) -> Result<ProfitLoss> {
    let section = SectionId::ProfitLoss;
    let lines = all_lines(text);
    let non_blank = lines.iter().filter(|line| !line.is_empty()).count();
    check_min_lines(section, non_blank, config.min_table_lines)?;

    let header_idx = locate_header(&lines, &config.anchor_phrase).ok_or_else(|| {
        SectionError::no_data(
            section.label(),
            format!("anchor phrase '{}' not found", config.anchor_phrase),
        )
    })?;

    let years = tokenize_row(lines[header_idx]);
    let mut metrics = MetricRows::new();
    let mut growth_ratios = GrowthRatios::new();
    let mut body = BodyScanner::new(years.len(), config.separator_policy);
    let mut state = GrowthState::Idle;

    for line in &lines[header_idx + 1..] {
        if !body.accept(line) {
            continue;
        }

        if let Some(title) = growth_title(line, &config.growth_section_titles) {
            growth_ratios.insert(title.to_string(), IndexMap::new());
            state = GrowthState::InSection(title);
            continue;
        }

        match state {
            GrowthState::InSection(title) => {
                if line.is_empty() {
                    state = GrowthState::Idle;
                } else if let Some((label, value)) = growth_entry(line) {
                    if let Some(block) = growth_ratios.get_mut(title) {
                        block.insert(label, value);
                    }
                } else {
                    debug!("{}: ignoring '{}' inside {}", section, line, title);
                }
            }
            GrowthState::Idle => {
                if line.is_empty() {
                    continue;
                }
                let Some((name, values)) = metric_row(line) else {
                    continue;
                };
                if is_stop_row(&name, &config.profit_loss_stop_phrases) {
                    continue;
                }
                metrics.insert(name, values);
            }
        }
    }

    Ok(ProfitLoss {
        table: YearlyTable { years, metrics },
        growth_ratios,
    })
}
