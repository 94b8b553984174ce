//! Section dispatch: pick the parser for a section and turn its failure
//! into a `NoData` outcome that keeps the raw text.

use crate::anchor_table::{parse_balance_sheet, parse_cash_flow, parse_ratios};
use crate::basic_data::parse_basic_data;
use crate::concalls::parse_concalls;
use crate::config::ParserConfig;
use crate::documents::parse_documents;
use crate::error::Result;
use crate::peers::parse_peer_comparison;
use crate::profit_loss::parse_profit_loss;
use crate::quarterly::parse_quarterly_results;
use crate::schema::SectionRecord;
use crate::sections::SectionId;
use crate::shareholding::parse_shareholding;
use log::debug;

/// What a parse produced: a record, or the raw text it could not read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    Parsed(SectionRecord),
    NoData { reason: String, raw: String },
}

impl SectionOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    pub fn record(&self) -> Option<&SectionRecord> {
        match self {
            Self::Parsed(record) => Some(record),
            Self::NoData { .. } => None,
        }
    }

    pub fn into_record(self) -> Option<SectionRecord> {
        match self {
            Self::Parsed(record) => Some(record),
            Self::NoData { .. } => None,
        }
    }
}

/// Runs the section's parser and wraps the result in its record variant.
pub fn parse_record(id: SectionId, text: &str, config: &ParserConfig) -> Result<SectionRecord> {
    let record = match id {
        SectionId::BasicData => SectionRecord::BasicData(parse_basic_data(text)?),
        SectionId::QuarterlyResults => {
            SectionRecord::QuarterlyResults(parse_quarterly_results(text, config)?)
        }
        SectionId::BalanceSheet => SectionRecord::BalanceSheet(parse_balance_sheet(text, config)?),
        SectionId::PeerComparison => {
            SectionRecord::PeerComparison(parse_peer_comparison(text, config)?)
        }
        SectionId::ProfitLoss => SectionRecord::ProfitLoss(parse_profit_loss(text, config)?),
        SectionId::CashFlow => SectionRecord::CashFlow(parse_cash_flow(text, config)?),
        SectionId::Ratios => SectionRecord::Ratios(parse_ratios(text, config)?),
        SectionId::Shareholding => SectionRecord::Shareholding(parse_shareholding(text, config)?),
        SectionId::Documents => SectionRecord::Documents(parse_documents(text)?),
        SectionId::Concalls => SectionRecord::Concalls(parse_concalls(text)?),
    };
    Ok(record)
}

/// Parses one section. Never fails: anything the parser cannot read comes
/// back as [`SectionOutcome::NoData`] carrying the raw text.
pub fn parse_section(id: SectionId, text: &str, config: &ParserConfig) -> SectionOutcome {
    match parse_record(id, text, config) {
        Ok(record) => SectionOutcome::Parsed(record),
        Err(err) => {
            debug!("{}: falling back to raw text: {}", id, err);
            SectionOutcome::NoData {
                reason: err.to_string(),
                raw: text.to_string(),
            }
        }
    }
}

/// Dispatch by section name (`"cash_flow"`, `"Profit-Loss"`, `"peers"`, ...).
/// Only an unknown name is an error.
pub fn parse_section_by_name(
    name: &str,
    text: &str,
    config: &ParserConfig,
) -> Result<SectionOutcome> {
    let id: SectionId = name.parse()?;
    Ok(parse_section(id, text, config))
}
