//! # Financial Section Parser
//!
//! A library for turning the text of scraped company-page sections (pipe
//! tables, bullet lists, markdown links) into structured financial records.
//!
//! ## Core Concepts
//!
//! - **Section**: one region of a company page (balance sheet, documents, ...), see [`SectionId`]
//! - **Section Record**: the typed result of parsing one section, see [`SectionRecord`]
//! - **NoData**: the soft failure of a parser; the raw text is kept so callers can fall back to it
//! - **Anchor phrase**: a fiscal-period label (`"Mar 2013"`) that locates the header row of yearly tables
//! - **Chunk**: a parsed section packaged with metadata for an embedding store
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_section_parser::*;
//!
//! let text = "Metric | Mar 2013 | Mar 2014\n---|---|---\nSales | 100 | 120\nTotal Assets | 500 | 600";
//!
//! match parse_section(SectionId::BalanceSheet, text, &ParserConfig::default()) {
//!     SectionOutcome::Parsed(record) => println!("{}", record.to_json()?),
//!     SectionOutcome::NoData { reason, raw } => eprintln!("{reason}\n{raw}"),
//! }
//!
//! let report = SectionParser::default().parse_company(
//!     "TCS",
//!     vec![(SectionId::BalanceSheet, Some(text.to_string()))],
//! );
//! let chunks = report.to_chunks(&SourceConfig::default(), chrono::Utc::now())?;
//! ```

pub mod anchor_table;
pub mod basic_data;
pub mod concalls;
pub mod config;
pub mod dispatch;
pub mod documents;
pub mod error;
pub mod grammar;
pub mod lines;
pub mod peers;
pub mod pipeline;
pub mod profit_loss;
pub mod quarterly;
pub mod report;
pub mod schema;
pub mod sections;
pub mod shareholding;
pub mod symbol;

pub use anchor_table::{
    parse_anchor_table, parse_balance_sheet, parse_cash_flow, parse_ratios, parse_with_anchor,
    AnchorTableSpec,
};
pub use basic_data::parse_basic_data;
pub use concalls::parse_concalls;
pub use config::{ParserConfig, SeparatorPolicy, SourceConfig};
pub use dispatch::{parse_record, parse_section, parse_section_by_name, SectionOutcome};
pub use documents::parse_documents;
pub use error::{Result, SectionError};
pub use peers::parse_peer_comparison;
pub use pipeline::{ChunkStore, EmbeddedChunk, Embedder, PageSource, Pipeline, EMBEDDING_DIMENSIONS};
pub use profit_loss::parse_profit_loss;
pub use quarterly::parse_quarterly_results;
pub use report::{ChunkMetadata, CompanyReport, CompanySnapshot, SectionChunk, SectionEntry};
pub use schema::*;
pub use sections::SectionId;
pub use shareholding::parse_shareholding;
pub use symbol::{parse_symbol_listing, StockListing};

use log::{debug, info};

/// Parser facade holding a validated configuration.
#[derive(Debug, Clone, Default)]
pub struct SectionParser {
    config: ParserConfig,
}

impl SectionParser {
    pub fn new(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            "Parser configured with anchor '{}' and {:?} separators",
            config.anchor_phrase, config.separator_policy
        );
        Ok(Self { config })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::new(ParserConfig::from_json_str(json)?)
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse(&self, section: SectionId, text: &str) -> SectionOutcome {
        parse_section(section, text, &self.config)
    }

    pub fn parse_by_name(&self, name: &str, text: &str) -> Result<SectionOutcome> {
        parse_section_by_name(name, text, &self.config)
    }

    pub fn parse_company<I>(&self, symbol: &str, texts: I) -> CompanyReport
    where
        I: IntoIterator<Item = (SectionId, Option<String>)>,
    {
        info!("Parsing company sections for: {}", symbol);
        CompanyReport::from_texts(symbol, texts, &self.config)
    }
}

/// Parses one company's sections with the default configuration.
pub fn parse_company_sections<I>(symbol: &str, texts: I) -> CompanyReport
where
    I: IntoIterator<Item = (SectionId, Option<String>)>,
{
    SectionParser::default().parse_company(symbol, texts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_rejects_invalid_config() {
        let result = SectionParser::from_json_str(r#"{"anchor_phrase": ""}"#);
        assert!(matches!(result, Err(SectionError::InvalidConfig(_))));
    }

    #[test]
    fn test_custom_anchor_phrase() {
        let parser = SectionParser::from_json_str(r#"{"anchor_phrase": "Mar 2015"}"#).unwrap();
        let text = "| Mar 2015 | Mar 2016\n---|---|---\nBorrowings | 10 | 12";

        let outcome = parser.parse(SectionId::BalanceSheet, text);
        let Some(SectionRecord::BalanceSheet(table)) = outcome.record() else {
            panic!("expected a balance sheet record");
        };
        assert_eq!(table.years, vec!["Mar 2015", "Mar 2016"]);
        assert_eq!(table.metric("Borrowings").unwrap(), ["10", "12"]);

        assert!(!SectionParser::default()
            .parse(SectionId::BalanceSheet, text)
            .is_parsed());
    }

    #[test]
    fn test_parse_company_sections() {
        let report = parse_company_sections(
            "INFY",
            vec![(SectionId::BasicData, Some("* ROCE  31.2 %".to_string()))],
        );
        assert_eq!(report.parsed_count(), 1);
        assert_eq!(report.sections.len(), SectionId::ALL.len());
    }
}
