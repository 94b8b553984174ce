use crate::error::{Result, SectionError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a table separator row is recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorPolicy {
    /// Exact match against the 13- and 12-column dash strings.
    Literal,
    /// Dash/pipe-only line whose column count fits the header.
    #[default]
    Structural,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ParserConfig {
    /// Fiscal-period label present in the header row of every yearly table.
    pub anchor_phrase: String,
    pub separator_policy: SeparatorPolicy,
    pub balance_sheet_stop_phrases: Vec<String>,
    pub cash_flow_stop_phrases: Vec<String>,
    pub ratios_stop_phrases: Vec<String>,
    pub profit_loss_stop_phrases: Vec<String>,
    pub growth_section_titles: Vec<String>,
    pub min_table_lines: usize,
    pub min_shareholding_lines: usize,
    /// Absolute line index from which a quarterly shareholding header may be taken.
    pub quarterly_header_threshold: usize,
    /// Absolute line index from which a yearly shareholding header may be taken.
    pub yearly_header_threshold: usize,
    pub quarterly_results_header_line: usize,
    pub quarterly_results_first_data_line: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            anchor_phrase: "Mar 2013".to_string(),
            separator_policy: SeparatorPolicy::Structural,
            balance_sheet_stop_phrases: vec!["Total Assets".to_string()],
            cash_flow_stop_phrases: vec!["Net Cash Flow".to_string()],
            ratios_stop_phrases: Vec::new(),
            profit_loss_stop_phrases: Vec::new(),
            growth_section_titles: vec![
                "Compounded Sales Growth".to_string(),
                "Compounded Profit Growth".to_string(),
                "Stock Price CAGR".to_string(),
                "Return on Equity".to_string(),
            ],
            min_table_lines: 3,
            min_shareholding_lines: 5,
            quarterly_header_threshold: 3,
            yearly_header_threshold: 8,
            quarterly_results_header_line: 3,
            quarterly_results_first_data_line: 5,
        }
    }
}

impl ParserConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.anchor_phrase.trim().is_empty() {
            return Err(SectionError::InvalidConfig(
                "anchor_phrase must not be empty".to_string(),
            ));
        }

        if self.growth_section_titles.iter().any(|t| t.trim().is_empty()) {
            return Err(SectionError::InvalidConfig(
                "growth section titles must not be empty".to_string(),
            ));
        }

        if self.quarterly_results_first_data_line <= self.quarterly_results_header_line {
            return Err(SectionError::InvalidConfig(format!(
                "quarterly results data must start after the header line ({} <= {})",
                self.quarterly_results_first_data_line, self.quarterly_results_header_line
            )));
        }

        Ok(())
    }
}

/// Where scraped pages come from and how stored chunks are labelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub source_name: String,
    pub data_type: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.screener.in/company/".to_string(),
            source_name: "screener.in".to_string(),
            data_type: "stock_data".to_string(),
        }
    }
}

impl SourceConfig {
    pub fn company_url(&self, symbol: &str) -> String {
        format!("{}/{}/", self.base_url.trim_end_matches('/'), symbol)
    }

    pub fn section_url(&self, symbol: &str, section_name: &str) -> String {
        format!("{}#{}", self.company_url(symbol), section_name)
    }
}
