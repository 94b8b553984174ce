use crate::error::SectionError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The ten report sections scraped from a company page, in canonical order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    BasicData,
    QuarterlyResults,
    BalanceSheet,
    PeerComparison,
    ProfitLoss,
    CashFlow,
    Ratios,
    #[serde(rename = "shareholding_pattern")]
    Shareholding,
    Documents,
    Concalls,
}

impl SectionId {
    pub const ALL: [SectionId; 10] = [
        Self::BasicData,
        Self::QuarterlyResults,
        Self::BalanceSheet,
        Self::PeerComparison,
        Self::ProfitLoss,
        Self::CashFlow,
        Self::Ratios,
        Self::Shareholding,
        Self::Documents,
        Self::Concalls,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BasicData => "basic_data",
            Self::QuarterlyResults => "quarterly_results",
            Self::BalanceSheet => "balance_sheet",
            Self::PeerComparison => "peer_comparison",
            Self::ProfitLoss => "profit_loss",
            Self::CashFlow => "cash_flow",
            Self::Ratios => "ratios",
            Self::Shareholding => "shareholding_pattern",
            Self::Documents => "documents",
            Self::Concalls => "concalls",
        }
    }

    /// Page region the section's text is scraped from.
    pub const fn selector(self) -> &'static str {
        match self {
            Self::BasicData => "#top-ratios",
            Self::QuarterlyResults => "#quarters",
            Self::BalanceSheet => "#balance-sheet",
            Self::PeerComparison => "#peers",
            Self::ProfitLoss => "#profit-loss",
            Self::CashFlow => "#cash-flow",
            Self::Ratios => "#ratios",
            Self::Shareholding => "#shareholding",
            Self::Documents => "#documents",
            Self::Concalls => ".concalls",
        }
    }

    /// Title-cased name, e.g. "Basic Data".
    pub fn title(self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Human label used in failure messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::BasicData => "basic data",
            Self::QuarterlyResults => "quarterly results",
            Self::BalanceSheet => "balance sheet",
            Self::PeerComparison => "peer comparison",
            Self::ProfitLoss => "profit & loss",
            Self::CashFlow => "cash flow",
            Self::Ratios => "ratios",
            Self::Shareholding => "shareholding",
            Self::Documents => "documents",
            Self::Concalls => "concalls",
        }
    }

    pub fn parse_failure_message(self) -> String {
        match self {
            Self::BasicData | Self::QuarterlyResults => format!("Unable to parse {}", self.label()),
            _ => format!("Unable to parse {} data", self.label()),
        }
    }

    pub fn missing_message(self) -> String {
        match self {
            Self::BasicData => "No basic data found".to_string(),
            Self::Concalls => "No concalls data found.".to_string(),
            Self::QuarterlyResults => "No quarterly results data found.".to_string(),
            _ => format!("No {} data found.", self.label()),
        }
    }

    /// 1-based position in the canonical order.
    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|id| *id == self)
            .map_or(0, |idx| idx + 1)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = SectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "shareholding" => Ok(Self::Shareholding),
            "peers" => Ok(Self::PeerComparison),
            "quarters" => Ok(Self::QuarterlyResults),
            name => Self::ALL
                .into_iter()
                .find(|id| id.as_str() == name)
                .ok_or_else(|| SectionError::UnknownSection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for id in SectionId::ALL {
            assert_eq!(id.as_str().parse::<SectionId>().unwrap(), id);
        }
    }

    #[test]
    fn test_aliases_and_unknown() {
        assert_eq!("Cash-Flow".parse::<SectionId>().unwrap(), SectionId::CashFlow);
        assert_eq!("peers".parse::<SectionId>().unwrap(), SectionId::PeerComparison);
        assert!(matches!(
            "dividends".parse::<SectionId>(),
            Err(SectionError::UnknownSection(_))
        ));
    }

    #[test]
    fn test_titles_and_positions() {
        assert_eq!(SectionId::BasicData.title(), "Basic Data");
        assert_eq!(SectionId::Shareholding.title(), "Shareholding Pattern");
        assert_eq!(SectionId::BasicData.position(), 1);
        assert_eq!(SectionId::Concalls.position(), 10);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            SectionId::BalanceSheet.parse_failure_message(),
            "Unable to parse balance sheet data"
        );
        assert_eq!(SectionId::CashFlow.missing_message(), "No cash flow data found.");
    }
}
