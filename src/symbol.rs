use crate::error::{Result, SectionError};
use serde::{Deserialize, Serialize};

/// A search-result listing such as `"NSE: Tata Consultancy"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockListing {
    pub exchange: String,
    pub stock_name: String,
}

impl StockListing {
    /// Page key used in company URLs: the name without spaces, upper-cased.
    pub fn company_symbol(&self) -> String {
        self.stock_name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

pub fn parse_symbol_listing(text: &str) -> Result<StockListing> {
    let (exchange, stock_name) = text.trim().split_once(": ").ok_or_else(|| {
        SectionError::no_data("symbol listing", format!("no ': ' separator in '{}'", text.trim()))
    })?;

    Ok(StockListing {
        exchange: exchange.trim().to_string(),
        stock_name: stock_name.trim().to_string(),
    })
}
