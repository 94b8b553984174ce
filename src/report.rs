//! Per-company assembly of section outcomes, and the chunk records handed
//! to the embedding store.

use crate::config::{ParserConfig, SourceConfig};
use crate::dispatch::{parse_section, SectionOutcome};
use crate::error::Result;
use crate::sections::SectionId;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One section of a company page. `outcome` is `None` when no text was
/// fetched for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub section: SectionId,
    pub outcome: Option<SectionOutcome>,
}

impl SectionEntry {
    /// JSON the caller sees for this section: the record itself, or an
    /// `error` object (with the raw text when there was some).
    pub fn to_value(&self) -> Result<Value> {
        let value = match &self.outcome {
            Some(SectionOutcome::Parsed(record)) => serde_json::to_value(record)?,
            Some(SectionOutcome::NoData { raw, .. }) => json!({
                "error": self.section.parse_failure_message(),
                "plain_text": raw,
            }),
            None => json!({ "error": self.section.missing_message() }),
        };
        Ok(value)
    }
}

/// Every section of one company, in canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyReport {
    pub symbol: String,
    pub sections: Vec<SectionEntry>,
}

/// Section name → outcome JSON, ready to hand to a downstream consumer.
pub type CompanySnapshot = IndexMap<String, Value>;

impl CompanyReport {
    /// Parses every section from `(section, raw text)` pairs. Sections that
    /// are absent from `texts` are treated as not fetched.
    pub fn from_texts<I>(symbol: impl Into<String>, texts: I, config: &ParserConfig) -> Self
    where
        I: IntoIterator<Item = (SectionId, Option<String>)>,
    {
        let mut by_section: IndexMap<SectionId, Option<String>> = texts.into_iter().collect();

        let sections = SectionId::ALL
            .into_iter()
            .map(|section| {
                let text = by_section.swap_remove(&section).flatten();
                let outcome = text.map(|text| parse_section(section, &text, config));
                SectionEntry { section, outcome }
            })
            .collect();

        let report = Self {
            symbol: symbol.into(),
            sections,
        };
        info!(
            "Parsed {}/{} sections for {}",
            report.parsed_count(),
            report.sections.len(),
            report.symbol
        );
        report
    }

    pub fn outcome(&self, section: SectionId) -> Option<&SectionOutcome> {
        self.sections
            .iter()
            .find(|entry| entry.section == section)
            .and_then(|entry| entry.outcome.as_ref())
    }

    pub fn parsed_count(&self) -> usize {
        self.sections
            .iter()
            .filter(|entry| entry.outcome.as_ref().is_some_and(SectionOutcome::is_parsed))
            .count()
    }

    pub fn snapshot(&self) -> Result<CompanySnapshot> {
        self.sections
            .iter()
            .map(|entry| Ok((entry.section.to_string(), entry.to_value()?)))
            .collect()
    }

    /// One chunk per parsed section. Chunk numbers are the canonical section
    /// positions, so a skipped section leaves a gap.
    pub fn to_chunks(
        &self,
        source: &SourceConfig,
        fetched_at: DateTime<Utc>,
    ) -> Result<Vec<SectionChunk>> {
        let mut chunks = Vec::new();

        for entry in &self.sections {
            let Some(record) = entry.outcome.as_ref().and_then(SectionOutcome::record) else {
                debug!("Skipping {} for {}: no parsed record", entry.section, self.symbol);
                continue;
            };

            let section_name = entry.section.as_str();
            chunks.push(SectionChunk {
                url: source.section_url(&self.symbol, section_name),
                chunk_number: entry.section.position(),
                title: entry.section.title(),
                summary: format!("Data chunk for {} of {}", section_name, self.symbol),
                content: record.to_json()?,
                metadata: ChunkMetadata {
                    source: source.source_name.clone(),
                    data_type: source.data_type.clone(),
                    company_symbol: self.symbol.clone(),
                    section_name: section_name.to_string(),
                    fetched_at,
                },
            });
        }

        Ok(chunks)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub source: String,
    pub data_type: String,
    pub company_symbol: String,
    pub section_name: String,
    pub fetched_at: DateTime<Utc>,
}

/// A parsed section packaged for storage, one per section of a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionChunk {
    pub url: String,
    pub chunk_number: usize,
    pub title: String,
    pub summary: String,
    /// The section record serialized as JSON.
    pub content: String,
    pub metadata: ChunkMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const BASIC: &str = "* Market Cap  ₹ 1,000 Cr.\n* Stock P/E  25";
    const RATIOS: &str = "| Mar 2013 | Mar 2014\n---|---|---\nROCE % | 30% | 32%";

    fn report() -> CompanyReport {
        CompanyReport::from_texts(
            "TCS",
            vec![
                (SectionId::Ratios, Some(RATIOS.to_string())),
                (SectionId::BasicData, Some(BASIC.to_string())),
                (SectionId::BalanceSheet, Some("garbled".to_string())),
                (SectionId::Concalls, None),
            ],
            &ParserConfig::default(),
        )
    }

    #[test]
    fn test_sections_in_canonical_order() {
        let report = report();
        let order: Vec<_> = report.sections.iter().map(|e| e.section).collect();
        assert_eq!(order, SectionId::ALL.to_vec());
        assert_eq!(report.parsed_count(), 2);
        assert!(report.outcome(SectionId::Documents).is_none());
    }

    #[test]
    fn test_snapshot_fallbacks() {
        let snapshot = report().snapshot().unwrap();

        assert_eq!(snapshot["basic_data"]["Stock P/E"], "25");
        assert_eq!(
            snapshot["balance_sheet"],
            json!({"error": "Unable to parse balance sheet data", "plain_text": "garbled"})
        );
        assert_eq!(
            snapshot["concalls"],
            json!({"error": "No concalls data found."})
        );
        assert_eq!(
            snapshot["cash_flow"],
            json!({"error": "No cash flow data found."})
        );
    }

    #[test]
    fn test_chunks_keep_canonical_numbers() {
        let fetched_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let chunks = report()
            .to_chunks(&SourceConfig::default(), fetched_at)
            .unwrap();

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chunk_number, 1);
        assert_eq!(chunks[0].title, "Basic Data");
        assert_eq!(chunks[1].chunk_number, 7);
        assert_eq!(chunks[1].url, "https://www.screener.in/company/TCS/#ratios");
        assert_eq!(chunks[1].summary, "Data chunk for ratios of TCS");

        let content: Value = serde_json::from_str(&chunks[1].content).unwrap();
        assert_eq!(content["Years"], json!(["Mar 2013", "Mar 2014"]));

        let metadata = serde_json::to_value(&chunks[1].metadata).unwrap();
        assert_eq!(metadata["source"], "screener.in");
        assert_eq!(metadata["section_name"], "ratios");
        assert_eq!(metadata["fetched_at"], "2024-03-01T09:30:00Z");
    }
}
