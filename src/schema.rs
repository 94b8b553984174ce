use crate::sections::SectionId;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metric name → per-period values, in source order.
pub type MetricRows = IndexMap<String, Vec<String>>;

/// A period table whose header row is stored under `"Years"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct YearlyTable {
    #[serde(rename = "Years")]
    #[schemars(description = "Header cells of the table, in column order")]
    pub years: Vec<String>,

    /// Metric name mapped to its per-period values.
    #[serde(flatten)]
    pub metrics: MetricRows,
}

impl YearlyTable {
    pub fn metric(&self, name: &str) -> Option<&[String]> {
        self.metrics.get(name).map(Vec::as_slice)
    }
}

/// A period table whose header row is stored under `"Quarters"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct QuarterlyTable {
    #[serde(rename = "Quarters")]
    pub quarters: Vec<String>,

    #[serde(flatten)]
    pub metrics: MetricRows,
}

impl QuarterlyTable {
    pub fn metric(&self, name: &str) -> Option<&[String]> {
        self.metrics.get(name).map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct QuarterlyResults {
    #[serde(flatten)]
    pub table: QuarterlyTable,

    #[serde(
        rename = "Upcoming result date",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub upcoming_result_date: Option<String>,
}

/// Growth block title → (period label → value).
pub type GrowthRatios = IndexMap<String, IndexMap<String, String>>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ProfitLoss {
    #[serde(flatten)]
    pub table: YearlyTable,

    #[serde(rename = "Growth Ratios", default)]
    #[schemars(
        description = "Compounded growth blocks (e.g. 'Compounded Sales Growth') mapping period labels like '10 Years' to values"
    )]
    pub growth_ratios: GrowthRatios,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Shareholding {
    #[serde(
        rename = "Quarterly Shareholding",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub quarterly: Option<QuarterlyTable>,

    #[serde(
        rename = "Yearly Shareholding",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub yearly: Option<YearlyTable>,
}

/// One peer row: header cell → value.
pub type PeerRow = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PeerComparison(pub Vec<PeerRow>);

impl PeerComparison {
    pub fn rows(&self) -> &[PeerRow] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Announcement {
    pub description: String,
    #[schemars(description = "Relative or absolute date token such as '2d', '15 Jan 2024' or '5h'")]
    pub date: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnnualReport {
    pub description: String,
    #[schemars(description = "Exchange or publisher the report was taken from")]
    pub source: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CreditRating {
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Documents {
    #[serde(
        rename = "Announcements",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub announcements: Option<Vec<Announcement>>,

    #[serde(
        rename = "Annual Reports",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub annual_reports: Option<Vec<AnnualReport>>,

    #[serde(
        rename = "Credit Ratings",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub credit_ratings: Option<Vec<CreditRating>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ConcallEntry {
    #[serde(rename = "Date")]
    pub date: String,

    #[serde(rename = "Transcript", default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,

    #[serde(rename = "PPT", default, skip_serializing_if = "Option::is_none")]
    pub ppt: Option<String>,

    #[serde(rename = "REC", default, skip_serializing_if = "Option::is_none")]
    pub rec: Option<String>,

    #[serde(rename = "Notes", default, skip_serializing_if = "std::ops::Not::not")]
    pub notes: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct BasicData(pub IndexMap<String, String>);

impl BasicData {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

/// The structured result of parsing one section. Serialized without a tag:
/// each variant carries its own section-specific key set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum SectionRecord {
    BasicData(BasicData),
    QuarterlyResults(QuarterlyResults),
    BalanceSheet(YearlyTable),
    PeerComparison(PeerComparison),
    ProfitLoss(ProfitLoss),
    CashFlow(YearlyTable),
    Ratios(YearlyTable),
    Shareholding(Shareholding),
    Documents(Documents),
    Concalls(Vec<ConcallEntry>),
}

impl SectionRecord {
    pub fn section_id(&self) -> SectionId {
        match self {
            Self::BasicData(_) => SectionId::BasicData,
            Self::QuarterlyResults(_) => SectionId::QuarterlyResults,
            Self::BalanceSheet(_) => SectionId::BalanceSheet,
            Self::PeerComparison(_) => SectionId::PeerComparison,
            Self::ProfitLoss(_) => SectionId::ProfitLoss,
            Self::CashFlow(_) => SectionId::CashFlow,
            Self::Ratios(_) => SectionId::Ratios,
            Self::Shareholding(_) => SectionId::Shareholding,
            Self::Documents(_) => SectionId::Documents,
            Self::Concalls(_) => SectionId::Concalls,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(SectionRecord)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
