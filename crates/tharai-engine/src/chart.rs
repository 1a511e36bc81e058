//! Tharai favorability charts and asterism lookup.
//!
//! A chart splits the 27 asterisms into named categories ("Birth Tharai",
//! "Wealth Tharai", ...), and marks each category favorable or not. Which
//! chart applies depends on the person's birth asterism, so charts come in a
//! [`ChartBook`] keyed by that name.
//!
//! Chart content is input data. It is loaded once by the caller and passed by
//! reference into every call. Nothing here caches or validates it beyond the
//! lookup contract.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::TharaiError;
use crate::ordered;

// ── CategoryEntry ───────────────────────────────────────────────────────────

/// One category of a chart, in the JSON shape of `tharais.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    #[serde(rename = "tharai")]
    pub category_name: String,
    /// Ordinal positions of the member asterisms, counted from the birth star.
    #[serde(
        rename = "nakshatra_numbers",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub asterism_numbers: Vec<u32>,
    #[serde(rename = "nakshatra_names")]
    pub asterism_names: Vec<String>,
    #[serde(rename = "auspicious")]
    pub favorable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
}

impl CategoryEntry {
    fn contains(&self, folded_name: &str) -> bool {
        self.asterism_names
            .iter()
            .any(|candidate| fold(candidate) == folded_name)
    }
}

/// What a chart says about one asterism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category_name: String,
    pub meaning: Option<String>,
    pub favorable: bool,
}

// ── FavorabilityChart ───────────────────────────────────────────────────────

/// An ordered list of categories. Order decides ties (see [`FavorabilityChart::lookup`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavorabilityChart {
    entries: Vec<CategoryEntry>,
}

impl FavorabilityChart {
    pub fn new(entries: Vec<CategoryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// Parse a single chart (a JSON array of categories).
    ///
    /// # Errors
    ///
    /// Returns [`TharaiError::InvalidChart`] if the JSON does not match the chart shape.
    pub fn from_json_str(json: &str) -> Result<Self, TharaiError> {
        serde_json::from_str(json).map_err(|e| TharaiError::InvalidChart(e.to_string()))
    }

    /// Classify an asterism by name.
    ///
    /// Matching is exact after trimming and case-folding. If a malformed chart
    /// lists the name under several categories, the first one in chart order
    /// wins. `None` means the name is not in the chart; callers treat it as
    /// unclassified rather than failing.
    ///
    /// # Examples
    ///
    /// ```
    /// use tharai_engine::chart::FavorabilityChart;
    ///
    /// let chart = FavorabilityChart::from_json_str(r#"[
    ///     {"tharai": "Wealth Tharai", "nakshatra_names": ["Poosam"], "auspicious": true}
    /// ]"#).unwrap();
    ///
    /// let hit = chart.lookup("POOSAM").unwrap();
    /// assert_eq!(hit.category_name, "Wealth Tharai");
    /// assert!(hit.favorable);
    /// assert!(chart.lookup("Rohini").is_none());
    /// ```
    pub fn lookup(&self, name: &str) -> Option<Classification> {
        let folded = fold(name);
        self.entries
            .iter()
            .find(|entry| entry.contains(&folded))
            .map(|entry| Classification {
                category_name: entry.category_name.clone(),
                meaning: entry.meaning.clone(),
                favorable: entry.favorable,
            })
    }
}

/// Free-function form of [`FavorabilityChart::lookup`].
pub fn lookup(name: &str, chart: &FavorabilityChart) -> Option<Classification> {
    chart.lookup(name)
}

// ── ChartBook ───────────────────────────────────────────────────────────────

/// Charts keyed by birth asterism, in file order.
///
/// The JSON shape is an object mapping chart name to chart:
/// `{ "Rohini": [ {...}, ... ], "Poorattathi": [ ... ] }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ChartBook {
    #[serde(deserialize_with = "ordered::deserialize")]
    charts: Vec<(String, FavorabilityChart)>,
}

impl ChartBook {
    /// # Errors
    ///
    /// Returns [`TharaiError::InvalidChart`] if the JSON does not match the chart book shape.
    pub fn from_json_str(json: &str) -> Result<Self, TharaiError> {
        serde_json::from_str(json).map_err(|e| TharaiError::InvalidChart(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`TharaiError::InvalidChart`] on read failures or malformed JSON.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TharaiError> {
        serde_json::from_reader(reader).map_err(|e| TharaiError::InvalidChart(e.to_string()))
    }

    /// Find a chart by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&FavorabilityChart> {
        let folded = fold(name);
        self.charts
            .iter()
            .find(|(chart_name, _)| fold(chart_name) == folded)
            .map(|(_, chart)| chart)
    }

    pub fn names(&self) -> Vec<&str> {
        self.charts.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

// ── Tests ───────────────────────────────────────────────────────────────────
