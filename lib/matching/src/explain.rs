//! Response structures
//!
//! Per-product results carry the evidence behind each recommendation:
//! per-dimension match detail, borderline alternatives, cross-brand
//! equivalents and fit risks.

use crate::consensus::ComparisonSummary;
use crate::equivalence::EquivalenceMap;
use crate::matcher::{DimensionMatch, SizeMatch, SizeScore};
use crate::risk::missing_chart_risk;
use serde::Serialize;

/// Label reported when a brand's size cannot be determined
pub const UNKNOWN_SIZE: &str = "UNKNOWN";

/// Size recommendation for one product
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeComparisonResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub brand: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub recommended_size: String,
    pub confidence: f64,
    pub measurements: Vec<DimensionMatch>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub borderline_sizes: Vec<SizeScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_brand_equivalents: Option<EquivalenceMap>,
    pub risks: Vec<String>,
}

impl SizeComparisonResult {
    /// Result for a brand without a usable chart
    pub fn unknown(brand: impl Into<String>) -> Self {
        let brand = brand.into();
        Self {
            product_id: None,
            risks: vec![missing_chart_risk(&brand)],
            brand,
            category: None,
            recommended_size: UNKNOWN_SIZE.to_string(),
            confidence: 0.0,
            measurements: Vec::new(),
            borderline_sizes: Vec::new(),
            cross_brand_equivalents: None,
        }
    }

    /// Result built from a size match and its risks
    pub fn from_match(brand: impl Into<String>, size_match: SizeMatch, risks: Vec<String>) -> Self {
        Self {
            product_id: None,
            brand: brand.into(),
            category: None,
            recommended_size: size_match.label,
            confidence: size_match.confidence,
            measurements: size_match.details,
            borderline_sizes: size_match.candidates,
            cross_brand_equivalents: None,
            risks,
        }
    }

    pub fn with_product(mut self, product_id: Option<String>, category: Option<String>) -> Self {
        self.product_id = product_id;
        self.category = category;
        self
    }

    pub fn with_equivalents(mut self, equivalents: EquivalenceMap) -> Self {
        self.cross_brand_equivalents = Some(equivalents);
        self
    }

    pub fn is_unknown(&self) -> bool {
        self.recommended_size == UNKNOWN_SIZE
    }
}

/// Full response for a size comparison request
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResponse {
    pub comparisons: Vec<SizeComparisonResult>,
    pub summary: ComparisonSummary,
}
