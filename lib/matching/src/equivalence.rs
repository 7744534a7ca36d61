//! Cross-brand size equivalence
//!
//! Translates a size in one brand into the sizes of other brands whose
//! upper-body (bust, falling back to chest) interval overlaps it.

use crate::distance::overlap_ratio;
use fitx_core::{BrandSizeChart, Error, SizeChartRegistry, SizeInterval};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Candidates must overlap the reference interval by more than this
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.3;

/// Whether vanity sizing bias reshapes intervals before comparison
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VanityAdjustment {
    /// Compare chart intervals as published
    #[default]
    None,
    /// Scale each brand's intervals by `1 + vanitySizingBias`
    Shift,
}

impl FromStr for VanityAdjustment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(VanityAdjustment::None),
            "shift" => Ok(VanityAdjustment::Shift),
            other => Err(Error::InvalidConfig(format!("unknown vanity adjustment '{}'", other))),
        }
    }
}

impl fmt::Display for VanityAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VanityAdjustment::None => f.write_str("none"),
            VanityAdjustment::Shift => f.write_str("shift"),
        }
    }
}

/// A target-brand size equivalent to the source size
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalentSize {
    pub size: String,
    pub overlap: f64,
}

/// Target brand → equivalent sizes, in chart order
pub type EquivalenceMap = BTreeMap<String, Vec<EquivalentSize>>;

#[derive(Debug, Clone, Copy)]
pub struct EquivalenceMapper {
    adjustment: VanityAdjustment,
    threshold: f64,
}

impl Default for EquivalenceMapper {
    fn default() -> Self {
        Self::new(VanityAdjustment::default())
    }
}

impl EquivalenceMapper {
    pub fn new(adjustment: VanityAdjustment) -> Self {
        Self {
            adjustment,
            threshold: DEFAULT_OVERLAP_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    fn effective(&self, interval: &SizeInterval, chart: &BrandSizeChart) -> SizeInterval {
        match self.adjustment {
            VanityAdjustment::None => *interval,
            VanityAdjustment::Shift => interval.scaled(1.0 + chart.vanity_sizing_bias),
        }
    }

    /// Sizes in `target` that overlap `source_size` of `source`
    ///
    /// Empty when the source size is unknown or has no upper-body interval.
    pub fn map_size(&self, source: &BrandSizeChart, source_size: &str, target: &BrandSizeChart) -> Vec<EquivalentSize> {
        let Some(reference) = source.size(source_size).and_then(|s| s.upper_body_interval()) else {
            return Vec::new();
        };
        let reference = self.effective(reference, source);

        target
            .sizes
            .iter()
            .filter_map(|size| {
                let candidate = self.effective(size.upper_body_interval()?, target);
                let overlap = overlap_ratio(&reference, &candidate);
                (overlap > self.threshold).then(|| EquivalentSize {
                    size: size.label.clone(),
                    overlap,
                })
            })
            .collect()
    }

    /// Map a size onto several target charts
    pub fn map_to_charts<'a>(
        &self,
        source: &BrandSizeChart,
        source_size: &str,
        targets: impl IntoIterator<Item = &'a BrandSizeChart>,
    ) -> EquivalenceMap {
        targets
            .into_iter()
            .map(|target| (target.brand.clone(), self.map_size(source, source_size, target)))
            .collect()
    }

    /// Registry-backed lookup by brand names
    ///
    /// Unknown source brand yields an empty map; unknown target brands are
    /// skipped.
    pub fn equivalents(
        &self,
        registry: &SizeChartRegistry,
        source_brand: &str,
        source_size: &str,
        target_brands: &[&str],
    ) -> EquivalenceMap {
        let Some(source) = registry.lookup(source_brand) else {
            return EquivalenceMap::new();
        };
        let targets = target_brands.iter().filter_map(|brand| registry.lookup(brand));
        self.map_to_charts(source, source_size, targets)
    }
}
