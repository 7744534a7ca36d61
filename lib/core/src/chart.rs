//! Brand size charts
//!
//! A chart is an ordered list of size labels, each carrying a closed
//! measurement interval per body dimension, plus brand-level fit metadata.

use crate::measurement::Dimension;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Closed numeric range `[min, max]` in centimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeInterval {
    pub min: f64,
    pub max: f64,
}

impl SizeInterval {
    /// Create an interval, swapping the bounds if given in reverse
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn half_width(&self) -> f64 {
        (self.max - self.min) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Distance in cm from `value` to the nearest edge, 0 when inside
    pub fn overshoot(&self, value: f64) -> f64 {
        if value < self.min {
            self.min - value
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        }
    }

    /// Scale both bounds by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.min * factor, self.max * factor)
    }
}

/// Brand-level cut philosophy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitProfile {
    Slim,
    #[default]
    Regular,
    Relaxed,
    Generous,
}

impl fmt::Display for FitProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FitProfile::Slim => "slim",
            FitProfile::Regular => "regular",
            FitProfile::Relaxed => "relaxed",
            FitProfile::Generous => "generous",
        };
        f.write_str(name)
    }
}

/// One size label and its measurement intervals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeEntry {
    pub label: String,
    pub intervals: BTreeMap<Dimension, SizeInterval>,
}

impl SizeEntry {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            intervals: BTreeMap::new(),
        }
    }

    pub fn with_interval(mut self, dimension: Dimension, min: f64, max: f64) -> Self {
        self.intervals.insert(dimension, SizeInterval::new(min, max));
        self
    }

    pub fn interval(&self, dimension: Dimension) -> Option<&SizeInterval> {
        self.intervals.get(&dimension)
    }

    /// Upper-body reference interval: bust, falling back to chest
    pub fn upper_body_interval(&self) -> Option<&SizeInterval> {
        self.interval(Dimension::Bust)
            .or_else(|| self.interval(Dimension::Chest))
    }
}

fn default_tolerance() -> f64 {
    2.0
}

/// A brand's size chart with fit metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandSizeChart {
    #[serde(default)]
    pub brand: String,
    /// Sizing country or region, informational only
    #[serde(default)]
    pub country: String,
    /// Sizes in chart order, smallest first; empty for a metadata-only chart
    #[serde(default)]
    pub sizes: Vec<SizeEntry>,
    /// Positive when garments run large for their label
    #[serde(default)]
    pub vanity_sizing_bias: f64,
    #[serde(default)]
    pub fit_profile: FitProfile,
    /// Descriptive tolerance in cm; not used by scoring
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl BrandSizeChart {
    pub fn new(brand: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            country: country.into(),
            sizes: Vec::new(),
            vanity_sizing_bias: 0.0,
            fit_profile: FitProfile::Regular,
            tolerance: default_tolerance(),
        }
    }

    pub fn with_fit_profile(mut self, fit_profile: FitProfile) -> Self {
        self.fit_profile = fit_profile;
        self
    }

    pub fn with_vanity_bias(mut self, bias: f64) -> Self {
        self.vanity_sizing_bias = bias;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_size(mut self, size: SizeEntry) -> Self {
        self.sizes.push(size);
        self
    }

    pub fn size(&self, label: &str) -> Option<&SizeEntry> {
        self.sizes.iter().find(|s| s.label == label)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.sizes.iter().map(|s| s.label.as_str()).collect()
    }

    /// Check structural soundness of a chart loaded from outside
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Error::InvalidChart {
            brand: self.brand.clone(),
            reason,
        };

        if self.brand.is_empty() {
            return Err(invalid("brand name is empty".to_string()));
        }
        if self.sizes.is_empty() {
            return Err(invalid("chart has no sizes".to_string()));
        }
        for size in &self.sizes {
            for (dimension, interval) in &size.intervals {
                if !interval.min.is_finite() || !interval.max.is_finite() {
                    return Err(invalid(format!(
                        "size {} has a non-finite {} interval",
                        size.label, dimension
                    )));
                }
                if interval.min > interval.max {
                    return Err(invalid(format!(
                        "size {} has {} min {} above max {}",
                        size.label, dimension, interval.min, interval.max
                    )));
                }
            }
        }
        Ok(())
    }
}
