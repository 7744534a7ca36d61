//! Size matcher
//!
//! Scores every size in a brand chart against a measurement set and picks
//! the size with the smallest weighted distance.

use crate::distance::{dimension_distance, key_weight, IntervalScoring, KEY_DIMENSIONS};
use fitx_core::{BodyMeasurement, BrandSizeChart, Dimension, SizeEntry, SizeInterval};
use serde::Serialize;

/// Sizes scoring above this confidence are kept as borderline candidates
pub const DEFAULT_CANDIDATE_THRESHOLD: f64 = 0.6;

/// How one measured dimension compares to the chosen size
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionMatch {
    pub dimension: Dimension,
    pub user_value: f64,
    pub size_min: f64,
    pub size_max: f64,
    /// True when the measurement falls inside the size interval
    pub matches: bool,
    /// Centimeters beyond the nearest interval edge, 0 when inside
    pub variance: f64,
}

/// Score of a single size label
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeScore {
    pub size: String,
    pub confidence: f64,
}

/// Best size for one chart, with the evidence behind it
#[derive(Debug, Clone, PartialEq)]
pub struct SizeMatch {
    pub label: String,
    pub distance: f64,
    pub confidence: f64,
    pub details: Vec<DimensionMatch>,
    /// Sizes above the candidate threshold, most confident first
    pub candidates: Vec<SizeScore>,
}

impl SizeMatch {
    /// Variance for a dimension, 0 when it was not compared
    pub fn variance(&self, dimension: Dimension) -> f64 {
        self.details
            .iter()
            .find(|d| d.dimension == dimension)
            .map(|d| d.variance)
            .unwrap_or(0.0)
    }
}

/// Computes weighted interval distances between measurements and sizes
#[derive(Debug, Clone, Copy)]
pub struct SizeMatcher {
    scoring: IntervalScoring,
    candidate_threshold: f64,
}

impl Default for SizeMatcher {
    fn default() -> Self {
        Self::new(IntervalScoring::default())
    }
}

impl SizeMatcher {
    pub fn new(scoring: IntervalScoring) -> Self {
        Self {
            scoring,
            candidate_threshold: DEFAULT_CANDIDATE_THRESHOLD,
        }
    }

    pub fn with_candidate_threshold(mut self, threshold: f64) -> Self {
        self.candidate_threshold = threshold;
        self
    }

    pub fn scoring(&self) -> IntervalScoring {
        self.scoring
    }

    /// Weighted distance of a measurement set from one size
    ///
    /// The upper body is scored once, on the size's bust interval or else
    /// its chest interval. Weights are renormalized over the key dimensions
    /// present in both the measurements and the size. A size sharing no key dimension with
    /// the measurements scores the maximum distance of 1.0.
    pub fn size_distance(&self, measurement: &BodyMeasurement, size: &SizeEntry) -> f64 {
        let mut weighted = 0.0;
        let mut total_weight = 0.0;

        for dimension in KEY_DIMENSIONS {
            let Some((value, interval)) = key_pair(measurement, size, dimension) else {
                continue;
            };
            let weight = key_weight(dimension).unwrap_or(0.0);
            weighted += weight * dimension_distance(value, interval, self.scoring);
            total_weight += weight;
        }

        if total_weight <= 0.0 {
            return 1.0;
        }
        (weighted / total_weight).clamp(0.0, 1.0)
    }

    /// Pick the closest size in a chart
    ///
    /// Returns `None` only for a chart without sizes. Ties keep the size
    /// that comes first in chart order.
    pub fn best_size(&self, measurement: &BodyMeasurement, chart: &BrandSizeChart) -> Option<SizeMatch> {
        let scored: Vec<(&SizeEntry, f64)> = chart
            .sizes
            .iter()
            .map(|size| (size, self.size_distance(measurement, size)))
            .collect();

        // min_by keeps the first of equal minima
        let &(best, distance) = scored
            .iter()
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))?;

        let mut candidates: Vec<SizeScore> = scored
            .iter()
            .map(|(size, d)| SizeScore {
                size: size.label.clone(),
                confidence: 1.0 - d,
            })
            .filter(|s| s.confidence > self.candidate_threshold)
            .collect();
        // Stable sort keeps chart order among equal confidences
        candidates.sort_by(|a, b| {
            b.confidence.partial_cmp(&a.confidence).unwrap_or(std::cmp::Ordering::Equal)
        });

        Some(SizeMatch {
            label: best.label.clone(),
            distance,
            confidence: (1.0 - distance).clamp(0.0, 1.0),
            details: dimension_details(measurement, best),
            candidates,
        })
    }
}

/// Measured value and size interval for one key dimension
fn key_pair<'a>(measurement: &BodyMeasurement, size: &'a SizeEntry, dimension: Dimension) -> Option<(f64, &'a SizeInterval)> {
    if !matches!(dimension, Dimension::Bust | Dimension::Chest) {
        return Some((measurement.get(dimension)?, size.interval(dimension)?));
    }
    let interval = size.upper_body_interval()?;
    let (own, other) = if size.interval(Dimension::Bust).is_some() {
        (Dimension::Bust, Dimension::Chest)
    } else {
        (Dimension::Chest, Dimension::Bust)
    };
    let value = measurement.get(own).or_else(|| measurement.get(other))?;
    Some((value, interval))
}

/// Per-dimension comparison for every dimension shared by measurement and size
pub fn dimension_details(measurement: &BodyMeasurement, size: &SizeEntry) -> Vec<DimensionMatch> {
    size.intervals
        .iter()
        .filter_map(|(&dimension, interval)| {
            let value = measurement.get(dimension)?;
            Some(DimensionMatch {
                dimension,
                user_value: value,
                size_min: interval.min,
                size_max: interval.max,
                matches: interval.contains(value),
                variance: interval.overshoot(value),
            })
        })
        .collect()
}
