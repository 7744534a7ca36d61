//! Interval distance and overlap functions
//!
//! Per-dimension distances are in range [0.0, 1.0] where 0.0 means the
//! measurement sits on the interval midpoint. Overlap ratios are in range
//! [0.0, 1.0] where 1.0 means identical intervals.

use fitx_core::{Dimension, Error, SizeInterval};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Guards the half-width division for zero-width intervals
pub const EPSILON: f64 = 1e-6;

/// How a single measurement is scored against an interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IntervalScoring {
    /// Zero anywhere inside the interval; beyond the edge the overshoot is
    /// normalized by half-width and capped at 1
    #[default]
    Containment,
    /// Offset from the midpoint normalized by half-width, reaching 1 at the
    /// interval edge
    Midpoint,
}

impl FromStr for IntervalScoring {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "containment" => Ok(IntervalScoring::Containment),
            "midpoint" => Ok(IntervalScoring::Midpoint),
            other => Err(Error::InvalidConfig(format!("unknown interval scoring '{}'", other))),
        }
    }
}

impl fmt::Display for IntervalScoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalScoring::Containment => f.write_str("containment"),
            IntervalScoring::Midpoint => f.write_str("midpoint"),
        }
    }
}

/// Weight of a key dimension in the size distance, `None` for the rest
///
/// Bust and chest share one upper-body weight; a size is scored on one of
/// them, never both.
pub fn key_weight(dimension: Dimension) -> Option<f64> {
    match dimension {
        Dimension::Bust | Dimension::Chest => Some(0.35),
        Dimension::Waist => Some(0.30),
        Dimension::Hips => Some(0.25),
        _ => None,
    }
}

/// Key dimensions in scoring order; `Bust` stands for the upper body
pub const KEY_DIMENSIONS: [Dimension; 3] = [Dimension::Bust, Dimension::Waist, Dimension::Hips];

/// Normalized distance of `value` from `interval`
pub fn dimension_distance(value: f64, interval: &SizeInterval, scoring: IntervalScoring) -> f64 {
    let offset = (value - interval.midpoint()).abs() / (interval.half_width() + EPSILON);
    let distance = match scoring {
        IntervalScoring::Midpoint => offset,
        IntervalScoring::Containment => offset - 1.0,
    };
    distance.clamp(0.0, 1.0)
}

/// Intersection-over-union of two intervals
///
/// Two zero-width intervals at the same point overlap fully.
pub fn overlap_ratio(a: &SizeInterval, b: &SizeInterval) -> f64 {
    let union = a.max.max(b.max) - a.min.min(b.min);
    if union <= 0.0 {
        return if a == b { 1.0 } else { 0.0 };
    }
    let intersection = (a.max.min(b.max) - a.min.max(b.min)).max(0.0);
    intersection / union
}
