//! Body measurements and the measurement normalizer
//!
//! All values are centimeters. Only `waist` and `hips` are mandatory;
//! everything else is optional and either estimated by [`normalize`] or
//! left out of scoring.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Offset added to the waist when neither bust nor chest was supplied.
///
/// A rough heuristic for adult proportions, not an anthropometric model.
pub const CHEST_FROM_WAIST_OFFSET_CM: f64 = 15.0;

/// A body dimension that a size chart or a measurement set can describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Bust,
    Chest,
    Waist,
    Hips,
    Shoulders,
    Neck,
    Thigh,
    Calf,
    ArmLength,
    Inseam,
}

impl Dimension {
    pub const ALL: [Dimension; 10] = [
        Dimension::Bust,
        Dimension::Chest,
        Dimension::Waist,
        Dimension::Hips,
        Dimension::Shoulders,
        Dimension::Neck,
        Dimension::Thigh,
        Dimension::Calf,
        Dimension::ArmLength,
        Dimension::Inseam,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Bust => "bust",
            Dimension::Chest => "chest",
            Dimension::Waist => "waist",
            Dimension::Hips => "hips",
            Dimension::Shoulders => "shoulders",
            Dimension::Neck => "neck",
            Dimension::Thigh => "thigh",
            Dimension::Calf => "calf",
            Dimension::ArmLength => "armLength",
            Dimension::Inseam => "inseam",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shopper's body measurements in centimeters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bust: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chest: Option<f64>,
    pub waist: f64,
    pub hips: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulders: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neck: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thigh: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calf: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arm_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inseam: Option<f64>,
}

impl BodyMeasurement {
    /// Create a measurement set with only the mandatory dimensions
    pub fn new(waist: f64, hips: f64) -> Self {
        Self {
            height: None,
            weight: None,
            bust: None,
            chest: None,
            waist,
            hips,
            shoulders: None,
            neck: None,
            thigh: None,
            calf: None,
            arm_length: None,
            inseam: None,
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_bust(mut self, bust: f64) -> Self {
        self.bust = Some(bust);
        self
    }

    pub fn with_chest(mut self, chest: f64) -> Self {
        self.chest = Some(chest);
        self
    }

    /// Set any dimension by name
    pub fn with(mut self, dimension: Dimension, value: f64) -> Self {
        match dimension {
            Dimension::Bust => self.bust = Some(value),
            Dimension::Chest => self.chest = Some(value),
            Dimension::Waist => self.waist = value,
            Dimension::Hips => self.hips = value,
            Dimension::Shoulders => self.shoulders = Some(value),
            Dimension::Neck => self.neck = Some(value),
            Dimension::Thigh => self.thigh = Some(value),
            Dimension::Calf => self.calf = Some(value),
            Dimension::ArmLength => self.arm_length = Some(value),
            Dimension::Inseam => self.inseam = Some(value),
        }
        self
    }

    /// Get the value for a dimension, if measured
    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Bust => self.bust,
            Dimension::Chest => self.chest,
            Dimension::Waist => Some(self.waist),
            Dimension::Hips => Some(self.hips),
            Dimension::Shoulders => self.shoulders,
            Dimension::Neck => self.neck,
            Dimension::Thigh => self.thigh,
            Dimension::Calf => self.calf,
            Dimension::ArmLength => self.arm_length,
            Dimension::Inseam => self.inseam,
        }
    }
}

/// Measurements as they arrive over the wire, before validation
///
/// Every field is optional so that a missing `waist` or `hips` can be
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeasurements {
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bust: Option<f64>,
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub shoulders: Option<f64>,
    pub neck: Option<f64>,
    pub thigh: Option<f64>,
    pub calf: Option<f64>,
    pub arm_length: Option<f64>,
    pub inseam: Option<f64>,
}

impl TryFrom<RawMeasurements> for BodyMeasurement {
    type Error = Error;

    fn try_from(raw: RawMeasurements) -> Result<Self> {
        let waist = raw
            .waist
            .ok_or_else(|| Error::Validation("waist measurement is required".to_string()))?;
        let hips = raw
            .hips
            .ok_or_else(|| Error::Validation("hips measurement is required".to_string()))?;

        Ok(Self {
            height: raw.height,
            weight: raw.weight,
            bust: raw.bust,
            chest: raw.chest,
            waist,
            hips,
            shoulders: raw.shoulders,
            neck: raw.neck,
            thigh: raw.thigh,
            calf: raw.calf,
            arm_length: raw.arm_length,
            inseam: raw.inseam,
        })
    }
}

/// Fill in estimated values for missing upper-body measurements
///
/// Bust and chest stand in for each other. When neither is present the
/// chest is estimated as `waist + 15`. Height and weight pass through
/// unchanged, out-of-range values included.
pub fn normalize(measurement: &BodyMeasurement) -> BodyMeasurement {
    let mut normalized = measurement.clone();

    match (measurement.bust, measurement.chest) {
        (Some(bust), None) => normalized.chest = Some(bust),
        (None, Some(chest)) => normalized.bust = Some(chest),
        (None, None) => {
            let estimate = measurement.waist + CHEST_FROM_WAIST_OFFSET_CM;
            normalized.chest = Some(estimate);
            normalized.bust = Some(estimate);
        }
        (Some(_), Some(_)) => {}
    }

    normalized
}
