//! # FitX Core
//!
//! Core data model for the FitX size recommendation engine.
//!
//! This crate provides the fundamental data structures:
//!
//! - [`BodyMeasurement`] - A shopper's measurements, plus the [`normalize`] step
//! - [`SizeInterval`] - Closed measurement range for one body dimension
//! - [`BrandSizeChart`] - A brand's ordered sizes with fit metadata
//! - [`SizeChartRegistry`] - Read-only catalog of brand charts
//!
//! ## Example
//!
//! ```rust
//! use fitx_core::{BodyMeasurement, SizeChartRegistry, normalize};
//!
//! let registry = SizeChartRegistry::reference();
//! let chart = registry.lookup("H&M").unwrap();
//! assert_eq!(chart.labels(), vec!["XS", "S", "M", "L", "XL"]);
//!
//! // Chest is estimated from the waist when no upper-body value is given
//! let measurement = normalize(&BodyMeasurement::new(70.0, 96.0));
//! assert_eq!(measurement.chest, Some(85.0));
//! ```

pub mod chart;
pub mod error;
pub mod measurement;
pub mod registry;

pub use chart::{BrandSizeChart, FitProfile, SizeEntry, SizeInterval};
pub use error::{Error, Result};
pub use measurement::{normalize, BodyMeasurement, Dimension, RawMeasurements, CHEST_FROM_WAIST_OFFSET_CM};
pub use registry::{reference_charts, SizeChartRegistry};
