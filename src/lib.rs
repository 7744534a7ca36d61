//! # FitX
//!
//! Cross-brand garment size recommendation.
//!
//! Given a shopper's body measurements, FitX picks the best-fitting size
//! label for each brand, scores its confidence, flags fit risks and maps
//! the size onto equivalent labels in other brands.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cargo install fitx
//! fitx --http-port 8080 --charts ./charts.json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use fitx::prelude::*;
//!
//! let engine = SizeEngine::with_registry(SizeChartRegistry::reference());
//!
//! let request: SizeRequest = serde_json::from_str(r#"{
//!     "bodyMeasurements": { "waist": 70, "hips": 96, "chest": 90 },
//!     "brands": ["H&M", "Zara"],
//!     "preferredFit": "normal"
//! }"#).unwrap();
//!
//! let response = engine.compare(&request).unwrap();
//! assert_eq!(response.summary.best_overall_size, "M");
//! ```
//!
//! ## Crate Structure
//!
//! - [`fitx-core`](https://docs.rs/fitx-core) - Measurements, size charts, chart registry
//! - [`fitx-matching`](https://docs.rs/fitx-matching) - Matching, equivalence, risks, consensus
//! - [`fitx-api`](https://docs.rs/fitx-api) - REST API

// Re-export core types
pub use fitx_core::{
    normalize, BodyMeasurement, BrandSizeChart, Dimension, Error, FitProfile, RawMeasurements,
    Result, SizeChartRegistry, SizeEntry, SizeInterval,
};

// Re-export matching
pub use fitx_matching::{
    ComparisonResponse, ComparisonSummary, EngineConfig, EquivalenceMapper, IntervalScoring,
    PreferredFit, ProductRequest, SizeComparisonResult, SizeEngine, SizeMatcher, SizeRequest,
    VanityAdjustment,
};

// Re-export API
pub use fitx_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BodyMeasurement, BrandSizeChart, ComparisonResponse, Dimension, EngineConfig, Error,
        FitProfile, IntervalScoring, PreferredFit, ProductRequest, Result, RestApi,
        SizeChartRegistry, SizeEngine, SizeEntry, SizeRequest, VanityAdjustment,
    };
}
