//! # FitX Matching
//!
//! Size matching engine for body measurements against brand size charts.
//!
//! ## Overview
//!
//! For every product in a request the engine picks the closest size in the
//! brand's chart, annotates fit risks, translates the size into other
//! brands, and finally votes across products for one overall size.
//!
//! **How it works:**
//! 1. Measurements are validated and normalized (chest estimated if absent)
//! 2. Each size is scored by a weighted, half-width-normalized interval distance
//! 3. The closest size wins; sizes above 0.6 confidence are kept as candidates
//! 4. An ordered rule table adds fit risks
//! 5. Bust/chest interval overlap maps the size onto other brands
//! 6. Candidates vote, weighted by confidence, for the overall size
//!
//! ## Example
//!
//! ```rust
//! use fitx_core::{BodyMeasurement, SizeChartRegistry};
//! use fitx_matching::SizeEngine;
//!
//! let engine = SizeEngine::with_registry(SizeChartRegistry::reference());
//! let measurement = BodyMeasurement::new(70.0, 96.0).with_chest(90.0);
//!
//! let result = engine.recommend(&measurement, "H&M");
//! assert_eq!(result.recommended_size, "M");
//! assert!(result.confidence >= 0.9);
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Normalizer  │────>│   Matcher   │────>│    Risk     │
//! │ (measures)  │     │ (per brand) │     │   (rules)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                     ┌─────────────┐     ┌──────┴──────┐
//!                     │  Consensus  │<────│ Equivalence │
//!                     │  (summary)  │     │  (overlap)  │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod config;
pub mod consensus;
pub mod distance;
pub mod engine;
pub mod equivalence;
pub mod explain;
pub mod matcher;
pub mod risk;

// Re-export main types
pub use config::EngineConfig;
pub use consensus::{aggregate, ComparisonSummary, PreferredFit};
pub use distance::{dimension_distance, overlap_ratio, IntervalScoring};
pub use engine::{ProductRequest, SizeEngine, SizeRequest};
pub use equivalence::{EquivalenceMap, EquivalenceMapper, EquivalentSize, VanityAdjustment};
pub use explain::{ComparisonResponse, SizeComparisonResult, UNKNOWN_SIZE};
pub use matcher::{DimensionMatch, SizeMatch, SizeMatcher, SizeScore};
pub use risk::{assess_risks, RiskContext, RiskRule, RISK_RULES};
