//! Size engine
//!
//! Runs one size comparison request end to end: validation, measurement
//! normalization, per-product matching, risks and equivalents, then
//! consensus across products.

use crate::config::EngineConfig;
use crate::consensus::{aggregate, PreferredFit};
use crate::equivalence::{EquivalenceMap, EquivalenceMapper};
use crate::explain::{ComparisonResponse, SizeComparisonResult};
use crate::matcher::SizeMatcher;
use crate::risk::assess_risks;
use fitx_core::{normalize, BodyMeasurement, BrandSizeChart, RawMeasurements, Result, SizeChartRegistry};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, warn};

/// A product to size, optionally carrying its own chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub product_id: Option<String>,
    pub brand: String,
    pub category: Option<String>,
    /// Takes precedence over the registry chart for this product
    pub size_chart: Option<BrandSizeChart>,
}

impl ProductRequest {
    pub fn brand(brand: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            ..Default::default()
        }
    }
}

/// Size comparison request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeRequest {
    #[serde(default)]
    pub body_measurements: RawMeasurements,
    #[serde(default)]
    pub products: Vec<ProductRequest>,
    /// Alternative to `products`: compare across named brands
    #[serde(default)]
    pub brands: Vec<String>,
    pub category: Option<String>,
    pub preferred_fit: Option<PreferredFit>,
}

/// Stateless size recommendation engine over an injected chart registry
#[derive(Debug, Clone)]
pub struct SizeEngine {
    registry: Arc<SizeChartRegistry>,
    config: EngineConfig,
    matcher: SizeMatcher,
    mapper: EquivalenceMapper,
}

impl SizeEngine {
    pub fn new(registry: Arc<SizeChartRegistry>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(registry, config))
    }

    fn build(registry: Arc<SizeChartRegistry>, config: EngineConfig) -> Self {
        Self {
            matcher: SizeMatcher::new(config.scoring).with_candidate_threshold(config.candidate_threshold),
            mapper: EquivalenceMapper::new(config.vanity_adjustment).with_threshold(config.overlap_threshold),
            registry,
            config,
        }
    }

    /// Engine with the default configuration
    pub fn with_registry(registry: SizeChartRegistry) -> Self {
        Self::build(Arc::new(registry), EngineConfig::default())
    }

    pub fn registry(&self) -> &SizeChartRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate a full request
    ///
    /// Fails only when `waist` or `hips` is missing, before any chart is
    /// looked up. Unknown brands degrade to `UNKNOWN` results.
    pub fn compare(&self, request: &SizeRequest) -> Result<ComparisonResponse> {
        let measurement = normalize(&BodyMeasurement::try_from(request.body_measurements.clone())?);
        let products = self.resolve_products(request);

        let resolved: Vec<(&ProductRequest, Option<Cow<'_, BrandSizeChart>>)> = products
            .iter()
            .map(|product| (product, self.resolve_chart(product)))
            .collect();

        let mut request_charts: Vec<&BrandSizeChart> = Vec::new();
        for chart in resolved.iter().filter_map(|(_, chart)| chart.as_deref()) {
            if !request_charts.iter().any(|c| c.brand == chart.brand) {
                request_charts.push(chart);
            }
        }

        let evaluate = |(product, chart): &(&ProductRequest, Option<Cow<'_, BrandSizeChart>>)| {
            let targets = self.equivalence_targets(&product.brand, &request_charts);
            self.evaluate(&measurement, product, chart.as_deref(), &targets)
        };

        // Both paths keep request order
        let comparisons: Vec<SizeComparisonResult> = if self.config.parallel {
            resolved.par_iter().map(&evaluate).collect()
        } else {
            resolved.iter().map(&evaluate).collect()
        };

        let summary = aggregate(&comparisons, request.preferred_fit.unwrap_or_default());
        debug!(
            "Compared {} products, best overall size {} (consistency {:.2})",
            comparisons.len(),
            summary.best_overall_size,
            summary.consistency_score
        );

        Ok(ComparisonResponse { comparisons, summary })
    }

    /// Recommend a size for a single registry brand
    pub fn recommend(&self, measurement: &BodyMeasurement, brand: &str) -> SizeComparisonResult {
        let measurement = normalize(measurement);
        let product = ProductRequest::brand(brand);
        let targets = self.equivalence_targets(brand, &[]);
        self.evaluate(&measurement, &product, self.registry.lookup(brand), &targets)
    }

    /// Registry-backed cross-brand equivalents for a size
    pub fn equivalents(&self, source_brand: &str, source_size: &str, target_brands: &[&str]) -> EquivalenceMap {
        self.mapper.equivalents(&self.registry, source_brand, source_size, target_brands)
    }

    /// Products named by the request; every registry brand when it names none
    fn resolve_products(&self, request: &SizeRequest) -> Vec<ProductRequest> {
        let mut products = if !request.products.is_empty() {
            request.products.clone()
        } else if !request.brands.is_empty() {
            request.brands.iter().map(ProductRequest::brand).collect()
        } else {
            self.registry.brands().into_iter().map(ProductRequest::brand).collect()
        };

        for product in &mut products {
            if product.category.is_none() {
                product.category = request.category.clone();
            }
        }
        products
    }

    fn resolve_chart<'a>(&'a self, product: &ProductRequest) -> Option<Cow<'a, BrandSizeChart>> {
        if let Some(chart) = &product.size_chart {
            let mut chart = chart.clone();
            if chart.brand.is_empty() {
                chart.brand = product.brand.clone();
            }
            // Metadata only: keep its fit metadata over the registry sizes
            if chart.sizes.is_empty() {
                if let Some(base) = self.registry.lookup(&product.brand) {
                    chart.sizes = base.sizes.clone();
                    if chart.country.is_empty() {
                        chart.country = base.country.clone();
                    }
                }
            }
            match chart.validate() {
                Ok(()) => return Some(Cow::Owned(chart)),
                Err(e) => warn!("Ignoring supplied size chart for {}: {}", product.brand, e),
            }
        }
        self.registry.lookup(&product.brand).map(Cow::Borrowed)
    }

    /// Other brands in the request, or every other registry brand if none
    fn equivalence_targets<'a>(&'a self, own_brand: &str, request_charts: &[&'a BrandSizeChart]) -> Vec<&'a BrandSizeChart> {
        let others: Vec<&BrandSizeChart> = request_charts
            .iter()
            .copied()
            .filter(|chart| chart.brand != own_brand)
            .collect();
        if !others.is_empty() {
            return others;
        }
        self.registry
            .charts()
            .filter(|chart| chart.brand != own_brand)
            .collect()
    }

    fn evaluate(
        &self,
        measurement: &BodyMeasurement,
        product: &ProductRequest,
        chart: Option<&BrandSizeChart>,
        targets: &[&BrandSizeChart],
    ) -> SizeComparisonResult {
        let unknown = || {
            warn!("No usable size chart for brand {}", product.brand);
            SizeComparisonResult::unknown(product.brand.as_str())
                .with_product(product.product_id.clone(), product.category.clone())
        };

        let Some(chart) = chart else {
            return unknown();
        };
        let Some(size_match) = self.matcher.best_size(measurement, chart) else {
            return unknown();
        };

        debug!(
            "{}: size {} at confidence {:.3}",
            product.brand, size_match.label, size_match.confidence
        );

        let risks = assess_risks(&size_match.details, chart, size_match.distance);
        let equivalents = self.mapper.map_to_charts(
            chart,
            &size_match.label,
            targets.iter().copied().filter(|target| target.brand != chart.brand),
        );

        SizeComparisonResult::from_match(product.brand.as_str(), size_match, risks)
            .with_product(product.product_id.clone(), product.category.clone())
            .with_equivalents(equivalents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::IntervalScoring;
    use crate::explain::UNKNOWN_SIZE;
    use fitx_core::{Dimension, Error, SizeEntry};

    fn raw(waist: Option<f64>, hips: Option<f64>, chest: Option<f64>) -> RawMeasurements {
        RawMeasurements {
            waist,
            hips,
            chest,
            ..Default::default()
        }
    }

    fn scenario_request(brands: &[&str]) -> SizeRequest {
        SizeRequest {
            body_measurements: raw(Some(70.0), Some(96.0), Some(90.0)),
            brands: brands.iter().map(|b| b.to_string()).collect(),
            ..Default::default()
        }
    }

    fn engine() -> SizeEngine {
        SizeEngine::with_registry(SizeChartRegistry::reference())
    }

    #[test]
    fn test_missing_waist_fails_validation() {
        let request = SizeRequest {
            body_measurements: raw(None, Some(96.0), None),
            brands: vec!["H&M".to_string()],
            ..Default::default()
        };
        assert!(matches!(engine().compare(&request), Err(Error::Validation(_))));
    }

    #[test]
    fn test_missing_hips_fails_even_with_empty_registry() {
        let engine = SizeEngine::with_registry(SizeChartRegistry::empty());
        let request = SizeRequest {
            body_measurements: raw(Some(70.0), None, None),
            ..Default::default()
        };
        assert!(matches!(engine.compare(&request), Err(Error::Validation(_))));
    }

    #[test]
    fn test_hm_scenario() {
        let response = engine().compare(&scenario_request(&["H&M"])).unwrap();
        let result = &response.comparisons[0];

        assert_eq!(result.recommended_size, "M");
        assert!(result.confidence >= 0.9);
        for dimension in [Dimension::Waist, Dimension::Hips] {
            let detail = result.measurements.iter().find(|d| d.dimension == dimension).unwrap();
            assert!(detail.matches);
            assert_eq!(detail.variance, 0.0);
        }
        assert!(!result.risks.iter().any(|r| r.contains("Borderline")));
    }

    #[test]
    fn test_zara_scenario() {
        let response = engine().compare(&scenario_request(&["Zara"])).unwrap();
        let result = &response.comparisons[0];

        assert_eq!(result.recommended_size, "M");
        assert!(result
            .risks
            .iter()
            .any(|r| r.to_lowercase().contains("slim") || r.to_lowercase().contains("sizing")));
    }

    #[test]
    fn test_unknown_brand_degrades() {
        let response = engine().compare(&scenario_request(&["H&M", "NoSuchBrand"])).unwrap();
        assert_eq!(response.comparisons.len(), 2);

        let unknown = &response.comparisons[1];
        assert_eq!(unknown.recommended_size, UNKNOWN_SIZE);
        assert_eq!(unknown.confidence, 0.0);
        assert_eq!(unknown.risks.len(), 1);

        assert_eq!(response.comparisons[0].recommended_size, "M");
        assert_eq!(response.summary.best_overall_size, "M");
    }

    #[test]
    fn test_equivalents_target_other_request_brands() {
        let response = engine().compare(&scenario_request(&["H&M", "Zara"])).unwrap();
        let hm = &response.comparisons[0];
        let equivalents = hm.cross_brand_equivalents.as_ref().unwrap();
        assert_eq!(equivalents.len(), 1);
        assert!(equivalents["Zara"].iter().any(|e| e.size == "M"));
    }

    #[test]
    fn test_single_brand_maps_to_whole_registry() {
        let engine = engine();
        let response = engine.compare(&scenario_request(&["H&M"])).unwrap();
        let equivalents = response.comparisons[0].cross_brand_equivalents.as_ref().unwrap();
        assert_eq!(equivalents.len(), engine.registry().len() - 1);
        assert!(!equivalents.contains_key("H&M"));
    }

    #[test]
    fn test_no_brands_compares_whole_registry() {
        let engine = engine();
        let request = SizeRequest {
            body_measurements: raw(Some(70.0), Some(96.0), Some(90.0)),
            ..Default::default()
        };
        let response = engine.compare(&request).unwrap();
        assert_eq!(response.comparisons.len(), engine.registry().len());
    }

    #[test]
    fn test_supplied_chart_takes_precedence() {
        let custom = BrandSizeChart::new("", "")
            .with_size(
                SizeEntry::new("Custom")
                    .with_interval(Dimension::Waist, 68.0, 72.0)
                    .with_interval(Dimension::Hips, 94.0, 98.0),
            );
        let request = SizeRequest {
            body_measurements: raw(Some(70.0), Some(96.0), None),
            products: vec![ProductRequest {
                product_id: Some("sku-42".to_string()),
                brand: "H&M".to_string(),
                category: None,
                size_chart: Some(custom),
            }],
            category: Some("dresses".to_string()),
            ..Default::default()
        };
        let response = engine().compare(&request).unwrap();
        let result = &response.comparisons[0];
        assert_eq!(result.recommended_size, "Custom");
        assert_eq!(result.product_id.as_deref(), Some("sku-42"));
        assert_eq!(result.category.as_deref(), Some("dresses"));
    }

    #[test]
    fn test_invalid_supplied_chart_falls_back_to_registry() {
        let request = SizeRequest {
            body_measurements: raw(Some(70.0), Some(96.0), Some(90.0)),
            products: vec![ProductRequest {
                brand: "H&M".to_string(),
                size_chart: Some(
                    BrandSizeChart::new("H&M", "Sweden")
                        .with_size(SizeEntry::new("Broken").with_interval(Dimension::Waist, f64::NAN, 76.0)),
                ),
                ..Default::default()
            }],
            ..Default::default()
        };
        let response = engine().compare(&request).unwrap();
        assert_eq!(response.comparisons[0].recommended_size, "M");
    }

    #[test]
    fn test_metadata_only_chart_keeps_other_products() {
        let request: SizeRequest = serde_json::from_str(
            r#"{
                "bodyMeasurements": {"waist": 70, "hips": 96, "chest": 90},
                "products": [
                    {"brand": "H&M"},
                    {"brand": "Zara", "sizeChart": {"fitProfile": "slim", "vanitySizingBias": 0.12}},
                    {"brand": "Nowhere Co", "sizeChart": {"fitProfile": "relaxed"}}
                ]
            }"#,
        )
        .unwrap();
        let response = engine().compare(&request).unwrap();
        assert_eq!(response.comparisons.len(), 3);
        assert_eq!(response.comparisons[0].recommended_size, "M");

        // Registry sizes, supplied metadata
        let zara = &response.comparisons[1];
        assert_eq!(zara.recommended_size, "M");
        assert!(zara.risks.iter().any(|r| r.contains("run large")));

        // Nothing to merge onto
        assert_eq!(response.comparisons[2].recommended_size, UNKNOWN_SIZE);
    }

    #[test]
    fn test_supplied_metadata_overrides_registry() {
        let request = SizeRequest {
            body_measurements: raw(Some(70.0), Some(96.0), Some(90.0)),
            products: vec![ProductRequest {
                brand: "Gap".to_string(),
                size_chart: Some(BrandSizeChart::new("", "").with_vanity_bias(0.0)),
                ..Default::default()
            }],
            ..Default::default()
        };
        let response = engine().compare(&request).unwrap();
        let gap = &response.comparisons[0];
        assert_ne!(gap.recommended_size, UNKNOWN_SIZE);
        assert!(!gap.risks.iter().any(|r| r.contains("run large")));
    }

    #[test]
    fn test_with_registry_matches_default_config() {
        let registry = SizeChartRegistry::reference();
        let a = SizeEngine::with_registry(registry.clone());
        let b = SizeEngine::new(Arc::new(registry), EngineConfig::default()).unwrap();
        let request = scenario_request(&["H&M", "Zara", "Hugo Boss"]);
        let (a, b) = (a.compare(&request).unwrap(), b.compare(&request).unwrap());
        assert_eq!(a.comparisons, b.comparisons);
        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let registry = Arc::new(SizeChartRegistry::reference());
        let parallel = SizeEngine::new(registry.clone(), EngineConfig::default()).unwrap();
        let sequential = SizeEngine::new(
            registry,
            EngineConfig {
                parallel: false,
                ..Default::default()
            },
        )
        .unwrap();

        let request = scenario_request(&["H&M", "Zara", "Gap", "Uniqlo", "Benetton"]);
        let a = parallel.compare(&request).unwrap();
        let b = sequential.compare(&request).unwrap();
        assert_eq!(a.comparisons, b.comparisons);
        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn test_midpoint_scoring_engine() {
        let engine = SizeEngine::new(
            Arc::new(SizeChartRegistry::reference()),
            EngineConfig {
                scoring: IntervalScoring::Midpoint,
                ..Default::default()
            },
        )
        .unwrap();
        let m = BodyMeasurement::new(73.0, 99.0).with_bust(89.0);
        let result = engine.recommend(&m, "H&M");
        assert_eq!(result.recommended_size, "M");
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            candidate_threshold: -0.1,
            ..Default::default()
        };
        assert!(SizeEngine::new(Arc::new(SizeChartRegistry::reference()), config).is_err());
    }

    #[test]
    fn test_request_wire_format() {
        let request: SizeRequest = serde_json::from_str(
            r#"{
                "bodyMeasurements": {"height": 168, "waist": 70, "hips": 96, "chest": 90},
                "products": [{"productId": "p1", "brand": "Zara", "category": "tops"}],
                "preferredFit": "loose"
            }"#,
        )
        .unwrap();
        assert_eq!(request.preferred_fit, Some(PreferredFit::Loose));
        assert_eq!(request.products[0].brand, "Zara");
        let response = engine().compare(&request).unwrap();
        assert!(response.summary.recommendations.iter().any(|r| r.contains("loose")));
    }
}
