//! Size-chart registry
//!
//! Read-only catalog of brand size charts, keyed by exact brand name.
//! The registry is a plain value handed to the engine at construction;
//! there is no process-wide catalog.

use crate::chart::{BrandSizeChart, FitProfile, SizeEntry};
use crate::measurement::Dimension;
use crate::Result;
use ahash::AHashMap;
use std::path::Path;
use tracing::debug;

/// Catalog mapping brand name to its size chart
///
/// Lookups are case-sensitive and exact: "H&M" and "h&m" are different
/// brands.
#[derive(Debug, Clone, Default)]
pub struct SizeChartRegistry {
    charts: AHashMap<String, BrandSizeChart>,
}

impl SizeChartRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry from a list of charts, validating each one
    pub fn from_charts(charts: impl IntoIterator<Item = BrandSizeChart>) -> Result<Self> {
        let mut registry = Self::empty();
        for chart in charts {
            registry.insert(chart)?;
        }
        Ok(registry)
    }

    /// Registry preloaded with the built-in reference catalog
    pub fn reference() -> Self {
        let mut registry = Self::empty();
        for chart in reference_charts() {
            registry.charts.insert(chart.brand.clone(), chart);
        }
        registry
    }

    /// Insert or replace a brand's chart
    pub fn insert(&mut self, chart: BrandSizeChart) -> Result<()> {
        chart.validate()?;
        self.charts.insert(chart.brand.clone(), chart);
        Ok(())
    }

    /// Parse a JSON array of charts and add them, replacing same-named brands
    ///
    /// Returns the number of charts loaded.
    pub fn merge_json(&mut self, json: &str) -> Result<usize> {
        let charts: Vec<BrandSizeChart> = serde_json::from_str(json)?;
        // Validate everything before touching the catalog
        for chart in &charts {
            chart.validate()?;
        }
        let count = charts.len();
        for chart in charts {
            debug!("Loaded size chart for {}", chart.brand);
            self.charts.insert(chart.brand.clone(), chart);
        }
        Ok(count)
    }

    /// Read a JSON chart file and merge it into the registry
    pub fn merge_json_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let json = std::fs::read_to_string(path)?;
        self.merge_json(&json)
    }

    pub fn lookup(&self, brand: &str) -> Option<&BrandSizeChart> {
        self.charts.get(brand)
    }

    pub fn contains(&self, brand: &str) -> bool {
        self.charts.contains_key(brand)
    }

    /// Brand names in sorted order
    pub fn brands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.charts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Charts in brand-name order
    pub fn charts(&self) -> impl Iterator<Item = &BrandSizeChart> + '_ {
        self.brands().into_iter().filter_map(|brand| self.charts.get(brand))
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

type Range = (f64, f64);

fn size(label: &str, upper: Dimension, bust: Range, waist: Range, hips: Range) -> SizeEntry {
    SizeEntry::new(label)
        .with_interval(upper, bust.0, bust.1)
        .with_interval(Dimension::Waist, waist.0, waist.1)
        .with_interval(Dimension::Hips, hips.0, hips.1)
}

/// The built-in catalog: eight brands across eight sizing countries
pub fn reference_charts() -> Vec<BrandSizeChart> {
    use Dimension::{Bust, Chest, Inseam, Neck};

    vec![
        BrandSizeChart::new("H&M", "Sweden")
            .with_fit_profile(FitProfile::Regular)
            .with_vanity_bias(0.05)
            .with_tolerance(2.0)
            .with_size(size("XS", Bust, (74.0, 80.0), (58.0, 64.0), (84.0, 90.0)))
            .with_size(size("S", Bust, (80.0, 86.0), (64.0, 70.0), (90.0, 96.0)))
            .with_size(size("M", Bust, (86.0, 92.0), (70.0, 76.0), (96.0, 102.0)))
            .with_size(size("L", Bust, (92.0, 98.0), (76.0, 82.0), (102.0, 108.0)))
            .with_size(size("XL", Bust, (98.0, 104.0), (82.0, 88.0), (108.0, 114.0))),
        BrandSizeChart::new("Zara", "Spain")
            .with_fit_profile(FitProfile::Slim)
            .with_vanity_bias(0.12)
            .with_tolerance(1.5)
            .with_size(size("XS", Bust, (80.0, 84.0), (60.0, 64.0), (86.0, 90.0)))
            .with_size(size("S", Bust, (84.0, 88.0), (64.0, 68.0), (90.0, 94.0)))
            .with_size(size("M", Bust, (88.0, 92.0), (68.0, 72.0), (94.0, 98.0)))
            .with_size(size("L", Bust, (92.0, 97.0), (72.0, 77.0), (98.0, 103.0)))
            .with_size(size("XL", Bust, (97.0, 102.0), (77.0, 82.0), (103.0, 108.0))),
        BrandSizeChart::new("Uniqlo", "Japan")
            .with_fit_profile(FitProfile::Relaxed)
            .with_vanity_bias(-0.10)
            .with_tolerance(2.5)
            .with_size(size("XS", Bust, (76.0, 82.0), (60.0, 66.0), (84.0, 90.0)))
            .with_size(size("S", Bust, (80.0, 86.0), (64.0, 70.0), (88.0, 94.0)))
            .with_size(size("M", Bust, (84.0, 90.0), (68.0, 74.0), (92.0, 98.0)))
            .with_size(size("L", Bust, (88.0, 94.0), (72.0, 78.0), (96.0, 102.0)))
            .with_size(size("XL", Bust, (92.0, 98.0), (76.0, 82.0), (100.0, 106.0))),
        BrandSizeChart::new("Gap", "USA")
            .with_fit_profile(FitProfile::Generous)
            .with_vanity_bias(0.15)
            .with_tolerance(3.0)
            .with_size(size("XS", Bust, (80.0, 86.0), (62.0, 68.0), (88.0, 94.0)))
            .with_size(size("S", Bust, (86.0, 92.0), (68.0, 74.0), (94.0, 100.0)))
            .with_size(size("M", Bust, (92.0, 98.0), (74.0, 80.0), (100.0, 106.0)))
            .with_size(size("L", Bust, (98.0, 106.0), (80.0, 88.0), (106.0, 114.0)))
            .with_size(size("XL", Bust, (106.0, 114.0), (88.0, 96.0), (114.0, 122.0))),
        BrandSizeChart::new("Marks & Spencer", "UK")
            .with_fit_profile(FitProfile::Regular)
            .with_vanity_bias(0.08)
            .with_tolerance(2.0)
            .with_size(size("8", Bust, (80.0, 84.0), (62.0, 66.0), (86.0, 90.0)))
            .with_size(size("10", Bust, (84.0, 88.0), (66.0, 70.0), (90.0, 94.0)))
            .with_size(size("12", Bust, (88.0, 92.0), (70.0, 74.0), (94.0, 98.0)))
            .with_size(size("14", Bust, (92.0, 97.0), (74.0, 79.0), (98.0, 103.0)))
            .with_size(size("16", Bust, (97.0, 102.0), (79.0, 84.0), (103.0, 108.0)))
            .with_size(size("18", Bust, (102.0, 108.0), (84.0, 90.0), (108.0, 114.0))),
        BrandSizeChart::new("Hugo Boss", "Germany")
            .with_fit_profile(FitProfile::Slim)
            .with_vanity_bias(-0.05)
            .with_tolerance(1.0)
            .with_size(size("46", Chest, (90.0, 94.0), (78.0, 82.0), (92.0, 96.0)).with_interval(Neck, 37.0, 38.0))
            .with_size(size("48", Chest, (94.0, 98.0), (82.0, 86.0), (96.0, 100.0)).with_interval(Neck, 38.0, 39.0))
            .with_size(size("50", Chest, (98.0, 102.0), (86.0, 90.0), (100.0, 104.0)).with_interval(Neck, 39.0, 40.0))
            .with_size(size("52", Chest, (102.0, 106.0), (90.0, 94.0), (104.0, 108.0)).with_interval(Neck, 40.0, 41.0))
            .with_size(size("54", Chest, (106.0, 110.0), (94.0, 98.0), (108.0, 112.0)).with_interval(Neck, 41.0, 42.0)),
        BrandSizeChart::new("Benetton", "Italy")
            .with_fit_profile(FitProfile::Regular)
            .with_vanity_bias(0.0)
            .with_tolerance(2.0)
            .with_size(size("40", Bust, (82.0, 86.0), (64.0, 68.0), (88.0, 92.0)))
            .with_size(size("42", Bust, (86.0, 90.0), (68.0, 72.0), (92.0, 96.0)))
            .with_size(size("44", Bust, (90.0, 94.0), (72.0, 76.0), (96.0, 100.0)))
            .with_size(size("46", Bust, (94.0, 98.0), (76.0, 80.0), (100.0, 104.0)))
            .with_size(size("48", Bust, (98.0, 102.0), (80.0, 84.0), (104.0, 108.0))),
        BrandSizeChart::new("Decathlon", "France")
            .with_fit_profile(FitProfile::Relaxed)
            .with_vanity_bias(0.03)
            .with_tolerance(3.0)
            .with_size(size("S", Chest, (84.0, 92.0), (68.0, 76.0), (90.0, 98.0)).with_interval(Inseam, 76.0, 80.0))
            .with_size(size("M", Chest, (92.0, 100.0), (76.0, 84.0), (98.0, 106.0)).with_interval(Inseam, 78.0, 82.0))
            .with_size(size("L", Chest, (100.0, 108.0), (84.0, 92.0), (106.0, 114.0)).with_interval(Inseam, 80.0, 84.0))
            .with_size(size("XL", Chest, (108.0, 116.0), (92.0, 100.0), (114.0, 122.0)).with_interval(Inseam, 82.0, 86.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::collections::HashSet;
    use std::io::Write;

    #[test]
    fn test_reference_catalog_coverage() {
        let registry = SizeChartRegistry::reference();
        assert!(registry.len() >= 8);

        let charts = reference_charts();
        let countries: HashSet<_> = charts.iter().map(|c| c.country.as_str()).collect();
        assert_eq!(countries.len(), charts.len());

        let profiles: HashSet<_> = charts.iter().map(|c| c.fit_profile).collect();
        assert_eq!(profiles.len(), 4);

        let min_bias = charts.iter().map(|c| c.vanity_sizing_bias).fold(f64::MAX, f64::min);
        let max_bias = charts.iter().map(|c| c.vanity_sizing_bias).fold(f64::MIN, f64::max);
        assert_eq!(min_bias, -0.10);
        assert_eq!(max_bias, 0.15);

        for chart in &charts {
            assert!(chart.validate().is_ok(), "{} failed validation", chart.brand);
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = SizeChartRegistry::reference();
        assert!(registry.lookup("H&M").is_some());
        assert!(registry.lookup("h&m").is_none());
        assert!(registry.lookup("Nonexistent").is_none());
    }

    #[test]
    fn test_hm_medium_reference_values() {
        let registry = SizeChartRegistry::reference();
        let m = registry.lookup("H&M").unwrap().size("M").unwrap();
        let bust = m.interval(Dimension::Bust).unwrap();
        assert_eq!((bust.min, bust.max), (86.0, 92.0));
        let waist = m.interval(Dimension::Waist).unwrap();
        assert_eq!((waist.min, waist.max), (70.0, 76.0));
        let hips = m.interval(Dimension::Hips).unwrap();
        assert_eq!((hips.min, hips.max), (96.0, 102.0));
    }

    #[test]
    fn test_brands_sorted() {
        let registry = SizeChartRegistry::reference();
        let brands = registry.brands();
        let mut sorted = brands.clone();
        sorted.sort_unstable();
        assert_eq!(brands, sorted);
    }

    #[test]
    fn test_insert_rejects_invalid_chart() {
        let mut registry = SizeChartRegistry::empty();
        let result = registry.insert(BrandSizeChart::new("Empty", "US"));
        assert!(matches!(result, Err(Error::InvalidChart { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_merge_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"brand": "Acme", "country": "Canada", "fitProfile": "generous",
                 "vanitySizingBias": 0.1,
                 "sizes": [{{"label": "M", "intervals": {{"waist": {{"min": 70, "max": 76}}}}}}]}}]"#
        )
        .unwrap();

        let mut registry = SizeChartRegistry::reference();
        let before = registry.len();
        let loaded = registry.merge_json_file(file.path()).unwrap();

        assert_eq!(loaded, 1);
        assert_eq!(registry.len(), before + 1);
        assert_eq!(registry.lookup("Acme").unwrap().fit_profile, FitProfile::Generous);
    }

    #[test]
    fn test_merge_json_is_all_or_nothing() {
        let mut registry = SizeChartRegistry::empty();
        let json = r#"[
            {"brand": "Good", "sizes": [{"label": "M", "intervals": {}}]},
            {"brand": "Bad", "sizes": []}
        ]"#;
        assert!(registry.merge_json(json).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_merge_json_malformed() {
        let mut registry = SizeChartRegistry::empty();
        assert!(matches!(
            registry.merge_json("not json"),
            Err(Error::Serialization(_))
        ));
    }
}
