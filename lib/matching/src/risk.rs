//! Fit risk annotations
//!
//! Risks come from an ordered table of (predicate, message) rules. Every
//! rule is evaluated in sequence and all matching messages are emitted in
//! table order.

use crate::matcher::DimensionMatch;
use fitx_core::{BrandSizeChart, Dimension, FitProfile};

/// Everything a risk rule may look at
#[derive(Debug, Clone, Copy)]
pub struct RiskContext<'a> {
    pub chart: &'a BrandSizeChart,
    pub details: &'a [DimensionMatch],
    pub distance: f64,
}

impl RiskContext<'_> {
    /// Variance for a dimension, 0 when it was not compared
    pub fn variance(&self, dimension: Dimension) -> f64 {
        self.details
            .iter()
            .find(|d| d.dimension == dimension)
            .map(|d| d.variance)
            .unwrap_or(0.0)
    }
}

/// A single auditable risk rule
pub struct RiskRule {
    pub name: &'static str,
    pub applies: fn(&RiskContext<'_>) -> bool,
    pub message: &'static str,
}

pub const RUNS_LARGE_BIAS: f64 = 0.1;
pub const RUNS_SMALL_BIAS: f64 = -0.05;
pub const SLIM_WAIST_VARIANCE_CM: f64 = 1.0;
pub const GENEROUS_WAIST_VARIANCE_CM: f64 = 2.0;
pub const BORDERLINE_DISTANCE: f64 = 0.3;

pub static RISK_RULES: [RiskRule; 5] = [
    RiskRule {
        name: "runs_large",
        applies: |ctx| ctx.chart.vanity_sizing_bias > RUNS_LARGE_BIAS,
        message: "This brand may run large; consider sizing down",
    },
    RiskRule {
        name: "runs_small",
        applies: |ctx| ctx.chart.vanity_sizing_bias < RUNS_SMALL_BIAS,
        message: "This brand runs small, consider sizing up",
    },
    RiskRule {
        name: "slim_tight",
        applies: |ctx| {
            ctx.chart.fit_profile == FitProfile::Slim
                && ctx.variance(Dimension::Waist) > SLIM_WAIST_VARIANCE_CM
        },
        message: "Slim fit may be tight around the waist",
    },
    RiskRule {
        name: "generous_loose",
        applies: |ctx| {
            ctx.chart.fit_profile == FitProfile::Generous
                && ctx.variance(Dimension::Waist) > GENEROUS_WAIST_VARIANCE_CM
        },
        message: "Generous sizing detected; the waist may feel loose",
    },
    RiskRule {
        name: "borderline",
        applies: |ctx| ctx.distance > BORDERLINE_DISTANCE,
        message: "Borderline fit, try adjacent sizes",
    },
];

/// Evaluate the rule table against one size match
pub fn assess_risks(details: &[DimensionMatch], chart: &BrandSizeChart, distance: f64) -> Vec<String> {
    let ctx = RiskContext { chart, details, distance };
    RISK_RULES
        .iter()
        .filter(|rule| (rule.applies)(&ctx))
        .map(|rule| rule.message.to_string())
        .collect()
}

/// Note attached to a product whose brand has no size chart
pub fn missing_chart_risk(brand: &str) -> String {
    format!("No size chart available for brand '{}'; size could not be determined", brand)
}
