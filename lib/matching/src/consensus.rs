//! Consensus across products
//!
//! Every product votes for its borderline candidate labels with its own
//! confidence. Labels are compared as raw strings, so "M" from two brands
//! counts as the same vote even when the brands scale sizes differently.

use crate::explain::{SizeComparisonResult, UNKNOWN_SIZE};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fit the shopper asked for
///
/// Echoed in the guidance text only; it does not change scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PreferredFit {
    Tight,
    #[default]
    Normal,
    Loose,
}

impl fmt::Display for PreferredFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferredFit::Tight => f.write_str("tight"),
            PreferredFit::Normal => f.write_str("normal"),
            PreferredFit::Loose => f.write_str("loose"),
        }
    }
}

/// Overall recommendation across every evaluated product
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub best_overall_size: String,
    pub consistency_score: f64,
    pub recommendations: Vec<String>,
}

/// Accumulated votes, remembering first-seen order for tie-breaks
#[derive(Debug, Default)]
struct VoteTally {
    votes: AHashMap<String, (f64, usize)>,
}

impl VoteTally {
    fn add(&mut self, label: &str, vote: f64) {
        let order = self.votes.len();
        let entry = self.votes.entry(label.to_string()).or_insert((0.0, order));
        entry.0 += vote;
    }

    fn total(&self) -> f64 {
        self.votes.values().map(|(vote, _)| vote).sum()
    }

    fn winner(&self) -> Option<&str> {
        self.votes
            .iter()
            .max_by(|a, b| {
                let (vote_a, order_a) = a.1;
                let (vote_b, order_b) = b.1;
                vote_a
                    .partial_cmp(vote_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    // Earlier label wins a tie
                    .then_with(|| order_b.cmp(order_a))
            })
            .map(|(label, _)| label.as_str())
    }
}

/// Combine per-product results into one recommendation
pub fn aggregate(results: &[SizeComparisonResult], preferred_fit: PreferredFit) -> ComparisonSummary {
    let mut tally = VoteTally::default();
    for result in results {
        for candidate in &result.borderline_sizes {
            tally.add(&candidate.size, result.confidence);
        }
    }

    let best_overall_size = tally
        .winner()
        .map(str::to_string)
        .or_else(|| most_confident(results))
        .unwrap_or_else(|| UNKNOWN_SIZE.to_string());

    let consistency_score = if results.is_empty() {
        0.0
    } else {
        (tally.total() / results.len() as f64).min(1.0)
    };

    ComparisonSummary {
        recommendations: recommendations(&best_overall_size, consistency_score, results.len(), preferred_fit),
        best_overall_size,
        consistency_score,
    }
}

fn most_confident(results: &[SizeComparisonResult]) -> Option<String> {
    results
        .iter()
        .filter(|r| !r.is_unknown())
        // Highest confidence, earliest on ties
        .min_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap_or(std::cmp::Ordering::Equal))
        .map(|r| r.recommended_size.clone())
}

fn recommendations(best: &str, consistency: f64, products: usize, preferred_fit: PreferredFit) -> Vec<String> {
    if best == UNKNOWN_SIZE {
        return vec![
            "Could not determine a size; check that the requested brands have size charts".to_string(),
        ];
    }

    let mut guidance = vec![format!(
        "Size {} is the best overall match across {} product{}",
        best,
        products,
        if products == 1 { "" } else { "s" }
    )];

    guidance.push(if consistency >= 0.8 {
        format!("Your size is consistent across brands; {} should fit reliably", best)
    } else if consistency >= 0.5 {
        "Sizing varies between brands; check each brand's recommendation before ordering".to_string()
    } else {
        "Sizing is inconsistent across these brands; consult each size chart carefully".to_string()
    });

    guidance.push(match preferred_fit {
        PreferredFit::Tight => format!("For a tight fit, start from {} and consider the smaller borderline size", best),
        PreferredFit::Normal => format!("For a normal fit, size {} is your starting point", best),
        PreferredFit::Loose => format!("For a loose fit, consider sizing up from {}", best),
    });

    guidance
}
