//! Weighted aggregation of sub-scores into the final fan score.

use std::collections::HashMap;

use crate::score::weights::{Factor, WeightTable};

/// Result of aggregating all seven sub-scores.
///
/// Both the final score and the per-factor values are percentages in
/// [0, 100].
#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    /// Weighted sum across all factors, as a percentage
    pub fan_score: f64,
    /// Each sub-score scaled to a percentage, keyed by factor
    pub factors: HashMap<Factor, f64>,
}

impl ScoreBreakdown {
    /// Percentage for a single factor; factors missing from the input
    /// contributed zero.
    pub fn factor(&self, factor: Factor) -> f64 {
        self.factors.get(&factor).copied().unwrap_or(0.0)
    }
}

/// Combine sub-scores in [0, 1] into a final percentage.
///
/// Pure function over already-validated numeric inputs; weights are
/// renormalized by their sum so a misconfigured table that does not sum to 1
/// still yields a score in [0, 100]. Factors absent from `sub_scores` are
/// treated as zero.
pub fn aggregate(sub_scores: &HashMap<Factor, f64>, weights: &WeightTable) -> ScoreBreakdown {
    let normalized = weights.normalized();

    let mut fan_score = 0.0;
    let mut factors = HashMap::with_capacity(Factor::ALL.len());

    for factor in Factor::ALL {
        let score = sub_scores.get(&factor).copied().unwrap_or(0.0);
        fan_score += score * normalized[&factor];
        factors.insert(factor, score * 100.0);
    }

    ScoreBreakdown {
        fan_score: fan_score * 100.0,
        factors,
    }
}
