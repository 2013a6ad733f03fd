//! Stochastic simulation calculator
//!
//! Draws many prices from a distribution centered on the market-adjusted
//! base price and summarizes the resulting distribution. The recommended
//! price is the MEDIAN of the draws (robust to outliers); the mean stays
//! available in the statistics block. This is the only calculator whose
//! output varies across identical inputs unless the caller seeds the RNG.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::config::EngineConfig;
use crate::types::{EngineError, PriceRange, SimulationStats};

use super::PricingInput;

/// Stochastic calculator output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonteCarloOutcome {
    pub recommended_price: f64,
    pub price_range: PriceRange,
    pub statistics: SimulationStats,
}

/// Run the simulation. `simulations` is clamped to the engine cap to bound
/// worst-case latency.
pub fn simulate<R: Rng>(
    input: &PricingInput,
    cfg: &EngineConfig,
    rng: &mut R,
) -> Result<MonteCarloOutcome, EngineError> {
    if input.simulations == 0 {
        return Err(EngineError::InvalidConfiguration(
            "simulations must be > 0".to_string(),
        ));
    }
    let center = input.base_price * input.adjustment.price_multiplier;
    if !center.is_finite() || center < 0.0 {
        return Err(EngineError::CalculationFailure(format!(
            "invalid simulation center: {center}"
        )));
    }

    let n = input.simulations.min(cfg.max_simulations);
    let sigma = input.adjustment.adjusted_volatility;

    let mut draws = Vec::with_capacity(n);
    for _ in 0..n {
        let z: f64 = rng.sample(StandardNormal);
        draws.push((center * (1.0 + sigma * z)).max(0.0));
    }
    draws.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = draws.iter().sum::<f64>() / n as f64;
    let median = quantile(&draws, 0.5);
    let variance = draws.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n as f64;
    let std_deviation = variance.sqrt();
    let risk_score = if mean > 0.0 {
        (std_deviation / mean).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let confidence = input.confidence.value();
    let tail = (1.0 - confidence) / 2.0;
    let price_range = PriceRange {
        low: quantile(&draws, tail),
        high: quantile(&draws, 1.0 - tail),
        confidence,
    };

    Ok(MonteCarloOutcome {
        recommended_price: median,
        price_range,
        statistics: SimulationStats {
            mean,
            median,
            std_deviation,
            risk_score,
        },
    })
}

/// Nearest-rank quantile over a sorted slice
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() as f64 - 1.0) * q.clamp(0.0, 1.0)).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}
