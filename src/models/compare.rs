//! Comparison engine
//!
//! Runs all three calculators against identical normalized inputs and
//! recommends one based on how much they disagree: high dispersion points at
//! the stochastic model, long jobs at the closed-form one, everything else
//! at the plain breakdown quote.

use rand::Rng;

use crate::config::EngineConfig;
use crate::types::{EngineError, PricingModel};

use super::{black_scholes, monte_carlo, quote, BlackScholesOutcome, MonteCarloOutcome,
    PricingInput, QuoteOutcome};

const DISPERSION_THRESHOLD: f64 = 0.15;
const LONG_JOB_MINUTES: f64 = 240.0;

/// Side-by-side results plus the dispersion-based recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub monte_carlo: MonteCarloOutcome,
    pub black_scholes: BlackScholesOutcome,
    pub quote: QuoteOutcome,
    /// Mean of the three recommended prices
    pub mean: f64,
    /// Population standard deviation of the three prices
    pub std_deviation: f64,
    /// std_deviation / mean
    pub dispersion: f64,
    pub recommendation: PricingModel,
}

pub fn run_comparison<R: Rng>(
    input: &PricingInput,
    cfg: &EngineConfig,
    rng: &mut R,
) -> Result<ComparisonReport, EngineError> {
    let mc = monte_carlo::simulate(input, cfg, rng)?;
    let bs = black_scholes::price(input, cfg)?;
    let q = quote::price(input, cfg)?;

    let prices = [
        mc.recommended_price,
        bs.recommended_price,
        q.recommended_price,
    ];
    let mean = prices.iter().sum::<f64>() / prices.len() as f64;
    let variance =
        prices.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / prices.len() as f64;
    let std_deviation = variance.sqrt();
    let dispersion = if mean > 0.0 { std_deviation / mean } else { 0.0 };

    let recommendation = recommend(dispersion, input.duration_minutes);

    Ok(ComparisonReport {
        monte_carlo: mc,
        black_scholes: bs,
        quote: q,
        mean,
        std_deviation,
        dispersion,
        recommendation,
    })
}

/// The fixed recommendation rule, exposed separately so the boundary is
/// testable without running a simulation.
pub fn recommend(dispersion: f64, duration_minutes: f64) -> PricingModel {
    if dispersion > DISPERSION_THRESHOLD {
        PricingModel::MonteCarlo
    } else if duration_minutes > LONG_JOB_MINUTES {
        PricingModel::BlackScholes
    } else {
        PricingModel::Quote
    }
}
