//! Closed-form option-derived calculator
//!
//! Treats the service as a short-dated option on completion risk: the price
//! is the market-adjusted base plus premia that grow with time-to-completion
//! and volatility. The volatility premium uses the at-the-money straddle
//! approximation (0.4 x base x sigma x sqrt(t)). Deterministic for identical
//! inputs.

use crate::config::EngineConfig;
use crate::types::{EngineError, PriceComponents, RiskMetrics, UrgencyLevel};

use super::PricingInput;

const MINUTES_PER_DAY: f64 = 1440.0;
const ATM_FACTOR: f64 = 0.4;

/// Closed-form calculator output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesOutcome {
    pub recommended_price: f64,
    pub components: PriceComponents,
    pub risk_metrics: RiskMetrics,
}

pub fn price(input: &PricingInput, cfg: &EngineConfig) -> Result<BlackScholesOutcome, EngineError> {
    let adjusted_base = input.base_price * input.adjustment.price_multiplier;
    if !adjusted_base.is_finite() || adjusted_base < 0.0 {
        return Err(EngineError::CalculationFailure(format!(
            "invalid adjusted base price: {adjusted_base}"
        )));
    }

    // Time to completion as a fraction of a day
    let t = (input.duration_minutes.max(0.0)) / MINUTES_PER_DAY;
    let sigma = input.adjustment.adjusted_volatility;

    let time_premium = adjusted_base * cfg.time_risk_rate * t;
    let volatility_premium = ATM_FACTOR * adjusted_base * sigma * t.sqrt();
    let urgency_premium = if input.urgency == UrgencyLevel::Emergency {
        cfg.emergency_callout_fee
    } else {
        0.0
    };

    let components = PriceComponents {
        base: adjusted_base,
        time_premium,
        volatility_premium,
        urgency_premium,
    };

    // Sensitivities of the total price to volatility and time
    let vega = ATM_FACTOR * adjusted_base * t.sqrt();
    let theta = adjusted_base * cfg.time_risk_rate
        + if t > 0.0 {
            0.5 * ATM_FACTOR * adjusted_base * sigma / t.sqrt()
        } else {
            0.0
        };

    Ok(BlackScholesOutcome {
        recommended_price: adjusted_base + time_premium + volatility_premium + urgency_premium,
        components,
        risk_metrics: RiskMetrics { vega, theta },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::MarketAdjustment;
    use crate::types::ConfidenceLevel;

    fn input(urgency: UrgencyLevel, duration_minutes: f64) -> PricingInput {
        PricingInput {
            base_price: 300.0,
            duration_minutes,
            urgency,
            adjustment: MarketAdjustment {
                price_multiplier: urgency.price_multiplier(),
                adjusted_volatility: 0.18,
            },
            confidence: ConfidenceLevel::P95,
            simulations: 10_000,
            trade: None,
        }
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let cfg = EngineConfig::default();
        let inp = input(UrgencyLevel::Urgent, 180.0);
        let a = price(&inp, &cfg).unwrap();
        let b = price(&inp, &cfg).unwrap();
        assert_eq!(a.recommended_price.to_bits(), b.recommended_price.to_bits());
    }

    #[test]
    fn components_sum_to_the_price() {
        let cfg = EngineConfig::default();
        let out = price(&input(UrgencyLevel::Emergency, 240.0), &cfg).unwrap();
        let c = out.components;
        let sum = c.base + c.time_premium + c.volatility_premium + c.urgency_premium;
        assert!((sum - out.recommended_price).abs() < 1e-9);
    }

    #[test]
    fn emergency_adds_the_callout_fee() {
        let cfg = EngineConfig::default();
        let urgent = price(&input(UrgencyLevel::Urgent, 120.0), &cfg).unwrap();
        let emergency = price(&input(UrgencyLevel::Emergency, 120.0), &cfg).unwrap();
        assert!((urgent.components.urgency_premium).abs() < 1e-12);
        assert!((emergency.components.urgency_premium - cfg.emergency_callout_fee).abs() < 1e-12);
    }

    #[test]
    fn longer_jobs_carry_larger_premia() {
        let cfg = EngineConfig::default();
        let short = price(&input(UrgencyLevel::Standard, 60.0), &cfg).unwrap();
        let long = price(&input(UrgencyLevel::Standard, 480.0), &cfg).unwrap();
        assert!(long.components.time_premium > short.components.time_premium);
        assert!(long.components.volatility_premium > short.components.volatility_premium);
        assert!(long.risk_metrics.vega > short.risk_metrics.vega);
    }

    #[test]
    fn urgency_ordering_holds() {
        let cfg = EngineConfig::default();
        let prices: Vec<f64> = [
            UrgencyLevel::Scheduled,
            UrgencyLevel::Standard,
            UrgencyLevel::Urgent,
            UrgencyLevel::Emergency,
        ]
        .iter()
        .map(|u| price(&input(*u, 120.0), &cfg).unwrap().recommended_price)
        .collect();
        assert!(prices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn zero_duration_degrades_to_the_adjusted_base() {
        let cfg = EngineConfig::default();
        let out = price(&input(UrgencyLevel::Standard, 0.0), &cfg).unwrap();
        assert!((out.recommended_price - out.components.base).abs() < 1e-12);
    }
}
