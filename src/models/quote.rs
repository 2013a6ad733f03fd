//! Deterministic breakdown calculator
//!
//! Additive labor + materials + margin quote. The hourly-equivalent rate is
//! derived from the catalog base price over the expected duration, floored
//! at the configured minimum. Fastest model; the default for short,
//! low-value, low-complexity jobs.

use crate::config::EngineConfig;
use crate::types::{EngineError, Margins, PriceBreakdown};

use super::PricingInput;

/// Breakdown calculator output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteOutcome {
    pub recommended_price: f64,
    pub breakdown: PriceBreakdown,
    pub margins: Margins,
}

pub fn price(input: &PricingInput, cfg: &EngineConfig) -> Result<QuoteOutcome, EngineError> {
    if !input.base_price.is_finite() || input.base_price < 0.0 {
        return Err(EngineError::CalculationFailure(format!(
            "invalid base price: {}",
            input.base_price
        )));
    }

    let service_hours = (input.duration_minutes / 60.0).max(0.0);
    let hourly_rate = if service_hours > 0.0 {
        (input.base_price / service_hours).max(cfg.min_hourly_rate)
    } else {
        cfg.min_hourly_rate
    };

    let trade = input.trade.unwrap_or_default();
    let labor_hours = trade
        .estimated_duration
        .map(|m| m / 60.0)
        .unwrap_or(service_hours);
    let labor_multiplier = trade.labor_multiplier.unwrap_or(1.0);

    let multiplier = input.adjustment.price_multiplier;
    let labor = labor_hours * hourly_rate * labor_multiplier * multiplier;
    let materials = trade.material_cost.unwrap_or(0.0) * multiplier;
    let margin = (labor + materials) * cfg.margin_pct;

    Ok(QuoteOutcome {
        recommended_price: labor + materials + margin,
        breakdown: PriceBreakdown {
            labor,
            materials,
            margin,
        },
        margins: Margins {
            total_margin: cfg.margin_pct,
        },
    })
}
