//! Automatic model selection
//!
//! Fixed business rules, first match wins. The thresholds are exact
//! behavioral contracts, not tunable heuristics.

use tracing::debug;

use crate::types::{PricingModel, Service, UrgencyLevel};

const HIGH_VALUE_THRESHOLD: f64 = 500.0;
const MAX_SIMPLE_ATTRIBUTES: usize = 3;
const LONG_JOB_MINUTES: f64 = 240.0;

/// Resolve `auto` to a concrete model. Concrete requests pass through.
pub fn select_model(
    requested: PricingModel,
    service: &Service,
    urgency: UrgencyLevel,
    attribute_count: usize,
) -> PricingModel {
    if requested != PricingModel::Auto {
        return requested;
    }

    let selected = if urgency == UrgencyLevel::Emergency
        || attribute_count > MAX_SIMPLE_ATTRIBUTES
        || service.base_price > HIGH_VALUE_THRESHOLD
    {
        PricingModel::MonteCarlo
    } else if service.duration_minutes > LONG_JOB_MINUTES {
        PricingModel::BlackScholes
    } else {
        PricingModel::Quote
    };

    debug!(
        service = %service.id,
        model = %selected,
        attribute_count,
        "auto-selected pricing model"
    );
    selected
}
