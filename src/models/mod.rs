//! Pricing calculators
//!
//! Three independent strategies over the same normalized input, plus the
//! auto-selection rule and the side-by-side comparison engine.

pub mod black_scholes;
pub mod compare;
pub mod monte_carlo;
pub mod quote;
pub mod selector;

pub use black_scholes::BlackScholesOutcome;
pub use compare::{run_comparison, ComparisonReport};
pub use monte_carlo::MonteCarloOutcome;
pub use quote::QuoteOutcome;
pub use selector::select_model;

use crate::market::MarketAdjustment;
use crate::trades::TradeEstimate;
use crate::types::{ConfidenceLevel, UrgencyLevel};

/// Normalized input every calculator consumes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingInput {
    pub base_price: f64,
    pub duration_minutes: f64,
    pub urgency: UrgencyLevel,
    pub adjustment: MarketAdjustment,
    pub confidence: ConfidenceLevel,
    /// Requested stochastic draws, before the engine cap
    pub simulations: usize,
    pub trade: Option<TradeEstimate>,
}
