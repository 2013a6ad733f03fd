//! Core types used throughout Quantify
//!
//! Defines services, caller-supplied options, and the result record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::trades::TradeEstimate;

/// Trade/vertical classification of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trade {
    Plumbing,
    Welding,
    Generic,
}

impl Default for Trade {
    fn default() -> Self {
        Trade::Generic
    }
}

impl Trade {
    /// Parse from a catalog classification string. Unknown verticals fall
    /// back to the generic calculator.
    pub fn from_classification(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "plumbing" | "plumber" => Trade::Plumbing,
            "welding" | "welder" => Trade::Welding,
            _ => Trade::Generic,
        }
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trade::Plumbing => write!(f, "plumbing"),
            Trade::Welding => write!(f, "welding"),
            Trade::Generic => write!(f, "generic"),
        }
    }
}

/// Pricing model requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    Auto,
    Quote,
    BlackScholes,
    MonteCarlo,
}

impl Default for PricingModel {
    fn default() -> Self {
        PricingModel::Auto
    }
}

impl PricingModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingModel::Auto => "auto",
            PricingModel::Quote => "quote",
            PricingModel::BlackScholes => "black_scholes",
            PricingModel::MonteCarlo => "monte_carlo",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(PricingModel::Auto),
            "quote" => Some(PricingModel::Quote),
            "black_scholes" => Some(PricingModel::BlackScholes),
            "monte_carlo" => Some(PricingModel::MonteCarlo),
            _ => None,
        }
    }
}

impl fmt::Display for PricingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How fast the customer needs the job done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Scheduled,
    Standard,
    Urgent,
    Emergency,
}

impl Default for UrgencyLevel {
    fn default() -> Self {
        UrgencyLevel::Standard
    }
}

impl UrgencyLevel {
    /// Base price multiplier contributed by urgency
    pub fn price_multiplier(&self) -> f64 {
        match self {
            UrgencyLevel::Scheduled => 0.90,
            UrgencyLevel::Standard => 1.00,
            UrgencyLevel::Urgent => 1.50,
            UrgencyLevel::Emergency => 2.00,
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "scheduled" => Some(UrgencyLevel::Scheduled),
            "standard" => Some(UrgencyLevel::Standard),
            "urgent" => Some(UrgencyLevel::Urgent),
            "emergency" => Some(UrgencyLevel::Emergency),
            _ => None,
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrgencyLevel::Scheduled => write!(f, "scheduled"),
            UrgencyLevel::Standard => write!(f, "standard"),
            UrgencyLevel::Urgent => write!(f, "urgent"),
            UrgencyLevel::Emergency => write!(f, "emergency"),
        }
    }
}

/// Supported confidence levels for the stochastic price range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    P90,
    P95,
    P99,
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        ConfidenceLevel::P95
    }
}

impl ConfidenceLevel {
    pub fn value(&self) -> f64 {
        match self {
            ConfidenceLevel::P90 => 0.90,
            ConfidenceLevel::P95 => 0.95,
            ConfidenceLevel::P99 => 0.99,
        }
    }

    /// Parse from a numeric level (0.90 / 0.95 / 0.99)
    pub fn from_value(v: f64) -> Option<Self> {
        if (v - 0.90).abs() < 1e-9 {
            Some(ConfidenceLevel::P90)
        } else if (v - 0.95).abs() < 1e-9 {
            Some(ConfidenceLevel::P95)
        } else if (v - 0.99).abs() < 1e-9 {
            Some(ConfidenceLevel::P99)
        } else {
            None
        }
    }
}

/// Catalog service being priced. Supplied by the external catalog store,
/// read-only within a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    /// Catalog base price, >= 0
    pub base_price: f64,
    /// Expected duration in minutes
    pub duration_minutes: f64,
    pub trade: Trade,
}

impl Service {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        base_price: f64,
        duration_minutes: f64,
        trade: Trade,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_price,
            duration_minutes,
            trade,
        }
    }
}

/// A single job attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(f64),
    Text(String),
}

impl AttributeValue {
    /// Numeric view; `None` for text values (graceful degradation,
    /// never an error)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            AttributeValue::Number(_) => None,
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Number(n)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

/// Job attributes keyed by name. BTreeMap keeps iteration order stable so
/// the cache key serialization is canonical.
pub type AttributeSet = BTreeMap<String, AttributeValue>;

/// Caller-supplied calculation options. Defaults exist for every field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub pricing_model: PricingModel,
    pub urgency_level: UrgencyLevel,
    pub confidence_level: ConfidenceLevel,
    /// Number of stochastic draws; clamped to the engine cap
    pub simulations: usize,
    /// Free-form passthrough parameters, not interpreted by the engine
    pub custom_parameters: BTreeMap<String, String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            pricing_model: PricingModel::Auto,
            urgency_level: UrgencyLevel::Standard,
            confidence_level: ConfidenceLevel::P95,
            simulations: 10_000,
            custom_parameters: BTreeMap::new(),
        }
    }
}

/// Two-sided price interval at a requested confidence level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub high: f64,
    pub confidence: f64,
}

/// Summary statistics of the stochastic draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub mean: f64,
    pub median: f64,
    pub std_deviation: f64,
    /// Coefficient of variation clipped to [0, 1]
    pub risk_score: f64,
}

/// Additive components of the deterministic breakdown price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub labor: f64,
    pub materials: f64,
    pub margin: f64,
}

/// Margin actually applied by the breakdown calculator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub total_margin: f64,
}

/// Additive components of the closed-form price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceComponents {
    pub base: f64,
    pub time_premium: f64,
    pub volatility_premium: f64,
    pub urgency_premium: f64,
}

/// Sensitivities of the closed-form price, analogous to option Greeks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// dPrice / dVolatility
    pub vega: f64,
    /// dPrice / dTime (per day of completion time)
    pub theta: f64,
}

/// Output of a single price calculation. Created fresh per calculation and
/// never mutated, only superseded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantificationResult {
    /// Concrete model that ran, never `auto`
    pub model: PricingModel,
    pub recommended_price: f64,
    /// Stochastic model only
    pub price_range: Option<PriceRange>,
    /// Stochastic model only
    pub statistics: Option<SimulationStats>,
    /// Breakdown model only
    pub price_breakdown: Option<PriceBreakdown>,
    /// Breakdown model only
    pub margins: Option<Margins>,
    /// Closed-form model only
    pub risk_metrics: Option<RiskMetrics>,
    /// Closed-form model only
    pub price_components: Option<PriceComponents>,
    /// Present when a trade calculator contributed
    pub trade_calculations: Option<TradeEstimate>,
    pub calculated_at: DateTime<Utc>,
    /// Wall-clock time the calculation took
    pub duration_ms: f64,
    /// Canonical hash of the inputs, used as the cache key
    pub input_hash: String,
}

/// Engine error taxonomy. The session boundary is the single point that
/// converts these into a reported error state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("no service selected")]
    NoServiceSelected,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("calculation failed: {0}")]
    CalculationFailure(String),
}
