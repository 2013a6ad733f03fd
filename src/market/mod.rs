//! Market-condition adjustment
//!
//! Folds urgency, demand, competition, economy, time-of-day and seasonality
//! into a single multiplicative price adjustment plus an effective volatility
//! estimate for the stochastic and closed-form calculators.

use serde::{Deserialize, Serialize};

use crate::types::UrgencyLevel;

/// Prevailing demand for the trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketDemand {
    Low,
    Normal,
    High,
    Peak,
}

impl Default for MarketDemand {
    fn default() -> Self {
        MarketDemand::Normal
    }
}

impl MarketDemand {
    pub fn price_factor(&self) -> f64 {
        match self {
            MarketDemand::Low => 0.90,
            MarketDemand::Normal => 1.00,
            MarketDemand::High => 1.15,
            MarketDemand::Peak => 1.30,
        }
    }

    pub fn volatility_factor(&self) -> f64 {
        match self {
            MarketDemand::Low => 0.90,
            MarketDemand::Normal => 1.00,
            MarketDemand::High => 1.20,
            MarketDemand::Peak => 1.40,
        }
    }
}

/// How many competitors serve the same area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitorDensity {
    Low,
    Medium,
    High,
}

impl Default for CompetitorDensity {
    fn default() -> Self {
        CompetitorDensity::Medium
    }
}

impl CompetitorDensity {
    pub fn price_factor(&self) -> f64 {
        match self {
            CompetitorDensity::Low => 1.10,
            CompetitorDensity::Medium => 1.00,
            CompetitorDensity::High => 0.92,
        }
    }

    pub fn volatility_factor(&self) -> f64 {
        match self {
            CompetitorDensity::Low => 1.00,
            CompetitorDensity::Medium => 1.10,
            CompetitorDensity::High => 1.25,
        }
    }
}

/// Broad economic climate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomicIndicator {
    Recession,
    Stable,
    Growth,
}

impl Default for EconomicIndicator {
    fn default() -> Self {
        EconomicIndicator::Stable
    }
}

impl EconomicIndicator {
    pub fn price_factor(&self) -> f64 {
        match self {
            EconomicIndicator::Recession => 0.92,
            EconomicIndicator::Stable => 1.00,
            EconomicIndicator::Growth => 1.08,
        }
    }
}

/// When the job would be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Business,
    Evening,
    Weekend,
    Holiday,
}

impl Default for TimeOfDay {
    fn default() -> Self {
        TimeOfDay::Business
    }
}

impl TimeOfDay {
    pub fn price_factor(&self) -> f64 {
        match self {
            TimeOfDay::Business => 1.00,
            TimeOfDay::Evening => 1.10,
            TimeOfDay::Weekend => 1.20,
            TimeOfDay::Holiday => 1.35,
        }
    }

    pub fn volatility_factor(&self) -> f64 {
        match self {
            TimeOfDay::Business => 1.00,
            TimeOfDay::Evening | TimeOfDay::Weekend => 1.15,
            TimeOfDay::Holiday => 1.30,
        }
    }
}

/// External market inputs supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConditions {
    pub market_demand: MarketDemand,
    pub competitor_density: CompetitorDensity,
    pub economic_indicator: EconomicIndicator,
    pub time_of_day: TimeOfDay,
    /// Free multiplier for seasonal effects, > 0
    pub seasonal_factor: f64,
}

impl Default for MarketConditions {
    fn default() -> Self {
        Self {
            market_demand: MarketDemand::Normal,
            competitor_density: CompetitorDensity::Medium,
            economic_indicator: EconomicIndicator::Stable,
            time_of_day: TimeOfDay::Business,
            seasonal_factor: 1.0,
        }
    }
}

/// Combined adjustment applied on top of the catalog base price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketAdjustment {
    /// All multipliers composed, urgency included
    pub price_multiplier: f64,
    /// Effective volatility for the stochastic and closed-form models
    pub adjusted_volatility: f64,
}

impl MarketAdjustment {
    /// Compose urgency and market conditions into one adjustment.
    /// `base_volatility` comes from the engine config.
    pub fn derive(
        urgency: UrgencyLevel,
        market: &MarketConditions,
        base_volatility: f64,
    ) -> Self {
        let seasonal = market.seasonal_factor.max(0.01);

        let price_multiplier = urgency.price_multiplier()
            * market.market_demand.price_factor()
            * market.competitor_density.price_factor()
            * market.economic_indicator.price_factor()
            * market.time_of_day.price_factor()
            * seasonal;

        let adjusted_volatility = base_volatility
            * market.market_demand.volatility_factor()
            * market.competitor_density.volatility_factor()
            * market.time_of_day.volatility_factor();

        Self {
            price_multiplier,
            adjusted_volatility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_conditions_compose_to_urgency_only() {
        let market = MarketConditions {
            competitor_density: CompetitorDensity::Medium,
            ..Default::default()
        };
        let adj = MarketAdjustment::derive(UrgencyLevel::Standard, &market, 0.15);
        assert!((adj.price_multiplier - 1.0).abs() < 1e-12);
    }

    #[test]
    fn urgency_dominates_the_multiplier_ordering() {
        let market = MarketConditions::default();
        let scheduled = MarketAdjustment::derive(UrgencyLevel::Scheduled, &market, 0.15);
        let standard = MarketAdjustment::derive(UrgencyLevel::Standard, &market, 0.15);
        let urgent = MarketAdjustment::derive(UrgencyLevel::Urgent, &market, 0.15);
        let emergency = MarketAdjustment::derive(UrgencyLevel::Emergency, &market, 0.15);
        assert!(scheduled.price_multiplier < standard.price_multiplier);
        assert!(standard.price_multiplier < urgent.price_multiplier);
        assert!(urgent.price_multiplier < emergency.price_multiplier);
    }

    #[test]
    fn peak_demand_raises_price_and_volatility() {
        let calm = MarketConditions::default();
        let hot = MarketConditions {
            market_demand: MarketDemand::Peak,
            ..Default::default()
        };
        let a = MarketAdjustment::derive(UrgencyLevel::Standard, &calm, 0.15);
        let b = MarketAdjustment::derive(UrgencyLevel::Standard, &hot, 0.15);
        assert!(b.price_multiplier > a.price_multiplier);
        assert!(b.adjusted_volatility > a.adjusted_volatility);
    }

    #[test]
    fn off_hours_raise_volatility() {
        let weekday = MarketConditions::default();
        let holiday = MarketConditions {
            time_of_day: TimeOfDay::Holiday,
            ..Default::default()
        };
        let a = MarketAdjustment::derive(UrgencyLevel::Standard, &weekday, 0.15);
        let b = MarketAdjustment::derive(UrgencyLevel::Standard, &holiday, 0.15);
        assert!(b.adjusted_volatility > a.adjusted_volatility);
    }

    #[test]
    fn seasonal_factor_is_floored() {
        let market = MarketConditions {
            seasonal_factor: 0.0,
            ..Default::default()
        };
        let adj = MarketAdjustment::derive(UrgencyLevel::Standard, &market, 0.15);
        assert!(adj.price_multiplier > 0.0);
    }
}
