//! Quantification session
//!
//! The orchestrating unit external callers use: holds the current service,
//! attributes, configuration and market conditions, runs calculations
//! through the single error boundary, and keeps the bounded history and
//! result cache.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::{input_hash, CacheUtilization, ResultCache};
use crate::config::EngineConfig;
use crate::market::{MarketAdjustment, MarketConditions};
use crate::models::{self, ComparisonReport, PricingInput};
use crate::trades;
use crate::types::{
    AttributeSet, AttributeValue, Configuration, EngineError, PricingModel,
    QuantificationResult, Service,
};

/// Compact record of a past calculation, kept for display/audit only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub service_name: String,
    pub model: PricingModel,
    pub price: f64,
    pub attribute_count: usize,
}

/// Per-caller pricing session. Owns its state exclusively; calculations are
/// synchronous and explicit (no recalculation on attribute change).
pub struct QuantificationSession {
    engine: EngineConfig,
    service: Option<Service>,
    attributes: AttributeSet,
    configuration: Configuration,
    market: MarketConditions,
    last_result: Option<QuantificationResult>,
    last_error: Option<String>,
    history: VecDeque<HistoryEntry>,
    cache: ResultCache,
    rng: StdRng,
}

impl QuantificationSession {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(engine: EngineConfig) -> Self {
        let cache = ResultCache::new(engine.cache_capacity);
        Self {
            engine,
            service: None,
            attributes: AttributeSet::new(),
            configuration: Configuration::default(),
            market: MarketConditions::default(),
            last_result: None,
            last_error: None,
            history: VecDeque::new(),
            cache,
            rng: StdRng::from_entropy(),
        }
    }

    /// Fix the RNG seed so stochastic calculations are reproducible.
    /// Production sessions leave the seed unset (entropy-derived).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // --- state mutators -------------------------------------------------

    pub fn set_service(&mut self, service: Service) {
        debug!(service = %service.id, trade = %service.trade, "service selected");
        self.service = Some(service);
    }

    pub fn update_attribute(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn update_attributes<I, K, V>(&mut self, attrs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        for (k, v) in attrs {
            self.attributes.insert(k.into(), v.into());
        }
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    pub fn update_configuration(&mut self, configuration: Configuration) {
        self.configuration = configuration;
    }

    pub fn configuration_mut(&mut self) -> &mut Configuration {
        &mut self.configuration
    }

    pub fn update_market_conditions(&mut self, market: MarketConditions) {
        self.market = market;
    }

    /// Drop service, attributes and last result. Cache and history survive.
    pub fn reset(&mut self) {
        self.service = None;
        self.attributes.clear();
        self.configuration = Configuration::default();
        self.market = MarketConditions::default();
        self.last_result = None;
        self.last_error = None;
    }

    // --- calculation ----------------------------------------------------

    /// Run one calculation. On failure the previous successful result and
    /// the history are untouched; the error is also retained as a
    /// human-readable string for display.
    pub fn calculate(&mut self) -> Result<QuantificationResult, EngineError> {
        match self.calculate_inner() {
            Ok(result) => {
                self.last_error = None;
                Ok(result)
            }
            Err(e) => {
                warn!(error = %e, "calculation failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn calculate_inner(&mut self) -> Result<QuantificationResult, EngineError> {
        let service = self
            .service
            .clone()
            .ok_or(EngineError::NoServiceSelected)?;
        self.validate_inputs()?;

        let key = input_hash(&service, &self.attributes, &self.configuration, &self.market);
        if let Some(hit) = self.cache.get(&key) {
            debug!(hash = %key, "cache hit, returning stored result");
            let result = hit.clone();
            self.record(&service, &result);
            return Ok(result);
        }

        let started = Instant::now();
        let input = self.build_input(&service);
        let model = models::select_model(
            self.configuration.pricing_model,
            &service,
            self.configuration.urgency_level,
            self.attributes.len(),
        );

        let mut result = QuantificationResult {
            model,
            recommended_price: 0.0,
            price_range: None,
            statistics: None,
            price_breakdown: None,
            margins: None,
            risk_metrics: None,
            price_components: None,
            trade_calculations: input.trade,
            calculated_at: Utc::now(),
            duration_ms: 0.0,
            input_hash: key.clone(),
        };

        match model {
            PricingModel::MonteCarlo => {
                let out = models::monte_carlo::simulate(&input, &self.engine, &mut self.rng)?;
                result.recommended_price = out.recommended_price;
                result.price_range = Some(out.price_range);
                result.statistics = Some(out.statistics);
            }
            PricingModel::BlackScholes => {
                let out = models::black_scholes::price(&input, &self.engine)?;
                result.recommended_price = out.recommended_price;
                result.price_components = Some(out.components);
                result.risk_metrics = Some(out.risk_metrics);
            }
            PricingModel::Quote => {
                let out = models::quote::price(&input, &self.engine)?;
                result.recommended_price = out.recommended_price;
                result.price_breakdown = Some(out.breakdown);
                result.margins = Some(out.margins);
            }
            PricingModel::Auto => {
                // select_model always resolves auto to a concrete model
                return Err(EngineError::CalculationFailure(
                    "model selection did not resolve".to_string(),
                ));
            }
        }
        result.duration_ms = started.elapsed().as_secs_f64() * 1000.0;

        info!(
            service = %service.id,
            model = %result.model,
            price = result.recommended_price,
            duration_ms = result.duration_ms,
            "calculation complete"
        );

        self.cache.put(key, result.clone());
        self.record(&service, &result);
        Ok(result)
    }

    /// Run all three calculators side by side. Comparisons bypass the cache.
    pub fn compare(&mut self) -> Result<ComparisonReport, EngineError> {
        let service = match self.service.clone() {
            Some(s) => s,
            None => {
                self.last_error = Some(EngineError::NoServiceSelected.to_string());
                return Err(EngineError::NoServiceSelected);
            }
        };
        if let Err(e) = self.validate_inputs() {
            self.last_error = Some(e.to_string());
            return Err(e);
        }

        let input = self.build_input(&service);
        match models::run_comparison(&input, &self.engine, &mut self.rng) {
            Ok(report) => {
                self.last_error = None;
                info!(
                    service = %service.id,
                    recommendation = %report.recommendation,
                    dispersion = report.dispersion,
                    "comparison complete"
                );
                Ok(report)
            }
            Err(e) => {
                warn!(error = %e, "comparison failed");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn validate_inputs(&self) -> Result<(), EngineError> {
        if self.configuration.simulations == 0 {
            return Err(EngineError::InvalidConfiguration(
                "simulations must be > 0".to_string(),
            ));
        }
        if !self.market.seasonal_factor.is_finite() || self.market.seasonal_factor <= 0.0 {
            return Err(EngineError::InvalidConfiguration(format!(
                "seasonal_factor must be positive, got {}",
                self.market.seasonal_factor
            )));
        }
        Ok(())
    }

    fn build_input(&self, service: &Service) -> PricingInput {
        PricingInput {
            base_price: service.base_price,
            duration_minutes: service.duration_minutes,
            urgency: self.configuration.urgency_level,
            adjustment: MarketAdjustment::derive(
                self.configuration.urgency_level,
                &self.market,
                self.engine.base_volatility,
            ),
            confidence: self.configuration.confidence_level,
            simulations: self.configuration.simulations,
            trade: trades::estimate(service.trade, &self.attributes),
        }
    }

    fn record(&mut self, service: &Service, result: &QuantificationResult) {
        self.history.push_back(HistoryEntry {
            timestamp: result.calculated_at,
            service_name: service.name.clone(),
            model: result.model,
            price: result.recommended_price,
            attribute_count: self.attributes.len(),
        });
        while self.history.len() > self.engine.history_capacity {
            self.history.pop_front();
        }
        self.last_result = Some(result.clone());
    }

    // --- accessors ------------------------------------------------------

    pub fn last_result(&self) -> Option<&QuantificationResult> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn recommended_price(&self) -> Option<f64> {
        self.last_result.as_ref().map(|r| r.recommended_price)
    }

    pub fn current_model(&self) -> Option<PricingModel> {
        self.last_result.as_ref().map(|r| r.model)
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_utilization(&self) -> CacheUtilization {
        self.cache.utilization()
    }
}

impl Default for QuantificationSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Trade, UrgencyLevel};

    fn plumbing_service() -> Service {
        Service::new("svc-p1", "Pipe replacement", 180.0, 90.0, Trade::Plumbing)
    }

    fn session_with_service() -> QuantificationSession {
        let mut s = QuantificationSession::new().with_seed(1234);
        s.set_service(plumbing_service());
        s
    }

    #[test]
    fn calculate_without_service_fails_and_keeps_state() {
        let mut s = session_with_service();
        let first = s.calculate().unwrap();

        s.reset();
        let err = s.calculate().unwrap_err();
        assert_eq!(err, EngineError::NoServiceSelected);
        assert!(s.last_error().is_some());
        // reset dropped the result deliberately; now verify the failure path
        // alone does not discard a good result
        s.set_service(plumbing_service());
        let again = s.calculate().unwrap();
        assert_eq!(again.model, first.model);
    }

    #[test]
    fn failed_calculation_retains_previous_result() {
        let mut s = session_with_service();
        let good = s.calculate().unwrap();

        s.configuration_mut().simulations = 0;
        assert!(s.calculate().is_err());
        assert_eq!(s.recommended_price(), Some(good.recommended_price));
        assert!(s.last_error().unwrap().contains("simulations"));

        s.configuration_mut().simulations = 10_000;
        assert!(s.calculate().is_ok());
        assert!(s.last_error().is_none());
    }

    #[test]
    fn cache_hit_returns_the_stored_result() {
        let mut s = session_with_service();
        s.configuration_mut().pricing_model = PricingModel::MonteCarlo;
        let first = s.calculate().unwrap();
        // Second run with identical inputs must return the frozen draw
        let second = s.calculate().unwrap();
        assert_eq!(first, second);
        assert_eq!(s.cache_utilization().entries, 1);
    }

    #[test]
    fn attribute_change_invalidates_the_cache_key() {
        let mut s = session_with_service();
        let first = s.calculate().unwrap();
        s.update_attribute("pipeDiameter", 0.75);
        let second = s.calculate().unwrap();
        assert_ne!(first.input_hash, second.input_hash);
        assert_eq!(s.cache_utilization().entries, 2);
    }

    #[test]
    fn history_is_bounded() {
        let mut s = session_with_service();
        for i in 0..25 {
            s.update_attribute("materialQuantity", i as f64 + 1.0);
            s.calculate().unwrap();
        }
        assert_eq!(s.history().count(), 20);
    }

    #[test]
    fn emergency_urgency_auto_selects_monte_carlo() {
        let mut s = session_with_service();
        s.configuration_mut().urgency_level = UrgencyLevel::Emergency;
        let result = s.calculate().unwrap();
        assert_eq!(result.model, PricingModel::MonteCarlo);
        assert!(result.price_range.is_some());
        assert!(result.statistics.is_some());
    }

    #[test]
    fn trade_calculations_flow_into_the_result() {
        let mut s = session_with_service();
        s.update_attribute("pipeDiameter", 1.0);
        s.update_attribute("pipeLength", 10.0);
        s.update_attribute("pipeMaterial", "copper");
        let result = s.calculate().unwrap();
        let trade = result.trade_calculations.unwrap();
        assert!(trade.material_cost.unwrap() > 0.0);
    }

    #[test]
    fn compare_reports_all_models() {
        let mut s = session_with_service();
        let report = s.compare().unwrap();
        assert!(report.quote.recommended_price > 0.0);
        assert!(report.black_scholes.recommended_price > 0.0);
        assert!(report.monte_carlo.recommended_price > 0.0);
    }

    #[test]
    fn clear_cache_forces_recomputation_bookkeeping() {
        let mut s = session_with_service();
        s.calculate().unwrap();
        assert_eq!(s.cache_utilization().entries, 1);
        s.clear_cache();
        assert_eq!(s.cache_utilization().entries, 0);
    }
}
