//! Engine configuration
//!
//! Loads tunables from an optional YAML file + environment variables
//! (QUANTIFY_ prefix). Every field has a default so the engine runs with no
//! external files at all.

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Engine-level tunables shared by every session
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Baseline price volatility before market adjustment
    pub base_volatility: f64,
    /// Margin percentage applied by the breakdown calculator (0.20 = 20%)
    pub margin_pct: f64,
    /// Floor for the hourly-equivalent labor rate (currency/hour)
    pub min_hourly_rate: f64,
    /// Per-day time risk rate for the closed-form calculator
    pub time_risk_rate: f64,
    /// Flat surcharge added by the closed-form calculator on emergency jobs
    pub emergency_callout_fee: f64,
    /// Hard cap on stochastic draws per calculation
    pub max_simulations: usize,
    /// Result cache capacity (FIFO eviction)
    pub cache_capacity: usize,
    /// Calculation history entries retained per session
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_volatility: 0.15,
            margin_pct: 0.20,
            min_hourly_rate: 25.0,
            time_risk_rate: 0.05,
            emergency_callout_fee: 75.0,
            max_simulations: 50_000,
            cache_capacity: 100,
            history_capacity: 20,
        }
    }
}

impl EngineConfig {
    /// Load from an optional config file, then apply environment overrides
    /// (e.g. `QUANTIFY_MARGIN_PCT=0.25`).
    pub fn load(path: Option<&str>) -> Result<Self> {
        let defaults = EngineConfig::default();

        let mut builder = Config::builder()
            .set_default("base_volatility", defaults.base_volatility)?
            .set_default("margin_pct", defaults.margin_pct)?
            .set_default("min_hourly_rate", defaults.min_hourly_rate)?
            .set_default("time_risk_rate", defaults.time_risk_rate)?
            .set_default("emergency_callout_fee", defaults.emergency_callout_fee)?
            .set_default("max_simulations", defaults.max_simulations as u64)?
            .set_default("cache_capacity", defaults.cache_capacity as u64)?
            .set_default("history_capacity", defaults.history_capacity as u64)?;

        if let Some(p) = path {
            builder = builder.add_source(File::with_name(p).required(false));
        }

        let settings = builder
            .add_source(Environment::with_prefix("QUANTIFY"))
            .build()
            .context("failed to build engine configuration")?;

        let cfg: EngineConfig = settings
            .try_deserialize()
            .context("failed to deserialize engine configuration")?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the calculators cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.base_volatility <= 0.0 || !self.base_volatility.is_finite() {
            bail!("base_volatility must be positive");
        }
        if self.margin_pct < 0.0 || self.margin_pct >= 1.0 {
            bail!("margin_pct must be in [0, 1)");
        }
        if self.min_hourly_rate <= 0.0 {
            bail!("min_hourly_rate must be positive");
        }
        if self.time_risk_rate < 0.0 {
            bail!("time_risk_rate must be non-negative");
        }
        if self.emergency_callout_fee < 0.0 {
            bail!("emergency_callout_fee must be non-negative");
        }
        if self.max_simulations == 0 {
            bail!("max_simulations must be > 0");
        }
        if self.cache_capacity == 0 {
            bail!("cache_capacity must be > 0");
        }
        if self.history_capacity == 0 {
            bail!("history_capacity must be > 0");
        }
        Ok(())
    }
}
