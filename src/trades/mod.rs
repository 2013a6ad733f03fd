//! Trade attribute calculators
//!
//! Pure functions turning physical job attributes into material cost and
//! labor estimates. Attributes are parsed into tagged per-trade parameter
//! structs; missing or non-numeric values degrade to `None` instead of
//! failing, and partial output is valid output.

mod generic;
mod plumbing;
mod welding;

pub use generic::{ComplexityLevel, GenericParams};
pub use plumbing::{Accessibility, PipeMaterial, PlumbingParams};
pub use welding::{JointType, WeldMetal, WeldingParams};

use serde::{Deserialize, Serialize};

use crate::types::{AttributeSet, Trade};

/// Trade calculator output. Fields are independently optional; callers must
/// treat partial output as valid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TradeEstimate {
    pub material_cost: Option<f64>,
    /// Minutes of labor implied by the attributes
    pub estimated_duration: Option<f64>,
    pub labor_multiplier: Option<f64>,
}

impl TradeEstimate {
    /// True when no attribute produced any component
    pub fn is_empty(&self) -> bool {
        self.material_cost.is_none()
            && self.estimated_duration.is_none()
            && self.labor_multiplier.is_none()
    }
}

/// Parsed per-trade parameters, selected by the service classification
#[derive(Debug, Clone, PartialEq)]
pub enum TradeParams {
    Plumbing(PlumbingParams),
    Welding(WeldingParams),
    Generic(GenericParams),
}

impl TradeParams {
    pub fn from_attributes(trade: Trade, attrs: &AttributeSet) -> Self {
        match trade {
            Trade::Plumbing => TradeParams::Plumbing(PlumbingParams::from_attributes(attrs)),
            Trade::Welding => TradeParams::Welding(WeldingParams::from_attributes(attrs)),
            Trade::Generic => TradeParams::Generic(GenericParams::from_attributes(attrs)),
        }
    }

    pub fn estimate(&self) -> TradeEstimate {
        match self {
            TradeParams::Plumbing(p) => p.estimate(),
            TradeParams::Welding(p) => p.estimate(),
            TradeParams::Generic(p) => p.estimate(),
        }
    }
}

/// Run the trade calculator for a classification against raw attributes.
/// Returns `None` when nothing usable came out.
pub fn estimate(trade: Trade, attrs: &AttributeSet) -> Option<TradeEstimate> {
    if attrs.is_empty() {
        return None;
    }
    let est = TradeParams::from_attributes(trade, attrs).estimate();
    if est.is_empty() {
        None
    } else {
        Some(est)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributeValue;

    #[test]
    fn empty_attributes_yield_no_estimate() {
        let attrs = AttributeSet::new();
        assert!(estimate(Trade::Plumbing, &attrs).is_none());
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let mut attrs = AttributeSet::new();
        attrs.insert("paintColor".into(), AttributeValue::Text("red".into()));
        assert!(estimate(Trade::Plumbing, &attrs).is_none());
    }

    #[test]
    fn dispatch_follows_the_trade_classification() {
        let mut attrs = AttributeSet::new();
        attrs.insert("materialQuantity".into(), AttributeValue::Number(4.0));
        // Plumbing ignores the generic quantity key
        assert!(estimate(Trade::Plumbing, &attrs).is_none());
        assert!(estimate(Trade::Generic, &attrs).is_some());
    }
}
