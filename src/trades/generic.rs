//! Generic cost model
//!
//! Fallback for trades without a dedicated calculator: cost scales with a
//! material-quantity figure times a complexity-level factor.

use crate::types::AttributeSet;

const UNIT_MATERIAL_COST: f64 = 10.0;

/// Overall job complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexityLevel {
    Simple,
    Standard,
    Complex,
    Expert,
}

impl ComplexityLevel {
    pub fn factor(&self) -> f64 {
        match self {
            ComplexityLevel::Simple => 1.0,
            ComplexityLevel::Standard => 1.25,
            ComplexityLevel::Complex => 1.75,
            ComplexityLevel::Expert => 2.5,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "simple" => Some(ComplexityLevel::Simple),
            "standard" => Some(ComplexityLevel::Standard),
            "complex" => Some(ComplexityLevel::Complex),
            "expert" => Some(ComplexityLevel::Expert),
            _ => None,
        }
    }
}

/// Parsed generic attributes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GenericParams {
    pub material_quantity: Option<f64>,
    pub complexity: Option<ComplexityLevel>,
}

impl GenericParams {
    pub fn from_attributes(attrs: &AttributeSet) -> Self {
        Self {
            material_quantity: attrs
                .get("materialQuantity")
                .and_then(|v| v.as_number())
                .filter(|q| *q > 0.0),
            complexity: attrs
                .get("complexity")
                .and_then(|v| v.as_text())
                .and_then(ComplexityLevel::from_str),
        }
    }

    pub fn estimate(&self) -> super::TradeEstimate {
        let factor = self
            .complexity
            .unwrap_or(ComplexityLevel::Standard)
            .factor();

        super::TradeEstimate {
            material_cost: self
                .material_quantity
                .map(|q| q * UNIT_MATERIAL_COST * factor),
            estimated_duration: None,
            labor_multiplier: if self.complexity.is_some() || self.material_quantity.is_some() {
                Some(factor)
            } else {
                None
            },
        }
    }
}
