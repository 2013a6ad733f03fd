//! Plumbing cost model
//!
//! Material cost scales with pipe diameter x length x material unit cost,
//! multiplied by an accessibility difficulty factor.

use crate::types::AttributeSet;

/// Pipe material with a per inch-diameter-foot unit cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeMaterial {
    Pex,
    Pvc,
    Copper,
    Galvanized,
    CastIron,
}

impl PipeMaterial {
    pub fn unit_cost(&self) -> f64 {
        match self {
            PipeMaterial::Pex => 2.5,
            PipeMaterial::Pvc => 1.8,
            PipeMaterial::Copper => 8.5,
            PipeMaterial::Galvanized => 6.0,
            PipeMaterial::CastIron => 12.0,
        }
    }

    /// Unknown materials fall back to PVC pricing
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pex" => PipeMaterial::Pex,
            "copper" => PipeMaterial::Copper,
            "galvanized" => PipeMaterial::Galvanized,
            "cast_iron" | "cast-iron" | "castiron" => PipeMaterial::CastIron,
            _ => PipeMaterial::Pvc,
        }
    }
}

/// Job-site accessibility, each level a fixed difficulty multiplier >= 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    Easy,
    Standard,
    Difficult,
    Crawlspace,
    WallAccess,
}

impl Accessibility {
    pub fn factor(&self) -> f64 {
        match self {
            Accessibility::Easy => 1.0,
            Accessibility::Standard => 1.15,
            Accessibility::Difficult => 1.5,
            Accessibility::Crawlspace => 1.8,
            Accessibility::WallAccess => 2.2,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Accessibility::Easy),
            "standard" => Some(Accessibility::Standard),
            "difficult" => Some(Accessibility::Difficult),
            "crawlspace" => Some(Accessibility::Crawlspace),
            "wall_access" | "wall-access" | "wallaccess" => Some(Accessibility::WallAccess),
            _ => None,
        }
    }
}

/// Parsed plumbing attributes; every field degrades independently
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlumbingParams {
    /// Pipe diameter in inches
    pub diameter: Option<f64>,
    /// Pipe run length in feet
    pub length: Option<f64>,
    pub material: Option<PipeMaterial>,
    pub accessibility: Option<Accessibility>,
}

impl PlumbingParams {
    pub fn from_attributes(attrs: &AttributeSet) -> Self {
        Self {
            diameter: attrs
                .get("pipeDiameter")
                .and_then(|v| v.as_number())
                .filter(|d| *d > 0.0),
            length: attrs
                .get("pipeLength")
                .and_then(|v| v.as_number())
                .filter(|l| *l > 0.0),
            material: attrs
                .get("pipeMaterial")
                .and_then(|v| v.as_text())
                .map(PipeMaterial::from_str),
            accessibility: attrs
                .get("accessibility")
                .and_then(|v| v.as_text())
                .and_then(Accessibility::from_str),
        }
    }

    pub fn estimate(&self) -> super::TradeEstimate {
        let access = self.accessibility.unwrap_or(Accessibility::Standard);
        let unit = self.material.unwrap_or(PipeMaterial::Pvc).unit_cost();

        let material_cost = match (self.diameter, self.length) {
            (Some(d), Some(l)) => Some(d * l * unit * access.factor()),
            _ => None,
        };

        // Rough-in plus six minutes per foot of run, scaled by difficulty
        let estimated_duration = self.length.map(|l| (45.0 + 6.0 * l) * access.factor());

        // Only a parsed attribute may contribute a multiplier; attribute
        // sets with no recognized plumbing key stay empty
        let has_input = self.diameter.is_some()
            || self.length.is_some()
            || self.material.is_some()
            || self.accessibility.is_some();

        super::TradeEstimate {
            material_cost,
            estimated_duration,
            labor_multiplier: if has_input { Some(access.factor()) } else { None },
        }
    }
}
