//! Welding cost model
//!
//! Material cost scales with metal unit cost x thickness x joint length,
//! multiplied by a joint-type complexity factor. The joint factors are a
//! fixed lookup table, not a monotonic scale.

use crate::types::AttributeSet;

/// Weld metal with a per thickness-inch-foot unit cost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeldMetal {
    MildSteel,
    Stainless,
    Aluminum,
    CastIron,
    Titanium,
}

impl WeldMetal {
    pub fn unit_cost(&self) -> f64 {
        match self {
            WeldMetal::MildSteel => 3.0,
            WeldMetal::Stainless => 9.5,
            WeldMetal::Aluminum => 7.0,
            WeldMetal::CastIron => 11.0,
            WeldMetal::Titanium => 38.0,
        }
    }

    /// Unknown metals price as mild steel
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "stainless" | "stainless_steel" => WeldMetal::Stainless,
            "aluminum" | "aluminium" => WeldMetal::Aluminum,
            "cast_iron" | "cast-iron" | "castiron" => WeldMetal::CastIron,
            "titanium" => WeldMetal::Titanium,
            _ => WeldMetal::MildSteel,
        }
    }
}

/// Joint geometry. Complexity factors are a deliberate fixed table:
/// groove carries the most prep work, corner sits above lap for
/// out-of-position welding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointType {
    Butt,
    Fillet,
    Groove,
    Lap,
    Corner,
}

impl JointType {
    pub fn complexity_factor(&self) -> f64 {
        match self {
            JointType::Butt => 1.0,
            JointType::Fillet => 1.2,
            JointType::Lap => 1.35,
            JointType::Corner => 1.45,
            JointType::Groove => 1.6,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "butt" => Some(JointType::Butt),
            "fillet" => Some(JointType::Fillet),
            "groove" => Some(JointType::Groove),
            "lap" => Some(JointType::Lap),
            "corner" => Some(JointType::Corner),
            _ => None,
        }
    }
}

/// Parsed welding attributes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeldingParams {
    pub metal: Option<WeldMetal>,
    /// Material thickness in inches
    pub thickness: Option<f64>,
    /// Joint length in feet
    pub joint_length: Option<f64>,
    pub joint_type: Option<JointType>,
}

impl WeldingParams {
    pub fn from_attributes(attrs: &AttributeSet) -> Self {
        Self {
            metal: attrs
                .get("metalType")
                .and_then(|v| v.as_text())
                .map(WeldMetal::from_str),
            thickness: attrs
                .get("thickness")
                .and_then(|v| v.as_number())
                .filter(|t| *t > 0.0),
            joint_length: attrs
                .get("jointLength")
                .and_then(|v| v.as_number())
                .filter(|l| *l > 0.0),
            joint_type: attrs
                .get("jointType")
                .and_then(|v| v.as_text())
                .and_then(JointType::from_str),
        }
    }

    pub fn estimate(&self) -> super::TradeEstimate {
        let joint = self.joint_type.unwrap_or(JointType::Butt);
        let unit = self.metal.unwrap_or(WeldMetal::MildSteel).unit_cost();

        let material_cost = match (self.thickness, self.joint_length) {
            (Some(t), Some(l)) => Some(unit * t * l * joint.complexity_factor()),
            _ => None,
        };

        // Setup plus twelve minutes per foot of bead, scaled by joint prep
        let estimated_duration = self
            .joint_length
            .map(|l| (30.0 + 12.0 * l) * joint.complexity_factor());

        // No recognized welding key, no multiplier
        let has_input = self.metal.is_some()
            || self.thickness.is_some()
            || self.joint_length.is_some()
            || self.joint_type.is_some();

        super::TradeEstimate {
            material_cost,
            estimated_duration,
            labor_multiplier: if has_input {
                Some(joint.complexity_factor())
            } else {
                None
            },
        }
    }
}
