use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{AGGRESSIVE_BUFFER, CONSERVATIVE_BUFFER, NEUTRAL_BUFFER};
use crate::error::CockpitError;

// ---------------------------------------------------------------------------
// Load selection types
// ---------------------------------------------------------------------------

/// A package competing for space on the truck.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub pkg_id: String,
    pub weight: f64,
    pub value: f64,
}

impl Package {
    pub fn new(pkg_id: impl Into<String>, weight: f64, value: f64) -> Self {
        Self {
            pkg_id: pkg_id.into(),
            weight,
            value,
        }
    }

    /// Value per unit of weight. Weightless packages report 0.0 so they
    /// never outrank every positive-ratio package by default.
    pub fn value_ratio(&self) -> f64 {
        if self.weight > 0.0 {
            self.value / self.weight
        } else {
            0.0
        }
    }
}

/// Ranking key used before greedy acceptance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    #[default]
    Value,
    Ratio,
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Value => write!(f, "value"),
            Criterion::Ratio => write!(f, "ratio"),
        }
    }
}

impl FromStr for Criterion {
    type Err = CockpitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "value" => Ok(Criterion::Value),
            "ratio" => Ok(Criterion::Ratio),
            other => Err(CockpitError::invalid_parameter(
                "criterion",
                format!("expected 'value' or 'ratio', got '{}'", other),
            )),
        }
    }
}

/// Outcome of one greedy selection run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectionResult {
    /// Accepted packages in acceptance order.
    pub selected: Vec<Package>,
    pub total_weight: f64,
    pub total_value: f64,
    /// Fraction of capacity consumed (0.0–1.0).
    pub utilization: f64,
}

impl SelectionResult {
    pub fn empty() -> Self {
        Self {
            selected: Vec::new(),
            total_weight: 0.0,
            total_value: 0.0,
            utilization: 0.0,
        }
    }

    pub fn selected_ids(&self) -> Vec<&str> {
        self.selected.iter().map(|p| p.pkg_id.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// Prediction types
// ---------------------------------------------------------------------------

/// Scenario fed to the demand predictor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DemandInputs {
    /// 0 = Monday, 6 = Sunday.
    pub day_of_week: u32,
    /// 0.0 = sunny, 1.0 = heavy rain.
    pub rain: f64,
    pub promo: bool,
}

/// Predicted parcel demand with its additive breakdown.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DemandPrediction {
    pub demand: f64,
    pub base: f64,
    pub rain_effect: f64,
    pub promo_effect: f64,
    pub noise: f64,
}

// ---------------------------------------------------------------------------
// Route planning types
// ---------------------------------------------------------------------------

/// How much of the shift is held back as a safety margin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Conservative,
    #[default]
    Neutral,
    Aggressive,
}

impl RiskLevel {
    /// Parse a risk label. Unknown labels fall back to `Neutral`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "conservative" | "conservador" => RiskLevel::Conservative,
            "aggressive" | "agresivo" => RiskLevel::Aggressive,
            _ => RiskLevel::Neutral,
        }
    }

    pub fn safety_buffer(&self) -> f64 {
        match self {
            RiskLevel::Conservative => CONSERVATIVE_BUFFER,
            RiskLevel::Neutral => NEUTRAL_BUFFER,
            RiskLevel::Aggressive => AGGRESSIVE_BUFFER,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Conservative => write!(f, "Conservative"),
            RiskLevel::Neutral => write!(f, "Neutral"),
            RiskLevel::Aggressive => write!(f, "Aggressive"),
        }
    }
}

/// Stop budget for a single shift.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HybridPlan {
    pub available_minutes: f64,
    pub minutes_per_stop: f64,
    pub safety_buffer: f64,
    pub max_stops: u32,
}

/// Static baseline next to the rain-adjusted plan.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanComparison {
    pub risk: RiskLevel,
    pub rain: f64,
    pub ml_traffic_minutes: f64,
    pub static_plan: HybridPlan,
    pub ml_plan: HybridPlan,
}

impl PlanComparison {
    /// Stops lost (positive) or gained (negative) by using the ML traffic estimate.
    pub fn stop_delta(&self) -> i64 {
        i64::from(self.static_plan.max_stops) - i64::from(self.ml_plan.max_stops)
    }
}
