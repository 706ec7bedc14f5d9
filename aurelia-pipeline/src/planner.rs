//! Hybrid route planning: rain → traffic → stops per shift.
//!
//! The ML side contributes only the rain signal; the planning side turns
//! the resulting per-stop traffic into a stop budget for an 8-hour shift.

use crate::constants::{
    BASE_STOP_MINUTES, DRY_TRAFFIC_MINUTES, RAIN_TRAFFIC_MINUTES, SHIFT_MINUTES,
    STATIC_TRAFFIC_MINUTES,
};
use crate::error::{CockpitError, CockpitResult};
use crate::types::{HybridPlan, PlanComparison, RiskLevel};

/// Extra traffic minutes per stop for a rain intensity in 0..1 (5..15).
pub fn traffic_from_rain(rain: f64) -> f64 {
    DRY_TRAFFIC_MINUTES + RAIN_TRAFFIC_MINUTES * rain
}

/// Stop budget for one 8-hour shift.
///
/// Negative traffic is clamped to zero. A non-positive time per stop
/// yields zero stops.
pub fn plan_route_8h(traffic_minutes: f64, risk: RiskLevel, base_stop_minutes: f64) -> HybridPlan {
    let available = SHIFT_MINUTES;
    let buffer = risk.safety_buffer();
    let usable = available * (1.0 - buffer);
    let minutes_per_stop = base_stop_minutes + traffic_minutes.max(0.0);
    let max_stops = if minutes_per_stop > 0.0 {
        (usable / minutes_per_stop).floor() as u32
    } else {
        0
    };

    HybridPlan {
        available_minutes: available,
        minutes_per_stop,
        safety_buffer: buffer,
        max_stops,
    }
}

/// Static plan (fixed traffic) next to the rain-adjusted plan.
pub fn compare_plans(rain: f64, risk: RiskLevel, base_stop_minutes: f64) -> PlanComparison {
    let ml_traffic_minutes = traffic_from_rain(rain);
    let comparison = PlanComparison {
        risk,
        rain,
        ml_traffic_minutes,
        static_plan: plan_route_8h(STATIC_TRAFFIC_MINUTES, risk, base_stop_minutes),
        ml_plan: plan_route_8h(ml_traffic_minutes, risk, base_stop_minutes),
    };
    log::debug!(
        "compare_plans: rain={:.2} risk={} static={} ml={}",
        rain,
        risk,
        comparison.static_plan.max_stops,
        comparison.ml_plan.max_stops
    );
    comparison
}

/// `compare_plans` for a user-supplied rain intensity, which must lie in
/// 0.0..=1.0.
pub fn compare_plans_checked(
    rain: f64,
    risk: RiskLevel,
    base_stop_minutes: f64,
) -> CockpitResult<PlanComparison> {
    if !(0.0..=1.0).contains(&rain) {
        return Err(CockpitError::invalid_parameter(
            "compare_plans",
            format!("rain must be within 0.0..=1.0, got {}", rain),
        ));
    }
    Ok(compare_plans(rain, risk, base_stop_minutes))
}

/// `compare_plans` with the standard 12-minute service time.
pub fn compare_plans_default(rain: f64, risk: RiskLevel) -> PlanComparison {
    compare_plans(rain, risk, BASE_STOP_MINUTES)
}
