//! Centralized constants for the cockpit models.
//!
//! The planner and predictor read these directly; `CockpitConfig` only
//! overrides the handful of knobs exposed to operators.

/// Length of a delivery shift in minutes (8 hours).
pub const SHIFT_MINUTES: f64 = 8.0 * 60.0;

/// Service time per stop before traffic is added.
pub const BASE_STOP_MINUTES: f64 = 12.0;

/// Traffic minutes per stop assumed by the static (non-ML) plan.
pub const STATIC_TRAFFIC_MINUTES: f64 = 8.0;

/// Traffic minutes per stop on a dry day.
pub const DRY_TRAFFIC_MINUTES: f64 = 5.0;

/// Additional traffic minutes per stop at full rain intensity.
pub const RAIN_TRAFFIC_MINUTES: f64 = 10.0;

/// Share of the shift held back per risk level.
pub const CONSERVATIVE_BUFFER: f64 = 0.20;
pub const NEUTRAL_BUFFER: f64 = 0.10;
pub const AGGRESSIVE_BUFFER: f64 = 0.05;

/// Baseline daily parcel demand.
pub const BASE_DEMAND: f64 = 100.0;

/// Parcels added at full rain intensity.
pub const RAIN_DEMAND_EFFECT: f64 = 20.0;

/// Parcels added while a promotion runs.
pub const PROMO_DEMAND_EFFECT: f64 = 50.0;

/// Standard deviation of the predictor noise.
pub const DEMAND_NOISE_STD: f64 = 5.0;

/// Seed for the predictor noise generator; the day of week is added to it.
pub const DEFAULT_SEED: u64 = 42;

/// Truck capacity used when none is given.
pub const DEFAULT_CAPACITY: f64 = 50.0;
