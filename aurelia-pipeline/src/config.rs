//! Operator-tunable settings.
//!
//! Defaults come from `constants`. Each knob can be overridden through an
//! environment variable:
//!   - AURELIA_BASE_DEMAND        (f64, parcels per day)
//!   - AURELIA_SEED               (u64)
//!   - AURELIA_BASE_STOP_MINUTES  (f64, service minutes per stop)
//!   - AURELIA_CAPACITY           (f64, truck capacity)
//!
//! Any variable that fails to parse is ignored with a warning.

use std::str::FromStr;

use crate::constants::{BASE_DEMAND, BASE_STOP_MINUTES, DEFAULT_CAPACITY, DEFAULT_SEED};
use crate::predictor::DemandPredictor;

#[derive(Clone, Debug, PartialEq)]
pub struct CockpitConfig {
    pub base_demand: f64,
    pub seed: u64,
    pub base_stop_minutes: f64,
    pub default_capacity: f64,
}

impl Default for CockpitConfig {
    fn default() -> Self {
        Self {
            base_demand: BASE_DEMAND,
            seed: DEFAULT_SEED,
            base_stop_minutes: BASE_STOP_MINUTES,
            default_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CockpitConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        override_from(&lookup, "AURELIA_BASE_DEMAND", &mut cfg.base_demand);
        override_from(&lookup, "AURELIA_SEED", &mut cfg.seed);
        override_from(&lookup, "AURELIA_BASE_STOP_MINUTES", &mut cfg.base_stop_minutes);
        override_from(&lookup, "AURELIA_CAPACITY", &mut cfg.default_capacity);
        cfg
    }

    pub fn predictor(&self) -> DemandPredictor {
        DemandPredictor::new(self.base_demand, self.seed)
    }
}

fn override_from<F, T>(lookup: &F, key: &str, slot: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(v) => {
            log::info!("[config] {} = {} (overrode default)", key, v);
            *slot = v;
        }
        Err(_) => {
            log::warn!(
                "[config] could not parse {} = {:?}; using default {}",
                key,
                raw,
                slot
            );
        }
    }
}
