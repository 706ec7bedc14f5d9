//! Simulated supervised demand predictor.
//!
//! Demand is a fixed additive formula (base + rain + promotion) plus
//! Gaussian noise. The noise generator is ChaCha8 seeded with
//! `seed + day_of_week`, and samples are drawn with the Box–Muller
//! transform, so a scenario always reproduces the same prediction.

use std::f64::consts::PI;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::constants::{
    BASE_DEMAND, DEFAULT_SEED, DEMAND_NOISE_STD, PROMO_DEMAND_EFFECT, RAIN_DEMAND_EFFECT,
};
use crate::error::{CockpitError, CockpitResult};
use crate::types::{DemandInputs, DemandPrediction};

#[derive(Clone, Debug, PartialEq)]
pub struct DemandPredictor {
    pub base: f64,
    pub seed: u64,
    pub noise_std: f64,
}

impl Default for DemandPredictor {
    fn default() -> Self {
        Self {
            base: BASE_DEMAND,
            seed: DEFAULT_SEED,
            noise_std: DEMAND_NOISE_STD,
        }
    }
}

impl DemandPredictor {
    pub fn new(base: f64, seed: u64) -> Self {
        Self {
            base,
            seed,
            ..Self::default()
        }
    }

    pub fn predict(&self, inputs: &DemandInputs) -> CockpitResult<DemandPrediction> {
        if inputs.day_of_week > 6 {
            return Err(CockpitError::invalid_parameter(
                "predict_demand",
                format!("day_of_week must be 0..=6, got {}", inputs.day_of_week),
            ));
        }
        if !(0.0..=1.0).contains(&inputs.rain) {
            return Err(CockpitError::invalid_parameter(
                "predict_demand",
                format!("rain must be within 0.0..=1.0, got {}", inputs.rain),
            ));
        }

        let seed = self.seed.wrapping_add(u64::from(inputs.day_of_week));
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let noise = standard_normal(&mut rng) * self.noise_std;

        let rain_effect = inputs.rain * RAIN_DEMAND_EFFECT;
        let promo_effect = if inputs.promo { PROMO_DEMAND_EFFECT } else { 0.0 };
        let demand = self.base + rain_effect + promo_effect + noise;

        log::debug!(
            "predict_demand: day={} rain={:.2} promo={} -> {:.1} (noise {:.3})",
            inputs.day_of_week,
            inputs.rain,
            inputs.promo,
            demand,
            noise
        );

        Ok(DemandPrediction {
            demand,
            base: self.base,
            rain_effect,
            promo_effect,
            noise,
        })
    }
}

/// Predict with the default base demand and seed.
pub fn predict_demand(inputs: &DemandInputs) -> CockpitResult<DemandPrediction> {
    DemandPredictor::default().predict(inputs)
}

/// One N(0, 1) sample via Box–Muller.
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // gen::<f64>() is in [0, 1); flip it so ln() never sees zero.
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}
