//! Reproducible recipe for a basin render.
//!
//! A [`Seed`] captures everything needed to recreate a fractal: grid size,
//! zoom, PRNG seed, perturbation amount, palette name, and simulation
//! parameter overrides.

use crate::attractor::{AttractorSet, DEFAULT_PERTURBATION};
use crate::error::BasinError;
use crate::integrator::SimulationParams;
use crate::sampler::{PlaneSampler, DEFAULT_ZOOM};
use serde::{Deserialize, Serialize};

/// Reference grid width and height.
pub const DEFAULT_SIZE: usize = 1500;

/// Reproducible render recipe.
///
/// Two equal seeds produce bit-identical label grids.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub width: usize,
    pub height: usize,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    pub seed: u64,
    #[serde(default = "default_perturbation")]
    pub perturbation: f64,
    #[serde(default = "default_palette")]
    pub palette: String,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
}

fn default_zoom() -> f64 {
    DEFAULT_ZOOM
}

fn default_perturbation() -> f64 {
    DEFAULT_PERTURBATION
}

fn default_palette() -> String {
    "classic".to_string()
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Seed {
    /// Recipe with the reference zoom, perturbation and palette and no
    /// parameter overrides.
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        Self {
            width,
            height,
            zoom: DEFAULT_ZOOM,
            seed,
            perturbation: DEFAULT_PERTURBATION,
            palette: default_palette(),
            params: empty_params(),
        }
    }

    /// Checks dimensions, zoom, perturbation and the simulation parameters.
    pub fn validate(&self) -> Result<(), BasinError> {
        self.sampler()?;
        if !self.perturbation.is_finite() || self.perturbation < 0.0 {
            return Err(BasinError::invalid_param(
                "perturbation",
                format!("{} must be finite and non-negative", self.perturbation),
            ));
        }
        self.simulation_params().validate()
    }

    pub fn sampler(&self) -> Result<PlaneSampler, BasinError> {
        PlaneSampler::new(self.width, self.height, self.zoom)
    }

    /// Simulation parameters with this recipe's overrides applied.
    pub fn simulation_params(&self) -> SimulationParams {
        SimulationParams::from_json(&self.params)
    }

    /// The perturbed attractor set this recipe renders against.
    pub fn attractors(&self) -> AttractorSet {
        AttractorSet::from_seed(self.seed, self.perturbation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_uses_reference_defaults() {
        let s = Seed::new(DEFAULT_SIZE, DEFAULT_SIZE, 42);
        assert_eq!(s.zoom, 1.5);
        assert_eq!(s.perturbation, 0.2);
        assert_eq!(s.palette, "classic");
        assert_eq!(s.params, json!({}));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn json_round_trip_with_overrides() {
        let mut s = Seed::new(640, 480, 8675309);
        s.zoom = 3.0;
        s.params = json!({"max_steps": 3000, "damping": 1.0});
        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn missing_optional_keys_take_defaults() {
        let s: Seed = serde_json::from_str(r#"{"width": 10, "height": 20, "seed": 3}"#).unwrap();
        assert_eq!(s, Seed::new(10, 20, 3));
    }

    #[test]
    fn validate_rejects_zero_dimensions() {
        assert!(matches!(
            Seed::new(0, 10, 1).validate(),
            Err(BasinError::InvalidDimensions)
        ));
        assert!(Seed::new(usize::MAX, 2, 1).validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_perturbation() {
        let mut s = Seed::new(10, 10, 1);
        s.perturbation = -0.1;
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("perturbation"));
    }

    #[test]
    fn validate_rejects_bad_simulation_params() {
        let mut s = Seed::new(10, 10, 1);
        s.params = json!({"step_size": -1.0});
        assert!(s.validate().is_err());
    }

    #[test]
    fn attractors_follow_seed_and_perturbation() {
        let s = Seed::new(10, 10, 77);
        assert_eq!(s.attractors(), AttractorSet::from_seed(77, 0.2));
        let mut flat = s.clone();
        flat.perturbation = 0.0;
        assert_eq!(flat.attractors(), AttractorSet::unperturbed());
    }
}
