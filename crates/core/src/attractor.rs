//! The fixed set of four mass points every trajectory falls toward.
//!
//! An [`AttractorSet`] is built once per render, from the corners of the
//! square `[-1, 1]²` nudged by a seeded random offset, and is then shared
//! read-only by every worker.

use crate::error::BasinError;
use crate::prng::Xorshift64;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Number of attractors in every set.
pub const ATTRACTOR_COUNT: usize = 4;

/// Base positions, in iteration order.
pub const BASE_POSITIONS: [DVec2; ATTRACTOR_COUNT] = [
    DVec2::new(-1.0, -1.0),
    DVec2::new(1.0, -1.0),
    DVec2::new(-1.0, 1.0),
    DVec2::new(1.0, 1.0),
];

/// Mass of an unperturbed attractor.
pub const BASE_MASS: f64 = 1.0;

/// Default upper bound of the uniform perturbation.
pub const DEFAULT_PERTURBATION: f64 = 0.2;

/// A fixed point mass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attractor {
    pub position: DVec2,
    pub mass: f64,
}

impl Attractor {
    pub fn new(x: f64, y: f64, mass: f64) -> Self {
        Self {
            position: DVec2::new(x, y),
            mass,
        }
    }
}

/// Exactly four attractors in a fixed iteration order.
///
/// Iteration order matters: the start check and the mid-run capture check are
/// first-match, and nearest-attractor ties go to the lowest index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttractorSet {
    attractors: [Attractor; ATTRACTOR_COUNT],
}

impl AttractorSet {
    /// Wraps an explicit set after checking it.
    ///
    /// Returns `BasinError::InvalidAttractor` for a non-finite coordinate or a
    /// mass that is not finite and strictly positive.
    pub fn new(attractors: [Attractor; ATTRACTOR_COUNT]) -> Result<Self, BasinError> {
        for (index, a) in attractors.iter().enumerate() {
            if !a.position.is_finite() {
                return Err(BasinError::InvalidAttractor {
                    index,
                    reason: format!("position ({}, {}) is not finite", a.position.x, a.position.y),
                });
            }
            if !a.mass.is_finite() || a.mass <= 0.0 {
                return Err(BasinError::InvalidAttractor {
                    index,
                    reason: format!("mass {} must be finite and positive", a.mass),
                });
            }
        }
        Ok(Self { attractors })
    }

    /// Builds the perturbed set, drawing 12 values from `rng`.
    ///
    /// For each base corner, in order: `x + U(0, p)`, `y + U(0, p)`,
    /// `1 + U(0, p)`. A `perturbation` of 0 reproduces the bare corners.
    pub fn build(rng: &mut Xorshift64, perturbation: f64) -> Self {
        let attractors = BASE_POSITIONS.map(|base| {
            let x = base.x + rng.uniform_offset(perturbation);
            let y = base.y + rng.uniform_offset(perturbation);
            let mass = BASE_MASS + rng.uniform_offset(perturbation);
            Attractor::new(x, y, mass)
        });
        Self { attractors }
    }

    /// Builds the perturbed set from a fresh generator seeded with `seed`.
    pub fn from_seed(seed: u64, perturbation: f64) -> Self {
        Self::build(&mut Xorshift64::new(seed), perturbation)
    }

    /// The four bare corners, each with mass 1.
    pub fn unperturbed() -> Self {
        Self {
            attractors: BASE_POSITIONS.map(|p| Attractor {
                position: p,
                mass: BASE_MASS,
            }),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Attractor> {
        self.attractors.get(index)
    }

    pub fn as_slice(&self) -> &[Attractor] {
        &self.attractors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attractor> {
        self.attractors.iter()
    }

    /// Index of the attractor nearest to `point` and its squared distance.
    ///
    /// The first attractor reaching the minimum wins. A NaN `point` never
    /// compares below the running minimum and yields `(0, f64::INFINITY)`.
    pub fn nearest(&self, point: DVec2) -> (usize, f64) {
        let mut best_index = 0;
        let mut best_sq = f64::INFINITY;
        for (index, a) in self.attractors.iter().enumerate() {
            let dx = point.x - a.position.x;
            let dy = point.y - a.position.y;
            let sq = dx * dx + dy * dy;
            if sq < best_sq {
                best_sq = sq;
                best_index = index;
            }
        }
        (best_index, best_sq)
    }
}
