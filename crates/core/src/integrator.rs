//! Damped explicit integration of a single trajectory.
//!
//! A trajectory starts at rest on a plane sample and is pulled by all four
//! attractors. Each step accumulates the per-attractor accelerations into the
//! velocity one attractor at a time, checks for capture after every
//! attractor, then damps the velocity and advances the position. The scheme
//! is deliberately lossy; its approximations shape the fractal.
//!
//! A run ends in exactly one [`TerminationReason`]:
//!
//! | reason | rule |
//! |---|---|
//! | `NearAttractorAtStart` | start within `start_radius` (Euclidean) of an attractor |
//! | `NearAttractorDuringRun` | inside the `capture_radius` box around an attractor |
//! | `Escaped` | farther than `escape_distance` from the origin, or slower than `rest_speed` |
//! | `Exhausted` | `max_steps` completed without any of the above |

use crate::attractor::AttractorSet;
use crate::error::BasinError;
use crate::force::{force, DEFAULT_GRAVITY};
use crate::params::{param_f64, param_usize};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DEFAULT_STEP_SIZE: f64 = 0.01 / 2.0;
const DEFAULT_MAX_STEPS: usize = 1000;
const DEFAULT_DAMPING: f64 = 0.9999;
const DEFAULT_START_RADIUS: f64 = 0.1;
const DEFAULT_CAPTURE_RADIUS: f64 = 0.02;
const DEFAULT_ESCAPE_DISTANCE: f64 = 2000.0;
const DEFAULT_REST_SPEED: f64 = 0.0001;
const DEFAULT_FAR_AWAY_DISTANCE_SQ: f64 = 2000.0;

/// Numeric constants of the integrator and classifier.
///
/// [`Default`] gives the reference fractal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Gravitational constant G.
    pub gravity: f64,
    /// Time step applied to both the velocity and the position update.
    pub step_size: f64,
    /// Step budget before a trajectory counts as `Exhausted`.
    pub max_steps: usize,
    /// Per-step velocity multiplier.
    pub damping: f64,
    /// Euclidean radius of the start check.
    pub start_radius: f64,
    /// Per-axis half-width of the mid-run capture box.
    pub capture_radius: f64,
    /// Distance from the origin beyond which a trajectory has escaped.
    pub escape_distance: f64,
    /// Speed below which a trajectory has come to rest.
    pub rest_speed: f64,
    /// Squared distance to the nearest attractor beyond which an escaped
    /// trajectory is labelled `FarAway`.
    pub far_away_distance_sq: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            step_size: DEFAULT_STEP_SIZE,
            max_steps: DEFAULT_MAX_STEPS,
            damping: DEFAULT_DAMPING,
            start_radius: DEFAULT_START_RADIUS,
            capture_radius: DEFAULT_CAPTURE_RADIUS,
            escape_distance: DEFAULT_ESCAPE_DISTANCE,
            rest_speed: DEFAULT_REST_SPEED,
            far_away_distance_sq: DEFAULT_FAR_AWAY_DISTANCE_SQ,
        }
    }
}

impl SimulationParams {
    /// Reads overrides from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            gravity: param_f64(params, "gravity", DEFAULT_GRAVITY),
            step_size: param_f64(params, "step_size", DEFAULT_STEP_SIZE),
            max_steps: param_usize(params, "max_steps", DEFAULT_MAX_STEPS),
            damping: param_f64(params, "damping", DEFAULT_DAMPING),
            start_radius: param_f64(params, "start_radius", DEFAULT_START_RADIUS),
            capture_radius: param_f64(params, "capture_radius", DEFAULT_CAPTURE_RADIUS),
            escape_distance: param_f64(params, "escape_distance", DEFAULT_ESCAPE_DISTANCE),
            rest_speed: param_f64(params, "rest_speed", DEFAULT_REST_SPEED),
            far_away_distance_sq: param_f64(
                params,
                "far_away_distance_sq",
                DEFAULT_FAR_AWAY_DISTANCE_SQ,
            ),
        }
    }

    /// Current values as a JSON object, keyed like [`from_json`](Self::from_json).
    pub fn to_json(&self) -> Value {
        json!({
            "gravity": self.gravity,
            "step_size": self.step_size,
            "max_steps": self.max_steps,
            "damping": self.damping,
            "start_radius": self.start_radius,
            "capture_radius": self.capture_radius,
            "escape_distance": self.escape_distance,
            "rest_speed": self.rest_speed,
            "far_away_distance_sq": self.far_away_distance_sq,
        })
    }

    /// Schema of every parameter: type, default, description.
    pub fn param_schema() -> Value {
        json!({
            "gravity": {
                "type": "number",
                "default": DEFAULT_GRAVITY,
                "description": "Gravitational constant G"
            },
            "step_size": {
                "type": "number",
                "default": DEFAULT_STEP_SIZE,
                "min": 0.0,
                "description": "Time step for the velocity and position updates"
            },
            "max_steps": {
                "type": "integer",
                "default": DEFAULT_MAX_STEPS,
                "min": 0,
                "description": "Steps before a trajectory is labelled a stable orbit"
            },
            "damping": {
                "type": "number",
                "default": DEFAULT_DAMPING,
                "description": "Velocity multiplier applied once per step"
            },
            "start_radius": {
                "type": "number",
                "default": DEFAULT_START_RADIUS,
                "min": 0.0,
                "description": "Euclidean radius of the immediate capture check"
            },
            "capture_radius": {
                "type": "number",
                "default": DEFAULT_CAPTURE_RADIUS,
                "min": 0.0,
                "description": "Per-axis half-width of the mid-run capture box"
            },
            "escape_distance": {
                "type": "number",
                "default": DEFAULT_ESCAPE_DISTANCE,
                "min": 0.0,
                "description": "Distance from the origin that counts as escape"
            },
            "rest_speed": {
                "type": "number",
                "default": DEFAULT_REST_SPEED,
                "min": 0.0,
                "description": "Speed below which a trajectory has come to rest"
            },
            "far_away_distance_sq": {
                "type": "number",
                "default": DEFAULT_FAR_AWAY_DISTANCE_SQ,
                "min": 0.0,
                "description": "Squared nearest-attractor distance labelled far away"
            }
        })
    }

    /// Rejects values the integrator cannot use.
    ///
    /// Every float must be finite, `step_size` strictly positive and every
    /// threshold non-negative.
    pub fn validate(&self) -> Result<(), BasinError> {
        let floats = [
            ("gravity", self.gravity),
            ("step_size", self.step_size),
            ("damping", self.damping),
            ("start_radius", self.start_radius),
            ("capture_radius", self.capture_radius),
            ("escape_distance", self.escape_distance),
            ("rest_speed", self.rest_speed),
            ("far_away_distance_sq", self.far_away_distance_sq),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(BasinError::invalid_param(name, format!("{value} is not finite")));
            }
        }
        if self.step_size <= 0.0 {
            return Err(BasinError::invalid_param(
                "step_size",
                format!("{} must be positive", self.step_size),
            ));
        }
        for (name, value) in &floats[3..] {
            if *value < 0.0 {
                return Err(BasinError::invalid_param(
                    name,
                    format!("{value} must not be negative"),
                ));
            }
        }
        Ok(())
    }
}

/// Rule that ended a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    NearAttractorAtStart,
    NearAttractorDuringRun,
    Escaped,
    Exhausted,
}

/// Per-trajectory mutable state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationPoint {
    pub position: DVec2,
    pub velocity: DVec2,
}

impl SimulationPoint {
    pub fn at_rest(position: DVec2) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
        }
    }
}

/// Result of one trajectory.
///
/// For the two capture reasons `final_position` is the capturing attractor's
/// exact position, not the trajectory's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub final_position: DVec2,
    pub reason: TerminationReason,
    /// Completed integration steps. A capture ends mid-step, so that step
    /// is not counted.
    pub steps: usize,
}

/// What a single step decided.
enum Step {
    Continue,
    Captured(usize),
    Escaped,
}

/// Integrates trajectories against a shared attractor set.
///
/// Holds only shared references, so one integrator per render can be used
/// from every worker thread.
#[derive(Debug, Clone, Copy)]
pub struct Integrator<'a> {
    attractors: &'a AttractorSet,
    params: &'a SimulationParams,
}

impl<'a> Integrator<'a> {
    pub fn new(attractors: &'a AttractorSet, params: &'a SimulationParams) -> Self {
        Self { attractors, params }
    }

    pub fn attractors(&self) -> &'a AttractorSet {
        self.attractors
    }

    pub fn params(&self) -> &'a SimulationParams {
        self.params
    }

    /// Simulates a trajectory released at rest from `(x0, y0)`.
    pub fn simulate(&self, x0: f64, y0: f64) -> SimulationOutcome {
        let start = DVec2::new(x0, y0);
        if let Some(index) = self.start_capture(start) {
            return self.captured(index, TerminationReason::NearAttractorAtStart, 0);
        }

        let mut point = SimulationPoint::at_rest(start);
        for completed in 0..self.params.max_steps {
            match self.step(&mut point) {
                Step::Continue => {}
                Step::Captured(index) => {
                    return self.captured(
                        index,
                        TerminationReason::NearAttractorDuringRun,
                        completed,
                    );
                }
                Step::Escaped => {
                    return SimulationOutcome {
                        final_position: point.position,
                        reason: TerminationReason::Escaped,
                        steps: completed + 1,
                    };
                }
            }
        }

        SimulationOutcome {
            final_position: point.position,
            reason: TerminationReason::Exhausted,
            steps: self.params.max_steps,
        }
    }

    /// First attractor (not the nearest) within `start_radius` of `start`.
    fn start_capture(&self, start: DVec2) -> Option<usize> {
        self.attractors.iter().position(|a| {
            let dx = start.x - a.position.x;
            let dy = start.y - a.position.y;
            (dx * dx + dy * dy).sqrt() < self.params.start_radius
        })
    }

    fn step(&self, point: &mut SimulationPoint) -> Step {
        let p = self.params;
        for (index, a) in self.attractors.iter().enumerate() {
            // r = 0 would make the force NaN.
            if point.position == a.position {
                return Step::Captured(index);
            }
            point.velocity += force(point.position, a, p.gravity) * p.step_size;
            if (point.position.x - a.position.x).abs() < p.capture_radius
                && (point.position.y - a.position.y).abs() < p.capture_radius
            {
                return Step::Captured(index);
            }
        }

        point.velocity *= p.damping;
        point.position += point.velocity * p.step_size;

        let distance = point.position.length();
        let speed = point.velocity.length();
        if distance > p.escape_distance || speed < p.rest_speed {
            Step::Escaped
        } else {
            Step::Continue
        }
    }

    fn captured(&self, index: usize, reason: TerminationReason, steps: usize) -> SimulationOutcome {
        SimulationOutcome {
            final_position: self.attractors.as_slice()[index].position,
            reason,
            steps,
        }
    }
}
