#![deny(unsafe_code)]
//! Core simulation for the gravity-basin fractal.
//!
//! Every pixel of a basin fractal is a point mass released at rest and pulled
//! toward four fixed attractors. [`Integrator`] follows the damped trajectory
//! until it is captured, escapes, comes to rest, or runs out of steps, and
//! [`classify`] turns that outcome into a [`PixelLabel`].
//!
//! Also provides the [`PlaneSampler`] pixel mapping, the [`Sink`] seam with
//! its in-memory [`LabelGrid`], label palettes, the seedable [`Xorshift64`]
//! PRNG and the reproducible [`Seed`] recipe.

pub mod attractor;
pub mod classifier;
pub mod color;
pub mod error;
pub mod force;
pub mod integrator;
pub mod palette;
pub mod params;
pub mod prng;
pub mod sampler;
pub mod seed;
pub mod sink;

pub use attractor::{Attractor, AttractorSet, ATTRACTOR_COUNT};
pub use classifier::{classify, PixelLabel, LABEL_COUNT};
pub use color::Srgb;
pub use error::BasinError;
pub use force::force;
pub use integrator::{Integrator, SimulationOutcome, SimulationParams, TerminationReason};
pub use palette::LabelPalette;
pub use prng::Xorshift64;
pub use sampler::{PlaneSample, PlaneSampler};
pub use seed::Seed;
pub use sink::{LabelGrid, Sink};
