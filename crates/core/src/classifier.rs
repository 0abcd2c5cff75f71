//! Maps a trajectory outcome to the label its pixel is drawn with.

use crate::attractor::{AttractorSet, ATTRACTOR_COUNT};
use crate::integrator::{SimulationOutcome, SimulationParams, TerminationReason};
use serde::{Deserialize, Serialize};

/// Per-pixel classification: one label per attractor plus the two
/// non-attractor outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelLabel {
    #[default]
    Attractor0,
    Attractor1,
    Attractor2,
    Attractor3,
    StableOrbit,
    FarAway,
}

/// Number of distinct labels.
pub const LABEL_COUNT: usize = ATTRACTOR_COUNT + 2;

impl PixelLabel {
    /// Every label, ordered by [`index`](Self::index).
    pub const ALL: [PixelLabel; LABEL_COUNT] = [
        PixelLabel::Attractor0,
        PixelLabel::Attractor1,
        PixelLabel::Attractor2,
        PixelLabel::Attractor3,
        PixelLabel::StableOrbit,
        PixelLabel::FarAway,
    ];

    /// Position in [`ALL`](Self::ALL): attractors 0..=3, then stable orbit
    /// (4) and far away (5).
    pub fn index(self) -> usize {
        match self {
            PixelLabel::Attractor0 => 0,
            PixelLabel::Attractor1 => 1,
            PixelLabel::Attractor2 => 2,
            PixelLabel::Attractor3 => 3,
            PixelLabel::StableOrbit => 4,
            PixelLabel::FarAway => 5,
        }
    }

    /// Attractor index for the four attractor labels.
    pub fn attractor_index(self) -> Option<usize> {
        (self.index() < ATTRACTOR_COUNT).then(|| self.index())
    }

    pub fn name(self) -> &'static str {
        match self {
            PixelLabel::Attractor0 => "attractor_0",
            PixelLabel::Attractor1 => "attractor_1",
            PixelLabel::Attractor2 => "attractor_2",
            PixelLabel::Attractor3 => "attractor_3",
            PixelLabel::StableOrbit => "stable_orbit",
            PixelLabel::FarAway => "far_away",
        }
    }
}

/// Labels an outcome.
///
/// - Captures (at start or mid-run) take the nearest attractor's label; the
///   final position is that attractor's, so the search is exact.
/// - `Exhausted` is always `StableOrbit`, wherever the trajectory ended.
/// - `Escaped` is `FarAway` when the squared distance to the nearest
///   attractor exceeds `params.far_away_distance_sq`, otherwise the nearest
///   attractor's label.
///
/// Ties go to the lowest attractor index.
pub fn classify(
    outcome: &SimulationOutcome,
    attractors: &AttractorSet,
    params: &SimulationParams,
) -> PixelLabel {
    let (nearest, distance_sq) = attractors.nearest(outcome.final_position);
    let nearest_label = PixelLabel::ALL[nearest];
    match outcome.reason {
        TerminationReason::NearAttractorAtStart | TerminationReason::NearAttractorDuringRun => {
            nearest_label
        }
        TerminationReason::Exhausted => PixelLabel::StableOrbit,
        TerminationReason::Escaped if distance_sq > params.far_away_distance_sq => {
            PixelLabel::FarAway
        }
        TerminationReason::Escaped => nearest_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrator::Integrator;
    use glam::DVec2;

    fn outcome(x: f64, y: f64, reason: TerminationReason) -> SimulationOutcome {
        SimulationOutcome {
            final_position: DVec2::new(x, y),
            reason,
            steps: 0,
        }
    }

    fn label(x: f64, y: f64, reason: TerminationReason) -> PixelLabel {
        classify(
            &outcome(x, y, reason),
            &AttractorSet::unperturbed(),
            &SimulationParams::default(),
        )
    }

    #[test]
    fn captures_take_the_attractor_label() {
        assert_eq!(
            label(1.0, -1.0, TerminationReason::NearAttractorAtStart),
            PixelLabel::Attractor1
        );
        assert_eq!(
            label(-1.0, 1.0, TerminationReason::NearAttractorDuringRun),
            PixelLabel::Attractor2
        );
    }

    #[test]
    fn exhausted_is_stable_orbit_wherever_it_ends() {
        assert_eq!(label(1.0, 1.0, TerminationReason::Exhausted), PixelLabel::StableOrbit);
        assert_eq!(
            label(10_000.0, 10_000.0, TerminationReason::Exhausted),
            PixelLabel::StableOrbit
        );
    }

    #[test]
    fn escaped_far_from_everything_is_far_away() {
        assert_eq!(
            label(10_000.0, 10_000.0, TerminationReason::Escaped),
            PixelLabel::FarAway
        );
    }

    #[test]
    fn escaped_within_threshold_takes_nearest_label() {
        assert_eq!(label(0.8, 1.3, TerminationReason::Escaped), PixelLabel::Attractor3);
        // Squared distance to (1, 1) is 1764: still below the threshold.
        assert_eq!(label(43.0, 1.0, TerminationReason::Escaped), PixelLabel::Attractor3);
    }

    #[test]
    fn far_away_threshold_is_strictly_greater() {
        let set = AttractorSet::unperturbed();
        let params = SimulationParams {
            far_away_distance_sq: 4.0,
            ..SimulationParams::default()
        };
        // Exactly 4.0 from (1, 1).
        let at = outcome(3.0, 1.0, TerminationReason::Escaped);
        assert_eq!(classify(&at, &set, &params), PixelLabel::Attractor3);
        let past = outcome(3.5, 1.0, TerminationReason::Escaped);
        assert_eq!(classify(&past, &set, &params), PixelLabel::FarAway);
    }

    #[test]
    fn equidistant_point_takes_first_attractor() {
        assert_eq!(label(0.0, 0.0, TerminationReason::Escaped), PixelLabel::Attractor0);
        assert_eq!(label(1.0, 0.0, TerminationReason::Escaped), PixelLabel::Attractor1);
    }

    #[test]
    fn nan_position_is_far_away() {
        assert_eq!(label(f64::NAN, f64::NAN, TerminationReason::Escaped), PixelLabel::FarAway);
    }

    #[test]
    fn label_indices_match_all_order() {
        for (i, l) in PixelLabel::ALL.iter().enumerate() {
            assert_eq!(l.index(), i);
        }
        assert_eq!(PixelLabel::StableOrbit.attractor_index(), None);
        assert_eq!(PixelLabel::Attractor3.attractor_index(), Some(3));
    }

    // ---- Through the integrator ----

    #[test]
    fn unperturbed_corner_start_is_attractor_zero() {
        let set = AttractorSet::unperturbed();
        let params = SimulationParams::default();
        let out = Integrator::new(&set, &params).simulate(-1.0, -1.0);
        assert_eq!(out.reason, TerminationReason::NearAttractorAtStart);
        assert_eq!(classify(&out, &set, &params), PixelLabel::Attractor0);
    }

    #[test]
    fn unperturbed_origin_rests_and_ties_to_attractor_zero() {
        let set = AttractorSet::unperturbed();
        let params = SimulationParams::default();
        let out = Integrator::new(&set, &params).simulate(0.0, 0.0);
        assert_eq!(out.reason, TerminationReason::Escaped);
        assert_eq!(classify(&out, &set, &params), PixelLabel::Attractor0);
    }

    #[test]
    fn small_budget_run_is_stable_orbit() {
        let set = AttractorSet::unperturbed();
        let params = SimulationParams {
            max_steps: 1,
            ..SimulationParams::default()
        };
        let out = Integrator::new(&set, &params).simulate(0.5, 0.0);
        assert_eq!(out.reason, TerminationReason::Exhausted);
        assert_eq!(classify(&out, &set, &params), PixelLabel::StableOrbit);
    }

    #[test]
    fn distant_start_is_far_away() {
        let set = AttractorSet::from_seed(11, 0.2);
        let params = SimulationParams::default();
        let out = Integrator::new(&set, &params).simulate(2500.0, -2500.0);
        assert_eq!(classify(&out, &set, &params), PixelLabel::FarAway);
    }
}
