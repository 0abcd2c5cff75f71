//! Inverse-square attraction of one attractor on one point.

use crate::attractor::Attractor;
use glam::DVec2;

/// Gravitational constant used by the reference renders.
pub const DEFAULT_GRAVITY: f64 = 1.0;

/// Acceleration pulled on `point` by `attractor`.
///
/// `|f| = gravity * mass / r²`, directed from `point` toward the attractor.
/// The component form `magnitude * dx / r` is kept as written so results
/// are bit-identical across renders.
///
/// When `point` coincides with the attractor (`r == 0`) the result is NaN.
/// [`Integrator`](crate::integrator::Integrator) never calls it in that case.
pub fn force(point: DVec2, attractor: &Attractor, gravity: f64) -> DVec2 {
    let dx = attractor.position.x - point.x;
    let dy = attractor.position.y - point.y;
    let r = (dx * dx + dy * dy).sqrt();
    let magnitude = gravity * attractor.mass / (r * r);
    DVec2::new(magnitude * dx / r, magnitude * dy / r)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn force_points_toward_attractor() {
        let a = Attractor::new(2.0, 0.0, 1.0);
        let f = force(DVec2::ZERO, &a, DEFAULT_GRAVITY);
        assert!(f.x > 0.0);
        assert_eq!(f.y, 0.0);
    }

    #[test]
    fn force_follows_inverse_square() {
        let a = Attractor::new(0.0, 0.0, 1.0);
        let near = force(DVec2::new(1.0, 0.0), &a, DEFAULT_GRAVITY);
        let far = force(DVec2::new(2.0, 0.0), &a, DEFAULT_GRAVITY);
        assert!((near.x + 1.0).abs() < EPSILON);
        assert!((far.x + 0.25).abs() < EPSILON);
    }

    #[test]
    fn force_scales_with_mass_and_gravity() {
        let light = Attractor::new(0.0, 3.0, 1.0);
        let heavy = Attractor::new(0.0, 3.0, 1.2);
        let base = force(DVec2::ZERO, &light, 1.0);
        assert!((force(DVec2::ZERO, &heavy, 1.0).y - 1.2 * base.y).abs() < EPSILON);
        assert!((force(DVec2::ZERO, &light, 2.0).y - 2.0 * base.y).abs() < EPSILON);
    }

    #[test]
    fn diagonal_force_has_equal_components() {
        let a = Attractor::new(1.0, 1.0, 1.0);
        let f = force(DVec2::ZERO, &a, DEFAULT_GRAVITY);
        assert_eq!(f.x, f.y);
        // |f| = 1 / r² = 1/2.
        assert!((f.length() - 0.5).abs() < EPSILON);
    }

    #[test]
    fn coincident_point_yields_nan() {
        let a = Attractor::new(-1.0, 1.0, 1.0);
        let f = force(a.position, &a, DEFAULT_GRAVITY);
        assert!(f.x.is_nan() && f.y.is_nan());
    }
}
