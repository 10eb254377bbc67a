//! Angle and distance helpers shared by the simulation.

use glam::Vec2;

/// Two circles closer than this (edge to edge) count as touching.
pub const CONTACT_DISTANCE: f32 = 1.0;

/// Angle in radians of the direction pointing from `from` towards `to`.
///
/// Coincident points yield `0.0` (`atan2(0, 0)`), which is a valid direction.
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Velocity of magnitude `speed` along `angle`.
#[inline]
pub fn velocity_from_angle(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * speed
}

/// Velocity of magnitude `speed` aimed from `from` at `to`.
#[inline]
pub fn velocity_towards(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    velocity_from_angle(angle_between(from, to), speed)
}

/// Gap between the edges of two circles. Negative when they overlap.
#[inline]
pub fn edge_gap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> f32 {
    a.distance(b) - radius_a - radius_b
}

/// Whether two circles touch or overlap.
#[inline]
pub fn circles_touch(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    edge_gap(a, radius_a, b, radius_b) < CONTACT_DISTANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_angle_between_axes() {
        let origin = Vec2::new(100.0, 100.0);
        assert_eq!(angle_between(origin, Vec2::new(150.0, 100.0)), 0.0);
        assert!((angle_between(origin, Vec2::new(100.0, 150.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((angle_between(origin, Vec2::new(50.0, 100.0)) - PI).abs() < 1e-6);
    }

    #[test]
    fn test_angle_between_same_point_is_zero() {
        let p = Vec2::new(42.0, 7.0);
        assert_eq!(angle_between(p, p), 0.0);
    }

    #[test]
    fn test_velocity_towards_has_requested_speed() {
        let v = velocity_towards(Vec2::ZERO, Vec2::new(3.0, 4.0), 5.0);
        assert!((v.x - 3.0).abs() < 1e-5);
        assert!((v.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_circles_touch_threshold() {
        // Edge gap of exactly 1 is not contact, anything below is
        assert!(!circles_touch(Vec2::ZERO, 5.0, Vec2::new(16.0, 0.0), 10.0));
        assert!(circles_touch(Vec2::ZERO, 5.0, Vec2::new(15.5, 0.0), 10.0));
        assert!(circles_touch(Vec2::ZERO, 5.0, Vec2::new(1.0, 0.0), 10.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_velocity_magnitude_matches_speed(
                angle in -PI..PI,
                speed in 0.1f32..50.0
            ) {
                let v = velocity_from_angle(angle, speed);
                prop_assert!((v.length() - speed).abs() < 1e-3);
            }

            #[test]
            fn test_edge_gap_is_symmetric(
                ax in -500f32..500.0, ay in -500f32..500.0,
                bx in -500f32..500.0, by in -500f32..500.0,
                ra in 0.5f32..40.0, rb in 0.5f32..40.0
            ) {
                let a = Vec2::new(ax, ay);
                let b = Vec2::new(bx, by);
                prop_assert!((edge_gap(a, ra, b, rb) - edge_gap(b, rb, a, ra)).abs() < 1e-3);
            }
        }
    }
}
