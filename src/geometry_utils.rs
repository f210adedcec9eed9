use std::f64::consts::TAU;
use std::time::Duration;

use map_range::MapRange;
use nalgebra::Point2;

use crate::{landmarks::Landmark, Point2D};

pub fn distance_points(a: &Point2D, b: &Point2D) -> f32 {
    nalgebra::distance(&Point2::new(a.0, a.1), &Point2::new(b.0, b.1))
}

/// Distance between two landmarks on the image plane (z is ignored)
pub fn landmark_distance(a: &Landmark, b: &Landmark) -> f32 {
    distance_points(&a.xy(), &b.xy())
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1. - t) + (b * t)
}

/// Sine wave in [-1;1] with the given period, evaluated at `now`
pub fn oscillate(now: Duration, period: Duration) -> f32 {
    let phase = now.as_secs_f64() / period.as_secs_f64();
    (phase * TAU).sin() as f32
}

/// Like [`oscillate`], but remapped to the range [min;max]
pub fn oscillate_between(now: Duration, period: Duration, min: f32, max: f32) -> f32 {
    oscillate(now, period).map_range(-1. ..1., min..max)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_distance_ignores_depth() {
        let a = Landmark::new(0., 0., 0.);
        let b = Landmark::new(0.3, 0.4, 10.);
        assert_relative_eq!(landmark_distance(&a, &b), 0.5);
    }

    #[test]
    fn test_oscillation_period() {
        let period = Duration::from_millis(200);
        assert_relative_eq!(oscillate(Duration::ZERO, period), 0.);
        assert_relative_eq!(oscillate(Duration::from_millis(50), period), 1., epsilon = 1e-5);
        assert_relative_eq!(oscillate(Duration::from_millis(150), period), -1., epsilon = 1e-5);
        assert_relative_eq!(
            oscillate(Duration::from_millis(1234), period),
            oscillate(Duration::from_millis(1434), period),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_oscillate_between_stays_in_range() {
        let period = Duration::from_millis(150);
        for ms in 0..300 {
            let v = oscillate_between(Duration::from_millis(ms), period, 3., 6.);
            assert!((3. - 1e-4..=6. + 1e-4).contains(&v), "{} out of range", v);
        }
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(2., 4., 0.), 2.);
        assert_eq!(lerp(2., 4., 1.), 4.);
        assert_eq!(lerp(2., 4., 0.5), 3.);
    }
}
