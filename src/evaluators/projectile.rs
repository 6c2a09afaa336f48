//! Vertical projectile motion.
//!
//! h(t) = −½g·t² + v0·t is a downward parabola. Its vertex gives the apex
//! (t = v0/g, h = v0²/2g) and its second root the landing time (2v0/g). The
//! lessons also write it in textbook form h = a·t² + b·t, e.g. the
//! foot-pound model h = −16t² + 192t.

use serde::Serialize;

use crate::sampling::{self, Sample};
use crate::{guard, EvalError, EvalResult};

/// Closed-form description of a vertical launch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trajectory {
    pub initial_velocity: f64,
    pub gravity: f64,
    /// v0 / g
    pub time_to_apex: f64,
    /// v0² / 2g
    pub max_height: f64,
    /// 2·v0 / g
    pub time_of_flight: f64,
}

impl Trajectory {
    /// Builds the trajectory for the textbook quadratic h = a·t² + b·t.
    ///
    /// `a` is −½g and must be negative; `b` is the launch speed and must be
    /// positive.
    pub fn from_quadratic(a: f64, b: f64) -> EvalResult<Trajectory> {
        let a = guard::finite("quadratic coefficient", a)?;
        if a >= 0.0 {
            return Err(EvalError::domain("quadratic coefficient", a, "less than zero"));
        }
        evaluate_trajectory(b, -2.0 * a)
    }

    /// Height at time `t`.
    ///
    /// Evaluated in root form ½g·t·(T − t) so both h(0) and h(T) are exactly
    /// zero. Outside `[0, T]` the result is negative (below the launch point).
    pub fn height_at(&self, t: f64) -> f64 {
        0.5 * self.gravity * t * (self.time_of_flight - t)
    }

    /// Vertical velocity at time `t`: v0 − g·t.
    pub fn velocity_at(&self, t: f64) -> f64 {
        self.initial_velocity - self.gravity * t
    }

    /// Samples height over the whole flight, launch to landing.
    pub fn samples(&self, count: usize) -> EvalResult<Vec<Sample>> {
        sampling::sample_curve(0.0, self.time_of_flight, count, |t| self.height_at(t))
    }
}

/// Evaluates a vertical launch at `initial_velocity` under `gravity`
/// (9.8 m/s² on the metric pages, 32 ft/s² on the imperial ones).
///
/// # Example
///
/// ```
/// use physeval::evaluators::evaluate_trajectory;
///
/// let flight = evaluate_trajectory(192.0, 32.0)?;
/// assert_eq!(flight.time_to_apex, 6.0);
/// assert_eq!(flight.max_height, 576.0);
/// assert_eq!(flight.time_of_flight, 12.0);
/// # Ok::<(), physeval::EvalError>(())
/// ```
pub fn evaluate_trajectory(initial_velocity: f64, gravity: f64) -> EvalResult<Trajectory> {
    let v0 = guard::positive("initial velocity", initial_velocity)?;
    let g = guard::positive("gravity", gravity)?;

    Ok(Trajectory {
        initial_velocity: v0,
        gravity: g,
        time_to_apex: v0 / g,
        max_height: v0 * v0 / (2.0 * g),
        time_of_flight: 2.0 * v0 / g,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_foot_pound_vertex_exact() {
        let flight = evaluate_trajectory(192.0, 32.0).unwrap();
        assert_eq!(flight.max_height, 576.0);
        assert_eq!(flight.time_to_apex, 6.0);
        assert_eq!(flight.height_at(6.0), 576.0);
    }

    #[test]
    fn test_from_quadratic_matches_direct() {
        let flight = Trajectory::from_quadratic(-16.0, 192.0).unwrap();
        assert_eq!(flight, evaluate_trajectory(192.0, 32.0).unwrap());
    }

    #[test]
    fn test_from_quadratic_rejects_upward_parabola() {
        assert!(Trajectory::from_quadratic(16.0, 192.0).is_err());
        assert!(Trajectory::from_quadratic(0.0, 192.0).is_err());
        assert!(Trajectory::from_quadratic(-16.0, 0.0).is_err());
    }

    #[test]
    fn test_lands_at_zero_height() {
        let flight = evaluate_trajectory(50.0, 9.8).unwrap();
        assert_eq!(flight.height_at(0.0), 0.0);
        assert_eq!(flight.height_at(flight.time_of_flight), 0.0);
    }

    #[test]
    fn test_symmetric_about_apex() {
        let flight = evaluate_trajectory(50.0, 9.8).unwrap();
        for dt in [0.1, 1.0, 2.5, flight.time_to_apex] {
            assert_relative_eq!(
                flight.height_at(flight.time_to_apex - dt),
                flight.height_at(flight.time_to_apex + dt),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_velocity_zero_at_apex() {
        let flight = evaluate_trajectory(192.0, 32.0).unwrap();
        assert_eq!(flight.velocity_at(flight.time_to_apex), 0.0);
        assert_eq!(flight.velocity_at(flight.time_of_flight), -192.0);
    }

    #[test]
    fn test_samples_cover_flight() {
        let flight = evaluate_trajectory(50.0, 9.8).unwrap();
        let samples = flight.samples(200).unwrap();
        assert_eq!(samples.len(), 200);
        assert_eq!(samples[0], Sample::new(0.0, 0.0));
        assert_eq!(samples[199].x, flight.time_of_flight);
        assert_eq!(samples[199].y, 0.0);
        let peak = samples.iter().map(|s| s.y).fold(f64::MIN, f64::max);
        assert!(peak <= flight.max_height + 1e-9);
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        assert!(evaluate_trajectory(0.0, 9.8).is_err());
        assert!(evaluate_trajectory(50.0, 0.0).is_err());
        assert!(evaluate_trajectory(50.0, -9.8).is_err());
    }
}
