//! Bernoulli's principle for an incompressible fluid along a streamline.
//!
//! P + ½ρv² = P0: as the fluid speeds up, static pressure drops by exactly
//! the dynamic pressure it gains.

use serde::Serialize;

use crate::sampling::{self, Sample};
use crate::{formulas, guard, EvalResult};

/// Pressures of a fluid moving at a given speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BernoulliResult {
    /// Fluid speed (m/s)
    pub speed: f64,
    /// Fluid density (kg/m^3)
    pub density: f64,
    /// Static pressure P0 − ½ρv² (Pa). May be negative.
    pub static_pressure: f64,
    /// Dynamic pressure ½ρv² (Pa)
    pub dynamic_pressure: f64,
    /// Static + dynamic (Pa), equal to the baseline pressure
    pub total_pressure: f64,
}

impl BernoulliResult {
    /// True when the speed is high enough to push static pressure below zero.
    ///
    /// Physically this means the baseline was too low for the chosen speed;
    /// the value is reported, not rejected.
    pub fn is_negative_static_pressure(&self) -> bool {
        self.static_pressure < 0.0
    }
}

/// Evaluates Bernoulli's equation at one speed.
///
/// # Arguments
///
/// * `speed` - Fluid speed (m/s), zero or greater
/// * `density` - Fluid density (kg/m^3), greater than zero (air at sea level: 1.225)
/// * `baseline_pressure` - Pressure of the fluid at rest (Pa)
///
/// # Example
///
/// ```
/// use physeval::evaluators::evaluate_bernoulli;
///
/// let r = evaluate_bernoulli(25.0, 1.225, 1000.0)?;
/// assert!((r.dynamic_pressure - 382.8125).abs() < 1e-9);
/// assert!((r.static_pressure - 617.1875).abs() < 1e-9);
/// # Ok::<(), physeval::EvalError>(())
/// ```
pub fn evaluate_bernoulli(
    speed: f64,
    density: f64,
    baseline_pressure: f64,
) -> EvalResult<BernoulliResult> {
    let speed = guard::non_negative("speed", speed)?;
    let density = guard::positive("density", density)?;
    let baseline = guard::finite("baseline pressure", baseline_pressure)?;

    let dynamic_pressure = guard::finite_output(
        "speed",
        speed,
        formulas::dynamic_pressure(density, speed),
        "small enough for a finite dynamic pressure",
    )?;
    let static_pressure = guard::finite_output(
        "speed",
        speed,
        baseline - dynamic_pressure,
        "small enough for a finite static pressure",
    )?;

    let result = BernoulliResult {
        speed,
        density,
        static_pressure,
        dynamic_pressure,
        total_pressure: static_pressure + dynamic_pressure,
    };
    if result.is_negative_static_pressure() {
        log::warn!(
            "Static pressure {:.1} Pa is negative at v = {} m/s (baseline {} Pa)",
            static_pressure,
            speed,
            baseline
        );
    }
    Ok(result)
}

/// Samples static pressure against speed over `[0, max_speed]`.
///
/// This is the curve the speed/pressure lesson plots (0 to 50 m/s at 100
/// points in the original page).
pub fn pressure_curve(
    density: f64,
    baseline_pressure: f64,
    max_speed: f64,
    count: usize,
) -> EvalResult<Vec<Sample>> {
    let density = guard::positive("density", density)?;
    let baseline = guard::finite("baseline pressure", baseline_pressure)?;
    let max_speed = guard::non_negative("max speed", max_speed)?;

    sampling::sample_curve(0.0, max_speed, count, |v| {
        formulas::static_pressure(baseline, density, v)
    })
}

/// Speed needed to lower static pressure by `pressure_drop` pascals.
///
/// Inverse of the dynamic pressure relation: v = √(2ΔP/ρ).
pub fn speed_for_pressure_drop(pressure_drop: f64, density: f64) -> EvalResult<f64> {
    let drop = guard::non_negative("pressure drop", pressure_drop)?;
    let density = guard::positive("density", density)?;
    Ok(formulas::speed_from_dynamic_pressure(drop, density))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EvalError;
    use approx::assert_relative_eq;

    #[test]
    fn test_pressures_at_rest() {
        let r = evaluate_bernoulli(0.0, 1.225, 1000.0).unwrap();
        assert_eq!(r.dynamic_pressure, 0.0);
        assert_eq!(r.static_pressure, 1000.0);
        assert_eq!(r.total_pressure, 1000.0);
    }

    #[test]
    fn test_total_pressure_conserved() {
        let r = evaluate_bernoulli(37.5, 1.225, 101_325.0).unwrap();
        assert_relative_eq!(r.total_pressure, 101_325.0, epsilon = 1e-9);
        assert_relative_eq!(r.static_pressure + r.dynamic_pressure, 101_325.0, epsilon = 1e-9);
    }

    #[test]
    fn test_overflowing_speed_is_rejected() {
        let err = evaluate_bernoulli(1e200, 1.225, 1000.0).unwrap_err();
        assert!(matches!(err, EvalError::Domain { parameter: "speed", .. }));
    }

    #[test]
    fn test_negative_static_pressure_is_flagged_not_rejected() {
        // At 50 m/s the dynamic pressure is 1531.25 Pa, above a 1000 Pa baseline
        let r = evaluate_bernoulli(50.0, 1.225, 1000.0).unwrap();
        assert!(r.is_negative_static_pressure());
        assert_relative_eq!(r.static_pressure, -531.25, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_negative_speed() {
        let err = evaluate_bernoulli(-1.0, 1.225, 1000.0).unwrap_err();
        assert!(matches!(err, EvalError::Domain { parameter: "speed", .. }));
    }

    #[test]
    fn test_rejects_non_positive_density() {
        assert!(evaluate_bernoulli(10.0, 0.0, 1000.0).is_err());
        assert!(evaluate_bernoulli(10.0, -1.225, 1000.0).is_err());
    }

    #[test]
    fn test_pressure_curve_falls_with_speed() {
        let curve = pressure_curve(1.225, 1000.0, 50.0, 100).unwrap();
        assert_eq!(curve.len(), 100);
        assert_eq!(curve[0].y, 1000.0);
        assert_eq!(curve[99].x, 50.0);
        assert!(curve.windows(2).all(|w| w[1].y <= w[0].y));
    }

    #[test]
    fn test_speed_for_pressure_drop() {
        // 500 Pa drop in air: sqrt(1000 / 1.225) = 28.57 m/s
        let v = speed_for_pressure_drop(500.0, 1.225).unwrap();
        assert_relative_eq!(v, 28.571_428, epsilon = 1e-5);

        let r = evaluate_bernoulli(v, 1.225, 1000.0).unwrap();
        assert_relative_eq!(r.static_pressure, 500.0, epsilon = 1e-9);
    }
}
