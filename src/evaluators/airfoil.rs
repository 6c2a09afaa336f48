//! Surface pressures on a wing section.

use serde::Serialize;

use crate::{formulas, guard, EvalResult};

/// Net direction of the pressure force on the airfoil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LiftDirection {
    /// Lower surface pressure exceeds upper surface pressure
    Upward,
    /// Upper surface pressure exceeds lower surface pressure
    Downward,
    /// Equal pressures
    None,
}

/// Result of comparing flow over the two surfaces of a wing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirfoilLift {
    pub upper_speed: f64,
    pub lower_speed: f64,
    /// Static pressure on the upper surface (Pa)
    pub upper_pressure: f64,
    /// Static pressure on the lower surface (Pa)
    pub lower_pressure: f64,
    /// Lower minus upper (Pa); positive means upward lift
    pub pressure_difference: f64,
}

impl AirfoilLift {
    pub fn direction(&self) -> LiftDirection {
        if self.pressure_difference > 0.0 {
            LiftDirection::Upward
        } else if self.pressure_difference < 0.0 {
            LiftDirection::Downward
        } else {
            LiftDirection::None
        }
    }
}

/// Evaluates the pressure on each surface of an airfoil.
///
/// Each surface pressure is `ambient − ½ρv²` for that surface's flow speed.
/// The lesson's sliders run 50–150 m/s over the top and 30–120 m/s beneath,
/// with sea-level ambient pressure and density.
///
/// # Example
///
/// ```
/// use physeval::evaluators::{evaluate_airfoil_lift, LiftDirection};
///
/// let wing = evaluate_airfoil_lift(100.0, 80.0, 101_325.0, 1.225)?;
/// assert_eq!(wing.direction(), LiftDirection::Upward);
/// assert!((wing.pressure_difference - 2205.0).abs() < 1e-6);
/// # Ok::<(), physeval::EvalError>(())
/// ```
pub fn evaluate_airfoil_lift(
    upper_speed: f64,
    lower_speed: f64,
    ambient_pressure: f64,
    density: f64,
) -> EvalResult<AirfoilLift> {
    let upper_speed = guard::non_negative("upper surface speed", upper_speed)?;
    let lower_speed = guard::non_negative("lower surface speed", lower_speed)?;
    let ambient = guard::finite("ambient pressure", ambient_pressure)?;
    let density = guard::positive("density", density)?;

    let upper_pressure = surface_pressure("upper surface speed", ambient, density, upper_speed)?;
    let lower_pressure = surface_pressure("lower surface speed", ambient, density, lower_speed)?;

    Ok(AirfoilLift {
        upper_speed,
        lower_speed,
        upper_pressure,
        lower_pressure,
        pressure_difference: guard::finite_output(
            "ambient pressure",
            ambient,
            lower_pressure - upper_pressure,
            "small enough for a finite pressure difference",
        )?,
    })
}

fn surface_pressure(
    parameter: &'static str,
    ambient: f64,
    density: f64,
    speed: f64,
) -> EvalResult<f64> {
    let dynamic = guard::finite_output(
        parameter,
        speed,
        formulas::dynamic_pressure(density, speed),
        "small enough for a finite dynamic pressure",
    )?;
    guard::finite_output(parameter, speed, ambient - dynamic, "small enough for a finite pressure")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_faster_upper_surface_lifts() {
        let wing = evaluate_airfoil_lift(100.0, 80.0, 101_325.0, 1.225).unwrap();
        // 0.6125 * (100^2 - 80^2) = 2205
        assert_relative_eq!(wing.pressure_difference, 2205.0, epsilon = 1e-6);
        assert_relative_eq!(wing.upper_pressure, 95_200.0, epsilon = 1e-6);
        assert_eq!(wing.direction(), LiftDirection::Upward);
    }

    #[test]
    fn test_faster_lower_surface_pushes_down() {
        let wing = evaluate_airfoil_lift(60.0, 90.0, 101_325.0, 1.225).unwrap();
        assert!(wing.pressure_difference < 0.0);
        assert_eq!(wing.direction(), LiftDirection::Downward);
    }

    #[test]
    fn test_overflowing_surface_speed_is_rejected() {
        let err = evaluate_airfoil_lift(1e200, 1e200, 101_325.0, 1.225).unwrap_err();
        assert!(matches!(
            err,
            crate::EvalError::Domain { parameter: "upper surface speed", .. }
        ));
        let err = evaluate_airfoil_lift(10.0, 1e200, 101_325.0, 1.225).unwrap_err();
        assert!(matches!(
            err,
            crate::EvalError::Domain { parameter: "lower surface speed", .. }
        ));
    }

    #[test]
    fn test_equal_speeds_no_lift() {
        let wing = evaluate_airfoil_lift(70.0, 70.0, 101_325.0, 1.225).unwrap();
        assert_eq!(wing.pressure_difference, 0.0);
        assert_eq!(wing.direction(), LiftDirection::None);
    }

    #[test]
    fn test_rejects_negative_speed() {
        assert!(evaluate_airfoil_lift(-5.0, 80.0, 101_325.0, 1.225).is_err());
    }
}
