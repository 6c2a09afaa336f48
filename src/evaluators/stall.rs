//! Stall speed and wing loading.

use serde::Serialize;

use crate::constants::{CRUISE_FACTOR, STANDARD_GRAVITY};
use crate::{formulas, guard, units, EvalResult};

/// Minimum flying speed of an aircraft and the quantities derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StallSpeed {
    /// Stall speed √(2W/(ρ·S·CLmax)) (m/s)
    pub stall_speed: f64,
    pub stall_speed_knots: f64,
    /// Stall speed times the cruise factor (m/s)
    pub cruise_speed: f64,
    pub cruise_speed_knots: f64,
    /// Weight per wing area W/S (N/m^2)
    pub wing_loading: f64,
    /// Wing loading in mass units W/(S·g) (kg/m^2)
    pub wing_loading_mass: f64,
}

/// Evaluates the stall speed with the default cruise factor (1.3) and
/// g = 9.81 for wing loading.
///
/// # Arguments
///
/// * `weight` - Aircraft weight (N)
/// * `wing_area` - Wing reference area (m^2), greater than zero
/// * `air_density` - Air density (kg/m^3), greater than zero
/// * `cl_max` - Maximum lift coefficient, greater than zero
///
/// # Example
///
/// ```
/// use physeval::evaluators::evaluate_stall_speed;
///
/// let s = evaluate_stall_speed(50_000.0, 25.0, 1.225, 1.5)?;
/// assert!((s.stall_speed - 46.657).abs() < 1e-3);
/// # Ok::<(), physeval::EvalError>(())
/// ```
pub fn evaluate_stall_speed(
    weight: f64,
    wing_area: f64,
    air_density: f64,
    cl_max: f64,
) -> EvalResult<StallSpeed> {
    evaluate_stall_speed_with(
        weight,
        wing_area,
        air_density,
        cl_max,
        CRUISE_FACTOR,
        STANDARD_GRAVITY,
    )
}

/// Like [`evaluate_stall_speed`] with an explicit cruise factor and gravity.
pub fn evaluate_stall_speed_with(
    weight: f64,
    wing_area: f64,
    air_density: f64,
    cl_max: f64,
    cruise_factor: f64,
    gravity: f64,
) -> EvalResult<StallSpeed> {
    let weight = guard::non_negative("weight", weight)?;
    let wing_area = guard::positive("wing area", wing_area)?;
    let air_density = guard::positive("air density", air_density)?;
    let cl_max = guard::positive("maximum lift coefficient", cl_max)?;
    let cruise_factor = guard::positive("cruise factor", cruise_factor)?;
    let gravity = guard::positive("gravity", gravity)?;

    let stall_speed = formulas::stall_speed(weight, wing_area, air_density, cl_max);
    let cruise_speed = stall_speed * cruise_factor;
    let wing_loading = weight / wing_area;

    Ok(StallSpeed {
        stall_speed,
        stall_speed_knots: units::mps_to_knots(stall_speed),
        cruise_speed,
        cruise_speed_knots: units::mps_to_knots(cruise_speed),
        wing_loading,
        wing_loading_mass: wing_loading / gravity,
    })
}
