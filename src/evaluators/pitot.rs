//! Pitot-tube airspeed measurement.
//!
//! A pitot tube senses total pressure facing the airflow and static pressure
//! on its side ports. Their difference is the dynamic pressure ½ρv², from
//! which the airspeed indicator derives speed.

use serde::Serialize;

use crate::atmosphere::Atmosphere;
use crate::{formulas, guard, units, EvalError, EvalResult};

/// Instrument readings at one airspeed and altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PitotReading {
    /// True airspeed (m/s)
    pub airspeed: f64,
    /// Airspeed (knots)
    pub airspeed_knots: f64,
    /// Altitude (m)
    pub altitude: f64,
    /// Altitude (ft)
    pub altitude_feet: f64,
    /// Air density at altitude (kg/m^3)
    pub density: f64,
    /// Static pressure at altitude (Pa)
    pub static_pressure: f64,
    /// Dynamic pressure ½ρv² (Pa)
    pub dynamic_pressure: f64,
    /// Static + dynamic (Pa)
    pub total_pressure: f64,
}

/// Evaluates pitot-tube pressures for an aircraft at `altitude` metres
/// flying at `airspeed` m/s.
///
/// # Example
///
/// ```
/// use physeval::{Atmosphere, evaluators::evaluate_pitot};
///
/// let reading = evaluate_pitot(100.0, 3000.0, &Atmosphere::standard())?;
/// assert!((reading.dynamic_pressure - 4285.49).abs() < 0.01);
/// assert!(reading.total_pressure > reading.static_pressure);
/// # Ok::<(), physeval::EvalError>(())
/// ```
pub fn evaluate_pitot(
    airspeed: f64,
    altitude: f64,
    atmosphere: &Atmosphere,
) -> EvalResult<PitotReading> {
    let airspeed = guard::non_negative("airspeed", airspeed)?;
    let density = atmosphere.density(altitude)?;
    let static_pressure = atmosphere.pressure(altitude)?;
    let dynamic_pressure = guard::finite_output(
        "airspeed",
        airspeed,
        formulas::dynamic_pressure(density, airspeed),
        "small enough for a finite dynamic pressure",
    )?;
    let total_pressure = guard::finite_output(
        "airspeed",
        airspeed,
        static_pressure + dynamic_pressure,
        "small enough for a finite total pressure",
    )?;

    Ok(PitotReading {
        airspeed,
        airspeed_knots: units::mps_to_knots(airspeed),
        altitude,
        altitude_feet: units::meters_to_feet(altitude),
        density,
        static_pressure,
        dynamic_pressure,
        total_pressure,
    })
}

/// Recovers airspeed from measured total and static pressure.
///
/// v = √(2(Pt − Ps)/ρ). Total pressure below static pressure is a sensor
/// fault and returns a domain error.
pub fn airspeed_from_pitot(
    total_pressure: f64,
    static_pressure: f64,
    density: f64,
) -> EvalResult<f64> {
    let total = guard::finite("total pressure", total_pressure)?;
    let stat = guard::finite("static pressure", static_pressure)?;
    let density = guard::positive("density", density)?;
    if total < stat {
        return Err(EvalError::domain(
            "total pressure",
            total,
            "at least the static pressure",
        ));
    }
    Ok(formulas::speed_from_dynamic_pressure(total - stat, density))
}
