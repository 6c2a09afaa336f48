//! Rate × time = distance.

use serde::Serialize;

use crate::{formulas, guard, units, EvalResult};

/// Time needed to cover a distance at constant speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TravelTime {
    pub distance: f64,
    pub speed: f64,
    /// distance / speed, in the speed's time unit (hours for mph or km/h)
    pub time_hours: f64,
    /// time_hours / 24
    pub time_days: f64,
}

/// Evaluates travel time. `distance` and `speed` must share a length unit.
///
/// # Example
///
/// ```
/// use physeval::evaluators::evaluate_travel_time;
///
/// // Earth to Moon at 3500 mph
/// let trip = evaluate_travel_time(238_900.0, 3_500.0)?;
/// assert!((trip.time_hours - 68.257).abs() < 1e-3);
/// # Ok::<(), physeval::EvalError>(())
/// ```
pub fn evaluate_travel_time(distance: f64, speed: f64) -> EvalResult<TravelTime> {
    let distance = guard::non_negative("distance", distance)?;
    let speed = guard::positive("speed", speed)?;

    let time_hours = formulas::travel_time(distance, speed);
    Ok(TravelTime { distance, speed, time_hours, time_days: units::hours_to_days(time_hours) })
}
