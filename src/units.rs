//! Display unit conversions used by the aviation evaluators.
//!
//! Factors match the cockpit-instrument approximations the lessons quote
//! (1 m/s ≈ 1.944 kn, 1 m ≈ 3.281 ft), not the exact definitions.

/// Knots per metre per second.
pub const KNOTS_PER_MPS: f64 = 1.944;
/// Feet per metre.
pub const FEET_PER_METER: f64 = 3.281;
/// Hours per day.
pub const HOURS_PER_DAY: f64 = 24.0;

pub fn mps_to_knots(speed: f64) -> f64 {
    speed * KNOTS_PER_MPS
}

pub fn meters_to_feet(length: f64) -> f64 {
    length * FEET_PER_METER
}

pub fn hours_to_days(hours: f64) -> f64 {
    hours / HOURS_PER_DAY
}
