//! Closed-form formula kernels.
//!
//! These are the bare equations, with no input validation, written once and
//! generic over [`Scalar`] so the evaluators (on `f64`) and the sensitivity
//! helpers (on dual numbers) share a single definition.

use crate::Scalar;

/// Dynamic pressure q = ½ρv².
pub fn dynamic_pressure<S: Scalar>(density: S, speed: S) -> S {
    S::constant(0.5) * density * speed * speed
}

/// Static pressure from Bernoulli: P = P0 − ½ρv².
pub fn static_pressure<S: Scalar>(baseline: S, density: S, speed: S) -> S {
    baseline - dynamic_pressure(density, speed)
}

/// Speed that produces dynamic pressure `q`: v = √(2q/ρ).
pub fn speed_from_dynamic_pressure<S: Scalar>(q: S, density: S) -> S {
    (S::constant(2.0) * q / density).sqrt()
}

/// Exponential atmosphere: ρ(h) = ρ0·e^(−h/H).
pub fn exponential_density<S: Scalar>(rho0: S, altitude: S, scale_height: f64) -> S {
    rho0 * (-altitude / S::constant(scale_height)).exp()
}

/// Barometric formula: P(h) = P0·(1 − L·h/T0)^n.
pub fn barometric_pressure<S: Scalar>(
    p0: S,
    altitude: S,
    lapse_rate: f64,
    t0: f64,
    exponent: f64,
) -> S {
    let base = S::constant(1.0) - S::constant(lapse_rate) * altitude / S::constant(t0);
    p0 * base.powf(exponent)
}

/// Stall speed: V = √(2W / (ρ·S·CLmax)).
pub fn stall_speed<S: Scalar>(weight: S, wing_area: S, density: S, cl_max: S) -> S {
    (S::constant(2.0) * weight / (density * wing_area * cl_max)).sqrt()
}

/// Height of a vertically launched projectile: h(t) = v0·t − ½g·t².
pub fn projectile_height<S: Scalar>(initial_velocity: S, gravity: S, t: S) -> S {
    initial_velocity * t - S::constant(0.5) * gravity * t * t
}

/// Remaining quantity after exponential decay: N(t) = N0·k^t.
///
/// Written as N0·e^(t·ln k) so it is differentiable in `t`.
pub fn exponential_remaining<S: Scalar>(initial: S, factor: f64, t: S) -> S {
    initial * (t * S::constant(factor.ln())).exp()
}

/// Travel time from distance and constant speed.
pub fn travel_time<S: Scalar>(distance: S, speed: S) -> S {
    distance / speed
}
