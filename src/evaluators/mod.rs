//! Validated evaluators, one per lesson concept.
//!
//! This module provides the physics and math evaluators organized as
//! individual files:
//!
//! - **bernoulli**: static/dynamic/total pressure of a moving fluid
//! - **airfoil**: surface pressures and lift direction of a wing section
//! - **pitot**: pitot-tube readings at altitude
//! - **stall**: stall and cruise speed from weight, wing area and CLmax
//! - **projectile**: vertical-launch trajectory by vertex formulas
//! - **linear**: 2×2 elimination and general square systems
//! - **decay**: exponential decay and growth
//! - **travel**: rate-time-distance
//!
//! Every evaluator checks its inputs, returns an immutable result record and
//! never touches shared state, so all of them are safe to call from any
//! thread.

pub mod airfoil;
pub mod bernoulli;
pub mod decay;
pub mod linear;
pub mod pitot;
pub mod projectile;
pub mod stall;
pub mod travel;

pub use airfoil::{evaluate_airfoil_lift, AirfoilLift, LiftDirection};
pub use bernoulli::{evaluate_bernoulli, pressure_curve, speed_for_pressure_drop, BernoulliResult};
pub use decay::{
    decay_factor_from_percent_loss, evaluate_decay, evaluate_growth, DecayResult,
};
pub use linear::{solve_linear_system, solve_linear_system_2x2, LinearSystem2x2, Solution2x2};
pub use pitot::{airspeed_from_pitot, evaluate_pitot, PitotReading};
pub use projectile::{evaluate_trajectory, Trajectory};
pub use stall::{evaluate_stall_speed, evaluate_stall_speed_with, StallSpeed};
pub use travel::{evaluate_travel_time, TravelTime};
