//! # physeval: Closed-Form Physics Evaluators for Interactive Lessons
//!
//! A small library of pure functions that turn lesson parameters (a slider
//! value, a typed-in coefficient) into derived physical quantities and sample
//! curves ready for plotting. Every evaluator is stateless and validates its
//! inputs, so the presentation layer only has to decide how to display
//! results and typed errors.
//!
//! ## Example
//!
//! ```
//! use physeval::evaluators::{evaluate_bernoulli, evaluate_trajectory};
//!
//! // Air at sea level moving at 25 m/s against a 1000 Pa baseline
//! let fluid = evaluate_bernoulli(25.0, 1.225, 1000.0)?;
//! assert!((fluid.static_pressure + fluid.dynamic_pressure - 1000.0).abs() < 1e-9);
//!
//! // h(t) = -16t^2 + 192t
//! let flight = evaluate_trajectory(192.0, 32.0)?;
//! assert_eq!(flight.max_height, 576.0);
//! assert_eq!(flight.time_to_apex, 6.0);
//! # Ok::<(), physeval::EvalError>(())
//! ```
//!
//! Invalid parameters come back as errors rather than NaN:
//!
//! ```
//! use physeval::{EvalError, evaluators::solve_linear_system_2x2};
//!
//! let err = solve_linear_system_2x2(1.0, 2.0, 3.0, 2.0, 4.0, 6.0).unwrap_err();
//! assert!(matches!(err, EvalError::SingularSystem { .. }));
//! ```
//!
//! ## Scenario Dispatch
//!
//! Pages that let the learner pick a scenario from a menu go through
//! [`Scenario`] and [`Evaluator`], which resolve defaulted constants from
//! [`PhysicalConstants`] and return a flat [`Evaluation`] map:
//!
//! ```
//! use physeval::{Evaluator, Scenario};
//!
//! let evaluator = Evaluator::default();
//! let eval = evaluator.evaluate(&Scenario::TravelTime { distance: 238_900.0, speed: 3_500.0 })?;
//! assert!((eval.quantity("time_days").unwrap() - 2.844).abs() < 1e-3);
//! # Ok::<(), physeval::EvalError>(())
//! ```
//!
//! ## Optional Features
//!
//! - **`autodiff`**: forward-mode sensitivities of the formula kernels using `num-dual`
//!
//! ```toml
//! [dependencies]
//! physeval = { version = "0.1", features = ["autodiff"] }
//! ```

use std::ops::{Add, Div, Mul, Neg, Sub};

// Core modules
pub mod atmosphere;
pub mod constants;
pub mod evaluators;
pub mod feedback;
pub mod formulas;
pub mod quiz;
pub mod sampling;
pub mod scenario;
pub mod units;

// Optional feature modules
#[cfg(feature = "autodiff")]
pub mod autodiff;

pub use atmosphere::Atmosphere;
pub use constants::PhysicalConstants;
pub use sampling::Sample;
pub use scenario::{Evaluation, Evaluator, Flag, Scenario, ScenarioKind};

/// Result type for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// Parameter outside its mathematically valid domain
    #[error("Invalid {parameter} = {value}: must be {requirement}")]
    Domain { parameter: &'static str, value: f64, requirement: &'static str },
    /// Linear system has no unique solution
    #[error("Singular system (determinant {determinant:e}): no unique solution")]
    SingularSystem { determinant: f64 },
    /// Quiz answer index outside the option list
    #[error("Answer index {index} out of range for {options} options")]
    InvalidAnswer { index: usize, options: usize },
    /// Constants could not be loaded or failed validation
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EvalError {
    pub(crate) fn domain(parameter: &'static str, value: f64, requirement: &'static str) -> Self {
        EvalError::Domain { parameter, value, requirement }
    }
}

/// Input guards shared by the evaluators.
///
/// Each guard also rejects NaN and infinities, which would otherwise slip
/// through the comparisons and surface as NaN results.
pub(crate) mod guard {
    use super::{EvalError, EvalResult};

    pub fn finite(parameter: &'static str, value: f64) -> EvalResult<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::domain(parameter, value, "a finite number"))
        }
    }

    pub fn positive(parameter: &'static str, value: f64) -> EvalResult<f64> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(EvalError::domain(parameter, value, "greater than zero"))
        }
    }

    pub fn non_negative(parameter: &'static str, value: f64) -> EvalResult<f64> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(EvalError::domain(parameter, value, "zero or greater"))
        }
    }

    pub fn sample_count(count: usize) -> EvalResult<usize> {
        if (2..=crate::constants::MAX_SAMPLE_COUNT).contains(&count) {
            Ok(count)
        } else {
            Err(EvalError::domain("sample count", count as f64, "between 2 and 10000"))
        }
    }

    /// Passes `output` through if finite, otherwise blames the input that
    /// drove it out of range.
    pub fn finite_output(
        parameter: &'static str,
        input: f64,
        output: f64,
        requirement: &'static str,
    ) -> EvalResult<f64> {
        if output.is_finite() {
            Ok(output)
        } else {
            Err(EvalError::domain(parameter, input, requirement))
        }
    }
}

/// Numeric type the formula kernels are generic over.
///
/// Implemented for `f64`, and for `num_dual::Dual64` when the `autodiff`
/// feature is enabled so the same kernel yields a value and its derivative.
pub trait Scalar:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Lifts a plain constant into the scalar type.
    fn constant(value: f64) -> Self;
    /// Real part (the value itself for `f64`).
    fn value(self) -> f64;
    fn sqrt(self) -> Self;
    fn exp(self) -> Self;
    fn powf(self, n: f64) -> Self;
}

impl Scalar for f64 {
    fn constant(value: f64) -> Self {
        value
    }

    fn value(self) -> f64 {
        self
    }

    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn exp(self) -> Self {
        f64::exp(self)
    }

    fn powf(self, n: f64) -> Self {
        f64::powf(self, n)
    }
}

#[cfg(feature = "autodiff")]
impl Scalar for num_dual::Dual64 {
    fn constant(value: f64) -> Self {
        num_dual::Dual64::from(value)
    }

    fn value(self) -> f64 {
        self.re
    }

    fn sqrt(self) -> Self {
        <Self as num_dual::DualNum<f64>>::sqrt(&self)
    }

    fn exp(self) -> Self {
        <Self as num_dual::DualNum<f64>>::exp(&self)
    }

    fn powf(self, n: f64) -> Self {
        <Self as num_dual::DualNum<f64>>::powf(&self, n)
    }
}
