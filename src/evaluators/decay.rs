//! Exponential decay and growth.
//!
//! N(t) = N0·k^t, where the per-period factor k is the fraction retained
//! each period. A rocket burning 10% of its remaining fuel every second has
//! k = 0.9 and, starting from 1000 kg, holds 1000·0.9^t kg after t seconds.

use serde::Serialize;

use crate::sampling::{self, Sample};
use crate::{formulas, guard, EvalError, EvalResult};

/// Remaining quantity after `elapsed_time` periods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecayResult {
    pub initial_value: f64,
    /// Per-period retention factor
    pub factor: f64,
    pub elapsed_time: f64,
    /// N0·k^t
    pub remaining_value: f64,
}

impl DecayResult {
    /// Periods for the quantity to halve (or, for growth, `None`).
    pub fn half_life(&self) -> Option<f64> {
        if self.factor < 1.0 {
            Some(0.5_f64.ln() / self.factor.ln())
        } else {
            None
        }
    }

    /// Quantity at an arbitrary time under the same initial value and factor.
    pub fn value_at(&self, t: f64) -> f64 {
        // 0·k^t is zero even where k^t overflows
        if self.initial_value == 0.0 {
            return 0.0;
        }
        formulas::exponential_remaining(self.initial_value, self.factor, t)
    }

    /// Samples the curve from t = 0 to the elapsed time.
    pub fn samples(&self, count: usize) -> EvalResult<Vec<Sample>> {
        sampling::sample_curve(0.0, self.elapsed_time, count, |t| self.value_at(t))
    }
}

/// Evaluates exponential decay with a retention factor strictly between 0
/// and 1.
///
/// # Example
///
/// ```
/// use physeval::evaluators::evaluate_decay;
///
/// let fuel = evaluate_decay(1000.0, 0.9, 10.0)?;
/// assert!((fuel.remaining_value - 348.68).abs() < 0.01);
/// # Ok::<(), physeval::EvalError>(())
/// ```
pub fn evaluate_decay(
    initial_value: f64,
    factor: f64,
    elapsed_time: f64,
) -> EvalResult<DecayResult> {
    let factor = guard::finite("decay factor", factor)?;
    if !(factor > 0.0 && factor < 1.0) {
        return Err(EvalError::domain("decay factor", factor, "strictly between 0 and 1"));
    }
    evaluate_exponential(initial_value, factor, elapsed_time)
}

/// Evaluates exponential change with any positive factor; factors above 1
/// model growth.
pub fn evaluate_growth(
    initial_value: f64,
    factor: f64,
    elapsed_time: f64,
) -> EvalResult<DecayResult> {
    let factor = guard::positive("growth factor", factor)?;
    evaluate_exponential(initial_value, factor, elapsed_time)
}

fn evaluate_exponential(
    initial_value: f64,
    factor: f64,
    elapsed_time: f64,
) -> EvalResult<DecayResult> {
    let initial_value = guard::non_negative("initial value", initial_value)?;
    let elapsed_time = guard::non_negative("elapsed time", elapsed_time)?;

    let mut result = DecayResult { initial_value, factor, elapsed_time, remaining_value: 0.0 };
    result.remaining_value = guard::finite_output(
        "elapsed time",
        elapsed_time,
        result.value_at(elapsed_time),
        "short enough for a finite remaining value",
    )?;
    Ok(result)
}

/// Converts "loses `percent`% per period" into a retention factor.
///
/// 10% lost per second gives 0.9.
pub fn decay_factor_from_percent_loss(percent: f64) -> EvalResult<f64> {
    let percent = guard::finite("percent loss", percent)?;
    if !(percent > 0.0 && percent < 100.0) {
        return Err(EvalError::domain("percent loss", percent, "strictly between 0 and 100"));
    }
    Ok(1.0 - percent / 100.0)
}
