//! Curve sampling for charting.
//!
//! Every evaluator that has a natural curve (pressure vs. speed, height vs.
//! time, remaining mass vs. time) exposes it as an ordered `Vec<Sample>`
//! built here.

use serde::{Deserialize, Serialize};

use crate::{guard, EvalResult};

/// One (x, y) point of a sampled curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Sample { x, y }
    }
}

/// Returns `count` evenly spaced values over `[start, end]`, both ends included.
///
/// The last value is exactly `end` regardless of rounding in the step.
pub fn linspace(start: f64, end: f64, count: usize) -> EvalResult<Vec<f64>> {
    let count = guard::sample_count(count)?;
    guard::finite("range start", start)?;
    guard::finite("range end", end)?;

    let step = (end - start) / (count - 1) as f64;
    let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
    values[count - 1] = end;
    Ok(values)
}

/// Samples `f` at `count` evenly spaced points over `[start, end]`.
pub fn sample_curve<F>(start: f64, end: f64, count: usize, f: F) -> EvalResult<Vec<Sample>>
where
    F: Fn(f64) -> f64,
{
    Ok(linspace(start, end, count)?.into_iter().map(|x| Sample::new(x, f(x))).collect())
}
