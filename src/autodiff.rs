//! Sensitivities of the formula kernels using `num-dual`.
//!
//! The kernels in [`formulas`](crate::formulas) are generic over
//! [`Scalar`](crate::Scalar), so evaluating them on `Dual64` yields each
//! value together with its exact derivative. This answers the "what if"
//! questions the lessons pose: how much faster must the wing fly per extra
//! newton of weight, how fast is the ball rising at t = 2 s.
//!
//! # Example
//!
//! ```ignore
//! use physeval::autodiff::*;
//!
//! // Rate of change of dynamic pressure with speed: ρ·v
//! let dq_dv = dynamic_pressure_sensitivity(1.225, 25.0);
//! assert!((dq_dv - 30.625).abs() < 1e-12);
//! ```

use num_dual::*;

use crate::formulas;

/// Jacobian matrix of a vector function.
///
/// Entry (i, j) is ∂f_i/∂x_j.
pub struct Jacobian {
    /// Number of outputs (rows)
    pub n_outputs: usize,
    /// Number of inputs (columns)
    pub n_inputs: usize,
    /// Entries in row-major order
    pub entries: Vec<f64>,
}

impl Jacobian {
    pub fn zeros(n_outputs: usize, n_inputs: usize) -> Self {
        Jacobian { n_outputs, n_inputs, entries: vec![0.0; n_outputs * n_inputs] }
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.entries[i * self.n_inputs + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.entries[i * self.n_inputs + j] = value;
    }
}

/// Value and first derivative of `f` at `x`.
pub fn derivative<F>(f: F, x: f64) -> (f64, f64)
where
    F: Fn(Dual64) -> Dual64,
{
    let y = f(Dual64::from(x).derivative());
    (y.re, y.eps)
}

/// Jacobian of `f` at `x`, one forward pass per input.
pub fn compute_jacobian<F>(f: F, x: &[f64]) -> Jacobian
where
    F: Fn(&[Dual64]) -> Vec<Dual64>,
{
    let n_inputs = x.len();
    let mut columns = Vec::with_capacity(n_inputs);

    for j in 0..n_inputs {
        let mut x_dual: Vec<Dual64> = x.iter().map(|&v| Dual64::from(v)).collect();
        x_dual[j] = Dual64::from(x[j]).derivative();
        let outputs = f(&x_dual);
        columns.push(outputs.iter().map(|r| r.eps).collect::<Vec<f64>>());
    }

    let n_outputs = columns.first().map_or(0, Vec::len);
    let mut jac = Jacobian::zeros(n_outputs, n_inputs);
    for (j, column) in columns.iter().enumerate() {
        for (i, &d) in column.iter().enumerate() {
            jac.set(i, j, d);
        }
    }
    jac
}

/// ∂q/∂v of dynamic pressure q = ½ρv², i.e. ρ·v.
pub fn dynamic_pressure_sensitivity(density: f64, speed: f64) -> f64 {
    derivative(|v| formulas::dynamic_pressure(Dual64::from(density), v), speed).1
}

/// ∂V_stall/∂W: stall speed increase per newton of extra weight.
pub fn stall_speed_weight_sensitivity(
    weight: f64,
    wing_area: f64,
    density: f64,
    cl_max: f64,
) -> f64 {
    derivative(
        |w| {
            formulas::stall_speed(
                w,
                Dual64::from(wing_area),
                Dual64::from(density),
                Dual64::from(cl_max),
            )
        },
        weight,
    )
    .1
}

/// dh/dt of a vertical launch: the vertical velocity v0 − g·t.
pub fn trajectory_vertical_velocity(initial_velocity: f64, gravity: f64, t: f64) -> f64 {
    derivative(
        |t| formulas::projectile_height(Dual64::from(initial_velocity), Dual64::from(gravity), t),
        t,
    )
    .1
}

/// dN/dt of exponential decay: N0·k^t·ln k.
pub fn decay_rate(initial_value: f64, factor: f64, t: f64) -> f64 {
    derivative(|t| formulas::exponential_remaining(Dual64::from(initial_value), factor, t), t).1
}

/// Jacobian of the stall speed with respect to (W, S, ρ, CLmax).
pub fn stall_speed_jacobian(weight: f64, wing_area: f64, density: f64, cl_max: f64) -> Jacobian {
    compute_jacobian(
        |v| vec![formulas::stall_speed(v[0], v[1], v[2], v[3])],
        &[weight, wing_area, density, cl_max],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_derivative_of_square() {
        let (y, dy) = derivative(|x| x * x, 3.0);
        assert_eq!(y, 9.0);
        assert_eq!(dy, 6.0);
    }

    #[test]
    fn test_dynamic_pressure_sensitivity() {
        assert_relative_eq!(dynamic_pressure_sensitivity(1.225, 25.0), 30.625, epsilon = 1e-12);
    }

    #[test]
    fn test_vertical_velocity_matches_closed_form() {
        assert_relative_eq!(trajectory_vertical_velocity(192.0, 32.0, 6.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(trajectory_vertical_velocity(192.0, 32.0, 2.0), 128.0, epsilon = 1e-12);
    }

    #[test]
    fn test_stall_sensitivity_is_half_speed_over_weight() {
        // V ∝ √W, so dV/dW = V / 2W
        let v = formulas::stall_speed(50_000.0, 25.0, 1.225, 1.5);
        let dv = stall_speed_weight_sensitivity(50_000.0, 25.0, 1.225, 1.5);
        assert_relative_eq!(dv, v / 100_000.0, epsilon = 1e-12);
    }

    #[test]
    fn test_stall_jacobian_signs() {
        let jac = stall_speed_jacobian(50_000.0, 25.0, 1.225, 1.5);
        assert_eq!(jac.n_outputs, 1);
        assert_eq!(jac.n_inputs, 4);
        assert!(jac.get(0, 0) > 0.0);
        assert!(jac.get(0, 1) < 0.0);
        assert!(jac.get(0, 2) < 0.0);
        assert!(jac.get(0, 3) < 0.0);
    }

    #[test]
    fn test_decay_rate() {
        let rate = decay_rate(1000.0, 0.9, 10.0);
        assert_relative_eq!(rate, 1000.0 * 0.9_f64.powi(10) * 0.9_f64.ln(), epsilon = 1e-9);
    }
}
