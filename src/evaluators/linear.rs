//! Linear systems.
//!
//! The 2×2 solver follows the hand elimination the algebra lesson teaches:
//! scale one equation so a variable cancels, solve for the other, back
//! substitute. Written out, that is Cramer's rule:
//!
//! ```text
//! a1·x + b1·y = c1        det = a1·b2 − a2·b1
//! a2·x + b2·y = c2        x   = (c1·b2 − c2·b1) / det
//!                         y   = (a1·c2 − a2·c1) / det
//! ```
//!
//! Larger square systems go through an LU factorization from `nalgebra`.

use nalgebra::{DMatrix, DVector, Matrix2, Vector2};
use serde::Serialize;

use crate::constants::SINGULAR_TOLERANCE;
use crate::{guard, EvalError, EvalResult};

/// Coefficients of a pair of linear equations in x and y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearSystem2x2 {
    pub a1: f64,
    pub b1: f64,
    pub c1: f64,
    pub a2: f64,
    pub b2: f64,
    pub c2: f64,
}

/// Unique solution of a 2×2 system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Solution2x2 {
    pub x: f64,
    pub y: f64,
    /// a1·b2 − a2·b1
    pub determinant: f64,
}

impl LinearSystem2x2 {
    pub fn new(a1: f64, b1: f64, c1: f64, a2: f64, b2: f64, c2: f64) -> Self {
        LinearSystem2x2 { a1, b1, c1, a2, b2, c2 }
    }

    /// a1·b2 − a2·b1
    pub fn determinant(&self) -> f64 {
        self.a1 * self.b2 - self.a2 * self.b1
    }

    /// Coefficient matrix [[a1, b1], [a2, b2]].
    pub fn matrix(&self) -> Matrix2<f64> {
        Matrix2::new(self.a1, self.b1, self.a2, self.b2)
    }

    /// Right-hand side [c1, c2].
    pub fn rhs(&self) -> Vector2<f64> {
        Vector2::new(self.c1, self.c2)
    }

    /// Solves by elimination, treating |det| < `tolerance` as singular.
    pub fn solve(&self, tolerance: f64) -> EvalResult<Solution2x2> {
        for (name, value) in [
            ("a1", self.a1),
            ("b1", self.b1),
            ("c1", self.c1),
            ("a2", self.a2),
            ("b2", self.b2),
            ("c2", self.c2),
        ] {
            guard::finite(name, value)?;
        }
        let tolerance = guard::non_negative("tolerance", tolerance)?;

        let det = self.determinant();
        if det.abs() < tolerance || det == 0.0 {
            log::debug!("Singular 2x2 system {:?} (det = {:e})", self, det);
            return Err(EvalError::SingularSystem { determinant: det });
        }

        Ok(Solution2x2 {
            x: (self.c1 * self.b2 - self.c2 * self.b1) / det,
            y: (self.a1 * self.c2 - self.a2 * self.c1) / det,
            determinant: det,
        })
    }

    /// Residual A·[x, y] − c of a candidate solution.
    ///
    /// Both components are zero (up to rounding) when the candidate satisfies
    /// the system.
    pub fn residual(&self, x: f64, y: f64) -> Vector2<f64> {
        self.matrix() * Vector2::new(x, y) - self.rhs()
    }
}

/// Solves the system with the default singular tolerance (1e-9).
///
/// # Example
///
/// ```
/// use physeval::evaluators::solve_linear_system_2x2;
///
/// // 3x + 2y = 12, 5x − y = 7
/// let s = solve_linear_system_2x2(3.0, 2.0, 12.0, 5.0, -1.0, 7.0)?;
/// assert_eq!((s.x, s.y), (2.0, 3.0));
/// # Ok::<(), physeval::EvalError>(())
/// ```
pub fn solve_linear_system_2x2(
    a1: f64,
    b1: f64,
    c1: f64,
    a2: f64,
    b2: f64,
    c2: f64,
) -> EvalResult<Solution2x2> {
    LinearSystem2x2::new(a1, b1, c1, a2, b2, c2).solve(SINGULAR_TOLERANCE)
}

/// Solves a square system A·x = b by LU decomposition.
///
/// Returns `SingularSystem` when A is not square-invertible, i.e. the
/// determinant magnitude is below `tolerance` or the factorization cannot
/// back-substitute.
pub fn solve_linear_system(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    tolerance: f64,
) -> EvalResult<DVector<f64>> {
    if !a.is_square() {
        return Err(EvalError::domain("matrix rows", a.nrows() as f64, "equal to the column count"));
    }
    if b.len() != a.nrows() {
        return Err(EvalError::domain(
            "right-hand side length",
            b.len() as f64,
            "equal to the row count",
        ));
    }
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return Err(EvalError::domain("coefficient", f64::NAN, "a finite number"));
    }
    let tolerance = guard::non_negative("tolerance", tolerance)?;

    let lu = a.clone().lu();
    let det = lu.determinant();
    if det.abs() < tolerance || det == 0.0 {
        return Err(EvalError::SingularSystem { determinant: det });
    }
    lu.solve(b).ok_or(EvalError::SingularSystem { determinant: det })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lesson_example_exact() {
        let s = solve_linear_system_2x2(3.0, 2.0, 12.0, 5.0, -1.0, 7.0).unwrap();
        assert_eq!(s.x, 2.0);
        assert_eq!(s.y, 3.0);
        assert_eq!(s.determinant, -13.0);
    }

    #[test]
    fn test_singular_system_detected() {
        let err = solve_linear_system_2x2(1.0, 2.0, 3.0, 2.0, 4.0, 6.0).unwrap_err();
        assert_eq!(err, EvalError::SingularSystem { determinant: 0.0 });
    }

    #[test]
    fn test_inconsistent_parallel_lines_are_singular() {
        assert!(solve_linear_system_2x2(1.0, 1.0, 1.0, 1.0, 1.0, 5.0).is_err());
    }

    #[test]
    fn test_near_singular_within_tolerance() {
        let sys = LinearSystem2x2::new(1.0, 1.0, 2.0, 1.0, 1.0 + 1e-12, 2.0);
        assert!(matches!(sys.solve(1e-9), Err(EvalError::SingularSystem { .. })));
        assert!(sys.solve(0.0).is_ok());
    }

    #[test]
    fn test_residual_of_solution_is_zero() {
        let sys = LinearSystem2x2::new(2.0, -3.0, 7.5, 4.0, 1.0, 1.0);
        let s = sys.solve(SINGULAR_TOLERANCE).unwrap();
        let r = sys.residual(s.x, s.y);
        assert_relative_eq!(r.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_nan_coefficient() {
        assert!(solve_linear_system_2x2(f64::NAN, 2.0, 3.0, 4.0, 5.0, 6.0).is_err());
    }

    #[test]
    fn test_general_solver_matches_2x2() {
        let a = DMatrix::from_row_slice(2, 2, &[3.0, 2.0, 5.0, -1.0]);
        let b = DVector::from_vec(vec![12.0, 7.0]);
        let x = solve_linear_system(&a, &b, SINGULAR_TOLERANCE).unwrap();
        assert_relative_eq!(x[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_general_solver_3x3() {
        // x + y + z = 6, 2y + 5z = -4, 2x + 5y - z = 27  ->  (5, 3, -2)
        let a = DMatrix::from_row_slice(3, 3, &[1.0, 1.0, 1.0, 0.0, 2.0, 5.0, 2.0, 5.0, -1.0]);
        let b = DVector::from_vec(vec![6.0, -4.0, 27.0]);
        let x = solve_linear_system(&a, &b, SINGULAR_TOLERANCE).unwrap();
        assert_relative_eq!(x[0], 5.0, epsilon = 1e-9);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-9);
        assert_relative_eq!(x[2], -2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_general_solver_singular_and_shape_errors() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = DVector::from_vec(vec![3.0, 6.0]);
        assert!(matches!(
            solve_linear_system(&a, &b, SINGULAR_TOLERANCE),
            Err(EvalError::SingularSystem { .. })
        ));

        let rect = DMatrix::from_row_slice(2, 3, &[1.0; 6]);
        assert!(matches!(
            solve_linear_system(&rect, &b, SINGULAR_TOLERANCE),
            Err(EvalError::Domain { .. })
        ));
    }
}
