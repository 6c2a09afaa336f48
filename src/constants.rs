//! Physical constants and evaluation defaults.
//!
//! The lesson pages each hard-coded their own constants (gravity 9.8 on one
//! page, 9.81 on another; a 1000 Pa baseline here, 101325 Pa there). Every
//! such value lives here as an explicit, overridable field so the evaluators
//! themselves never bake one in.
//!
//! # Example
//!
//! ```
//! use physeval::PhysicalConstants;
//!
//! let imperial = PhysicalConstants::default().with_gravity(32.0);
//! assert_eq!(imperial.gravity, 32.0);
//!
//! // Partial overrides from JSON; missing fields keep their defaults
//! let lunar = PhysicalConstants::from_json_str(r#"{ "gravity": 1.62 }"#)?;
//! assert_eq!(lunar.gravity, 1.62);
//! assert_eq!(lunar.sea_level_density, 1.225);
//! # Ok::<(), physeval::EvalError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::{EvalError, EvalResult};

/// Gravitational acceleration used by the projectile pages (m/s^2).
pub const GRAVITY: f64 = 9.8;
/// Sea-level air density (kg/m^3).
pub const SEA_LEVEL_DENSITY: f64 = 1.225;
/// Sea-level standard pressure (Pa).
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0;
/// Density scale height of the exponential atmosphere (m).
pub const SCALE_HEIGHT: f64 = 8_400.0;
/// Tropospheric temperature lapse rate (K/m).
pub const LAPSE_RATE: f64 = 0.0065;
/// Sea-level standard temperature (K).
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15;
/// Exponent of the barometric pressure formula.
pub const BAROMETRIC_EXPONENT: f64 = 5.256;
/// Gravity used to express wing loading in kg/m^2.
pub const STANDARD_GRAVITY: f64 = 9.81;
/// Cruise speed as a multiple of stall speed.
pub const CRUISE_FACTOR: f64 = 1.3;
/// Determinant magnitude below which a linear system counts as singular.
pub const SINGULAR_TOLERANCE: f64 = 1e-9;
/// Default number of points in a sampled curve.
pub const SAMPLE_COUNT: usize = 100;
/// Upper bound on points in a sampled curve.
pub const MAX_SAMPLE_COUNT: usize = 10_000;

/// Constants consumed by [`Evaluator`](crate::Evaluator) when a scenario
/// leaves a physical parameter unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Gravitational acceleration for projectile motion
    pub gravity: f64,
    /// Fluid density for Bernoulli, airfoil and stall evaluations
    pub sea_level_density: f64,
    /// Ambient pressure for airfoil evaluations and the barometric model
    pub sea_level_pressure: f64,
    pub scale_height: f64,
    pub lapse_rate: f64,
    pub sea_level_temperature: f64,
    pub barometric_exponent: f64,
    /// Gravity for wing loading in mass units
    pub standard_gravity: f64,
    pub cruise_factor: f64,
    pub singular_tolerance: f64,
    /// Points per sampled curve
    pub sample_count: usize,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        PhysicalConstants {
            gravity: GRAVITY,
            sea_level_density: SEA_LEVEL_DENSITY,
            sea_level_pressure: SEA_LEVEL_PRESSURE,
            scale_height: SCALE_HEIGHT,
            lapse_rate: LAPSE_RATE,
            sea_level_temperature: SEA_LEVEL_TEMPERATURE,
            barometric_exponent: BAROMETRIC_EXPONENT,
            standard_gravity: STANDARD_GRAVITY,
            cruise_factor: CRUISE_FACTOR,
            singular_tolerance: SINGULAR_TOLERANCE,
            sample_count: SAMPLE_COUNT,
        }
    }
}

impl PhysicalConstants {
    /// Parses constants from JSON and validates them.
    pub fn from_json_str(json: &str) -> EvalResult<Self> {
        let constants: PhysicalConstants =
            serde_json::from_str(json).map_err(|e| EvalError::Config(e.to_string()))?;
        constants.validate()?;
        Ok(constants)
    }

    /// Checks that every constant is usable by the evaluators.
    pub fn validate(&self) -> EvalResult<()> {
        let positive = [
            ("gravity", self.gravity),
            ("sea_level_density", self.sea_level_density),
            ("sea_level_pressure", self.sea_level_pressure),
            ("scale_height", self.scale_height),
            ("lapse_rate", self.lapse_rate),
            ("sea_level_temperature", self.sea_level_temperature),
            ("barometric_exponent", self.barometric_exponent),
            ("standard_gravity", self.standard_gravity),
            ("cruise_factor", self.cruise_factor),
            ("singular_tolerance", self.singular_tolerance),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(EvalError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if !(2..=MAX_SAMPLE_COUNT).contains(&self.sample_count) {
            return Err(EvalError::Config(format!(
                "sample_count must be between 2 and {MAX_SAMPLE_COUNT}, got {}",
                self.sample_count
            )));
        }
        Ok(())
    }

    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.sea_level_density = density;
        self
    }

    pub fn with_sea_level_pressure(mut self, pressure: f64) -> Self {
        self.sea_level_pressure = pressure;
        self
    }

    pub fn with_sample_count(mut self, count: usize) -> Self {
        self.sample_count = count;
        self
    }

    pub fn with_singular_tolerance(mut self, tolerance: f64) -> Self {
        self.singular_tolerance = tolerance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PhysicalConstants::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_override() {
        let c = PhysicalConstants::from_json_str(r#"{"sample_count": 300, "gravity": 9.81}"#)
            .unwrap();
        assert_eq!(c.sample_count, 300);
        assert_eq!(c.gravity, 9.81);
        assert_eq!(c.scale_height, SCALE_HEIGHT);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = PhysicalConstants::from_json_str("{ gravity: }").unwrap_err();
        assert!(matches!(err, EvalError::Config(_)));
    }

    #[test]
    fn test_rejects_non_positive_gravity() {
        let err = PhysicalConstants::from_json_str(r#"{"gravity": 0.0}"#).unwrap_err();
        assert_eq!(err, EvalError::Config("gravity must be positive, got 0".to_string()));
    }

    #[test]
    fn test_rejects_tiny_sample_count() {
        let c = PhysicalConstants::default().with_sample_count(1);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_sample_count_upper_limit() {
        let at_limit = PhysicalConstants::default().with_sample_count(MAX_SAMPLE_COUNT);
        assert!(at_limit.validate().is_ok());

        let err = PhysicalConstants::from_json_str(r#"{"sample_count": 1000000000000}"#)
            .unwrap_err();
        assert_eq!(
            err,
            EvalError::Config(
                "sample_count must be between 2 and 10000, got 1000000000000".to_string()
            )
        );
    }
}
