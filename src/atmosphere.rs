//! Standard-atmosphere model for the pitot-tube evaluator.
//!
//! Two simplified relations are combined, as the flight-instrument lesson does:
//!
//! - **Density**: exponential decay with a fixed scale height,
//!   ρ(h) = ρ0·e^(−h/H)
//! - **Pressure**: the tropospheric barometric formula,
//!   P(h) = P0·(1 − L·h/T0)^5.256
//!
//! The barometric base reaches zero at h = T0/L (about 44 km); altitudes at or
//! above that ceiling are rejected rather than producing NaN.
//!
//! # Example
//!
//! ```
//! use physeval::Atmosphere;
//!
//! let isa = Atmosphere::standard();
//! assert_eq!(isa.pressure(0.0)?, 101_325.0);
//! assert!(isa.density(3000.0)? < 1.225);
//! # Ok::<(), physeval::EvalError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{self, PhysicalConstants};
use crate::{formulas, guard, EvalError, EvalResult};

/// Parameters of the simplified atmosphere.
///
/// Deserializing fills missing fields from [`Atmosphere::standard`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Atmosphere {
    /// Sea-level density (kg/m^3)
    pub sea_level_density: f64,
    /// Sea-level pressure (Pa)
    pub sea_level_pressure: f64,
    /// Density scale height (m)
    pub scale_height: f64,
    /// Temperature lapse rate (K/m)
    pub lapse_rate: f64,
    /// Sea-level temperature (K)
    pub sea_level_temperature: f64,
    pub barometric_exponent: f64,
}

impl Atmosphere {
    /// The standard sea-level atmosphere used throughout the lessons.
    pub fn standard() -> Self {
        Atmosphere {
            sea_level_density: constants::SEA_LEVEL_DENSITY,
            sea_level_pressure: constants::SEA_LEVEL_PRESSURE,
            scale_height: constants::SCALE_HEIGHT,
            lapse_rate: constants::LAPSE_RATE,
            sea_level_temperature: constants::SEA_LEVEL_TEMPERATURE,
            barometric_exponent: constants::BAROMETRIC_EXPONENT,
        }
    }

    /// Builds the atmosphere from a constants record.
    pub fn from_constants(c: &PhysicalConstants) -> Self {
        Atmosphere {
            sea_level_density: c.sea_level_density,
            sea_level_pressure: c.sea_level_pressure,
            scale_height: c.scale_height,
            lapse_rate: c.lapse_rate,
            sea_level_temperature: c.sea_level_temperature,
            barometric_exponent: c.barometric_exponent,
        }
    }

    /// Rejects non-positive or non-finite parameters.
    pub fn validate(&self) -> EvalResult<()> {
        guard::positive("sea level density", self.sea_level_density)?;
        guard::positive("sea level pressure", self.sea_level_pressure)?;
        guard::positive("scale height", self.scale_height)?;
        guard::positive("lapse rate", self.lapse_rate)?;
        guard::positive("sea level temperature", self.sea_level_temperature)?;
        guard::positive("barometric exponent", self.barometric_exponent)?;
        Ok(())
    }

    /// Altitude at which the barometric base 1 − L·h/T0 reaches zero.
    pub fn ceiling(&self) -> f64 {
        self.sea_level_temperature / self.lapse_rate
    }

    /// Air density at `altitude` metres.
    pub fn density(&self, altitude: f64) -> EvalResult<f64> {
        let h = self.check_altitude(altitude)?;
        Ok(formulas::exponential_density(self.sea_level_density, h, self.scale_height))
    }

    /// Static pressure at `altitude` metres.
    pub fn pressure(&self, altitude: f64) -> EvalResult<f64> {
        let h = self.check_altitude(altitude)?;
        Ok(formulas::barometric_pressure(
            self.sea_level_pressure,
            h,
            self.lapse_rate,
            self.sea_level_temperature,
            self.barometric_exponent,
        ))
    }

    fn check_altitude(&self, altitude: f64) -> EvalResult<f64> {
        let h = guard::non_negative("altitude", altitude)?;
        if h >= self.ceiling() {
            return Err(EvalError::domain(
                "altitude",
                h,
                "below the barometric model ceiling (T0 / lapse rate)",
            ));
        }
        Ok(h)
    }
}

impl Default for Atmosphere {
    fn default() -> Self {
        Self::standard()
    }
}
