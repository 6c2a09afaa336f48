//! Scenario dispatch for menu-driven pages.
//!
//! A page that lets the learner pick "Wing Airfoil Analysis" or "Pitot Tube
//! Measurement" from a menu holds a [`Scenario`] value instead of the menu
//! string. [`Evaluator`] fills in any physical constant the scenario leaves
//! unset from its [`PhysicalConstants`], runs the matching evaluator, and
//! flattens the result into an [`Evaluation`]: a name → value map, flags,
//! and an optional curve.
//!
//! Scenarios deserialize from tagged JSON, so a request can arrive as:
//!
//! ```
//! use physeval::{Evaluator, Scenario, ScenarioKind};
//!
//! let scenario: Scenario = serde_json::from_str(
//!     r#"{ "scenario": "trajectory", "initial_velocity": 192.0, "gravity": 32.0 }"#,
//! ).unwrap();
//! assert_eq!(scenario.kind(), ScenarioKind::Trajectory);
//!
//! let eval = Evaluator::default().evaluate(&scenario)?;
//! assert_eq!(eval.quantity("max_height"), Some(576.0));
//! # Ok::<(), physeval::EvalError>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::atmosphere::Atmosphere;
use crate::constants::PhysicalConstants;
use crate::evaluators::{self, LiftDirection};
use crate::sampling::Sample;
use crate::{EvalError, EvalResult};

/// Upper end of the default speed axis for the Bernoulli curve (m/s).
pub const DEFAULT_CURVE_MAX_SPEED: f64 = 50.0;

/// One evaluation request.
///
/// `Option` fields are physical constants; `None` takes the evaluator's
/// configured default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum Scenario {
    Bernoulli {
        speed: f64,
        density: Option<f64>,
        baseline_pressure: Option<f64>,
        /// End of the sampled speed axis; defaults to 50 m/s or `speed` if larger
        curve_max_speed: Option<f64>,
    },
    AirfoilLift {
        upper_speed: f64,
        lower_speed: f64,
        ambient_pressure: Option<f64>,
        density: Option<f64>,
    },
    Pitot {
        airspeed: f64,
        altitude: f64,
        /// Atmosphere model; defaults to the one built from the constants
        atmosphere: Option<Atmosphere>,
    },
    StallSpeed {
        weight: f64,
        wing_area: f64,
        air_density: Option<f64>,
        cl_max: f64,
    },
    Trajectory {
        initial_velocity: f64,
        gravity: Option<f64>,
    },
    LinearSystem {
        a1: f64,
        b1: f64,
        c1: f64,
        a2: f64,
        b2: f64,
        c2: f64,
    },
    Decay {
        initial_value: f64,
        factor: f64,
        elapsed_time: f64,
        /// Accept factors above 1 (growth) instead of rejecting them
        #[serde(default)]
        allow_growth: bool,
    },
    TravelTime {
        distance: f64,
        speed: f64,
    },
}

impl Scenario {
    pub fn kind(&self) -> ScenarioKind {
        match self {
            Scenario::Bernoulli { .. } => ScenarioKind::Bernoulli,
            Scenario::AirfoilLift { .. } => ScenarioKind::AirfoilLift,
            Scenario::Pitot { .. } => ScenarioKind::Pitot,
            Scenario::StallSpeed { .. } => ScenarioKind::StallSpeed,
            Scenario::Trajectory { .. } => ScenarioKind::Trajectory,
            Scenario::LinearSystem { .. } => ScenarioKind::LinearSystem,
            Scenario::Decay { .. } => ScenarioKind::Decay,
            Scenario::TravelTime { .. } => ScenarioKind::TravelTime,
        }
    }
}

/// Discriminant of [`Scenario`], for building menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Bernoulli,
    AirfoilLift,
    Pitot,
    StallSpeed,
    Trajectory,
    LinearSystem,
    Decay,
    TravelTime,
}

impl ScenarioKind {
    /// Every scenario, in menu order.
    pub const ALL: [ScenarioKind; 8] = [
        ScenarioKind::Bernoulli,
        ScenarioKind::AirfoilLift,
        ScenarioKind::Pitot,
        ScenarioKind::StallSpeed,
        ScenarioKind::Trajectory,
        ScenarioKind::LinearSystem,
        ScenarioKind::Decay,
        ScenarioKind::TravelTime,
    ];

    /// Stable machine identifier, identical to the serde tag.
    pub fn id(&self) -> &'static str {
        match self {
            ScenarioKind::Bernoulli => "bernoulli",
            ScenarioKind::AirfoilLift => "airfoil_lift",
            ScenarioKind::Pitot => "pitot",
            ScenarioKind::StallSpeed => "stall_speed",
            ScenarioKind::Trajectory => "trajectory",
            ScenarioKind::LinearSystem => "linear_system",
            ScenarioKind::Decay => "decay",
            ScenarioKind::TravelTime => "travel_time",
        }
    }

    /// Human-readable menu label.
    pub fn label(&self) -> &'static str {
        match self {
            ScenarioKind::Bernoulli => "Speed vs. Pressure",
            ScenarioKind::AirfoilLift => "Wing Airfoil Analysis",
            ScenarioKind::Pitot => "Pitot Tube Measurement",
            ScenarioKind::StallSpeed => "Required Airspeed for Lift",
            ScenarioKind::Trajectory => "Projectile Motion",
            ScenarioKind::LinearSystem => "System of Linear Equations",
            ScenarioKind::Decay => "Rocket Fuel Decay",
            ScenarioKind::TravelTime => "Travel Time",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScenarioKind {
    type Err = EvalError;

    /// Parses a stable identifier (see [`ScenarioKind::id`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| EvalError::Config(format!("Unknown scenario: {s}")))
    }
}

/// Noteworthy conditions in a result that a page may want to highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// Static pressure fell below zero
    NegativeStaticPressure,
    /// Airfoil pressure difference points downward
    DownwardLift,
    /// Airfoil surfaces at equal pressure
    NoLift,
}

/// Flattened output of one scenario evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub kind: ScenarioKind,
    /// Result name → value
    pub quantities: BTreeMap<String, f64>,
    pub flags: Vec<Flag>,
    /// Chart samples, empty for scenarios without a curve
    pub samples: Vec<Sample>,
}

impl Evaluation {
    fn new(kind: ScenarioKind) -> Self {
        Evaluation { kind, quantities: BTreeMap::new(), flags: Vec::new(), samples: Vec::new() }
    }

    fn with(mut self, name: &str, value: f64) -> Self {
        self.quantities.insert(name.to_string(), value);
        self
    }

    /// Looks up a named result.
    pub fn quantity(&self, name: &str) -> Option<f64> {
        self.quantities.get(name).copied()
    }

    pub fn has_flag(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }
}

/// Runs scenarios against a fixed set of constants.
///
/// Holds no mutable state; share one across threads freely.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    constants: PhysicalConstants,
}

impl Evaluator {
    /// Creates an evaluator after validating `constants`.
    pub fn new(constants: PhysicalConstants) -> EvalResult<Self> {
        constants.validate()?;
        Ok(Evaluator { constants })
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Evaluates one scenario.
    pub fn evaluate(&self, scenario: &Scenario) -> EvalResult<Evaluation> {
        let kind = scenario.kind();
        log::debug!("Evaluating {} scenario", kind.id());

        let c = &self.constants;
        let result = match *scenario {
            Scenario::Bernoulli { speed, density, baseline_pressure, curve_max_speed } => {
                let density = density.unwrap_or(c.sea_level_density);
                let baseline = baseline_pressure.unwrap_or(c.sea_level_pressure);
                let r = evaluators::evaluate_bernoulli(speed, density, baseline)?;
                let max_speed = curve_max_speed.unwrap_or(DEFAULT_CURVE_MAX_SPEED.max(speed));

                let mut eval = Evaluation::new(kind)
                    .with("speed", r.speed)
                    .with("density", r.density)
                    .with("static_pressure", r.static_pressure)
                    .with("dynamic_pressure", r.dynamic_pressure)
                    .with("total_pressure", r.total_pressure);
                if r.is_negative_static_pressure() {
                    eval.flags.push(Flag::NegativeStaticPressure);
                }
                eval.samples =
                    evaluators::pressure_curve(density, baseline, max_speed, c.sample_count)?;
                eval
            }
            Scenario::AirfoilLift { upper_speed, lower_speed, ambient_pressure, density } => {
                let r = evaluators::evaluate_airfoil_lift(
                    upper_speed,
                    lower_speed,
                    ambient_pressure.unwrap_or(c.sea_level_pressure),
                    density.unwrap_or(c.sea_level_density),
                )?;
                let mut eval = Evaluation::new(kind)
                    .with("upper_speed", r.upper_speed)
                    .with("lower_speed", r.lower_speed)
                    .with("upper_pressure", r.upper_pressure)
                    .with("lower_pressure", r.lower_pressure)
                    .with("pressure_difference", r.pressure_difference);
                match r.direction() {
                    LiftDirection::Upward => {}
                    LiftDirection::Downward => eval.flags.push(Flag::DownwardLift),
                    LiftDirection::None => eval.flags.push(Flag::NoLift),
                }
                eval
            }
            Scenario::Pitot { airspeed, altitude, atmosphere } => {
                let atmosphere = match atmosphere {
                    Some(custom) => {
                        custom.validate()?;
                        custom
                    }
                    None => Atmosphere::from_constants(c),
                };
                let r = evaluators::evaluate_pitot(airspeed, altitude, &atmosphere)?;
                Evaluation::new(kind)
                    .with("airspeed", r.airspeed)
                    .with("airspeed_knots", r.airspeed_knots)
                    .with("altitude", r.altitude)
                    .with("altitude_feet", r.altitude_feet)
                    .with("density", r.density)
                    .with("static_pressure", r.static_pressure)
                    .with("dynamic_pressure", r.dynamic_pressure)
                    .with("total_pressure", r.total_pressure)
            }
            Scenario::StallSpeed { weight, wing_area, air_density, cl_max } => {
                let r = evaluators::evaluate_stall_speed_with(
                    weight,
                    wing_area,
                    air_density.unwrap_or(c.sea_level_density),
                    cl_max,
                    c.cruise_factor,
                    c.standard_gravity,
                )?;
                Evaluation::new(kind)
                    .with("stall_speed", r.stall_speed)
                    .with("stall_speed_knots", r.stall_speed_knots)
                    .with("cruise_speed", r.cruise_speed)
                    .with("cruise_speed_knots", r.cruise_speed_knots)
                    .with("wing_loading", r.wing_loading)
                    .with("wing_loading_mass", r.wing_loading_mass)
            }
            Scenario::Trajectory { initial_velocity, gravity } => {
                let gravity = gravity.unwrap_or(c.gravity);
                let r = evaluators::evaluate_trajectory(initial_velocity, gravity)?;
                let mut eval = Evaluation::new(kind)
                    .with("initial_velocity", r.initial_velocity)
                    .with("gravity", r.gravity)
                    .with("time_to_apex", r.time_to_apex)
                    .with("max_height", r.max_height)
                    .with("time_of_flight", r.time_of_flight);
                eval.samples = r.samples(c.sample_count)?;
                eval
            }
            Scenario::LinearSystem { a1, b1, c1, a2, b2, c2 } => {
                let r = evaluators::LinearSystem2x2::new(a1, b1, c1, a2, b2, c2)
                    .solve(c.singular_tolerance)?;
                Evaluation::new(kind)
                    .with("x", r.x)
                    .with("y", r.y)
                    .with("determinant", r.determinant)
            }
            Scenario::Decay { initial_value, factor, elapsed_time, allow_growth } => {
                let r = if allow_growth {
                    evaluators::evaluate_growth(initial_value, factor, elapsed_time)?
                } else {
                    evaluators::evaluate_decay(initial_value, factor, elapsed_time)?
                };
                let mut eval = Evaluation::new(kind)
                    .with("initial_value", r.initial_value)
                    .with("factor", r.factor)
                    .with("elapsed_time", r.elapsed_time)
                    .with("remaining_value", r.remaining_value);
                if let Some(half_life) = r.half_life() {
                    eval = eval.with("half_life", half_life);
                }
                // A zero-length interval has no curve to draw
                if r.elapsed_time > 0.0 {
                    eval.samples = r.samples(c.sample_count)?;
                }
                eval
            }
            Scenario::TravelTime { distance, speed } => {
                let r = evaluators::evaluate_travel_time(distance, speed)?;
                Evaluation::new(kind)
                    .with("distance", r.distance)
                    .with("speed", r.speed)
                    .with("time_hours", r.time_hours)
                    .with("time_days", r.time_days)
            }
        };

        if !result.flags.is_empty() {
            log::debug!("{} scenario flagged: {:?}", kind.id(), result.flags);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bernoulli(speed: f64) -> Scenario {
        Scenario::Bernoulli {
            speed,
            density: None,
            baseline_pressure: Some(1000.0),
            curve_max_speed: None,
        }
    }

    #[test]
    fn test_kind_ids_match_serde_tags() {
        for kind in ScenarioKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.id()));
            assert_eq!(kind.id().parse::<ScenarioKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_id() {
        assert!("Wing Airfoil Analysis".parse::<ScenarioKind>().is_err());
    }

    #[test]
    fn test_bernoulli_defaults_density() {
        let eval = Evaluator::default().evaluate(&bernoulli(25.0)).unwrap();
        assert_eq!(eval.kind, ScenarioKind::Bernoulli);
        assert_eq!(eval.quantity("density"), Some(1.225));
        assert_relative_eq!(eval.quantity("static_pressure").unwrap(), 617.1875, epsilon = 1e-9);
        assert_eq!(eval.samples.len(), 100);
        assert_eq!(eval.samples.last().unwrap().x, DEFAULT_CURVE_MAX_SPEED);
        assert!(eval.flags.is_empty());
    }

    #[test]
    fn test_bernoulli_flags_negative_pressure() {
        let eval = Evaluator::default().evaluate(&bernoulli(50.0)).unwrap();
        assert!(eval.has_flag(Flag::NegativeStaticPressure));
    }

    #[test]
    fn test_airfoil_flags() {
        let evaluator = Evaluator::default();
        let down = Scenario::AirfoilLift {
            upper_speed: 60.0,
            lower_speed: 90.0,
            ambient_pressure: None,
            density: None,
        };
        assert!(evaluator.evaluate(&down).unwrap().has_flag(Flag::DownwardLift));

        let level = Scenario::AirfoilLift {
            upper_speed: 70.0,
            lower_speed: 70.0,
            ambient_pressure: None,
            density: None,
        };
        assert!(evaluator.evaluate(&level).unwrap().has_flag(Flag::NoLift));
    }

    #[test]
    fn test_trajectory_uses_configured_gravity() {
        let imperial =
            Evaluator::new(PhysicalConstants::default().with_gravity(32.0).with_sample_count(13))
                .unwrap();
        let eval = imperial
            .evaluate(&Scenario::Trajectory { initial_velocity: 192.0, gravity: None })
            .unwrap();
        assert_eq!(eval.quantity("max_height"), Some(576.0));
        assert_eq!(eval.quantity("time_to_apex"), Some(6.0));
        assert_eq!(eval.samples.len(), 13);
        // 13 points over [0, 12] lands one sample exactly on the apex
        assert_eq!(eval.samples[6], Sample::new(6.0, 576.0));
    }

    #[test]
    fn test_linear_system_singular_propagates() {
        let err = Evaluator::default()
            .evaluate(&Scenario::LinearSystem {
                a1: 1.0,
                b1: 2.0,
                c1: 3.0,
                a2: 2.0,
                b2: 4.0,
                c2: 6.0,
            })
            .unwrap_err();
        assert!(matches!(err, EvalError::SingularSystem { .. }));
    }

    #[test]
    fn test_decay_growth_switch() {
        let evaluator = Evaluator::default();
        let growth = Scenario::Decay {
            initial_value: 100.0,
            factor: 1.05,
            elapsed_time: 2.0,
            allow_growth: false,
        };
        assert!(evaluator.evaluate(&growth).is_err());

        let growth = Scenario::Decay {
            initial_value: 100.0,
            factor: 1.05,
            elapsed_time: 2.0,
            allow_growth: true,
        };
        let eval = evaluator.evaluate(&growth).unwrap();
        assert_eq!(eval.quantity("half_life"), None);
        assert_eq!(eval.samples.len(), 100);
    }

    #[test]
    fn test_decay_without_elapsed_time_has_no_curve() {
        let eval = Evaluator::default()
            .evaluate(&Scenario::Decay {
                initial_value: 1000.0,
                factor: 0.9,
                elapsed_time: 0.0,
                allow_growth: false,
            })
            .unwrap();
        assert_eq!(eval.quantity("remaining_value"), Some(1000.0));
        assert!(eval.samples.is_empty());
    }

    #[test]
    fn test_pitot_and_stall_dispatch() {
        let evaluator = Evaluator::default();
        let pitot = evaluator
            .evaluate(&Scenario::Pitot { airspeed: 100.0, altitude: 3000.0, atmosphere: None })
            .unwrap();
        assert_relative_eq!(pitot.quantity("dynamic_pressure").unwrap(), 4_285.49, epsilon = 0.01);

        let stall = evaluator
            .evaluate(&Scenario::StallSpeed {
                weight: 50_000.0,
                wing_area: 25.0,
                air_density: None,
                cl_max: 1.5,
            })
            .unwrap();
        assert_relative_eq!(stall.quantity("stall_speed").unwrap(), 46.656_947, epsilon = 1e-5);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let scenario: Scenario = serde_json::from_str(
            r#"{"scenario": "decay", "initial_value": 1000.0,
                "factor": 0.9, "elapsed_time": 10.0}"#,
        )
        .unwrap();
        let eval = Evaluator::default().evaluate(&scenario).unwrap();
        assert_relative_eq!(eval.quantity("remaining_value").unwrap(), 348.68, epsilon = 0.01);
    }

    #[test]
    fn test_pitot_with_custom_atmosphere() {
        let scenario: Scenario = serde_json::from_str(
            r#"{"scenario": "pitot", "airspeed": 50.0, "altitude": 0.0,
                "atmosphere": {"sea_level_pressure": 90000.0}}"#,
        )
        .unwrap();
        let eval = Evaluator::default().evaluate(&scenario).unwrap();
        assert_relative_eq!(eval.quantity("static_pressure").unwrap(), 90_000.0, epsilon = 1e-9);
        assert_relative_eq!(eval.quantity("density").unwrap(), 1.225, epsilon = 1e-12);

        let thin = Atmosphere { sea_level_density: -1.0, ..Atmosphere::standard() };
        let err = Evaluator::default()
            .evaluate(&Scenario::Pitot { airspeed: 50.0, altitude: 0.0, atmosphere: Some(thin) })
            .unwrap_err();
        assert!(matches!(err, EvalError::Domain { parameter: "sea level density", .. }));
    }

    #[test]
    fn test_evaluation_serializes_as_named_map() {
        let eval = Evaluator::default()
            .evaluate(&Scenario::TravelTime { distance: 1440.0, speed: 60.0 })
            .unwrap();
        let json = serde_json::to_value(&eval).unwrap();
        assert_eq!(json["kind"], "travel_time");
        assert_eq!(json["quantities"]["time_days"], 1.0);
        assert_eq!(json["samples"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_rejects_invalid_constants() {
        assert!(Evaluator::new(PhysicalConstants::default().with_gravity(-9.8)).is_err());
    }
}
