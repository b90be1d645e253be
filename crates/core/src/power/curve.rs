//! Turbine power curve
//!
//! # Formula
//! ```text
//! P(v) = 0                              v < v_in  or  v ≥ v_out
//! P(v) = min(P_r, ½·ρ·A·Cp·η·v³)        v_in ≤ v < v_r
//! P(v) = P_r                            v_r ≤ v < v_out
//! ```
//!
//! Where:
//! - **ρ** = air density (kg/m³)
//! - **A** = swept area π·(D/2)² (m²)
//! - **Cp** = rotor power coefficient
//! - **η** = drivetrain efficiency
//! - **P_r** = rated power (W)
//!
//! The cubic region is clamped at rated power because some parameter sets reach
//! P_r before the nominal rated speed (see [`PowerCurveEngine::knee_speed`]).

use serde::{Deserialize, Serialize};

use crate::core_types::turbine::{TurbineConfig, TurbineParameters};
use crate::core_types::units::{MetersPerSecond, Watts};
use crate::error::Result;
use crate::wind::WindModel;

/// Where on the power curve a wind speed falls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingState {
    /// Below cut-in, rotor idle
    BelowCutIn,
    /// Between cut-in and rated speed, cubic region
    PartialLoad,
    /// Between rated and cut-out speed, producing nameplate power
    RatedLoad,
    /// At or above cut-out, turbine feathered and stopped
    Shutdown,
}

impl OperatingState {
    /// Whether the turbine generates in this state
    pub fn is_operating(self) -> bool {
        matches!(self, OperatingState::PartialLoad | OperatingState::RatedLoad)
    }
}

/// One point of a power curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerCurveSample {
    /// Wind speed (m/s)
    pub speed: MetersPerSecond,
    /// Electrical output (W)
    pub power: Watts,
    /// Operating regime at this speed
    pub state: OperatingState,
}

/// Evaluates a turbine's power curve and integrates it over a wind distribution.
///
/// # Example
/// ```
/// use wind_sim_core::core_types::{MetersPerSecond, TurbineParameters, TurbinePreset};
/// use wind_sim_core::power::PowerCurveEngine;
///
/// let engine = PowerCurveEngine::new(TurbineParameters::preset(TurbinePreset::Medium));
///
/// assert_eq!(*engine.power_at(MetersPerSecond::new(2.0)), 0.0);
/// assert_eq!(*engine.power_at(MetersPerSecond::new(15.0)), 2_000_000.0);
/// assert_eq!(*engine.power_at(MetersPerSecond::new(25.0)), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerCurveEngine {
    turbine: TurbineParameters,
    /// ½·ρ·A·Cp·η, W per (m/s)³
    power_constant: f64,
}

impl PowerCurveEngine {
    /// Engine for an already validated turbine
    pub fn new(turbine: TurbineParameters) -> Self {
        let power_constant = 0.5
            * *turbine.air_density()
            * *turbine.swept_area()
            * turbine.power_coefficient()
            * turbine.efficiency();

        PowerCurveEngine {
            turbine,
            power_constant,
        }
    }

    /// Validate `config` and build an engine for it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::WindSimError::InvalidParameter`] if any turbine
    /// invariant is violated.
    pub fn from_config(config: TurbineConfig) -> Result<Self> {
        Ok(Self::new(config.build()?))
    }

    pub fn turbine(&self) -> &TurbineParameters {
        &self.turbine
    }

    /// ½·ρ·A·Cp·η in W/(m/s)³
    pub fn power_constant(&self) -> f64 {
        self.power_constant
    }

    /// Speed at which the cubic curve first delivers rated power, never above
    /// the nominal rated speed
    pub fn knee_speed(&self) -> MetersPerSecond {
        let cubic_knee = (*self.turbine.rated_power() / self.power_constant).cbrt();
        MetersPerSecond::new(cubic_knee).min(self.turbine.rated_speed())
    }

    /// Operating regime at wind speed `v`
    pub fn operating_state(&self, v: MetersPerSecond) -> OperatingState {
        let t = &self.turbine;
        if v.is_nan() || v < t.cut_in_speed() {
            OperatingState::BelowCutIn
        } else if v >= t.cut_out_speed() {
            OperatingState::Shutdown
        } else if v >= t.rated_speed() {
            OperatingState::RatedLoad
        } else {
            OperatingState::PartialLoad
        }
    }

    /// Instantaneous electrical output at wind speed `v`
    pub fn power_at(&self, v: MetersPerSecond) -> Watts {
        let rated = self.turbine.rated_power();
        match self.operating_state(v) {
            OperatingState::BelowCutIn | OperatingState::Shutdown => Watts::ZERO,
            OperatingState::RatedLoad => rated,
            OperatingState::PartialLoad => Watts::new(self.power_constant * v.cubed()).min(rated),
        }
    }

    /// Evaluate `power_at` at every point of the model's discretization
    pub fn curve(&self, model: &WindModel) -> Vec<PowerCurveSample> {
        self.curve_over(model.discretize().into_iter().map(|bin| bin.speed))
    }

    /// Evaluate `power_at` at arbitrary speeds, in the given order
    pub fn curve_over<I>(&self, speeds: I) -> Vec<PowerCurveSample>
    where
        I: IntoIterator<Item = MetersPerSecond>,
    {
        speeds
            .into_iter()
            .map(|speed| PowerCurveSample {
                speed,
                power: self.power_at(speed),
                state: self.operating_state(speed),
            })
            .collect()
    }
}

/// `points` evenly spaced speeds from `start` to `end` inclusive.
///
/// `linspace(0.0, 30.0, 100)` is the conventional charting grid.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<MetersPerSecond> {
    match points {
        0 => Vec::new(),
        1 => vec![MetersPerSecond::new(start)],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points)
                .map(|i| MetersPerSecond::new(start + step * i as f64))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn calibration_engine() -> PowerCurveEngine {
        PowerCurveEngine::from_config(
            TurbineParameters::builder()
                .with_rotor_diameter(90.0)
                .with_power_coefficient(0.4)
                .with_efficiency(0.95)
                .with_rated_power(Watts::new(2_000_000.0)),
        )
        .unwrap()
    }

    #[test]
    fn test_power_constant() {
        let engine = calibration_engine();
        let area = std::f64::consts::PI * 45.0 * 45.0;
        assert_relative_eq!(
            engine.power_constant(),
            0.5 * 1.225 * area * 0.4 * 0.95,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_zero_outside_operating_range() {
        let engine = calibration_engine();
        for v in [0.0, 1.0, 2.999, 25.0, 26.0, 40.0, -3.0] {
            assert_eq!(engine.power_at(MetersPerSecond::new(v)), Watts::ZERO, "v = {v}");
        }
        assert_eq!(engine.power_at(MetersPerSecond::new(f64::NAN)), Watts::ZERO);
    }

    #[test]
    fn test_cubic_region() {
        let engine = calibration_engine();
        let v = MetersPerSecond::new(6.0);
        assert_relative_eq!(
            *engine.power_at(v),
            engine.power_constant() * 216.0,
            max_relative = 1e-12
        );
        assert_eq!(engine.operating_state(v), OperatingState::PartialLoad);
    }

    #[test]
    fn test_clamped_before_rated_speed() {
        // The cubic overshoots 2 MW at ~11.05 m/s, before the 12 m/s rated speed
        let engine = calibration_engine();
        let knee = engine.knee_speed();
        assert!(*knee > 11.0 && *knee < 11.1, "knee at {knee}");
        assert_eq!(
            engine.power_at(MetersPerSecond::new(11.5)),
            Watts::new(2_000_000.0)
        );
        assert_eq!(
            engine.operating_state(MetersPerSecond::new(11.5)),
            OperatingState::PartialLoad
        );
    }

    #[test]
    fn test_rated_plateau() {
        let engine = calibration_engine();
        for v in [12.0, 18.0, 24.999] {
            let v = MetersPerSecond::new(v);
            assert_eq!(engine.power_at(v), Watts::new(2_000_000.0));
            assert_eq!(engine.operating_state(v), OperatingState::RatedLoad);
        }
        assert_eq!(
            engine.operating_state(MetersPerSecond::new(25.0)),
            OperatingState::Shutdown
        );
    }

    #[test]
    fn test_knee_limited_by_rated_speed() {
        // Tiny rotor never reaches rated power on the cubic
        let engine = PowerCurveEngine::from_config(
            TurbineParameters::builder().with_rotor_diameter(10.0),
        )
        .unwrap();
        assert_eq!(engine.knee_speed(), MetersPerSecond::new(12.0));
        assert!(*engine.power_at(MetersPerSecond::new(11.99)) < 2_000_000.0);
        assert_eq!(*engine.power_at(MetersPerSecond::new(12.0)), 2_000_000.0);
    }

    #[test]
    fn test_curve_follows_discretization() {
        let engine = calibration_engine();
        let model = WindModel::new(2.0, MetersPerSecond::new(8.0)).unwrap();
        let curve = engine.curve(&model);
        let bins = model.discretize();

        assert_eq!(curve.len(), bins.len());
        for (sample, bin) in curve.iter().zip(&bins) {
            assert_eq!(sample.speed, bin.speed);
            assert_eq!(sample.power, engine.power_at(bin.speed));
        }
    }

    #[test]
    fn test_linspace() {
        let grid = linspace(0.0, 30.0, 100);
        assert_eq!(grid.len(), 100);
        assert_eq!(grid[0], MetersPerSecond::ZERO);
        assert_relative_eq!(*grid[99], 30.0, epsilon = 1e-12);
        assert!(linspace(0.0, 30.0, 0).is_empty());
        assert_eq!(linspace(5.0, 30.0, 1), vec![MetersPerSecond::new(5.0)]);
    }

    #[test]
    fn test_operating_flag() {
        assert!(OperatingState::PartialLoad.is_operating());
        assert!(OperatingState::RatedLoad.is_operating());
        assert!(!OperatingState::BelowCutIn.is_operating());
        assert!(!OperatingState::Shutdown.is_operating());
    }
}
