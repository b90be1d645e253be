//! Aggregate performance metrics
//!
//! Expected power is the probability-weighted sum of the power curve over the
//! wind model's discretization:
//!
//! ```text
//! E[P] = Σ w_i · P(v_i)
//! CF   = E[P] / P_rated
//! AEP  = E[P] · 8760 h
//! ```
//!
//! The sum is a midpoint Riemann approximation of ∫ P(v)·f(v) dv; there is no
//! closed form once the cubic region is clamped at rated power.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::curve::{OperatingState, PowerCurveEngine};
use crate::core_types::units::{MetersPerSecond, WattHours, Watts, HOURS_PER_DAY, HOURS_PER_YEAR};
use crate::error::{Result, WindSimError};
use crate::wind::WindModel;

/// Rounding slack tolerated on guaranteed ranges before reporting an error
const RANGE_TOLERANCE: f64 = 1e-9;

/// Allowed deviation of the discretization's total weight from 1
const MASS_TOLERANCE: f64 = 1e-6;

/// Electricity price used for revenue estimates when none is given ($/MWh)
pub const DEFAULT_ENERGY_PRICE_PER_MWH: f64 = 50.0;

/// Derived performance figures for one turbine at one site
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Long-run average electrical output
    pub expected_power: Watts,
    /// Expected power over rated power, in [0, 1]
    pub capacity_factor: f64,
    /// Expected energy over 8760 hours
    pub annual_energy: WattHours,
    /// Expected energy over 24 hours
    pub daily_energy: WattHours,
    /// Mean of the discretized wind distribution
    pub mean_wind_speed: MetersPerSecond,
    /// Probability of being in [cut-in, cut-out)
    pub operating_fraction: f64,
    /// Probability of being in [rated, cut-out)
    pub rated_fraction: f64,
}

impl PerformanceMetrics {
    /// Capacity factor as a percentage
    pub fn efficiency_percent(&self) -> f64 {
        self.capacity_factor * 100.0
    }

    /// Annual revenue at `price_per_mwh`
    pub fn annual_revenue(&self, price_per_mwh: f64) -> f64 {
        self.annual_energy.to_megawatt_hours() * price_per_mwh
    }
}

impl PowerCurveEngine {
    /// Integrate the power curve over `model` and derive performance metrics.
    ///
    /// # Errors
    ///
    /// Returns [`WindSimError::ComputationError`] when the discretization weights
    /// do not sum to 1 (the truncation bound holds no mass) or when the capacity
    /// factor leaves [0, 1].
    pub fn metrics(&self, model: &WindModel) -> Result<PerformanceMetrics> {
        let bins = model.discretize();

        let mut mass = 0.0;
        let mut expected = 0.0;
        let mut mean_speed = 0.0;
        let mut operating = 0.0;
        let mut rated = 0.0;

        for bin in &bins {
            mass += bin.weight;
            expected += bin.weight * *self.power_at(bin.speed);
            mean_speed += bin.weight * *bin.speed;

            let state = self.operating_state(bin.speed);
            if state.is_operating() {
                operating += bin.weight;
            }
            if state == OperatingState::RatedLoad {
                rated += bin.weight;
            }
        }

        let mass_error = (mass - 1.0).abs();
        if mass_error.is_nan() || mass_error > MASS_TOLERANCE {
            return Err(WindSimError::computation("probability_mass", mass));
        }

        let rated_power = self.turbine().rated_power();
        let capacity_factor = capacity_factor(Watts::new(expected), rated_power)?;
        let expected_power = rated_power * capacity_factor;

        debug!(
            expected_power = expected,
            capacity_factor,
            bins = bins.len(),
            "Computed performance metrics"
        );

        Ok(PerformanceMetrics {
            expected_power,
            capacity_factor,
            annual_energy: expected_power.over_hours(HOURS_PER_YEAR),
            daily_energy: expected_power.over_hours(HOURS_PER_DAY),
            mean_wind_speed: MetersPerSecond::new(mean_speed),
            operating_fraction: operating.clamp(0.0, 1.0),
            rated_fraction: rated.clamp(0.0, 1.0),
        })
    }
}

/// Capacity factor `expected / rated`.
///
/// Values within rounding distance of [0, 1] are clamped; anything further out
/// (or NaN) is an internal inconsistency and is reported, not hidden.
pub(crate) fn capacity_factor(expected: Watts, rated: Watts) -> Result<f64> {
    let cf = expected / rated;

    if !(cf.is_finite() && (-RANGE_TOLERANCE..=1.0 + RANGE_TOLERANCE).contains(&cf)) {
        return Err(WindSimError::computation("capacity_factor", cf));
    }

    let clamped = cf.clamp(0.0, 1.0);
    if clamped != cf {
        warn!("Capacity factor {cf} clamped to {clamped} (rounding overshoot)");
    }
    Ok(clamped)
}
