//! Scenario evaluation
//!
//! A [`Scenario`] pairs a turbine with a wind regime; evaluating it is a pure
//! function from parameters to an [`Estimate`]. There is no notion of a rerun:
//! a presentation layer that wants fresh numbers after a parameter change
//! simply evaluates a new scenario.
//!
//! Independent scenarios (preset comparisons, parameter sweeps) can be
//! evaluated in parallel with [`evaluate_batch`].

pub mod sampled;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core_types::turbine::TurbineParameters;
use crate::core_types::wind_regime::WindRegimeParameters;
use crate::error::Result;
use crate::power::{PerformanceMetrics, PowerCurveEngine, PowerCurveSample};
use crate::wind::WindModel;

pub use sampled::{Histogram, SampledRun};

/// A complete, validated parameter set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub turbine: TurbineParameters,
    pub regime: WindRegimeParameters,
}

/// Result of evaluating a [`Scenario`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    /// Power curve over the wind model's discretization
    pub curve: Vec<PowerCurveSample>,
    /// Aggregate performance figures
    pub metrics: PerformanceMetrics,
}

impl Scenario {
    pub fn new(turbine: TurbineParameters, regime: WindRegimeParameters) -> Self {
        Scenario { turbine, regime }
    }

    /// Power-curve engine for this scenario's turbine
    pub fn engine(&self) -> PowerCurveEngine {
        PowerCurveEngine::new(self.turbine.clone())
    }

    /// Wind model for this scenario's regime
    pub fn wind_model(&self) -> WindModel {
        WindModel::from_regime(&self.regime)
    }

    /// Build the distribution, evaluate the curve against it and derive metrics.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::WindSimError::ComputationError`] from
    /// [`PowerCurveEngine::metrics`].
    pub fn evaluate(&self) -> Result<Estimate> {
        let engine = self.engine();
        let model = self.wind_model();

        Ok(Estimate {
            curve: engine.curve(&model),
            metrics: engine.metrics(&model)?,
        })
    }
}

/// Evaluate independent scenarios in parallel; results keep input order.
pub fn evaluate_batch(scenarios: &[Scenario]) -> Vec<Result<Estimate>> {
    info!("Evaluating {} scenarios", scenarios.len());
    scenarios.par_iter().map(Scenario::evaluate).collect()
}
