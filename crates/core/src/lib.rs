//! Wind Turbine Performance Core Library
//!
//! Estimates wind-turbine energy output from site and design parameters.
//! A Weibull wind-speed model is discretized over a bounded speed range and a
//! piecewise turbine power curve is integrated against it to produce expected
//! power, capacity factor and energy production.
//!
//! ## Pipeline
//!
//! - [`TurbineParameters`] / [`WindRegimeParameters`]: validated inputs
//! - [`WindModel`]: Weibull density and normalized discretization
//! - [`PowerCurveEngine`]: power curve, curve sampling and [`PerformanceMetrics`]
//! - [`Scenario`]: one-call evaluation, plus parallel batch evaluation
//! - [`WindSampler`] / [`SampledRun`]: seeded draws for illustrative output
//!
//! Every operation is pure and deterministic (sampling given its seed).
//!
//! ```
//! use wind_sim_core::{MetersPerSecond, PowerCurveEngine, TurbineParameters, Watts, WindModel};
//!
//! let turbine = TurbineParameters::builder()
//!     .with_rotor_diameter(90.0)
//!     .with_power_coefficient(0.4)
//!     .with_efficiency(0.95)
//!     .with_rated_power(Watts::new(2_000_000.0))
//!     .build()?;
//! let wind = WindModel::new(2.0, MetersPerSecond::new(8.0))?;
//!
//! let metrics = PowerCurveEngine::new(turbine).metrics(&wind)?;
//! assert!(metrics.capacity_factor > 0.25 && metrics.capacity_factor < 0.45);
//! # Ok::<(), wind_sim_core::WindSimError>(())
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Models
pub mod power;
pub mod simulation;
pub mod wind;

// Re-export core types
pub use core_types::{
    KgPerCubicMeter, Meters, MetersPerSecond, SquareMeters, TurbineConfig, TurbineParameters,
    TurbinePreset, WattHours, Watts, WindRegimeConfig, WindRegimeParameters, BETZ_LIMIT,
};
pub use error::{Result, WindSimError};

// Re-export models
pub use power::{OperatingState, PerformanceMetrics, PowerCurveEngine, PowerCurveSample};
pub use simulation::{evaluate_batch, Estimate, Histogram, SampledRun, Scenario};
pub use wind::{WindBin, WindModel, WindSampler};
