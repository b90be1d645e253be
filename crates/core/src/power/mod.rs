//! Turbine power curve and performance metrics

pub mod curve;
pub mod metrics;

pub use curve::{linspace, OperatingState, PowerCurveEngine, PowerCurveSample};
pub use metrics::{PerformanceMetrics, DEFAULT_ENERGY_PRICE_PER_MWH};
