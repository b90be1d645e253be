//! C ABI for the wind turbine performance core
//!
//! Lifecycle: `wind_sim_new` validates a turbine and a wind regime and returns
//! an opaque [`WindSimInstance`]; queries borrow it; `wind_sim_destroy` frees it.
//! Every call returns a [`WindSimErrorCode`] and records a readable message
//! retrievable with `wind_sim_get_last_error` on the same thread.

mod error;
mod helpers;
mod instance;
mod queries;

pub use error::{wind_sim_get_last_error, wind_sim_get_last_error_code, WindSimErrorCode};
pub use instance::{wind_sim_destroy, wind_sim_new, WindSimInstance, WindSimRegime, WindSimTurbine};
pub use queries::{
    wind_sim_get_curve, wind_sim_get_metrics, wind_sim_power_at, WindSimCurvePoint,
    WindSimMetrics, WindSimOperatingState,
};
