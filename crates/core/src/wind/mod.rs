//! Wind resource modelling
//!
//! - [`weibull`]: analytic Weibull density, CDF and the normalized discretization
//!   consumed by the power-curve engine
//! - [`sampling`]: seeded pseudo-random draws for illustrative output

pub mod sampling;
pub mod weibull;

pub use sampling::WindSampler;
pub use weibull::{WindBin, WindModel};
