//! Core types and utilities

pub mod turbine;
pub mod units;
pub mod wind_regime;

pub use turbine::*;
pub use units::*;
pub use wind_regime::*;
