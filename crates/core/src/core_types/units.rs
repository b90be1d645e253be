//! Semantic unit types for type-safe physical quantity handling
//!
//! Newtype wrappers keep wind speeds, lengths, densities, power and energy from
//! being mixed up in the power-curve formulas.
//!
//! # Design Philosophy
//! - All quantities use f64: weights are normalized to 1e-6 and energy totals
//!   reach the 10^10 Wh range, where f32 loses too much precision
//! - Implements common traits (Add, Sub, Mul, Div, Ord, Display, etc.)
//! - Total ordering via Ord trait (NaN handled as greater than all values)
//! - Serde support for serialization
//! - Values are not validated here; parameter records validate on construction
//!
//! # Usage
//! ```
//! use wind_sim_core::core_types::units::{MetersPerSecond, Watts};
//!
//! let v = MetersPerSecond::new(12.0);
//! assert_eq!(v.cubed(), 1728.0);
//!
//! let rated = Watts::new(2_000_000.0);
//! assert_eq!(rated.to_megawatts(), 2.0);
//! assert_eq!(rated.min(Watts::new(1.0)), Watts::new(1.0));
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Deref, Div, Mul, Sub};

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Hours in a (non-leap) year
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Hours in a day
pub const HOURS_PER_DAY: f64 = 24.0;

// ============================================================================
// VELOCITY
// ============================================================================

/// Wind speed in meters per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MetersPerSecond(f64);

impl Eq for MetersPerSecond {}

impl PartialOrd for MetersPerSecond {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MetersPerSecond {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for MetersPerSecond {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl MetersPerSecond {
    /// Calm air
    pub const ZERO: MetersPerSecond = MetersPerSecond(0.0);

    /// Create a new wind speed
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        MetersPerSecond(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// v³, the driver of kinetic power flux
    #[inline]
    #[must_use]
    pub fn cubed(self) -> f64 {
        self.0 * self.0 * self.0
    }

    /// Convert to km/h
    #[inline]
    #[must_use]
    pub fn to_kmh(self) -> f64 {
        self.0 * 3.6
    }
}

impl From<f64> for MetersPerSecond {
    fn from(v: f64) -> Self {
        MetersPerSecond(v)
    }
}

impl From<MetersPerSecond> for f64 {
    fn from(v: MetersPerSecond) -> f64 {
        v.0
    }
}

impl Add for MetersPerSecond {
    type Output = MetersPerSecond;
    fn add(self, rhs: MetersPerSecond) -> MetersPerSecond {
        MetersPerSecond(self.0 + rhs.0)
    }
}

impl Sub for MetersPerSecond {
    type Output = MetersPerSecond;
    fn sub(self, rhs: MetersPerSecond) -> MetersPerSecond {
        MetersPerSecond(self.0 - rhs.0)
    }
}

impl Mul<f64> for MetersPerSecond {
    type Output = MetersPerSecond;
    fn mul(self, rhs: f64) -> MetersPerSecond {
        MetersPerSecond(self.0 * rhs)
    }
}

impl Div<f64> for MetersPerSecond {
    type Output = MetersPerSecond;
    fn div(self, rhs: f64) -> MetersPerSecond {
        MetersPerSecond(self.0 / rhs)
    }
}

impl PartialEq<f64> for MetersPerSecond {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<f64> for MetersPerSecond {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

impl fmt::Display for MetersPerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} m/s", self.0)
    }
}

// ============================================================================
// LENGTH & AREA
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(f64);

impl Eq for Meters {}

impl PartialOrd for Meters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meters {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Meters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Meters {
    /// Create a new length
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Meters(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Area of a circle with this diameter
    #[inline]
    #[must_use]
    pub fn disc_area(self) -> SquareMeters {
        let radius = self.0 / 2.0;
        SquareMeters(std::f64::consts::PI * radius * radius)
    }
}

impl From<f64> for Meters {
    fn from(v: f64) -> Self {
        Meters(v)
    }
}

impl Mul<f64> for Meters {
    type Output = Meters;
    fn mul(self, rhs: f64) -> Meters {
        Meters(self.0 * rhs)
    }
}

impl Div<f64> for Meters {
    type Output = Meters;
    fn div(self, rhs: f64) -> Meters {
        Meters(self.0 / rhs)
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} m", self.0)
    }
}

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct SquareMeters(f64);

impl Deref for SquareMeters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl SquareMeters {
    /// Create a new area
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        SquareMeters(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for SquareMeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} m²", self.0)
    }
}

// ============================================================================
// DENSITY
// ============================================================================

/// Density in kg/m³
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct KgPerCubicMeter(f64);

impl Deref for KgPerCubicMeter {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl KgPerCubicMeter {
    /// Standard sea-level air density (ISA, 15°C)
    pub const SEA_LEVEL_AIR: KgPerCubicMeter = KgPerCubicMeter(1.225);

    /// Create a new density
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        KgPerCubicMeter(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for KgPerCubicMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} kg/m³", self.0)
    }
}

// ============================================================================
// POWER & ENERGY
// ============================================================================

/// Power in watts
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Watts(f64);

impl Eq for Watts {}

impl PartialOrd for Watts {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Watts {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Watts {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Watts {
    /// No output
    pub const ZERO: Watts = Watts(0.0);

    /// Create a new power value
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Watts(value)
    }

    /// Create from kilowatts
    #[inline]
    #[must_use]
    pub fn from_kilowatts(kw: f64) -> Self {
        Watts(kw * 1000.0)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to kW
    #[inline]
    #[must_use]
    pub fn to_kilowatts(self) -> f64 {
        self.0 / 1000.0
    }

    /// Convert to MW
    #[inline]
    #[must_use]
    pub fn to_megawatts(self) -> f64 {
        self.0 / 1_000_000.0
    }

    /// Energy delivered when this power is sustained for `hours`
    #[inline]
    #[must_use]
    pub fn over_hours(self, hours: f64) -> WattHours {
        WattHours(self.0 * hours)
    }
}

impl From<f64> for Watts {
    fn from(v: f64) -> Self {
        Watts(v)
    }
}

impl From<Watts> for f64 {
    fn from(v: Watts) -> f64 {
        v.0
    }
}

impl Add for Watts {
    type Output = Watts;
    fn add(self, rhs: Watts) -> Watts {
        Watts(self.0 + rhs.0)
    }
}

impl Sub for Watts {
    type Output = Watts;
    fn sub(self, rhs: Watts) -> Watts {
        Watts(self.0 - rhs.0)
    }
}

impl Mul<f64> for Watts {
    type Output = Watts;
    fn mul(self, rhs: f64) -> Watts {
        Watts(self.0 * rhs)
    }
}

impl Div<f64> for Watts {
    type Output = Watts;
    fn div(self, rhs: f64) -> Watts {
        Watts(self.0 / rhs)
    }
}

/// Ratio of two powers (dimensionless)
impl Div for Watts {
    type Output = f64;
    fn div(self, rhs: Watts) -> f64 {
        self.0 / rhs.0
    }
}

impl Sum for Watts {
    fn sum<I: Iterator<Item = Watts>>(iter: I) -> Watts {
        Watts(iter.map(|w| w.0).sum())
    }
}

impl PartialEq<f64> for Watts {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<f64> for Watts {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

impl fmt::Display for Watts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} kW", self.to_kilowatts())
    }
}

/// Energy in watt-hours
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct WattHours(f64);

impl Deref for WattHours {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl WattHours {
    /// Create a new energy value
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        WattHours(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to kWh
    #[inline]
    #[must_use]
    pub fn to_kilowatt_hours(self) -> f64 {
        self.0 / 1000.0
    }

    /// Convert to MWh
    #[inline]
    #[must_use]
    pub fn to_megawatt_hours(self) -> f64 {
        self.0 / 1_000_000.0
    }
}

impl fmt::Display for WattHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} MWh", self.to_megawatt_hours())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_ordering_and_cube() {
        let slow = MetersPerSecond::new(3.0);
        let fast = MetersPerSecond::new(12.0);
        assert!(slow < fast);
        assert_eq!(slow.max(fast), fast);
        assert_eq!(fast.cubed(), 1728.0);
        assert!((fast.to_kmh() - 43.2).abs() < 1e-9);
    }

    #[test]
    fn test_disc_area() {
        let area = Meters::new(90.0).disc_area();
        assert!((*area - 6361.725).abs() < 1e-3);
    }

    #[test]
    fn test_power_conversions() {
        let p = Watts::from_kilowatts(2000.0);
        assert_eq!(*p, 2_000_000.0);
        assert_eq!(p.to_megawatts(), 2.0);
        assert_eq!(p / Watts::new(4_000_000.0), 0.5);

        let energy = p.over_hours(HOURS_PER_YEAR);
        assert_eq!(energy.to_megawatt_hours(), 17_520.0);
    }

    #[test]
    fn test_power_sum() {
        let total: Watts = [Watts::new(1.0), Watts::new(2.5), Watts::new(0.5)]
            .into_iter()
            .sum();
        assert_eq!(total, Watts::new(4.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(MetersPerSecond::new(7.0).to_string(), "7.00 m/s");
        assert_eq!(Watts::new(1500.0).to_string(), "1.5 kW");
        assert_eq!(WattHours::new(2_500_000.0).to_string(), "2.5 MWh");
    }
}
