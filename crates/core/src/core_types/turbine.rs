//! Turbine design parameters
//!
//! [`TurbineConfig`] is the plain, serde-friendly description of a turbine as a
//! caller writes it (sidebar values, JSON file, CLI flags). [`TurbineParameters`]
//! is the validated, immutable record the power-curve engine consumes; the only
//! way to obtain one is through [`TurbineConfig::build`], which enforces every
//! physical invariant.
//!
//! # Presets
//!
//! Three reference machines are provided through [`TurbinePreset`]:
//!
//! | Preset | Rotor radius | Cp | Rated power |
//! |---|---|---|---|
//! | Small | 32 m | 0.42 | 1 MW |
//! | Medium | 45 m | 0.45 | 2 MW |
//! | Large | 63 m | 0.48 | 5 MW |
//!
//! # Example
//! ```
//! use wind_sim_core::core_types::{MetersPerSecond, TurbineParameters, Watts};
//!
//! let turbine = TurbineParameters::builder()
//!     .with_rotor_diameter(90.0)
//!     .with_rated_power(Watts::new(2_000_000.0))
//!     .with_power_coefficient(0.4)
//!     .with_efficiency(0.95)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(turbine.rated_speed(), MetersPerSecond::new(12.0));
//! assert!((*turbine.swept_area() - 6361.7).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};

use super::units::{KgPerCubicMeter, Meters, MetersPerSecond, SquareMeters, Watts};
use crate::error::{require_non_negative, require_positive, Result, WindSimError};

/// Theoretical maximum power coefficient (Betz limit, 16/27)
pub const BETZ_LIMIT: f64 = 16.0 / 27.0;

/// Unvalidated turbine description.
///
/// Defaults describe a generic utility-scale machine: 40 m blades,
/// Cp 0.42, 2 MW rated, sea-level air, 3/12/25 m/s operating envelope and no
/// drivetrain loss.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurbineConfig {
    /// Rotor diameter (m)
    pub rotor_diameter: Meters,
    /// Air density (kg/m³)
    pub air_density: KgPerCubicMeter,
    /// Wind speed at which generation starts (m/s)
    pub cut_in_speed: MetersPerSecond,
    /// Wind speed at which rated power is reached (m/s)
    pub rated_speed: MetersPerSecond,
    /// Wind speed at and above which the turbine shuts down (m/s)
    pub cut_out_speed: MetersPerSecond,
    /// Nameplate power (W)
    pub rated_power: Watts,
    /// Rotor power coefficient Cp (0, Betz limit]
    pub power_coefficient: f64,
    /// Mechanical/electrical efficiency η (0, 1]
    pub efficiency: f64,
}

impl Default for TurbineConfig {
    fn default() -> Self {
        TurbineConfig {
            rotor_diameter: Meters::new(80.0),
            air_density: KgPerCubicMeter::SEA_LEVEL_AIR,
            cut_in_speed: MetersPerSecond::new(3.0),
            rated_speed: MetersPerSecond::new(12.0),
            cut_out_speed: MetersPerSecond::new(25.0),
            rated_power: Watts::from_kilowatts(2000.0),
            power_coefficient: 0.42,
            efficiency: 1.0,
        }
    }
}

impl TurbineConfig {
    /// Set rotor diameter in meters
    pub fn with_rotor_diameter(mut self, diameter: f64) -> Self {
        self.rotor_diameter = Meters::new(diameter);
        self
    }

    /// Set rotor diameter from blade length (hub to tip) in meters
    pub fn with_blade_radius(mut self, radius: f64) -> Self {
        self.rotor_diameter = Meters::new(radius * 2.0);
        self
    }

    /// Set air density in kg/m³
    pub fn with_air_density(mut self, density: f64) -> Self {
        self.air_density = KgPerCubicMeter::new(density);
        self
    }

    /// Set cut-in, rated and cut-out speeds in m/s
    pub fn with_speeds(mut self, cut_in: f64, rated: f64, cut_out: f64) -> Self {
        self.cut_in_speed = MetersPerSecond::new(cut_in);
        self.rated_speed = MetersPerSecond::new(rated);
        self.cut_out_speed = MetersPerSecond::new(cut_out);
        self
    }

    /// Set nameplate power
    pub fn with_rated_power(mut self, power: Watts) -> Self {
        self.rated_power = power;
        self
    }

    /// Set rotor power coefficient
    pub fn with_power_coefficient(mut self, cp: f64) -> Self {
        self.power_coefficient = cp;
        self
    }

    /// Set drivetrain efficiency
    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }

    /// Validate and freeze into [`TurbineParameters`].
    ///
    /// # Errors
    ///
    /// Returns [`WindSimError::InvalidParameter`] when:
    /// - diameter, air density or rated power is not finite and positive
    /// - any speed is negative or non-finite
    /// - `cut_in <= rated < cut_out` does not hold
    /// - Cp is outside (0, Betz limit] or η is outside (0, 1]
    pub fn build(self) -> Result<TurbineParameters> {
        require_positive("rotor_diameter", *self.rotor_diameter)?;
        require_positive("air_density", *self.air_density)?;
        require_positive("rated_power", *self.rated_power)?;

        let cut_in = require_non_negative("cut_in_speed", *self.cut_in_speed)?;
        let rated = require_non_negative("rated_speed", *self.rated_speed)?;
        let cut_out = require_non_negative("cut_out_speed", *self.cut_out_speed)?;

        // cut_in == rated is a step curve; anything narrower is inconsistent
        if cut_in > rated {
            return Err(WindSimError::invalid(
                "cut_in_speed",
                format!("must not exceed rated speed ({cut_in} > {rated})"),
            ));
        }
        if rated >= cut_out {
            return Err(WindSimError::invalid(
                "rated_speed",
                format!("must be below cut-out speed ({rated} >= {cut_out})"),
            ));
        }

        let cp = self.power_coefficient;
        if !(cp.is_finite() && cp > 0.0 && cp <= BETZ_LIMIT) {
            return Err(WindSimError::invalid(
                "power_coefficient",
                format!("must be in (0, {BETZ_LIMIT:.4}], got {cp}"),
            ));
        }

        let eta = self.efficiency;
        if !(eta.is_finite() && eta > 0.0 && eta <= 1.0) {
            return Err(WindSimError::invalid(
                "efficiency",
                format!("must be in (0, 1], got {eta}"),
            ));
        }

        Ok(TurbineParameters { config: self })
    }
}

/// Validated, immutable turbine description.
///
/// Deserializing goes through [`TurbineConfig::build`], so an invalid JSON
/// document fails to parse instead of producing a broken record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TurbineConfig", into = "TurbineConfig")]
pub struct TurbineParameters {
    config: TurbineConfig,
}

impl TryFrom<TurbineConfig> for TurbineParameters {
    type Error = WindSimError;

    fn try_from(config: TurbineConfig) -> Result<Self> {
        config.build()
    }
}

impl From<TurbineParameters> for TurbineConfig {
    fn from(params: TurbineParameters) -> Self {
        params.config
    }
}

impl TurbineParameters {
    /// Start from the default custom turbine
    pub fn builder() -> TurbineConfig {
        TurbineConfig::default()
    }

    /// Build one of the reference machines
    pub fn preset(preset: TurbinePreset) -> Self {
        TurbineParameters {
            config: preset.config(),
        }
    }

    /// The underlying configuration (for editing and rebuilding)
    pub fn config(&self) -> &TurbineConfig {
        &self.config
    }

    /// Rotor diameter D (m)
    pub fn rotor_diameter(&self) -> Meters {
        self.config.rotor_diameter
    }

    /// Blade length, half the rotor diameter
    pub fn rotor_radius(&self) -> Meters {
        self.config.rotor_diameter / 2.0
    }

    /// Rotor swept area A = π·(D/2)²
    pub fn swept_area(&self) -> SquareMeters {
        self.config.rotor_diameter.disc_area()
    }

    /// Air density ρ used in the power equation (kg/m³)
    pub fn air_density(&self) -> KgPerCubicMeter {
        self.config.air_density
    }

    /// Speed below which the turbine does not generate
    pub fn cut_in_speed(&self) -> MetersPerSecond {
        self.config.cut_in_speed
    }

    /// Speed from which output is held at rated power
    pub fn rated_speed(&self) -> MetersPerSecond {
        self.config.rated_speed
    }

    /// Speed at and above which the turbine shuts down
    pub fn cut_out_speed(&self) -> MetersPerSecond {
        self.config.cut_out_speed
    }

    /// Maximum electrical output
    pub fn rated_power(&self) -> Watts {
        self.config.rated_power
    }

    /// Aerodynamic power coefficient Cp, at most [`BETZ_LIMIT`]
    pub fn power_coefficient(&self) -> f64 {
        self.config.power_coefficient
    }

    /// Drivetrain and generator efficiency η in (0, 1]
    pub fn efficiency(&self) -> f64 {
        self.config.efficiency
    }
}

/// Reference turbine sizes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurbinePreset {
    /// 1 MW, 32 m blades
    Small,
    /// 2 MW, 45 m blades
    Medium,
    /// 5 MW, 63 m blades
    Large,
}

impl TurbinePreset {
    /// All presets, smallest first
    pub const ALL: [TurbinePreset; 3] = [
        TurbinePreset::Small,
        TurbinePreset::Medium,
        TurbinePreset::Large,
    ];

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            TurbinePreset::Small => "Small (1 MW)",
            TurbinePreset::Medium => "Medium (2 MW)",
            TurbinePreset::Large => "Large (5 MW)",
        }
    }

    /// Parse a case-insensitive preset name (`"small"`, `"medium"`, `"large"`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "small" | "1mw" => Some(TurbinePreset::Small),
            "medium" | "2mw" => Some(TurbinePreset::Medium),
            "large" | "5mw" => Some(TurbinePreset::Large),
            _ => None,
        }
    }

    /// Configuration of this preset. Every preset satisfies all invariants.
    pub fn config(self) -> TurbineConfig {
        let (radius, cp, rated_kw) = match self {
            TurbinePreset::Small => (32.0, 0.42, 1000.0),
            TurbinePreset::Medium => (45.0, 0.45, 2000.0),
            TurbinePreset::Large => (63.0, 0.48, 5000.0),
        };
        TurbineConfig::default()
            .with_blade_radius(radius)
            .with_power_coefficient(cp)
            .with_rated_power(Watts::from_kilowatts(rated_kw))
    }
}
