use std::ptr;

use wind_sim_core::{
    KgPerCubicMeter, Meters, MetersPerSecond, PowerCurveEngine, TurbineConfig, Watts, WindModel,
    WindRegimeConfig,
};

use crate::error::{DefaultWindSimError, WindSimErrorCode};
use crate::helpers::{track_error, track_result};
use crate::queries::WindSimCurvePoint;

/// Turbine design as passed across the C boundary.
///
/// Speeds in m/s, rotor diameter in m, air density in kg/m³, rated power in kW.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSimTurbine {
    pub rotor_diameter: f64,
    pub air_density: f64,
    pub cut_in_speed: f64,
    pub rated_speed: f64,
    pub cut_out_speed: f64,
    pub rated_power_kw: f64,
    pub power_coefficient: f64,
    pub efficiency: f64,
}

impl From<&WindSimTurbine> for TurbineConfig {
    fn from(t: &WindSimTurbine) -> Self {
        TurbineConfig {
            rotor_diameter: Meters::new(t.rotor_diameter),
            air_density: KgPerCubicMeter::new(t.air_density),
            cut_in_speed: MetersPerSecond::new(t.cut_in_speed),
            rated_speed: MetersPerSecond::new(t.rated_speed),
            cut_out_speed: MetersPerSecond::new(t.cut_out_speed),
            rated_power: Watts::from_kilowatts(t.rated_power_kw),
            power_coefficient: t.power_coefficient,
            efficiency: t.efficiency,
        }
    }
}

/// Weibull wind regime as passed across the C boundary.
///
/// `upper_bound == 0.0` selects the default 99.9% quantile and `bins == 0`
/// selects the default resolution.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSimRegime {
    pub shape: f64,
    pub scale: f64,
    pub upper_bound: f64,
    pub bins: usize,
}

impl From<&WindSimRegime> for WindRegimeConfig {
    fn from(r: &WindSimRegime) -> Self {
        WindRegimeConfig {
            shape: r.shape,
            scale: MetersPerSecond::new(r.scale),
            upper_bound: (r.upper_bound != 0.0).then(|| MetersPerSecond::new(r.upper_bound)),
            bins: (r.bins != 0).then_some(r.bins),
        }
    }
}

/// Opaque handle owning one validated turbine/site pair.
///
/// The instance is immutable after creation, so every query may be called
/// concurrently from any thread. The power curve is evaluated once up front and
/// handed out as a borrowed array by `wind_sim_get_curve`.
pub struct WindSimInstance {
    pub(crate) engine: PowerCurveEngine,
    pub(crate) model: WindModel,
    pub(crate) curve: Vec<WindSimCurvePoint>,
}

impl WindSimInstance {
    /// Validate inputs and precompute the power curve.
    ///
    /// # Errors
    ///
    /// Returns `WindSimErrorCode::InvalidParameter` if any turbine or regime
    /// parameter fails validation.
    pub(crate) fn new(
        turbine: &WindSimTurbine,
        regime: &WindSimRegime,
    ) -> Result<Box<Self>, DefaultWindSimError> {
        let engine = PowerCurveEngine::from_config(turbine.into())?;
        let regime = WindRegimeConfig::from(regime).build()?;
        let model = WindModel::from_regime(&regime);

        let curve = engine
            .curve(&model)
            .iter()
            .map(WindSimCurvePoint::from)
            .collect();

        Ok(Box::new(Self {
            engine,
            model,
            curve,
        }))
    }
}

/// Create a new wind simulation instance and return it via out-parameter.
///
/// Returns
/// - `WindSimErrorCode::Ok` (0) with a valid pointer in `out_instance`
/// - `WindSimErrorCode::NullPointer` if `out_instance` is null
/// - `WindSimErrorCode::InvalidParameter` if validation fails; `out_instance` is set to null
///
/// Use `wind_sim_get_last_error()` for the failing parameter and reason.
///
/// # Safety
/// `out_instance` must be null or a valid pointer to writable storage for one pointer.
///
/// Example:
/// ```cpp
/// WindSimTurbine turbine = {90.0, 1.225, 3.0, 12.0, 25.0, 2000.0, 0.4, 0.95};
/// WindSimRegime regime = {2.0, 8.0, 0.0, 0};
/// WindSimInstance* sim = nullptr;
/// if (wind_sim_new(turbine, regime, &sim) != WindSimErrorCode::Ok) {
///     fprintf(stderr, "%s\n", wind_sim_get_last_error());
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn wind_sim_new(
    turbine: WindSimTurbine,
    regime: WindSimRegime,
    out_instance: *mut *mut WindSimInstance,
) -> WindSimErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultWindSimError::null_pointer("out_instance"));
    }

    match track_result(WindSimInstance::new(&turbine, &regime)) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            WindSimErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Destroy an instance previously created by `wind_sim_new`.
///
/// Passing null is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `wind_sim_new` and not freed already.
/// - Any array borrowed through `wind_sim_get_curve` is invalid afterwards.
#[no_mangle]
pub unsafe extern "C" fn wind_sim_destroy(ptr: *mut WindSimInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: `ptr` came from `Box::into_raw` in `wind_sim_new` and is not aliased
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
