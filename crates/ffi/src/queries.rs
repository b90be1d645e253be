use wind_sim_core::{MetersPerSecond, OperatingState, PerformanceMetrics, PowerCurveSample};

use crate::error::{DefaultWindSimError, WindSimErrorCode};
use crate::helpers::{handle_ffi_result_error, instance_from_ptr, track_error};
use crate::instance::WindSimInstance;

/// Operating regime of a curve point.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindSimOperatingState {
    BelowCutIn = 0,
    PartialLoad = 1,
    RatedLoad = 2,
    Shutdown = 3,
}

impl From<OperatingState> for WindSimOperatingState {
    fn from(state: OperatingState) -> Self {
        match state {
            OperatingState::BelowCutIn => Self::BelowCutIn,
            OperatingState::PartialLoad => Self::PartialLoad,
            OperatingState::RatedLoad => Self::RatedLoad,
            OperatingState::Shutdown => Self::Shutdown,
        }
    }
}

/// One power-curve point. Keep this layout stable for C/C++/C# consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSimCurvePoint {
    /// Wind speed (m/s)
    pub speed: f64,
    /// Electrical output (kW)
    pub power_kw: f64,
    pub state: WindSimOperatingState,
}

impl From<&PowerCurveSample> for WindSimCurvePoint {
    fn from(sample: &PowerCurveSample) -> Self {
        Self {
            speed: *sample.speed,
            power_kw: sample.power.to_kilowatts(),
            state: sample.state.into(),
        }
    }
}

/// Aggregate performance figures in display-friendly units.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindSimMetrics {
    /// Long-run average output (kW)
    pub expected_power_kw: f64,
    /// Expected power over rated power, in [0, 1]
    pub capacity_factor: f64,
    /// Expected energy per year (MWh)
    pub annual_energy_mwh: f64,
    /// Expected energy per day (kWh)
    pub daily_energy_kwh: f64,
    /// Mean wind speed of the site (m/s)
    pub mean_wind_speed: f64,
    /// Fraction of time generating
    pub operating_fraction: f64,
    /// Fraction of time at rated output
    pub rated_fraction: f64,
}

impl From<&PerformanceMetrics> for WindSimMetrics {
    fn from(m: &PerformanceMetrics) -> Self {
        Self {
            expected_power_kw: m.expected_power.to_kilowatts(),
            capacity_factor: m.capacity_factor,
            annual_energy_mwh: m.annual_energy.to_megawatt_hours(),
            daily_energy_kwh: m.daily_energy.to_kilowatt_hours(),
            mean_wind_speed: *m.mean_wind_speed,
            operating_fraction: m.operating_fraction,
            rated_fraction: m.rated_fraction,
        }
    }
}

/// Electrical output (kW) at a single wind speed.
///
/// Returns
/// - `WindSimErrorCode::Ok` (0) with the power in `out_power_kw`
/// - `WindSimErrorCode::NullPointer` if `ptr` or `out_power_kw` is null
/// - `WindSimErrorCode::InvalidParameter` if `speed` is negative or not finite
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `wind_sim_new`.
/// - `out_power_kw` must be null or valid for one `f64` write.
#[no_mangle]
pub unsafe extern "C" fn wind_sim_power_at(
    ptr: *const WindSimInstance,
    speed: f64,
    out_power_kw: *mut f64,
) -> WindSimErrorCode {
    if out_power_kw.is_null() {
        return track_error(&DefaultWindSimError::null_pointer("out_power_kw"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        if !speed.is_finite() || speed < 0.0 {
            return Err(DefaultWindSimError::invalid_parameter(format!(
                "Invalid parameter 'speed': must be finite and non-negative, got {speed}"
            )));
        }

        let power = instance.engine.power_at(MetersPerSecond::new(speed));
        unsafe {
            *out_power_kw = power.to_kilowatts();
        }
        Ok(())
    })
}

/// Compute performance metrics for the instance's turbine and site.
///
/// Returns
/// - `WindSimErrorCode::Ok` (0) with `out_metrics` populated
/// - `WindSimErrorCode::NullPointer` if `ptr` or `out_metrics` is null
/// - `WindSimErrorCode::ComputationError` if a metric leaves its valid range
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `wind_sim_new`.
/// - `out_metrics` must be null or valid for one `WindSimMetrics` write.
#[no_mangle]
pub unsafe extern "C" fn wind_sim_get_metrics(
    ptr: *const WindSimInstance,
    out_metrics: *mut WindSimMetrics,
) -> WindSimErrorCode {
    if out_metrics.is_null() {
        return track_error(&DefaultWindSimError::null_pointer("out_metrics"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let metrics = instance.engine.metrics(&instance.model)?;
        unsafe {
            *out_metrics = WindSimMetrics::from(&metrics);
        }
        Ok(())
    })
}

/// Return a borrowed pointer to the precomputed power curve.
///
/// The array holds one point per discretization bin, ordered by speed. It
/// stays valid until `wind_sim_destroy` is called. **DO NOT FREE THIS POINTER**.
///
/// Returns
/// - `WindSimErrorCode::Ok` (0) with the array in `out_array` and its length in `out_len`
/// - `WindSimErrorCode::NullPointer` if `ptr`, `out_len` or `out_array` is null
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `wind_sim_new`.
/// - `out_len` and `out_array` must be null or valid for one write each.
///
/// Example:
/// ```cpp
/// uintptr_t len = 0;
/// const WindSimCurvePoint* curve = nullptr;
/// if (wind_sim_get_curve(sim, &len, &curve) == WindSimErrorCode::Ok) {
///     for (uintptr_t i = 0; i < len; i++) {
///         plot(curve[i].speed, curve[i].power_kw);
///     }
/// }
/// ```
#[no_mangle]
pub unsafe extern "C" fn wind_sim_get_curve(
    ptr: *const WindSimInstance,
    out_len: *mut usize,
    out_array: *mut *const WindSimCurvePoint,
) -> WindSimErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultWindSimError::null_pointer("out_len"));
    }

    if out_array.is_null() {
        unsafe {
            *out_len = 0;
        }
        return track_error(&DefaultWindSimError::null_pointer("out_array"));
    }

    handle_ffi_result_error(|| {
        let instance = unsafe { instance_from_ptr(ptr) }?;
        unsafe {
            *out_len = instance.curve.len();
            *out_array = instance.curve.as_ptr();
        }
        Ok(())
    })
}
