//! Calibration and reference-scenario tests
//!
//! Validates the discretized integration against closed-form Weibull moments
//! and checks the reference 2 MW turbine lands in a plausible capacity-factor band.
//!
//! Run tests with: `cargo test --test calibration`

use approx::assert_relative_eq;
use wind_sim_core::{
    MetersPerSecond, PowerCurveEngine, Scenario, TurbineConfig, TurbineParameters, Watts,
    WindModel, WindRegimeParameters, WindSimError,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn reference_turbine() -> TurbineConfig {
    TurbineParameters::builder()
        .with_rotor_diameter(90.0)
        .with_air_density(1.225)
        .with_speeds(3.0, 12.0, 25.0)
        .with_rated_power(Watts::new(2_000_000.0))
        .with_power_coefficient(0.4)
        .with_efficiency(0.95)
}

/// Turbine whose cubic region covers the whole discretized range unclamped
fn pure_cubic_turbine() -> PowerCurveEngine {
    PowerCurveEngine::from_config(
        reference_turbine()
            .with_speeds(0.0, 99.0, 100.0)
            .with_rated_power(Watts::new(1e12)),
    )
    .unwrap()
}

fn wide_model(shape: f64, scale: f64) -> WindModel {
    let regime = WindRegimeParameters::new(shape, MetersPerSecond::new(scale))
        .and_then(|r| r.with_upper_bound(MetersPerSecond::new(scale * 6.0)))
        .and_then(|r| r.with_bins(2_000))
        .unwrap();
    WindModel::from_regime(&regime)
}

#[test]
fn test_reference_capacity_factor_is_plausible() {
    let engine = PowerCurveEngine::from_config(reference_turbine()).unwrap();
    let model = WindModel::new(2.0, MetersPerSecond::new(8.0)).unwrap();
    let metrics = engine.metrics(&model).unwrap();

    assert!(
        (0.25..=0.45).contains(&metrics.capacity_factor),
        "capacity factor {} outside [0.25, 0.45]",
        metrics.capacity_factor
    );
    // ~6.3 GWh/year for a 2 MW machine at CF ≈ 0.36
    let aep_mwh = metrics.annual_energy.to_megawatt_hours();
    assert!(aep_mwh > 4_000.0 && aep_mwh < 8_000.0, "AEP {aep_mwh} MWh");
}

#[test]
fn test_reference_capacity_factor_stable_across_resolution() {
    let engine = PowerCurveEngine::from_config(reference_turbine()).unwrap();
    let coarse = WindRegimeParameters::new(2.0, MetersPerSecond::new(8.0))
        .and_then(|r| r.with_bins(200))
        .unwrap();
    let fine = coarse.clone().with_bins(5_000).unwrap();

    let cf_coarse = engine
        .metrics(&WindModel::from_regime(&coarse))
        .unwrap()
        .capacity_factor;
    let cf_fine = engine
        .metrics(&WindModel::from_regime(&fine))
        .unwrap()
        .capacity_factor;

    // Step discontinuities at cut-in and rated limit midpoint-rule accuracy
    assert!((cf_coarse - cf_fine).abs() < 0.005, "{cf_coarse} vs {cf_fine}");
}

#[test]
fn test_cubic_region_matches_rayleigh_closed_form() {
    // E[v³] = c³·Γ(1 + 3/k); Γ(2.5) = 0.75·√π
    let engine = pure_cubic_turbine();
    let c = 8.0_f64;
    let model = wide_model(2.0, c);

    let expected = engine.power_constant() * c.powi(3) * 0.75 * std::f64::consts::PI.sqrt();
    let metrics = engine.metrics(&model).unwrap();

    assert_relative_eq!(*metrics.expected_power, expected, max_relative = 1e-3);
}

#[test]
fn test_cubic_region_matches_weibull_k3_closed_form() {
    // k = 3: Γ(2) = 1, so E[v³] = c³
    let engine = pure_cubic_turbine();
    let c = 7.0_f64;
    let model = wide_model(3.0, c);

    let expected = engine.power_constant() * c.powi(3);
    let metrics = engine.metrics(&model).unwrap();

    assert_relative_eq!(*metrics.expected_power, expected, max_relative = 1e-3);
}

#[test]
fn test_weights_sum_to_one_across_regimes() {
    for shape in [0.25, 0.4, 0.6, 1.0, 1.5, 2.0, 2.5, 3.5, 6.0] {
        for scale in [2.0, 5.0, 8.0, 12.0, 20.0] {
            let model = WindModel::new(shape, MetersPerSecond::new(scale)).unwrap();
            let total: f64 = model.discretize().iter().map(|b| b.weight).sum();
            assert!(
                (total - 1.0).abs() < 1e-6,
                "k={shape}, c={scale}: weights sum to {total}"
            );
        }
    }
}

#[test]
fn test_capacity_factor_bounded_across_regimes() {
    let engine = PowerCurveEngine::from_config(reference_turbine()).unwrap();
    for shape in [0.8, 1.5, 2.0, 3.0, 5.0] {
        for scale in [1.0, 4.0, 8.0, 15.0, 30.0] {
            let model = WindModel::new(shape, MetersPerSecond::new(scale)).unwrap();
            let metrics = engine.metrics(&model).unwrap();
            assert!(
                (0.0..=1.0).contains(&metrics.capacity_factor),
                "k={shape}, c={scale}: cf {}",
                metrics.capacity_factor
            );
            assert!(metrics.operating_fraction <= 1.0);
        }
    }
}

#[test]
fn test_degenerate_shapes_rejected() {
    for shape in [0.002, 0.01, 0.1] {
        let err = WindModel::new(shape, MetersPerSecond::new(8.0)).unwrap_err();
        assert!(
            matches!(err, WindSimError::InvalidParameter { name: "shape", .. }),
            "k={shape}: {err}"
        );
    }
}

#[test]
fn test_zero_scale_rejected() {
    let err = WindModel::new(2.0, MetersPerSecond::new(0.0)).unwrap_err();
    assert!(matches!(
        err,
        WindSimError::InvalidParameter { name: "scale", .. }
    ));
}

#[test]
fn test_scenario_round_trip_through_json() {
    let json = r#"{
        "turbine": {
            "rotor_diameter": 90.0,
            "power_coefficient": 0.4,
            "efficiency": 0.95
        },
        "regime": { "shape": 2.0, "scale": 8.0 }
    }"#;

    let scenario: Scenario = serde_json::from_str(json).unwrap();
    let estimate = scenario.evaluate().unwrap();
    assert!(estimate.metrics.capacity_factor > 0.25);
    assert_eq!(estimate.curve.len(), 200);
}

#[test]
fn test_invalid_json_scenario_rejected() {
    let json = r#"{
        "turbine": { "power_coefficient": 0.7 },
        "regime": { "shape": 2.0, "scale": 8.0 }
    }"#;
    let err = serde_json::from_str::<Scenario>(json).unwrap_err();
    assert!(err.to_string().contains("power_coefficient"), "{err}");
}
