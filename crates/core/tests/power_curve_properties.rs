//! Power-curve invariants checked over a spread of valid turbine designs
//!
//! 1. Zero output below cut-in and at/above cut-out
//! 2. Output never exceeds rated power
//! 3. Continuous and non-decreasing between cut-in and rated speed
//! 4. Step curves (cut-in = rated) jump straight to rated power

use wind_sim_core::{
    MetersPerSecond, OperatingState, PowerCurveEngine, TurbineParameters, TurbinePreset, Watts,
    WindModel, BETZ_LIMIT,
};

/// Designs covering small/large rotors, thin/dense air, early/late clamping
fn designs() -> Vec<PowerCurveEngine> {
    let mut configs: Vec<_> = TurbinePreset::ALL.iter().map(|p| p.config()).collect();
    configs.extend([
        TurbineParameters::builder()
            .with_rotor_diameter(90.0)
            .with_power_coefficient(0.4)
            .with_efficiency(0.95),
        TurbineParameters::builder()
            .with_rotor_diameter(20.0)
            .with_air_density(1.0)
            .with_speeds(2.5, 11.0, 20.0)
            .with_rated_power(Watts::from_kilowatts(100.0)),
        TurbineParameters::builder()
            .with_rotor_diameter(200.0)
            .with_air_density(1.3)
            .with_power_coefficient(BETZ_LIMIT)
            .with_speeds(3.5, 14.0, 30.0)
            .with_rated_power(Watts::from_kilowatts(3000.0)),
        TurbineParameters::builder()
            .with_speeds(0.0, 0.5, 25.0)
            .with_efficiency(0.5),
    ]);

    configs
        .into_iter()
        .map(|c| PowerCurveEngine::from_config(c).unwrap())
        .collect()
}

fn speed_grid(end: f64, step: f64) -> impl Iterator<Item = MetersPerSecond> {
    (0..=((end / step) as usize)).map(move |i| MetersPerSecond::new(i as f64 * step))
}

#[test]
fn test_zero_outside_operating_range() {
    for engine in designs() {
        let t = engine.turbine();
        for v in speed_grid(40.0, 0.05) {
            if v < t.cut_in_speed() || v >= t.cut_out_speed() {
                assert_eq!(engine.power_at(v), Watts::ZERO, "v = {v}");
            }
        }
    }
}

#[test]
fn test_never_exceeds_rated_power() {
    for engine in designs() {
        let rated = engine.turbine().rated_power();
        for v in speed_grid(40.0, 0.01) {
            assert!(engine.power_at(v) <= rated, "v = {v}");
        }
    }
}

#[test]
fn test_monotone_and_continuous_in_ramp() {
    for engine in designs() {
        let t = engine.turbine();
        let step = 0.001;
        // Largest jump a continuous curve can make in one step near the knee
        let max_jump = engine.power_constant() * 3.0 * (*t.rated_speed()).powi(2) * step * 1.01;

        let ramp: Vec<Watts> = speed_grid(*t.rated_speed(), step)
            .filter(|&v| v >= t.cut_in_speed() && v < t.rated_speed())
            .map(|v| engine.power_at(v))
            .collect();

        for pair in ramp.windows(2) {
            assert!(pair[1] >= pair[0], "power decreased: {:?}", pair);
            assert!(*(pair[1] - pair[0]) <= max_jump, "discontinuity: {:?}", pair);
        }
    }
}

#[test]
fn test_step_curve_when_cut_in_equals_rated() {
    let engine = PowerCurveEngine::from_config(
        TurbineParameters::builder().with_speeds(10.0, 10.0, 25.0),
    )
    .unwrap();
    let rated = engine.turbine().rated_power();

    assert_eq!(engine.power_at(MetersPerSecond::new(9.999)), Watts::ZERO);
    assert_eq!(engine.power_at(MetersPerSecond::new(10.0)), rated);
    assert_eq!(
        engine.operating_state(MetersPerSecond::new(10.0)),
        OperatingState::RatedLoad
    );

    // No intermediate ramp values anywhere
    for v in speed_grid(30.0, 0.01) {
        let p = engine.power_at(v);
        assert!(p == Watts::ZERO || p == rated, "intermediate power {p} at {v}");
    }

    let model = WindModel::new(2.0, MetersPerSecond::new(8.0)).unwrap();
    let metrics = engine.metrics(&model).unwrap();
    assert!((0.0..=1.0).contains(&metrics.capacity_factor));
    assert_eq!(metrics.operating_fraction, metrics.rated_fraction);
}

#[test]
fn test_curve_is_ordered_and_bounded() {
    let model = WindModel::new(2.2, MetersPerSecond::new(9.0)).unwrap();
    for engine in designs() {
        let curve = engine.curve(&model);
        assert_eq!(curve.len(), model.bins());
        assert!(curve.windows(2).all(|w| w[0].speed < w[1].speed));
        assert!(curve
            .iter()
            .all(|s| s.power >= Watts::ZERO && s.power <= engine.turbine().rated_power()));
    }
}
