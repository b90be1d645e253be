//! Monte-Carlo runs over seeded wind draws
//!
//! Draws `n` wind speeds from the Weibull model, evaluates the power curve at
//! each, and summarises the sample. Output is meant for scatter plots,
//! histograms and per-sample tables; the deterministic figures come from
//! [`PowerCurveEngine::metrics`].

use serde::Serialize;
use tracing::debug;

use crate::core_types::units::{MetersPerSecond, Watts};
use crate::error::{Result, WindSimError};
use crate::power::metrics::capacity_factor;
use crate::power::{OperatingState, PowerCurveEngine};
use crate::wind::{WindModel, WindSampler};

/// Equal-width histogram of a sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Lower edge of the first bin
    pub min: f64,
    /// Upper edge of the last bin
    pub max: f64,
    /// Count per bin
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning their range.
    ///
    /// The maximum value falls into the last bin. An empty sample or `bins == 0`
    /// yields an empty histogram.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let finite = || values.iter().copied().filter(|v| v.is_finite());
        let min = finite().fold(f64::INFINITY, f64::min);
        let max = finite().fold(f64::NEG_INFINITY, f64::max);

        if bins == 0 || min > max {
            return Histogram {
                min: 0.0,
                max: 0.0,
                counts: Vec::new(),
            };
        }

        let mut counts = vec![0; bins];
        let width = (max - min) / bins as f64;
        for v in finite() {
            let idx = if width > 0.0 {
                (((v - min) / width) as usize).min(bins - 1)
            } else {
                0
            };
            counts[idx] += 1;
        }

        Histogram { min, max, counts }
    }

    /// Width of each bin
    pub fn bin_width(&self) -> f64 {
        if self.counts.is_empty() {
            0.0
        } else {
            (self.max - self.min) / self.counts.len() as f64
        }
    }

    /// `(lower edge, count)` for every bin
    pub fn bins(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        let width = self.bin_width();
        self.counts
            .iter()
            .enumerate()
            .map(move |(i, &count)| (self.min + width * i as f64, count))
    }

    /// Total number of binned values
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// One seeded Monte-Carlo run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledRun {
    /// Seed the run was drawn with
    pub seed: u64,
    /// Drawn wind speeds, in draw order
    pub speeds: Vec<MetersPerSecond>,
    /// Power at each drawn speed
    pub powers: Vec<Watts>,
    /// Operating state at each drawn speed
    pub states: Vec<OperatingState>,
    /// Sample mean wind speed
    pub mean_speed: MetersPerSecond,
    /// Sample mean power
    pub mean_power: Watts,
    /// Sample mean power over rated power
    pub capacity_factor: f64,
}

impl SampledRun {
    /// Draw `samples` speeds with `seed` and evaluate `engine` at each.
    ///
    /// # Errors
    ///
    /// Returns [`WindSimError::InvalidParameter`] if `samples` is zero and
    /// [`WindSimError::ComputationError`] if the sampled capacity factor leaves [0, 1].
    pub fn simulate(
        engine: &PowerCurveEngine,
        model: &WindModel,
        samples: usize,
        seed: u64,
    ) -> Result<Self> {
        if samples == 0 {
            return Err(WindSimError::invalid("samples", "must be at least 1"));
        }

        let speeds = WindSampler::new(model, seed).draw(samples);
        let powers: Vec<Watts> = speeds.iter().map(|&v| engine.power_at(v)).collect();
        let states = speeds.iter().map(|&v| engine.operating_state(v)).collect();

        let n = samples as f64;
        let mean_speed = MetersPerSecond::new(speeds.iter().map(|v| **v).sum::<f64>() / n);
        let mean_power = powers.iter().copied().sum::<Watts>() / n;
        let capacity_factor = capacity_factor(mean_power, engine.turbine().rated_power())?;

        debug!(
            samples,
            seed,
            mean_speed = *mean_speed,
            capacity_factor,
            "Sampled run complete"
        );

        Ok(SampledRun {
            seed,
            speeds,
            powers,
            states,
            mean_speed,
            mean_power,
            capacity_factor,
        })
    }

    /// Number of draws
    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }

    /// Fraction of draws at which the turbine generates
    pub fn operating_fraction(&self) -> f64 {
        if self.states.is_empty() {
            return 0.0;
        }
        let operating = self.states.iter().filter(|s| s.is_operating()).count();
        operating as f64 / self.states.len() as f64
    }

    /// Histogram of drawn wind speeds (m/s)
    pub fn wind_histogram(&self, bins: usize) -> Histogram {
        let values: Vec<f64> = self.speeds.iter().map(|v| **v).collect();
        Histogram::from_values(&values, bins)
    }

    /// Histogram of power output (kW)
    pub fn power_histogram(&self, bins: usize) -> Histogram {
        let values: Vec<f64> = self.powers.iter().map(|p| p.to_kilowatts()).collect();
        Histogram::from_values(&values, bins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{TurbineParameters, TurbinePreset};

    fn engine() -> PowerCurveEngine {
        PowerCurveEngine::new(TurbineParameters::preset(TurbinePreset::Medium))
    }

    fn model() -> WindModel {
        WindModel::new(2.0, MetersPerSecond::new(7.0)).unwrap()
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let a = SampledRun::simulate(&engine(), &model(), 2_000, 11).unwrap();
        let b = SampledRun::simulate(&engine(), &model(), 2_000, 11).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2_000);
    }

    #[test]
    fn test_zero_samples_rejected() {
        let err = SampledRun::simulate(&engine(), &model(), 0, 1).unwrap_err();
        assert!(matches!(
            err,
            WindSimError::InvalidParameter {
                name: "samples",
                ..
            }
        ));
    }

    #[test]
    fn test_sampled_capacity_factor_near_discretized() {
        let engine = engine();
        let model = model();
        let run = SampledRun::simulate(&engine, &model, 50_000, 5).unwrap();
        let metrics = engine.metrics(&model).unwrap();
        assert!(
            (run.capacity_factor - metrics.capacity_factor).abs() < 0.02,
            "sampled {} vs discretized {}",
            run.capacity_factor,
            metrics.capacity_factor
        );
    }

    #[test]
    fn test_powers_match_curve() {
        let engine = engine();
        let run = SampledRun::simulate(&engine, &model(), 100, 3).unwrap();
        for ((&v, &p), &s) in run.speeds.iter().zip(&run.powers).zip(&run.states) {
            assert_eq!(p, engine.power_at(v));
            assert_eq!(s, engine.operating_state(v));
        }
    }

    #[test]
    fn test_histogram_counts_everything() {
        let run = SampledRun::simulate(&engine(), &model(), 1_000, 8).unwrap();
        let hist = run.wind_histogram(50);
        assert_eq!(hist.counts.len(), 50);
        assert_eq!(hist.total(), 1_000);
        assert_eq!(run.power_histogram(20).total(), 1_000);
    }

    #[test]
    fn test_histogram_edges() {
        let hist = Histogram::from_values(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(hist.counts, vec![1, 1, 1, 2]);
        assert_eq!(hist.bin_width(), 1.0);
        let edges: Vec<f64> = hist.bins().map(|(edge, _)| edge).collect();
        assert_eq!(edges, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_histogram_degenerate() {
        assert!(Histogram::from_values(&[], 10).counts.is_empty());
        assert!(Histogram::from_values(&[1.0, 2.0], 0).counts.is_empty());

        let constant = Histogram::from_values(&[5.0, 5.0, 5.0], 3);
        assert_eq!(constant.counts, vec![3, 0, 0]);
    }
}
