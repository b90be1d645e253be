//! Wind regime (Weibull) parameters
//!
//! A site's wind climate is summarised by the two Weibull parameters: shape `k`
//! (spread of the distribution, ~2 for most inland sites) and scale `c`
//! (characteristic speed, m/s). The optional truncation bound and bin count
//! control how the distribution is discretized; when omitted the defaults below
//! are resolved at validation time and picked up by [`crate::wind::WindModel`].

use serde::{Deserialize, Serialize};

use super::units::MetersPerSecond;
use crate::error::{require_positive, Result, WindSimError};
use crate::wind::weibull::{tail_quantile, weibull_cdf};

/// Probability mass left above the default truncation bound
pub const DEFAULT_TAIL_PROBABILITY: f64 = 0.001;

/// Default number of discretization bins
pub const DEFAULT_BINS: usize = 200;

/// Upper limit on bins, keeps a single evaluation bounded
pub const MAX_BINS: usize = 1_000_000;

/// Unvalidated wind regime description.
///
/// Defaults describe a moderate inland site: k = 2.0, c = 7.0 m/s.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindRegimeConfig {
    /// Weibull shape parameter k (> 0)
    pub shape: f64,
    /// Weibull scale parameter c (> 0)
    pub scale: MetersPerSecond,
    /// Upper speed bound of the discretization; `None` captures 99.9% of mass
    pub upper_bound: Option<MetersPerSecond>,
    /// Number of bins; `None` uses at least [`DEFAULT_BINS`]
    pub bins: Option<usize>,
}

impl Default for WindRegimeConfig {
    fn default() -> Self {
        WindRegimeConfig {
            shape: 2.0,
            scale: MetersPerSecond::new(7.0),
            upper_bound: None,
            bins: None,
        }
    }
}

impl WindRegimeConfig {
    /// Validate and freeze into [`WindRegimeParameters`], resolving the
    /// truncation bound and bin count.
    ///
    /// The resolved grid must be fine enough to represent the distribution:
    /// no bin may be wider than the median speed `c·(ln 2)^(1/k)`. Without an
    /// explicit bin count, [`DEFAULT_BINS`] is raised until that holds.
    ///
    /// # Errors
    ///
    /// Returns [`WindSimError::InvalidParameter`] when
    /// - shape or scale is not finite and positive
    /// - an explicit upper bound is not finite and positive, or holds no
    ///   probability mass
    /// - an explicit bin count is zero, above [`MAX_BINS`], or too coarse
    /// - the shape is so small that the default bound is not finite, or that
    ///   resolving the median needs more than [`MAX_BINS`] bins
    pub fn build(self) -> Result<WindRegimeParameters> {
        let shape = require_positive("shape", self.shape)?;
        let scale = MetersPerSecond::new(require_positive("scale", *self.scale)?);

        let upper_bound = match self.upper_bound {
            Some(vmax) => MetersPerSecond::new(require_positive("upper_bound", *vmax)?),
            None => {
                let vmax = tail_quantile(shape, scale, DEFAULT_TAIL_PROBABILITY);
                if !vmax.is_finite() {
                    return Err(WindSimError::invalid(
                        "shape",
                        format!(
                            "k = {shape} is too small, the 99.9% speed bound c·(ln 1000)^(1/k) overflows"
                        ),
                    ));
                }
                vmax
            }
        };

        if weibull_cdf(shape, scale, upper_bound) <= 0.0 {
            return Err(WindSimError::invalid(
                "upper_bound",
                format!("{upper_bound} holds no probability mass for k = {shape}, c = {scale}"),
            ));
        }

        let median = tail_quantile(shape, scale, 0.5);
        // Infinite when the median underflows to zero
        let min_bins = (*upper_bound / *median).ceil();

        let bins = match self.bins {
            Some(bins) => {
                if bins == 0 || bins > MAX_BINS {
                    return Err(WindSimError::invalid(
                        "bins",
                        format!("must be in 1..={MAX_BINS}, got {bins}"),
                    ));
                }
                if (bins as f64) < min_bins {
                    return Err(WindSimError::invalid(
                        "bins",
                        format!(
                            "{bins} bins of {} over [0, {upper_bound}] are wider than the median speed {median}; \
                             use at least {min_bins} bins or a lower upper_bound",
                            upper_bound / bins as f64
                        ),
                    ));
                }
                bins
            }
            None => {
                if min_bins > MAX_BINS as f64 {
                    let name = if self.upper_bound.is_some() {
                        "upper_bound"
                    } else {
                        "shape"
                    };
                    return Err(WindSimError::invalid(
                        name,
                        format!(
                            "resolving the median speed {median} up to {upper_bound} needs more than {MAX_BINS} bins"
                        ),
                    ));
                }
                DEFAULT_BINS.max(min_bins as usize)
            }
        };

        Ok(WindRegimeParameters {
            config: self,
            upper_bound,
            bins,
        })
    }
}

/// Validated Weibull regime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WindRegimeConfig", into = "WindRegimeConfig")]
pub struct WindRegimeParameters {
    config: WindRegimeConfig,
    upper_bound: MetersPerSecond,
    bins: usize,
}

impl TryFrom<WindRegimeConfig> for WindRegimeParameters {
    type Error = WindSimError;

    fn try_from(config: WindRegimeConfig) -> Result<Self> {
        config.build()
    }
}

impl From<WindRegimeParameters> for WindRegimeConfig {
    fn from(params: WindRegimeParameters) -> Self {
        params.config
    }
}

impl WindRegimeParameters {
    /// Weibull regime with default discretization.
    ///
    /// # Errors
    ///
    /// Returns [`WindSimError::InvalidParameter`] if `shape` or `scale` is not
    /// finite and positive, or if `shape` is too small to discretize (see
    /// [`WindRegimeConfig::build`]).
    pub fn new(shape: f64, scale: MetersPerSecond) -> Result<Self> {
        WindRegimeConfig {
            shape,
            scale,
            ..WindRegimeConfig::default()
        }
        .build()
    }

    /// Replace the truncation bound.
    ///
    /// # Errors
    ///
    /// Returns [`WindSimError::InvalidParameter`] if `vmax` is not finite and
    /// positive, holds no probability mass, or is too wide for the configured bins.
    pub fn with_upper_bound(self, vmax: MetersPerSecond) -> Result<Self> {
        WindRegimeConfig {
            upper_bound: Some(vmax),
            ..self.config
        }
        .build()
    }

    /// Replace the bin count.
    ///
    /// # Errors
    ///
    /// Returns [`WindSimError::InvalidParameter`] if `bins` is zero, above
    /// [`MAX_BINS`], or leaves bins wider than the median speed.
    pub fn with_bins(self, bins: usize) -> Result<Self> {
        WindRegimeConfig {
            bins: Some(bins),
            ..self.config
        }
        .build()
    }

    pub fn shape(&self) -> f64 {
        self.config.shape
    }

    pub fn scale(&self) -> MetersPerSecond {
        self.config.scale
    }

    /// Explicit truncation bound, if one was configured
    pub fn upper_bound(&self) -> Option<MetersPerSecond> {
        self.config.upper_bound
    }

    /// Truncation bound in use: the explicit one or the 99.9% quantile
    pub fn resolved_upper_bound(&self) -> MetersPerSecond {
        self.upper_bound
    }

    /// Bin count in use: the explicit one, or [`DEFAULT_BINS`] raised until
    /// bins are no wider than the median speed
    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn config(&self) -> &WindRegimeConfig {
        &self.config
    }
}
