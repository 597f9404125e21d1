use std::fmt::Debug;
use std::ops::RangeBounds;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AnalysisConfig – tunables of the pipeline and the charts
// ---------------------------------------------------------------------------

/// Denominator used for the standard deviation of the outlier filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdDevKind {
    /// Divide by `N - 1`.
    #[default]
    Sample,
    /// Divide by `N`.
    Population,
}

impl StdDevKind {
    /// Delta degrees of freedom subtracted from `N`.
    pub fn ddof(self) -> usize {
        match self {
            StdDevKind::Sample => 1,
            StdDevKind::Population => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlierConfig {
    /// Records at or below `mean - sigma_multiplier * std_dev` are dropped.
    pub sigma_multiplier: f64,
    pub std_dev: StdDevKind,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            sigma_multiplier: 2.0,
            std_dev: StdDevKind::Sample,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Normal quantile for the regression band (1.96 ≈ 95 %).
    pub confidence_z: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self { confidence_z: 1.96 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub point_alpha: f32,
    pub color_by_month: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            point_alpha: 0.3,
            color_by_month: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub outliers: OutlierConfig,
    pub trend: TrendConfig,
    pub style: StyleConfig,
}

impl AnalysisConfig {
    /// Load and validate a TOML config file. Absent keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let text =
            std::fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {file:?}"))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(text).context("failed to deserialize config")?;
        config.validate().context("failed to validate config")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let k = self.outliers.sigma_multiplier;
        if !(k > 0.0 && k <= 10.0) {
            bail!("sigma multiplier must be in the range (0, 10], but is {k:?}");
        }
        check_num(self.style.point_alpha, 0.0..=1.0).context("invalid point alpha")?;
        let z = self.trend.confidence_z;
        if !(z > 0.0 && z.is_finite()) {
            bail!("confidence z must be positive and finite, but is {z:?}");
        }
        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
