//! The exploratory pipeline: filter → monthly means → normalize → trend.

pub mod seasonal;
pub mod stats;
pub mod trend;

use std::fmt;

use crate::config::AnalysisConfig;
use crate::data::filter::{OutlierReport, filter_outliers};
use crate::data::model::IceDataset;

use seasonal::{MONTH_NAMES, MonthlyMeans, deseasonalize};
use trend::LinearFit;

/// Every derived series of one pipeline run. The input is kept alongside.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub raw: IceDataset,
    pub outliers: OutlierReport,
    pub monthly_means: MonthlyMeans,
    pub normalized: IceDataset,
    /// Normalized extent regressed on year.
    pub trend: LinearFit,
    pub confidence_z: f64,
}

impl Analysis {
    pub fn run(raw: IceDataset, config: &AnalysisConfig) -> Self {
        let outliers = filter_outliers(&raw, &config.outliers);
        let filtered = &outliers.retained;

        let monthly_means = MonthlyMeans::compute(filtered);
        let normalized = deseasonalize(filtered, &monthly_means);
        let trend = LinearFit::fit(&normalized.years(), &normalized.extents());

        if trend.is_defined() {
            log::info!(
                "Deseasonalized trend: {:+.5} per year (R² {:.3}, n = {})",
                trend.slope,
                trend.r_squared,
                trend.n
            );
        } else {
            log::warn!("Trend is undefined for {} usable points", trend.n);
        }

        Self {
            raw,
            outliers,
            monthly_means,
            normalized,
            trend,
            confidence_z: config.trend.confidence_z,
        }
    }

    pub fn filtered(&self) -> &IceDataset {
        &self.outliers.retained
    }
}

/// Plain-text report used by `--summary`.
impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.outliers;
        writeln!(f, "observations     {}", self.raw.len())?;
        if let Some((first, last)) = self.raw.year_range() {
            writeln!(f, "years            {first}–{last}")?;
        }
        writeln!(f, "mean extent      {:.4}", o.mean)?;
        writeln!(f, "std dev          {:.4}", o.std_dev)?;
        writeln!(f, "threshold        {:.4}", o.threshold)?;
        writeln!(f, "removed          {}", o.removed)?;
        writeln!(f)?;
        writeln!(f, "month  count  mean")?;
        for (slot, name) in MONTH_NAMES.iter().enumerate() {
            let month = slot as u8 + 1;
            writeln!(
                f,
                "{name:<5}  {:>5}  {:.4}",
                self.monthly_means.count(month),
                self.monthly_means.get(month)
            )?;
        }
        let empty = self.monthly_means.empty_months();
        if !empty.is_empty() {
            writeln!(f, "months without observations: {empty:?}")?;
        }
        writeln!(f)?;
        let t = &self.trend;
        writeln!(f, "trend slope      {:+.6} ± {:.6} per year", t.slope, t.slope_stderr)?;
        writeln!(f, "trend intercept  {:.4}", t.intercept)?;
        write!(f, "R²               {:.4}", t.r_squared)
    }
}
