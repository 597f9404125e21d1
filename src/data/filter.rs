use crate::analysis::stats;
use crate::config::OutlierConfig;

use super::model::IceDataset;

// ---------------------------------------------------------------------------
// Outlier filter: one-sided cut at mean − k·σ
// ---------------------------------------------------------------------------

/// Statistics of the filter pass together with the surviving rows.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierReport {
    /// Mean of the finite extents of the unfiltered input.
    pub mean: f64,
    /// Standard deviation of the finite extents of the unfiltered input.
    pub std_dev: f64,
    /// `mean - k * std_dev`; `NaN` when `std_dev` is undefined.
    pub threshold: f64,
    /// Input rows whose extent is strictly above `threshold`, in input order.
    pub retained: IceDataset,
    /// Number of input rows dropped.
    pub removed: usize,
}

/// Drop every observation whose extent is at or below the threshold.
///
/// Non-finite extents are left out of the mean and σ; a `NaN` extent then
/// fails the comparison like any other value at or below the cut. A `NaN` threshold (no finite extents, or a single one
/// under the sample estimator) fails every comparison, so nothing is retained.
pub fn filter_outliers(dataset: &IceDataset, config: &OutlierConfig) -> OutlierReport {
    let extents: Vec<f64> = dataset
        .iter()
        .map(|obs| obs.extent)
        .filter(|extent| extent.is_finite())
        .collect();
    if extents.len() < dataset.len() {
        log::warn!(
            "{} non-finite extents left out of the outlier statistics",
            dataset.len() - extents.len()
        );
    }
    let mean = stats::mean(&extents);
    let std_dev = stats::std_dev(&extents, config.std_dev.ddof());
    let threshold = mean - config.sigma_multiplier * std_dev;

    let retained: IceDataset = dataset
        .iter()
        .filter(|obs| obs.extent > threshold)
        .copied()
        .collect();
    let removed = dataset.len() - retained.len();

    log::info!(
        "Outlier threshold {threshold:.4} (mean {mean:.4}, σ {std_dev:.4}): removed {removed} of {} rows",
        dataset.len()
    );

    OutlierReport {
        mean,
        std_dev,
        threshold,
        retained,
        removed,
    }
}
