//! Monthly aggregation and seasonal normalization.

use crate::data::model::IceDataset;

pub const MONTHS: usize = 12;

pub const MONTH_NAMES: [&str; MONTHS] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Per-month mean extent, indexed by calendar month `1..=12`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyMeans {
    means: [f64; MONTHS],
    counts: [usize; MONTHS],
}

impl MonthlyMeans {
    /// Mean extent of every calendar month.
    ///
    /// A month without records gets a `NaN` mean and a warning; it is not an error.
    pub fn compute(dataset: &IceDataset) -> Self {
        let mut sums = [0.0; MONTHS];
        let mut counts = [0usize; MONTHS];
        for obs in dataset.iter() {
            let slot = obs.month as usize - 1;
            sums[slot] += obs.extent;
            counts[slot] += 1;
        }

        let mut means = [f64::NAN; MONTHS];
        for (slot, (&sum, &count)) in sums.iter().zip(counts.iter()).enumerate() {
            if count == 0 {
                log::warn!("No observations for {}; its mean is undefined", MONTH_NAMES[slot]);
                continue;
            }
            means[slot] = sum / count as f64;
        }

        Self { means, counts }
    }

    /// Mean for `month` (1-based). `NaN` for an empty or out-of-range month.
    pub fn get(&self, month: u8) -> f64 {
        match month {
            1..=12 => self.means[month as usize - 1],
            _ => f64::NAN,
        }
    }

    /// Number of records that contributed to `month`'s mean.
    pub fn count(&self, month: u8) -> usize {
        match month {
            1..=12 => self.counts[month as usize - 1],
            _ => 0,
        }
    }

    /// `(month, mean)` pairs for months 1 to 12, for the overlay line.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.means
            .iter()
            .enumerate()
            .map(|(slot, &mean)| [(slot + 1) as f64, mean])
            .collect()
    }

    pub fn empty_months(&self) -> Vec<u8> {
        (1..=MONTHS as u8).filter(|&m| self.count(m) == 0).collect()
    }
}

/// Replace each extent by `extent / monthly_mean[month]`, leaving `dataset` untouched.
pub fn deseasonalize(dataset: &IceDataset, means: &MonthlyMeans) -> IceDataset {
    dataset
        .iter()
        .map(|obs| obs.with_extent(obs.extent / means.get(obs.month)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Observation;
    use proptest::prelude::*;

    fn dataset(rows: &[(i32, i64, f64)]) -> IceDataset {
        rows.iter()
            .map(|&(y, m, e)| Observation::new(y, m, e).unwrap())
            .collect()
    }

    #[test]
    fn two_month_scenario() {
        let ds = dataset(&[(2000, 1, 10.0), (2000, 1, 30.0), (2000, 2, 20.0), (2000, 2, 20.0)]);
        let means = MonthlyMeans::compute(&ds);

        assert_eq!(means.get(1), 20.0);
        assert_eq!(means.get(2), 20.0);
        assert_eq!(means.count(1), 2);
        assert!(means.get(3).is_nan());
        assert_eq!(means.empty_months(), (3..=12).collect::<Vec<u8>>());

        let normalized = deseasonalize(&ds, &means);
        assert_eq!(
            normalized,
            dataset(&[(2000, 1, 0.5), (2000, 1, 1.5), (2000, 2, 1.0), (2000, 2, 1.0)])
        );
        // Input is not modified.
        assert_eq!(ds.extents(), vec![10.0, 30.0, 20.0, 20.0]);
    }

    #[test]
    fn overlay_has_twelve_points_in_month_order() {
        let ds = dataset(&[(2000, 12, 4.0), (2001, 12, 6.0)]);
        let points = MonthlyMeans::compute(&ds).points();

        assert_eq!(points.len(), 12);
        assert_eq!(points[0][0], 1.0);
        assert!(points[0][1].is_nan());
        assert_eq!(points[11], [12.0, 5.0]);
    }

    #[test]
    fn out_of_range_lookup_is_nan() {
        let means = MonthlyMeans::compute(&IceDataset::default());
        assert!(means.get(0).is_nan());
        assert!(means.get(13).is_nan());
        assert_eq!(means.count(13), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn monthly_mean_matches_group_and_normalized_mean_is_one(
            rows in prop::collection::vec((1979..2024i32, 1..=12i64, 1.0..25.0f64), 1..200)
        ) {
            let ds = dataset(&rows);
            let means = MonthlyMeans::compute(&ds);
            let normalized = deseasonalize(&ds, &means);

            for month in 1..=12u8 {
                let group: Vec<f64> = ds.iter().filter(|o| o.month == month).map(|o| o.extent).collect();
                if group.is_empty() {
                    prop_assert!(means.get(month).is_nan());
                    continue;
                }
                let expected = group.iter().sum::<f64>() / group.len() as f64;
                prop_assert!((means.get(month) - expected).abs() < 1e-9);

                let norm: Vec<f64> = normalized.iter().filter(|o| o.month == month).map(|o| o.extent).collect();
                let norm_mean = norm.iter().sum::<f64>() / norm.len() as f64;
                prop_assert!((norm_mean - 1.0).abs() < 1e-9);
            }
        }
    }
}
