use eframe::egui::Color32;

use crate::analysis::Analysis;
use crate::analysis::seasonal::MONTH_NAMES;
use crate::color::{ACCENT_COLOR, MonthColors, POINT_COLOR, with_alpha};
use crate::data::model::{IceDataset, Observation};

// ---------------------------------------------------------------------------
// Views – the diagnostic charts, in presentation order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Raw,
    Filtered,
    FilteredByMonth,
    MonthlyMean,
    NormalizedByMonth,
    Trend,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Raw,
        View::Filtered,
        View::FilteredByMonth,
        View::MonthlyMean,
        View::NormalizedByMonth,
        View::Trend,
    ];

    /// Short tab label.
    pub fn label(self) -> &'static str {
        match self {
            View::Raw => "Raw",
            View::Filtered => "Filtered",
            View::FilteredByMonth => "By month",
            View::MonthlyMean => "Monthly mean",
            View::NormalizedByMonth => "Normalized",
            View::Trend => "Trend",
        }
    }

    pub fn next(self) -> View {
        let idx = View::ALL.iter().position(|&v| v == self).unwrap_or(0);
        View::ALL[(idx + 1) % View::ALL.len()]
    }

    pub fn prev(self) -> View {
        let idx = View::ALL.iter().position(|&v| v == self).unwrap_or(0);
        View::ALL[(idx + View::ALL.len() - 1) % View::ALL.len()]
    }
}

// ---------------------------------------------------------------------------
// Figure – renderer-independent chart description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Scatter {
        name: String,
        points: Vec<[f64; 2]>,
        color: Color32,
    },
    Line {
        name: String,
        points: Vec<[f64; 2]>,
        color: Color32,
    },
    /// Closed polygon: the lower edge left to right, then the upper edge back.
    Band {
        name: String,
        outline: Vec<[f64; 2]>,
        color: Color32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub layers: Vec<Layer>,
}

/// Chart styling chosen in the side panel.
#[derive(Debug, Clone)]
pub struct PlotStyle {
    pub point_alpha: f32,
    pub color_by_month: bool,
    pub month_colors: MonthColors,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            point_alpha: 0.3,
            color_by_month: false,
            month_colors: MonthColors::default(),
        }
    }
}

const BAND_STEPS: usize = 50;

#[derive(Clone, Copy)]
enum XAxis {
    Year,
    Month,
}

/// Describe the chart for `view`.
pub fn build(view: View, analysis: &Analysis, style: &PlotStyle) -> Figure {
    let filtered = analysis.filtered();
    match view {
        View::Raw => Figure {
            title: format!("Extent by year, unfiltered ({} rows)", analysis.raw.len()),
            x_label: "Year",
            y_label: "Extent",
            layers: scatter(&analysis.raw, XAxis::Year, "extent", style),
        },
        View::Filtered => Figure {
            title: format!(
                "Extent by year, {} rows at or below {:.3} removed",
                analysis.outliers.removed, analysis.outliers.threshold
            ),
            x_label: "Year",
            y_label: "Extent",
            layers: scatter(filtered, XAxis::Year, "extent", style),
        },
        View::FilteredByMonth => Figure {
            title: "Filtered extent by month".to_string(),
            x_label: "Month",
            y_label: "Extent",
            layers: scatter(filtered, XAxis::Month, "extent", style),
        },
        View::MonthlyMean => {
            let mut layers = scatter(filtered, XAxis::Month, "extent", style);
            layers.push(Layer::Line {
                name: "monthly mean".to_string(),
                points: analysis.monthly_means.points(),
                color: ACCENT_COLOR,
            });
            Figure {
                title: "Filtered extent with monthly mean".to_string(),
                x_label: "Month",
                y_label: "Extent",
                layers,
            }
        }
        View::NormalizedByMonth => Figure {
            title: "Extent normalized by monthly mean".to_string(),
            x_label: "Month",
            y_label: "Extent / monthly mean",
            layers: scatter(&analysis.normalized, XAxis::Month, "normalized", style),
        },
        View::Trend => trend_figure(analysis, style),
    }
}

fn trend_figure(analysis: &Analysis, style: &PlotStyle) -> Figure {
    let trend = &analysis.trend;
    let span = analysis
        .normalized
        .year_range()
        .filter(|_| trend.is_defined())
        .map(|(first, last)| (first as f64, last as f64));

    let mut layers = Vec::new();
    if let Some((x0, x1)) = span {
        let band = trend.band(x0, x1, analysis.confidence_z, BAND_STEPS);
        // A two-point fit has no residual error, hence no band.
        if band.iter().all(|&(_, lo, hi)| lo.is_finite() && hi.is_finite()) {
            let mut outline: Vec<[f64; 2]> = band.iter().map(|&(x, lo, _)| [x, lo]).collect();
            outline.extend(band.iter().rev().map(|&(x, _, hi)| [x, hi]));
            layers.push(Layer::Band {
                name: "confidence band".to_string(),
                outline,
                color: with_alpha(ACCENT_COLOR, 0.2),
            });
        }
    }

    layers.extend(scatter(&analysis.normalized, XAxis::Year, "normalized", style));

    let title = match span {
        Some((x0, x1)) => {
            layers.push(Layer::Line {
                name: "linear fit".to_string(),
                points: vec![[x0, trend.predict(x0)], [x1, trend.predict(x1)]],
                color: ACCENT_COLOR,
            });
            format!(
                "Deseasonalized trend: {:+.5} / year, R² = {:.3}",
                trend.slope, trend.r_squared
            )
        }
        None => "Deseasonalized trend: undefined".to_string(),
    };

    Figure {
        title,
        x_label: "Year",
        y_label: "Extent / monthly mean",
        layers,
    }
}

/// One scatter layer, or twelve when colouring by month. Empty months are skipped.
fn scatter(dataset: &IceDataset, x_axis: XAxis, name: &str, style: &PlotStyle) -> Vec<Layer> {
    let point = |o: &Observation| {
        let x = match x_axis {
            XAxis::Year => o.year as f64,
            XAxis::Month => o.month as f64,
        };
        [x, o.extent]
    };

    if !style.color_by_month {
        return vec![Layer::Scatter {
            name: name.to_string(),
            points: dataset.iter().map(point).collect(),
            color: with_alpha(POINT_COLOR, style.point_alpha),
        }];
    }

    (1..=12u8)
        .filter_map(|month| {
            let points: Vec<[f64; 2]> = dataset
                .iter()
                .filter(|o| o.month == month)
                .map(point)
                .collect();
            if points.is_empty() {
                return None;
            }
            Some(Layer::Scatter {
                name: MONTH_NAMES[month as usize - 1].to_string(),
                points,
                color: with_alpha(style.month_colors.color_for(month), style.point_alpha),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;

    fn analysis() -> Analysis {
        let mut rows = Vec::new();
        for year in 2000..2010 {
            for month in 1..=12i64 {
                let extent = 10.0 + month as f64 - 0.05 * (year - 2000) as f64
                    + if year % 2 == 0 { 0.1 } else { -0.1 };
                rows.push(Observation::new(year, month, extent).unwrap());
            }
        }
        rows.push(Observation::new(2004, 6, -9999.0).unwrap());
        Analysis::run(IceDataset::new(rows), &AnalysisConfig::default())
    }

    fn scatter_len(layer: &Layer) -> Option<usize> {
        match layer {
            Layer::Scatter { points, .. } => Some(points.len()),
            _ => None,
        }
    }

    #[test]
    fn raw_and_filtered_differ_by_removed_rows() {
        let a = analysis();
        let style = PlotStyle::default();

        let raw = build(View::Raw, &a, &style);
        let filtered = build(View::Filtered, &a, &style);
        assert_eq!(scatter_len(&raw.layers[0]), Some(121));
        assert_eq!(scatter_len(&filtered.layers[0]), Some(120));
        assert_eq!(raw.x_label, "Year");
    }

    #[test]
    fn monthly_mean_overlays_twelve_point_line() {
        let fig = build(View::MonthlyMean, &analysis(), &PlotStyle::default());
        assert_eq!(fig.layers.len(), 2);
        match &fig.layers[1] {
            Layer::Line { points, .. } => {
                assert_eq!(points.len(), 12);
                assert_eq!(points[0][0], 1.0);
                assert_eq!(points[11][0], 12.0);
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn trend_has_band_points_and_fit() {
        let fig = build(View::Trend, &analysis(), &PlotStyle::default());
        assert_eq!(fig.layers.len(), 3);
        assert!(matches!(&fig.layers[0], Layer::Band { outline, .. } if outline.len() == 2 * BAND_STEPS));
        assert_eq!(scatter_len(&fig.layers[1]), Some(120));
        assert!(matches!(&fig.layers[2], Layer::Line { points, .. } if points.len() == 2));
        assert!(fig.title.contains("R²"));
    }

    #[test]
    fn two_point_trend_skips_band_but_draws_fit() {
        let rows = vec![
            Observation::new(2000, 9, 10.0).unwrap(),
            Observation::new(2001, 9, 11.0).unwrap(),
        ];
        let a = Analysis::run(IceDataset::new(rows), &AnalysisConfig::default());
        assert_eq!(a.outliers.removed, 0);
        assert!(a.trend.is_defined());

        let fig = build(View::Trend, &a, &PlotStyle::default());
        assert_eq!(fig.layers.len(), 2);
        assert!(!fig.layers.iter().any(|l| matches!(l, Layer::Band { .. })));
        assert_eq!(scatter_len(&fig.layers[0]), Some(2));
        match &fig.layers[1] {
            Layer::Line { name, points, .. } => {
                assert_eq!(name, "linear fit");
                assert_eq!(points[0][0], 2000.0);
                assert_eq!(points[1][0], 2001.0);
                assert!(points[0][1] < points[1][1]);
            }
            other => panic!("expected line, got {other:?}"),
        }
        assert!(fig.title.contains("R²"));
    }

    #[test]
    fn colour_by_month_splits_scatter() {
        let style = PlotStyle {
            color_by_month: true,
            ..PlotStyle::default()
        };
        let fig = build(View::FilteredByMonth, &analysis(), &style);
        assert_eq!(fig.layers.len(), 12);
        let total: usize = fig.layers.iter().filter_map(scatter_len).sum();
        assert_eq!(total, 120);
    }

    #[test]
    fn empty_analysis_builds_every_view() {
        let a = Analysis::run(IceDataset::default(), &AnalysisConfig::default());
        for view in View::ALL {
            let fig = build(view, &a, &PlotStyle::default());
            assert!(!fig.title.is_empty());
        }
        let trend = build(View::Trend, &a, &PlotStyle::default());
        assert_eq!(trend.layers.len(), 1);
        assert!(trend.title.ends_with("undefined"));
    }

    #[test]
    fn views_cycle() {
        assert_eq!(View::Raw.next(), View::Filtered);
        assert_eq!(View::Trend.next(), View::Raw);
        assert_eq!(View::Raw.prev(), View::Trend);
        assert_eq!(View::Trend.prev(), View::NormalizedByMonth);
    }
}
