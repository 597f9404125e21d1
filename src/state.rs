use std::path::{Path, PathBuf};

use crate::analysis::Analysis;
use crate::color::MonthColors;
use crate::config::AnalysisConfig;
use crate::data::loader::load_file;
use crate::data::model::IceDataset;
use crate::ui::figures::{PlotStyle, View};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Pipeline output for the loaded dataset (None until a file is loaded).
    pub analysis: Option<Analysis>,

    /// File the current analysis came from.
    pub source: Option<PathBuf>,

    /// Tunables used for every pipeline run.
    pub config: AnalysisConfig,

    /// Which diagnostic chart is shown.
    pub view: View,

    /// Point opacity and colouring.
    pub style: PlotStyle,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl AppState {
    pub fn new(config: AnalysisConfig) -> Self {
        let style = PlotStyle {
            point_alpha: config.style.point_alpha,
            color_by_month: config.style.color_by_month,
            month_colors: MonthColors::default(),
        };
        Self {
            analysis: None,
            source: None,
            config,
            view: View::default(),
            style,
            status_message: None,
        }
    }

    /// Run the pipeline on a newly loaded dataset and show its first chart.
    pub fn set_dataset(&mut self, dataset: IceDataset, source: Option<PathBuf>) {
        self.analysis = Some(Analysis::run(dataset, &self.config));
        self.source = source;
        self.view = View::default();
        self.status_message = None;
    }

    /// Load `path`, keeping the previous dataset when it fails.
    pub fn open(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} observations from {}",
                    dataset.len(),
                    path.display()
                );
                self.set_dataset(dataset, Some(path.to_path_buf()));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-run the pipeline after a config change.
    pub fn rerun(&mut self) {
        if let Some(analysis) = self.analysis.take() {
            self.analysis = Some(Analysis::run(analysis.raw, &self.config));
        }
    }
}
