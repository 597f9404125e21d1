use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::Analysis;
use crate::analysis::seasonal::MONTH_NAMES;
use crate::config::StdDevKind;
use crate::state::AppState;
use crate::ui::figures::{PlotStyle, View};

// ---------------------------------------------------------------------------
// Left side panel – pipeline settings and summary
// ---------------------------------------------------------------------------

/// Render the left panel: filter settings, style, and the computed statistics.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Outlier filter");
    ui.separator();

    let mut rerun = false;
    let outliers = &mut state.config.outliers;
    rerun |= ui
        .add(egui::Slider::new(&mut outliers.sigma_multiplier, 0.5..=5.0).text("σ multiplier"))
        .changed();
    ui.horizontal(|ui: &mut Ui| {
        rerun |= ui
            .radio_value(&mut outliers.std_dev, StdDevKind::Sample, "Sample (N−1)")
            .changed();
        rerun |= ui
            .radio_value(&mut outliers.std_dev, StdDevKind::Population, "Population (N)")
            .changed();
    });
    if rerun {
        state.rerun();
    }

    ui.add_space(8.0);
    ui.heading("Style");
    ui.separator();
    ui.checkbox(&mut state.style.color_by_month, "Color by month");
    ui.add(egui::Slider::new(&mut state.style.point_alpha, 0.05..=1.0).text("Point alpha"));

    ui.add_space(8.0);
    let analysis = match &state.analysis {
        Some(a) => a,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            summary(ui, analysis);

            ui.add_space(8.0);
            ui.strong("Monthly means");
            monthly_table(ui, analysis, state.style.color_by_month.then_some(&state.style));
        });
}

fn summary(ui: &mut Ui, analysis: &Analysis) {
    let o = &analysis.outliers;
    egui::Grid::new("summary_grid")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("Observations");
            ui.label(analysis.raw.len().to_string());
            ui.end_row();

            ui.label("Mean");
            ui.label(format!("{:.4}", o.mean));
            ui.end_row();

            ui.label("Std dev");
            ui.label(format!("{:.4}", o.std_dev));
            ui.end_row();

            ui.label("Threshold");
            ui.label(format!("{:.4}", o.threshold));
            ui.end_row();

            ui.label("Removed");
            ui.label(o.removed.to_string());
            ui.end_row();

            let t = &analysis.trend;
            ui.label("Trend / year");
            ui.label(format!("{:+.5} ± {:.5}", t.slope, t.slope_stderr));
            ui.end_row();

            ui.label("R²");
            ui.label(format!("{:.3}", t.r_squared));
            ui.end_row();
        });
}

fn monthly_table(ui: &mut Ui, analysis: &Analysis, colored: Option<&PlotStyle>) {
    let means = &analysis.monthly_means;
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(18.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Month");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Count");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Mean");
            });
        })
        .body(|mut body| {
            for (slot, name) in MONTH_NAMES.iter().enumerate() {
                let month = slot as u8 + 1;
                body.row(16.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        let mut text = RichText::new(*name);
                        if let Some(style) = colored {
                            text = text.color(style.month_colors.color_for(month));
                        }
                        ui.label(text);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(means.count(month).to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        let mean = means.get(month);
                        if mean.is_nan() {
                            ui.label(RichText::new("undefined").color(Color32::YELLOW));
                        } else {
                            ui.label(format!("{mean:.4}"));
                        }
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu, the chart tabs and the status line.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for view in View::ALL {
            ui.selectable_value(&mut state.view, view, view.label());
        }
        if ui.button("Next ▶").clicked() {
            state.view = state.view.next();
        }

        ui.separator();

        if let Some(analysis) = &state.analysis {
            let name = state
                .source
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{name}  {} observations, {} retained",
                analysis.raw.len(),
                analysis.filtered().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sea-ice extent data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
