use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points, Polygon};

use crate::state::AppState;
use crate::ui::figures::{self, Figure, Layer};

// ---------------------------------------------------------------------------
// Diagnostic chart (central panel)
// ---------------------------------------------------------------------------

/// Render the selected chart in the central panel.
pub fn diagnostic_plot(ui: &mut Ui, state: &AppState) {
    let analysis = match &state.analysis {
        Some(a) => a,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to explore sea-ice extent  (File → Open…)");
            });
            return;
        }
    };

    let figure = figures::build(state.view, analysis, &state.style);
    ui.heading(&figure.title);
    figure_plot(ui, &figure, state.view.label());
}

/// Draw every layer of `figure` into one interactive plot.
pub fn figure_plot(ui: &mut Ui, figure: &Figure, id: &str) {
    Plot::new(id)
        .legend(Legend::default())
        .x_axis_label(figure.x_label)
        .y_axis_label(figure.y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for layer in &figure.layers {
                match layer {
                    Layer::Band {
                        name,
                        outline,
                        color,
                    } => {
                        let polygon = Polygon::new(PlotPoints::from(outline.clone()))
                            .name(name)
                            .fill_color(*color);
                        plot_ui.polygon(polygon);
                    }
                    Layer::Scatter {
                        name,
                        points,
                        color,
                    } => {
                        let points = Points::new(PlotPoints::from(points.clone()))
                            .name(name)
                            .color(*color)
                            .radius(2.5);
                        plot_ui.points(points);
                    }
                    Layer::Line {
                        name,
                        points,
                        color,
                    } => {
                        // Months without a mean are skipped.
                        let finite: Vec<[f64; 2]> = points
                            .iter()
                            .copied()
                            .filter(|p| p[1].is_finite())
                            .collect();
                        let line = Line::new(PlotPoints::from(finite))
                            .name(name)
                            .color(*color)
                            .width(2.0);
                        plot_ui.line(line);
                    }
                }
            }
        });
}
