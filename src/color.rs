use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::analysis::seasonal::MONTHS;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Month colours and series colours
// ---------------------------------------------------------------------------

/// Scatter colour when points are not split by month.
pub const POINT_COLOR: Color32 = Color32::from_rgb(31, 119, 180);
/// Overlay colour for monthly means and the regression line.
pub const ACCENT_COLOR: Color32 = Color32::from_rgb(255, 127, 14);

/// Maps calendar months to distinct colours around the hue wheel.
#[derive(Debug, Clone)]
pub struct MonthColors {
    colors: Vec<Color32>,
}

impl Default for MonthColors {
    fn default() -> Self {
        Self {
            colors: generate_palette(MONTHS),
        }
    }
}

impl MonthColors {
    /// Colour for `month` (1-based); grey when out of range.
    pub fn color_for(&self, month: u8) -> Color32 {
        (month as usize)
            .checked_sub(1)
            .and_then(|slot| self.colors.get(slot))
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

/// Apply a point opacity in `0..=1`.
pub fn with_alpha(color: Color32, alpha: f32) -> Color32 {
    color.gamma_multiply(alpha.clamp(0.0, 1.0))
}
