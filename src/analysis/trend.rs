//! Simple linear regression for the deseasonalized trend.

/// Least-squares fit of `y = intercept + slope * x`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Standard error of the slope.
    pub slope_stderr: f64,
    /// Residual standard error, `sqrt(SSE / (n - 2))`.
    pub residual_stderr: f64,
    /// Points used in the fit (non-finite pairs are skipped).
    pub n: usize,
    mean_x: f64,
    ss_xx: f64,
}

impl LinearFit {
    /// Fit `ys` against `xs`, skipping any pair with a non-finite coordinate.
    ///
    /// Fewer than two usable points, or no spread in `x`, gives an all-`NaN` fit.
    pub fn fit(xs: &[f64], ys: &[f64]) -> Self {
        let pairs: Vec<(f64, f64)> = xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| (x, y))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();
        let n = pairs.len();
        if n < 2 {
            return Self::undefined(n);
        }

        let nf = n as f64;
        let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / nf;
        let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / nf;
        let ss_xx: f64 = pairs.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
        let ss_xy: f64 = pairs.iter().map(|(x, y)| (x - mean_x) * (y - mean_y)).sum();
        let ss_yy: f64 = pairs.iter().map(|(_, y)| (y - mean_y).powi(2)).sum();

        if ss_xx.abs() < 1e-12 {
            return Self::undefined(n);
        }

        let slope = ss_xy / ss_xx;
        let intercept = mean_y - slope * mean_x;
        let ss_res: f64 = pairs
            .iter()
            .map(|(x, y)| (y - (intercept + slope * x)).powi(2))
            .sum();

        let r_squared = if ss_yy.abs() < 1e-12 { 1.0 } else { 1.0 - ss_res / ss_yy };
        let residual_stderr = if n > 2 {
            (ss_res / (nf - 2.0)).sqrt()
        } else {
            f64::NAN
        };

        Self {
            slope,
            intercept,
            r_squared,
            slope_stderr: residual_stderr / ss_xx.sqrt(),
            residual_stderr,
            n,
            mean_x,
            ss_xx,
        }
    }

    fn undefined(n: usize) -> Self {
        Self {
            slope: f64::NAN,
            intercept: f64::NAN,
            r_squared: f64::NAN,
            slope_stderr: f64::NAN,
            residual_stderr: f64::NAN,
            n,
            mean_x: f64::NAN,
            ss_xx: f64::NAN,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.slope.is_finite() && self.intercept.is_finite()
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Half-width of the confidence interval of the mean prediction at `x`.
    pub fn band_half_width(&self, x: f64, z: f64) -> f64 {
        z * self.residual_stderr * (1.0 / self.n as f64 + (x - self.mean_x).powi(2) / self.ss_xx).sqrt()
    }

    /// `(x, lower, upper)` samples of the confidence band over `[x_min, x_max]`.
    pub fn band(&self, x_min: f64, x_max: f64, z: f64, steps: usize) -> Vec<(f64, f64, f64)> {
        if !self.is_defined() || steps < 2 {
            return Vec::new();
        }
        (0..steps)
            .map(|i| {
                let x = x_min + (x_max - x_min) * i as f64 / (steps - 1) as f64;
                let y = self.predict(x);
                let half = self.band_half_width(x, z);
                (x, y - half, y + half)
            })
            .collect()
    }
}
