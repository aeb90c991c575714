/*!
# Panel Geometry

Pixel rectangles for the view's cells. The composer only sees the
[`GeometryProvider`] trait; [`GridLayout`] is the ratio-based grid used by the
CLI, one column split into a thin sequence row over a tall transcript row.
*/

use serde::{Deserialize, Serialize};

/// Pixel rectangle `{x, y, width, height}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RenderRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size at the origin.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// True when there is no positive, finite area to draw into.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// Stack `n` rows from the top, each `min(height / n, max_row_height)` tall.
    pub fn stacked_rows(&self, n: usize, max_row_height: f64) -> Vec<RenderRect> {
        if n == 0 {
            return Vec::new();
        }
        let row_height = (self.height / n as f64).min(max_row_height);
        (0..n)
            .map(|i| RenderRect::new(self.x, self.y + i as f64 * row_height, self.width, row_height))
            .collect()
    }
}

/// Supplies the rectangle for a grid cell, or `None` when the cell does not exist.
pub trait GeometryProvider {
    fn cell_rectangle(&self, row: usize, col: usize) -> Option<RenderRect>;
}

/// Canvas split into columns by ratio, each column split into rows by its own ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub width: f64,
    pub height: f64,
    pub column_ratios: Vec<f64>,
    pub row_ratios_per_column: Vec<Vec<f64>>,
}

impl GridLayout {
    /// Default genome view grid: one column, sequence row 9% over transcript row 91%.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_ratios(width, height, vec![1.0], vec![vec![0.09, 0.91]])
    }

    pub fn with_ratios(
        width: f64,
        height: f64,
        column_ratios: Vec<f64>,
        row_ratios_per_column: Vec<Vec<f64>>,
    ) -> Self {
        Self {
            width,
            height,
            column_ratios,
            row_ratios_per_column,
        }
    }
}

/// Offset and extent of slot `index` when `total` is split by `ratios`.
fn ratio_slot(ratios: &[f64], index: usize, total: f64) -> Option<(f64, f64)> {
    let sum: f64 = ratios.iter().sum();
    if index >= ratios.len() || !sum.is_finite() || sum <= 0.0 {
        return None;
    }
    let before: f64 = ratios[..index].iter().sum();
    Some((total * before / sum, total * ratios[index] / sum))
}

impl GeometryProvider for GridLayout {
    fn cell_rectangle(&self, row: usize, col: usize) -> Option<RenderRect> {
        let (x, width) = ratio_slot(&self.column_ratios, col, self.width)?;
        let rows = self.row_ratios_per_column.get(col)?;
        let (y, height) = ratio_slot(rows, row, self.height)?;
        Some(RenderRect::new(x, y, width, height))
    }
}
