//! Pixel grid to plane coordinate mapping.

use crate::error::BasinError;
use glam::DVec2;

/// Reference zoom: the grid spans `[-1.5, 1.5)` on both axes.
pub const DEFAULT_ZOOM: f64 = 1.5;

/// One grid cell and the plane point its trajectory starts from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSample {
    pub column: usize,
    pub row: usize,
    pub point: DVec2,
}

/// Maps `width × height` pixels linearly onto `[-zoom, zoom)²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSampler {
    width: usize,
    height: usize,
    zoom: f64,
}

impl PlaneSampler {
    /// Returns `InvalidDimensions` for a zero or overflowing size and
    /// `InvalidParam` for a zoom that is not finite and positive.
    pub fn new(width: usize, height: usize, zoom: f64) -> Result<Self, BasinError> {
        if width == 0 || height == 0 {
            return Err(BasinError::InvalidDimensions);
        }
        width
            .checked_mul(height)
            .ok_or(BasinError::InvalidDimensions)?;
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(BasinError::invalid_param(
                "zoom",
                format!("{zoom} must be finite and positive"),
            ));
        }
        Ok(Self {
            width,
            height,
            zoom,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false: a sampler has at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `((column / width) * 2 - 1) * zoom`, and likewise for the row.
    pub fn plane_point(&self, column: usize, row: usize) -> DVec2 {
        let x = ((column as f64 / self.width as f64) * 2.0 - 1.0) * self.zoom;
        let y = ((row as f64 / self.height as f64) * 2.0 - 1.0) * self.zoom;
        DVec2::new(x, y)
    }

    /// Cells of one row, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = PlaneSample> + '_ {
        (0..self.width).map(move |column| PlaneSample {
            column,
            row,
            point: self.plane_point(column, row),
        })
    }

    /// Every cell in row-major order.
    pub fn samples(&self) -> impl Iterator<Item = PlaneSample> + '_ {
        (0..self.height).flat_map(move |row| self.row(row))
    }
}
