//! Destinations for classified pixels.
//!
//! A [`Sink`] receives `(column, row, label)` triples in no particular order.
//! [`LabelGrid`] is the in-memory sink every render goes through before it is
//! turned into pixels.

use crate::classifier::{PixelLabel, LABEL_COUNT};
use crate::error::BasinError;

/// Consumer of classified pixels.
///
/// Renders finish cells out of order, so implementations must place each
/// label by its coordinates rather than by arrival. The trait is object-safe.
pub trait Sink {
    /// Records the label of one pixel.
    ///
    /// Returns `BasinError::OutOfBounds` if the coordinate is outside the
    /// sink, or any error the sink's backing store reports.
    fn record(&mut self, column: usize, row: usize, label: PixelLabel) -> Result<(), BasinError>;
}

/// Row-major grid of pixel labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelGrid {
    width: usize,
    height: usize,
    labels: Vec<PixelLabel>,
}

impl LabelGrid {
    /// Creates a grid filled with [`PixelLabel::default`].
    ///
    /// Returns `BasinError::InvalidDimensions` if either dimension is zero
    /// or `width * height` overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, BasinError> {
        if width == 0 || height == 0 {
            return Err(BasinError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .ok_or(BasinError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            labels: vec![PixelLabel::default(); len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the row-major labels.
    pub fn labels(&self) -> &[PixelLabel] {
        &self.labels
    }

    /// Label at `(column, row)`, or `None` outside the grid.
    pub fn get(&self, column: usize, row: usize) -> Option<PixelLabel> {
        (column < self.width && row < self.height).then(|| self.labels[row * self.width + column])
    }

    /// Number of pixels per label, indexed by [`PixelLabel::index`].
    pub fn histogram(&self) -> [usize; LABEL_COUNT] {
        let mut counts = [0; LABEL_COUNT];
        for label in &self.labels {
            counts[label.index()] += 1;
        }
        counts
    }
}

impl Sink for LabelGrid {
    fn record(&mut self, column: usize, row: usize, label: PixelLabel) -> Result<(), BasinError> {
        if column >= self.width || row >= self.height {
            return Err(BasinError::OutOfBounds {
                column,
                row,
                width: self.width,
                height: self.height,
            });
        }
        self.labels[row * self.width + column] = label;
        Ok(())
    }
}
