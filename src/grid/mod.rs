//! Line-defined grids and per-cell aggregation.
//!
//! A [`Grid`] pairs a row [`LineSet`] with a column [`LineSet`]. Adjacent
//! boundaries bound half-open cells `[r0, r1) x [c0, c1)`; for normalized
//! sets spanning the image the cells tile it without gaps or overlaps.
//!
//! - [`aggregate`]: mean sample value of every cell, as a [`LuminanceMatrix`].

mod aggregate;
mod matrix;

pub use aggregate::aggregate;
pub use matrix::LuminanceMatrix;

use crate::error::GridError;
use crate::image::ImageU8;
use crate::lines::LineSet;
use serde::Serialize;

/// One rectangular cell of a grid, in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub y0: usize,
    pub y1: usize,
    pub x0: usize,
    pub x1: usize,
}

impl Cell {
    #[inline]
    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }
    #[inline]
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }
}

/// Row and column boundaries of a cell grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub rows: LineSet,
    pub cols: LineSet,
}

impl Grid {
    pub fn new(rows: LineSet, cols: LineSet) -> Self {
        Self { rows, cols }
    }

    /// Normalize raw horizontal (row) and vertical (column) lines against an
    /// image of `width x height`.
    pub fn from_raw(horizontal: &[f64], vertical: &[f64], width: usize, height: usize) -> Self {
        Self {
            rows: LineSet::normalize(horizontal, height),
            cols: LineSet::normalize(vertical, width),
        }
    }

    /// `(row cells, column cells)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.cell_count(), self.cols.cell_count())
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows.spans().enumerate().flat_map(move |(row, (y0, y1))| {
            self.cols.spans().enumerate().map(move |(col, (x0, x1))| Cell {
                row,
                col,
                y0,
                y1,
                x0,
                x1,
            })
        })
    }

    /// Mean sample value per cell.
    pub fn aggregate(&self, image: &ImageU8<'_>) -> Result<LuminanceMatrix, GridError> {
        aggregate(image, &self.rows, &self.cols)
    }
}
