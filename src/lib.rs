#![doc = include_str!("../README.md")]

// Core stages
pub mod adaptive;
pub mod error;
pub mod grid;
pub mod image;
pub mod lines;

// Composition, reporting and tool support
pub mod config;
pub mod diagnostics;
pub mod pipeline;
pub mod stats;

// --- High-level re-exports -------------------------------------------------

pub use crate::adaptive::{find_split_positions, SplitAxis};
pub use crate::error::{GridError, ImageError};
pub use crate::grid::{aggregate, Cell, Grid, LuminanceMatrix};
pub use crate::lines::{normalize, LineSet};
pub use crate::pipeline::{
    adaptive_grid, adaptive_luminance, mean_luminance, AdaptiveGrid, AdaptiveGridParams,
    LuminanceReport,
};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use luma_grid::prelude::*;
///
/// let (w, h) = (8usize, 4usize);
/// let gray = vec![100u8; w * h];
/// let img = ImageU8::gray(w, h, &gray).unwrap();
///
/// let rows = normalize(&[2.0], h);
/// let cols = normalize(&[3.0, 3.0, 99.0], w);
/// let means = aggregate(&img, &rows, &cols).unwrap();
/// assert_eq!(means.shape(), (2, 2));
///
/// let splits = find_split_positions(&img, 3, SplitAxis::Columns, 0.5, 128).unwrap();
/// assert_eq!(splits.len(), 3);
/// ```
pub mod prelude {
    pub use crate::image::{ImageU8, ImageView};
    pub use crate::{aggregate, find_split_positions, normalize, Grid, LineSet, SplitAxis};
}
