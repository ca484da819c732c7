//! Error types for image views and grid operations.
//!
//! Numerically degenerate input (noisy boundary lines, zero-area cells, a
//! flat brightness distribution) is never an error. Only shape and parameter
//! violations surface here.

use thiserror::Error;

/// Rejections raised while constructing an [`ImageU8`](crate::image::ImageU8) view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("image must have at least one channel")]
    ZeroChannels,
    #[error("stride {stride} is smaller than a row of {row_len} samples ({width} px x {channels} ch)")]
    StrideTooSmall {
        stride: usize,
        row_len: usize,
        width: usize,
        channels: usize,
    },
    #[error("buffer holds {actual} samples, {width}x{height}x{channels} with stride {stride} needs {required}")]
    BufferTooShort {
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
        required: usize,
        actual: usize,
    },
    #[error("image dimensions {width}x{height}x{channels} overflow usize")]
    DimensionOverflow {
        width: usize,
        height: usize,
        channels: usize,
    },
}

/// Precondition violations for aggregation, splitting and statistics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("invalid image: {0}")]
    Image(#[from] ImageError),
    #[error("{axis} lines were normalized for extent {lines}, image extent is {image}")]
    ExtentMismatch {
        axis: &'static str,
        lines: usize,
        image: usize,
    },
    #[error("adaptive splitting needs a single-channel image, got {channels} channels")]
    NotGrayscale { channels: usize },
    #[error("cannot reduce {channels} channels to luma (expected 1, 3 or 4)")]
    UnsupportedChannels { channels: usize },
    #[error("alpha must be a finite value in [0, 1], got {0}")]
    InvalidAlpha(f64),
    #[error("axis index must be 0 (columns) or 1 (rows), got {0}")]
    InvalidAxis(u8),
    #[error("selection ({row}, {col}) lies outside a {rows}x{cols} matrix")]
    SelectionOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}
