//! Composed operations over the three core stages.
//!
//! - [`mean_luminance`]: raw lines → normalization → per-cell means.
//! - [`adaptive_grid`]: image → luma → brightness-equalizing boundaries.
//! - [`adaptive_luminance`]: both, aggregating over the adaptive grid.
//!
//! Every call returns a serializable report with an [`InputDescriptor`] and
//! a [`TimingBreakdown`] of its stages.

use crate::adaptive::{find_split_positions, SplitAxis};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{InputDescriptor, TimingBreakdown};
use crate::error::GridError;
use crate::grid::{Grid, LuminanceMatrix};
use crate::image::{to_luma, ChannelOrder, ImageU8, ImageView};
use crate::lines::{self, LineSet};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Knobs for [`adaptive_grid`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveGridParams {
    /// Number of vertical boundaries (column splits).
    pub num_vertical: usize,
    /// Number of horizontal boundaries (row splits).
    pub num_horizontal: usize,
    /// Weight of mean brightness against the bright-pixel fraction, in `[0, 1]`.
    pub alpha: f64,
    /// Samples strictly above this value count as bright.
    pub threshold: u8,
    /// Channel interpretation when the input has colour channels.
    pub channel_order: ChannelOrder,
}

impl Default for AdaptiveGridParams {
    fn default() -> Self {
        Self {
            num_vertical: 10,
            num_horizontal: 5,
            alpha: 0.5,
            threshold: 128,
            channel_order: ChannelOrder::Rgb,
        }
    }
}

/// Per-cell means together with the normalized grid they were computed on.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LuminanceReport {
    pub input: InputDescriptor,
    pub luminance: LuminanceMatrix,
    pub grid: Grid,
    pub timings: TimingBreakdown,
}

/// Boundary positions chosen by the adaptive splitter.
///
/// Positions are raw splitter output: non-decreasing, possibly repeated,
/// without sentinels.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveGrid {
    pub input: InputDescriptor,
    pub vertical_lines: Vec<usize>,
    pub horizontal_lines: Vec<usize>,
    pub timings: TimingBreakdown,
}

impl AdaptiveGrid {
    /// Normalized grid over the image the lines were computed for.
    pub fn to_grid(&self) -> Grid {
        Grid::new(
            lines::from_positions(&self.horizontal_lines, self.input.height),
            lines::from_positions(&self.vertical_lines, self.input.width),
        )
    }
}

/// Normalize `horizontal` lines against the image height and `vertical`
/// lines against its width, then average every cell.
pub fn mean_luminance(
    image: &ImageU8<'_>,
    horizontal: &[f64],
    vertical: &[f64],
) -> Result<LuminanceReport, GridError> {
    let t0 = Instant::now();
    let mut timings = TimingBreakdown::default();

    let start = Instant::now();
    let grid = Grid::new(
        LineSet::normalize(horizontal, image.height()),
        LineSet::normalize(vertical, image.width()),
    );
    timings.record("normalize", start);
    debug!(
        "mean_luminance: {} horizontal / {} vertical raw lines -> {:?} cells",
        horizontal.len(),
        vertical.len(),
        grid.shape()
    );

    let start = Instant::now();
    let luminance = grid.aggregate(image)?;
    timings.record("aggregate", start);

    timings.total_ms = elapsed_ms(t0);
    Ok(LuminanceReport {
        input: InputDescriptor::of(image),
        luminance,
        grid,
        timings,
    })
}

/// Boundaries equalizing the composite brightness score along both axes.
///
/// Colour input is reduced to luma first (see [`crate::image::to_luma`]).
pub fn adaptive_grid(
    image: &ImageU8<'_>,
    params: &AdaptiveGridParams,
) -> Result<AdaptiveGrid, GridError> {
    let t0 = Instant::now();
    let mut timings = TimingBreakdown::default();

    let start = Instant::now();
    let luma = to_luma(image, params.channel_order)?;
    let gray = luma.as_view()?;
    timings.record("luma", start);

    let start = Instant::now();
    let vertical_lines = find_split_positions(
        &gray,
        params.num_vertical,
        SplitAxis::Columns,
        params.alpha,
        params.threshold,
    )?;
    let horizontal_lines = find_split_positions(
        &gray,
        params.num_horizontal,
        SplitAxis::Rows,
        params.alpha,
        params.threshold,
    )?;
    timings.record("split", start);
    debug!(
        "adaptive_grid: vertical={:?} horizontal={:?}",
        vertical_lines, horizontal_lines
    );

    timings.total_ms = elapsed_ms(t0);
    Ok(AdaptiveGrid {
        input: InputDescriptor::of(image),
        vertical_lines,
        horizontal_lines,
        timings,
    })
}

/// Adaptive boundaries followed by per-cell means on the input image, not its luma.
pub fn adaptive_luminance(
    image: &ImageU8<'_>,
    params: &AdaptiveGridParams,
) -> Result<(AdaptiveGrid, LuminanceReport), GridError> {
    let adaptive = adaptive_grid(image, params)?;
    let t0 = Instant::now();
    let grid = adaptive.to_grid();
    let luminance = grid.aggregate(image)?;
    let mut timings = TimingBreakdown::default();
    timings.record("aggregate", t0);
    timings.total_ms = elapsed_ms(t0);
    let report = LuminanceReport {
        input: InputDescriptor::of(image),
        luminance,
        grid,
        timings,
    };
    Ok((adaptive, report))
}
