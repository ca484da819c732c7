//! Per-cell mean over a line-defined grid.
//!
//! Every sample in a cell contributes equally, including all channels of a
//! multi-channel image (a flattened mean over rows, columns and channels).
//! Reduce to luma first with [`crate::image::to_luma`] for a per-pixel
//! luminance average instead.
//!
//! Cell rows are reduced independently on the rayon pool. Sums are kept as
//! exact `u64` totals, so the result does not depend on scheduling.

use super::matrix::LuminanceMatrix;
use crate::error::GridError;
use crate::image::{ImageU8, ImageView};
use crate::lines::LineSet;
use log::debug;
use rayon::prelude::*;

/// Mean sample value of every cell bounded by `row_lines` x `col_lines`.
///
/// Output shape is `(row_lines.len() - 1, col_lines.len() - 1)`. A cell with
/// zero area has mean `0.0`. Fails when either set was normalized against an
/// extent other than the image's, since the cells would not tile the image.
pub fn aggregate(
    image: &ImageU8<'_>,
    row_lines: &LineSet,
    col_lines: &LineSet,
) -> Result<LuminanceMatrix, GridError> {
    check_extent("row", row_lines, image.height())?;
    check_extent("column", col_lines, image.width())?;

    let row_spans: Vec<(usize, usize)> = row_lines.spans().collect();
    let col_spans: Vec<(usize, usize)> = col_lines.spans().collect();
    let channels = image.channels();
    debug!(
        "aggregate: {}x{}x{} image into {}x{} cells",
        image.width(),
        image.height(),
        channels,
        row_spans.len(),
        col_spans.len()
    );

    let data: Vec<f64> = row_spans
        .par_iter()
        .flat_map_iter(|&(y0, y1)| band_means(image, y0, y1, &col_spans, channels))
        .collect();

    Ok(LuminanceMatrix::from_raw(
        row_spans.len(),
        col_spans.len(),
        data,
    ))
}

fn check_extent(axis: &'static str, lines: &LineSet, image: usize) -> Result<(), GridError> {
    let normalized = lines.extent();
    if normalized != image {
        debug!("aggregate: {axis} lines normalized for {normalized}, image extent {image}");
        return Err(GridError::ExtentMismatch {
            axis,
            lines: normalized,
            image,
        });
    }
    Ok(())
}

/// Means for the cells of one horizontal band `[y0, y1)`.
fn band_means(
    image: &ImageU8<'_>,
    y0: usize,
    y1: usize,
    col_spans: &[(usize, usize)],
    channels: usize,
) -> Vec<f64> {
    let mut sums = vec![0u64; col_spans.len()];
    for y in y0..y1 {
        for (sum, &(x0, x1)) in sums.iter_mut().zip(col_spans) {
            *sum += image.span(y, x0, x1).iter().map(|&v| v as u64).sum::<u64>();
        }
    }
    let height = y1 - y0;
    sums.into_iter()
        .zip(col_spans)
        .map(|(sum, &(x0, x1))| {
            let samples = height * (x1 - x0) * channels;
            // Normalized LineSets are strictly increasing, so `aggregate` never
            // hands in an empty span; this keeps `band_means` total on its own.
            if samples == 0 {
                debug!("aggregate: zero-area cell rows {y0}..{y1} cols {x0}..{x1}");
                return 0.0;
            }
            sum as f64 / samples as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lines::normalize;

    fn uniform(w: usize, h: usize, v: u8) -> Vec<u8> {
        vec![v; w * h]
    }

    #[test]
    fn uniform_image_gives_uniform_means() {
        let data = uniform(4, 4, 100);
        let img = ImageU8::gray(4, 4, &data).unwrap();
        let rows = normalize(&[2.0], 4);
        let cols = normalize(&[2.0], 4);
        let m = aggregate(&img, &rows, &cols).unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert!(m.as_slice().iter().all(|&v| v == 100.0));
    }

    #[test]
    fn split_halves_separate_cleanly() {
        let mut data = vec![0u8; 16];
        for y in 0..4 {
            for x in 2..4 {
                data[y * 4 + x] = 255;
            }
        }
        let img = ImageU8::gray(4, 4, &data).unwrap();
        let m = aggregate(&img, &normalize(&[2.0], 4), &normalize(&[2.0], 4)).unwrap();
        assert_eq!(m.to_rows(), vec![vec![0.0, 255.0], vec![0.0, 255.0]]);
    }

    #[test]
    fn uneven_cells_average_their_own_pixels() {
        // Row-major 3x2 image: [1 2 3; 4 5 6], split after column 1.
        let data = [1u8, 2, 3, 4, 5, 6];
        let img = ImageU8::gray(3, 2, &data).unwrap();
        let m = aggregate(&img, &LineSet::full(2), &normalize(&[1.0], 3)).unwrap();
        assert_eq!(m.to_rows(), vec![vec![2.5, 4.0]]);
    }

    #[test]
    fn multi_channel_mean_is_flattened() {
        // One RGB pixel per cell: (10, 20, 30) and (0, 0, 90).
        let data = [10u8, 20, 30, 0, 0, 90];
        let img = ImageU8::new(2, 1, 3, &data).unwrap();
        let m = aggregate(&img, &LineSet::full(1), &normalize(&[1.0], 2)).unwrap();
        assert_eq!(m.as_slice(), &[20.0, 30.0]);
    }

    #[test]
    fn zero_width_image_yields_empty_cell_rows() {
        let img = ImageU8::gray(0, 3, &[]).unwrap();
        let rows = normalize(&[1.0], 3);
        let cols = LineSet::full(0);
        let m = aggregate(&img, &rows, &cols).unwrap();
        assert_eq!(m.shape(), (2, 0));
    }

    #[test]
    fn lines_for_a_longer_axis_are_rejected() {
        let data = uniform(4, 4, 1);
        let img = ImageU8::gray(4, 4, &data).unwrap();
        let err = aggregate(&img, &LineSet::full(6), &LineSet::full(4)).unwrap_err();
        assert_eq!(
            err,
            GridError::ExtentMismatch {
                axis: "row",
                lines: 6,
                image: 4
            }
        );
    }

    #[test]
    fn lines_for_a_shorter_axis_are_rejected() {
        // Both sets stop short of the 4x4 image and would cover 2 of 16 pixels.
        let data: Vec<u8> = (0..16).collect();
        let img = ImageU8::gray(4, 4, &data).unwrap();
        let rows = normalize(&[5.0], 1);
        let err = aggregate(&img, &rows, &LineSet::full(4)).unwrap_err();
        assert_eq!(
            err,
            GridError::ExtentMismatch {
                axis: "row",
                lines: 1,
                image: 4
            }
        );
        let err = aggregate(&img, &LineSet::full(4), &normalize(&[], 2)).unwrap_err();
        assert_eq!(
            err,
            GridError::ExtentMismatch {
                axis: "column",
                lines: 2,
                image: 4
            }
        );
    }

    #[test]
    fn zero_area_span_averages_to_zero() {
        let data = [9u8, 9, 9, 9];
        let img = ImageU8::gray(2, 2, &data).unwrap();
        let means = band_means(&img, 0, 2, &[(1, 1), (0, 2)], 1);
        assert_eq!(means, vec![0.0, 9.0]);
        assert_eq!(band_means(&img, 1, 1, &[(0, 2)], 1), vec![0.0]);
    }
}
