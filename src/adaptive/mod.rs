//! Brightness-equalizing boundary placement.
//!
//! Given a grayscale image and a split count `n`, the splitter chooses `n`
//! boundary positions along one axis so the `n + 1` resulting bands carry
//! roughly equal composite score. The score of a line blends its mean
//! brightness and the fraction of its samples brighter than `threshold`:
//!
//! ```text
//! composite[i] = alpha * sum[i] / (255 * samples) + (1 - alpha) * bright[i] / samples
//! ```
//!
//! The cumulative score is monotone, so each boundary is a quantile lookup:
//! the leftmost index whose cumulative score reaches `k * total / (n + 1)`,
//! found by binary search.
//!
//! Notes
//! - A flat zero distribution (`total == 0`) places every boundary at `0`.
//! - Positions may repeat; feed them through [`crate::lines::from_positions`]
//!   before aggregating.

mod profile;

use crate::error::GridError;
use crate::image::{ImageU8, ImageView};
use log::debug;
use profile::CompositeProfile;
use serde::{Deserialize, Serialize};

/// Axis whose lines are scored.
///
/// `Columns` (axis index `0`) scores each column and yields x positions for
/// vertical boundaries; `Rows` (axis index `1`) scores each row and yields y
/// positions for horizontal boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitAxis {
    Columns,
    Rows,
}

impl SplitAxis {
    pub fn index(self) -> u8 {
        match self {
            SplitAxis::Columns => 0,
            SplitAxis::Rows => 1,
        }
    }
}

impl TryFrom<u8> for SplitAxis {
    type Error = GridError;

    fn try_from(axis: u8) -> Result<Self, Self::Error> {
        match axis {
            0 => Ok(SplitAxis::Columns),
            1 => Ok(SplitAxis::Rows),
            other => Err(GridError::InvalidAxis(other)),
        }
    }
}

/// Positions of `num_splits` boundaries along `axis`, non-decreasing.
///
/// `image` must be single-channel and `alpha` finite in `[0, 1]`.
pub fn find_split_positions(
    image: &ImageU8<'_>,
    num_splits: usize,
    axis: SplitAxis,
    alpha: f64,
    threshold: u8,
) -> Result<Vec<usize>, GridError> {
    if image.channels() != 1 {
        return Err(GridError::NotGrayscale {
            channels: image.channels(),
        });
    }
    if !(alpha.is_finite() && (0.0..=1.0).contains(&alpha)) {
        return Err(GridError::InvalidAlpha(alpha));
    }

    let profile = CompositeProfile::build(image, axis, alpha, threshold);
    let total = profile.total();
    if total == 0.0 && num_splits > 0 {
        debug!("find_split_positions: zero composite total on {axis:?}, all splits at 0");
    }
    let positions = profile.quantile_positions(num_splits);
    debug!(
        "find_split_positions: {}x{} axis={:?} n={} alpha={:.3} threshold={} total={:.4} -> {:?}",
        image.width(),
        image.height(),
        axis,
        num_splits,
        alpha,
        threshold,
        total,
        positions
    );
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_gradient(w: usize, h: usize) -> Vec<u8> {
        (0..h)
            .flat_map(|y| std::iter::repeat(((y + 1) * 10) as u8).take(w))
            .collect()
    }

    #[test]
    fn gradient_rows_split_at_half_mass() {
        // Row sums ∝ 10, 20, ..., 80; cumulative 10, 30, 60, 100, 150, 210, ...
        // Half of 360 is 180, first reached at row 5.
        let data = row_gradient(4, 8);
        let img = ImageU8::gray(4, 8, &data).unwrap();
        let pos = find_split_positions(&img, 1, SplitAxis::Rows, 1.0, 128).unwrap();
        assert_eq!(pos, vec![5]);
    }

    #[test]
    fn uniform_columns_split_evenly() {
        // Saturated columns score exactly 1.0: cumsum = 1..=10, targets 2, 4, 6, 8.
        let data = vec![255u8; 10 * 3];
        let img = ImageU8::gray(10, 3, &data).unwrap();
        let pos = find_split_positions(&img, 4, SplitAxis::Columns, 0.5, 128).unwrap();
        assert_eq!(pos, vec![1, 3, 5, 7]);
    }

    #[test]
    fn all_zero_image_collapses_to_origin() {
        let data = vec![0u8; 6 * 6];
        let img = ImageU8::gray(6, 6, &data).unwrap();
        let pos = find_split_positions(&img, 3, SplitAxis::Columns, 0.5, 128).unwrap();
        assert_eq!(pos, vec![0, 0, 0]);
    }

    #[test]
    fn zero_splits_is_empty() {
        let data = vec![9u8; 4];
        let img = ImageU8::gray(2, 2, &data).unwrap();
        assert!(find_split_positions(&img, 0, SplitAxis::Rows, 0.5, 0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn preconditions_are_enforced() {
        let data = vec![0u8; 12];
        let rgb = ImageU8::new(2, 2, 3, &data).unwrap();
        assert_eq!(
            find_split_positions(&rgb, 1, SplitAxis::Rows, 0.5, 128).unwrap_err(),
            GridError::NotGrayscale { channels: 3 }
        );
        let gray = ImageU8::gray(4, 3, &data).unwrap();
        assert!(matches!(
            find_split_positions(&gray, 1, SplitAxis::Rows, 1.5, 128),
            Err(GridError::InvalidAlpha(_))
        ));
        assert!(matches!(
            find_split_positions(&gray, 1, SplitAxis::Rows, f64::NAN, 128),
            Err(GridError::InvalidAlpha(_))
        ));
    }

    #[test]
    fn axis_indices_round_trip() {
        assert_eq!(SplitAxis::try_from(0).unwrap(), SplitAxis::Columns);
        assert_eq!(SplitAxis::try_from(1).unwrap().index(), 1);
        assert_eq!(SplitAxis::try_from(2), Err(GridError::InvalidAxis(2)));
    }
}
