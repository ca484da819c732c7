use super::SplitAxis;
use crate::image::{ImageU8, ImageView};

/// Cumulative composite score along one axis of a grayscale image.
///
/// Position `i` scores `alpha * mean_brightness + (1 - alpha) * bright_fraction`
/// of line `i` (a column for [`SplitAxis::Columns`], a row for
/// [`SplitAxis::Rows`]), both terms normalized to `[0, 1]`.
#[derive(Clone, Debug)]
pub(crate) struct CompositeProfile {
    cumsum: Vec<f64>,
}

impl CompositeProfile {
    pub(crate) fn build(image: &ImageU8<'_>, axis: SplitAxis, alpha: f64, threshold: u8) -> Self {
        let (len, per_line) = match axis {
            SplitAxis::Columns => (image.width(), image.height()),
            SplitAxis::Rows => (image.height(), image.width()),
        };
        let mut brightness = vec![0u64; len];
        let mut bright = vec![0u64; len];
        match axis {
            SplitAxis::Columns => {
                for row in image.rows() {
                    let lines = brightness.iter_mut().zip(bright.iter_mut()).zip(row);
                    for ((sum, count), &v) in lines {
                        *sum += v as u64;
                        *count += (v > threshold) as u64;
                    }
                }
            }
            SplitAxis::Rows => {
                let lines = brightness.iter_mut().zip(bright.iter_mut());
                for ((sum, count), row) in lines.zip(image.rows()) {
                    *sum = row.iter().map(|&v| v as u64).sum();
                    *count = row.iter().filter(|&&v| v > threshold).count() as u64;
                }
            }
        }

        let mut acc = 0.0f64;
        let cumsum = brightness
            .iter()
            .zip(&bright)
            .map(|(&sum, &count)| {
                acc += composite(sum, count, per_line, alpha);
                acc
            })
            .collect();
        Self { cumsum }
    }

    /// Sum of all composite scores.
    pub(crate) fn total(&self) -> f64 {
        self.cumsum.last().copied().unwrap_or(0.0)
    }

    /// Leftmost index whose cumulative score reaches `k * total / (n + 1)` for
    /// each `k` in `1..=n`. When no index reaches a target the insertion point
    /// `len` is returned.
    pub(crate) fn quantile_positions(&self, num_splits: usize) -> Vec<usize> {
        if self.cumsum.is_empty() {
            return vec![0; num_splits];
        }
        let step = self.total() / (num_splits + 1) as f64;
        (1..=num_splits)
            .map(|k| {
                let target = k as f64 * step;
                self.cumsum.partition_point(|&c| c < target)
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn cumulative(&self) -> &[f64] {
        &self.cumsum
    }
}

/// Composite score of one line; a line without samples scores zero.
#[inline]
fn composite(sum: u64, count: u64, samples: usize, alpha: f64) -> f64 {
    if samples == 0 {
        return 0.0;
    }
    let n = samples as f64;
    let norm_brightness = sum as f64 / (255.0 * n);
    let norm_binary = count as f64 / n;
    alpha * norm_brightness + (1.0 - alpha) * norm_binary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_profile_mixes_brightness_and_fraction() {
        // 2 rows x 2 columns: column 0 = [255, 0], column 1 = [0, 0].
        let data = [255u8, 0, 0, 0];
        let img = ImageU8::gray(2, 2, &data).unwrap();
        let profile = CompositeProfile::build(&img, SplitAxis::Columns, 0.5, 128);
        let cum = profile.cumulative();
        assert_eq!(cum.len(), 2);
        // brightness 0.5, fraction 0.5 -> composite 0.5
        assert!((cum[0] - 0.5).abs() < 1e-12);
        assert!((cum[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn threshold_is_strict() {
        let data = [128u8, 129];
        let img = ImageU8::gray(2, 1, &data).unwrap();
        let profile = CompositeProfile::build(&img, SplitAxis::Columns, 0.0, 128);
        assert_eq!(profile.cumulative(), &[0.0, 1.0]);
    }

    #[test]
    fn row_profile_has_one_entry_per_row() {
        let data = [0u8, 0, 0, 255, 255, 255];
        let img = ImageU8::gray(3, 2, &data).unwrap();
        let profile = CompositeProfile::build(&img, SplitAxis::Rows, 1.0, 0);
        assert_eq!(profile.cumulative(), &[0.0, 1.0]);
        assert_eq!(profile.total(), 1.0);
    }

    #[test]
    fn ties_resolve_to_earliest_index() {
        // Flat middle: cumsum = [1, 1, 1, 2]; half of total (1.0) first met at 0.
        let data = [255u8, 0, 0, 255];
        let img = ImageU8::gray(4, 1, &data).unwrap();
        let profile = CompositeProfile::build(&img, SplitAxis::Columns, 1.0, 0);
        assert_eq!(profile.quantile_positions(1), vec![0]);
    }

    #[test]
    fn empty_profile_collapses_to_zero() {
        let img = ImageU8::gray(0, 4, &[]).unwrap();
        let profile = CompositeProfile::build(&img, SplitAxis::Columns, 0.5, 128);
        assert_eq!(profile.total(), 0.0);
        assert_eq!(profile.quantile_positions(3), vec![0, 0, 0]);
    }
}
