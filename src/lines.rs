//! Boundary-line normalization.
//!
//! Callers hand in noisy candidate boundaries (unsorted, repeated, fractional
//! or outside the image). Normalization never rejects them: it adds the two
//! sentinels `0` and `extent`, drops anything outside `[0, extent]`,
//! truncates toward zero, sorts and removes duplicates. The result is a
//! strictly increasing [`LineSet`] that always spans the whole axis.
//!
//! `extent == 0` is the one degenerate case: both sentinels coincide and the
//! set is `[0]`, which defines no cells along that axis.

use serde::Serialize;

/// Strictly increasing boundary coordinates along one image axis.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LineSet {
    #[serde(skip)]
    extent: usize,
    lines: Vec<usize>,
}

impl LineSet {
    /// Normalize raw coordinates against an axis of length `extent`.
    pub fn normalize(raw: &[f64], extent: usize) -> Self {
        let upper = extent as f64;
        let mut lines: Vec<usize> = raw
            .iter()
            .copied()
            .chain([0.0, upper])
            // NaN fails both comparisons and is dropped with the out-of-range values.
            .filter(|&v| v >= 0.0 && v <= upper)
            .map(|v| v.trunc() as usize)
            .collect();
        lines.sort_unstable();
        lines.dedup();
        Self { extent, lines }
    }

    /// Integer flavour of [`LineSet::normalize`].
    pub fn normalize_indices(raw: &[i64], extent: usize) -> Self {
        let mut lines: Vec<usize> = raw
            .iter()
            .filter_map(|&v| usize::try_from(v).ok())
            .chain([0, extent])
            .filter(|&v| v <= extent)
            .collect();
        lines.sort_unstable();
        lines.dedup();
        Self { extent, lines }
    }

    /// Sentinels only: a single cell spanning the whole axis.
    pub fn full(extent: usize) -> Self {
        Self::normalize(&[], extent)
    }

    /// Axis length this set was normalized against.
    pub fn extent(&self) -> usize {
        self.extent
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false for a normalized set; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of cells the boundaries define.
    pub fn cell_count(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// Half-open spans `[start, end)` between adjacent boundaries.
    pub fn spans(&self) -> impl ExactSizeIterator<Item = (usize, usize)> + '_ {
        self.lines.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.lines
    }
}

impl AsRef<[usize]> for LineSet {
    fn as_ref(&self) -> &[usize] {
        &self.lines
    }
}

/// Free-function form of [`LineSet::normalize`].
pub fn normalize(raw: &[f64], extent: usize) -> LineSet {
    LineSet::normalize(raw, extent)
}

/// Lines produced by the adaptive splitter, as normalizer input.
pub fn from_positions(positions: &[usize], extent: usize) -> LineSet {
    let raw: Vec<f64> = positions.iter().map(|&p| p as f64).collect();
    LineSet::normalize(&raw, extent)
}
