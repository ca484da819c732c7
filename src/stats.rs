//! Category statistics over a luminance matrix.
//!
//! Cells of a [`LuminanceMatrix`] can be tagged with one or more categories.
//! For each category the report carries its cell count, sum and mean, the
//! mean of its cells within every matrix row, and the average of those row
//! means. An overall average over all distinct tagged cells closes the report.
//!
//! Tags naming a category outside the supplied list are ignored. Tagging the
//! same cell twice with one category counts it once.

use crate::error::GridError;
use crate::grid::LuminanceMatrix;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One category tag on one matrix cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSelection {
    pub row: usize,
    pub col: usize,
    pub category: String,
}

impl CellSelection {
    pub fn new(row: usize, col: usize, category: impl Into<String>) -> Self {
        Self {
            row,
            col,
            category: category.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
    pub sum: f64,
    /// `None` when no cell carries the category.
    pub average: Option<f64>,
    /// Per matrix row: mean of this category's cells in that row.
    pub row_means: Vec<Option<f64>>,
    /// Mean of the defined `row_means`.
    pub row_mean_average: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    /// One summary per requested category, in request order.
    pub categories: Vec<CategorySummary>,
    /// Distinct cells carrying at least one known category.
    pub selected_cells: usize,
    pub overall_average: Option<f64>,
}

impl CategoryReport {
    pub fn get(&self, category: &str) -> Option<&CategorySummary> {
        self.categories.iter().find(|c| c.category == category)
    }
}

#[derive(Default)]
struct Acc {
    sum: f64,
    count: usize,
}

impl Acc {
    fn add(&mut self, v: f64) {
        self.sum += v;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Statistics for `categories` over the tagged cells of `matrix`.
///
/// Fails if a selection lies outside the matrix.
pub fn category_stats(
    matrix: &LuminanceMatrix,
    categories: &[String],
    selections: &[CellSelection],
) -> Result<CategoryReport, GridError> {
    let (rows, cols) = matrix.shape();
    let mut tagged: BTreeSet<(usize, usize, usize)> = BTreeSet::new();
    for sel in selections {
        if sel.row >= rows || sel.col >= cols {
            return Err(GridError::SelectionOutOfBounds {
                row: sel.row,
                col: sel.col,
                rows,
                cols,
            });
        }
        match categories.iter().position(|c| *c == sel.category) {
            Some(idx) => {
                tagged.insert((idx, sel.row, sel.col));
            }
            None => debug!(
                "category_stats: ignoring unknown category {:?} at ({}, {})",
                sel.category, sel.row, sel.col
            ),
        }
    }

    let mut totals: Vec<Acc> = categories.iter().map(|_| Acc::default()).collect();
    let mut per_row: Vec<Vec<Acc>> = categories
        .iter()
        .map(|_| (0..rows).map(|_| Acc::default()).collect())
        .collect();
    let mut cells: BTreeSet<(usize, usize)> = BTreeSet::new();
    for &(idx, row, col) in &tagged {
        let value = matrix.row(row)[col];
        totals[idx].add(value);
        per_row[idx][row].add(value);
        cells.insert((row, col));
    }

    let mut overall = Acc::default();
    for &(row, col) in &cells {
        overall.add(matrix.row(row)[col]);
    }

    let summaries = categories
        .iter()
        .zip(totals.iter().zip(&per_row))
        .map(|(name, (total, rows_acc))| {
            let row_means: Vec<Option<f64>> = rows_acc.iter().map(Acc::mean).collect();
            let mut defined = Acc::default();
            row_means.iter().flatten().for_each(|&m| defined.add(m));
            CategorySummary {
                category: name.clone(),
                count: total.count,
                sum: total.sum,
                average: total.mean(),
                row_means,
                row_mean_average: defined.mean(),
            }
        })
        .collect();

    Ok(CategoryReport {
        categories: summaries,
        selected_cells: cells.len(),
        overall_average: overall.mean(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> LuminanceMatrix {
        // [[10, 20, 30],
        //  [40, 50, 60]]
        LuminanceMatrix::from_raw(2, 3, vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0])
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn per_category_and_per_row_means() {
        let sel = vec![
            CellSelection::new(0, 0, "a"),
            CellSelection::new(0, 1, "a"),
            CellSelection::new(1, 2, "a"),
            CellSelection::new(1, 0, "b"),
        ];
        let report = category_stats(&matrix(), &names(&["a", "b"]), &sel).unwrap();
        let a = report.get("a").unwrap();
        assert_eq!(a.count, 3);
        assert_eq!(a.sum, 90.0);
        assert_eq!(a.average, Some(30.0));
        assert_eq!(a.row_means, vec![Some(15.0), Some(60.0)]);
        assert_eq!(a.row_mean_average, Some(37.5));

        let b = report.get("b").unwrap();
        assert_eq!(b.row_means, vec![None, Some(40.0)]);
        assert_eq!(b.row_mean_average, Some(40.0));

        assert_eq!(report.selected_cells, 4);
        assert_eq!(report.overall_average, Some(32.5));
    }

    #[test]
    fn shared_cells_count_once_overall() {
        let sel = vec![
            CellSelection::new(1, 1, "a"),
            CellSelection::new(1, 1, "b"),
            CellSelection::new(1, 1, "a"),
        ];
        let report = category_stats(&matrix(), &names(&["a", "b"]), &sel).unwrap();
        assert_eq!(report.get("a").unwrap().count, 1);
        assert_eq!(report.get("b").unwrap().count, 1);
        assert_eq!(report.selected_cells, 1);
        assert_eq!(report.overall_average, Some(50.0));
    }

    #[test]
    fn empty_and_unknown_categories() {
        let sel = vec![CellSelection::new(0, 2, "ghost")];
        let report = category_stats(&matrix(), &names(&["a"]), &sel).unwrap();
        let a = report.get("a").unwrap();
        assert_eq!(a.count, 0);
        assert_eq!(a.average, None);
        assert_eq!(a.row_means, vec![None, None]);
        assert_eq!(a.row_mean_average, None);
        assert_eq!(report.overall_average, None);
    }

    #[test]
    fn out_of_bounds_selection_is_rejected() {
        let sel = vec![CellSelection::new(2, 0, "a")];
        let err = category_stats(&matrix(), &names(&["a"]), &sel).unwrap_err();
        assert_eq!(
            err,
            GridError::SelectionOutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            }
        );
    }
}
