//! Threshold bucketing of raw points into a row/column risk grid.
//!
//! A grid renderer places every point in the cell given by its two raw
//! (denormalized) coordinates: the row comes from one dimension, the column
//! from another, each bucketed against ascending upper bounds.

use crate::Matrix;
use crate::error::{ClusterError, Result};

/// One point placed in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
    /// Cluster label of the point.
    pub cluster: usize,
    /// Row of the point in the dataset.
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RiskGrid {
    row_thresholds: Vec<f64>,
    col_thresholds: Vec<f64>,
}

impl RiskGrid {
    /// Thresholds are inclusive upper bounds and must be strictly ascending.
    pub fn new(row_thresholds: Vec<f64>, col_thresholds: Vec<f64>) -> Result<Self> {
        check_thresholds("row", &row_thresholds)?;
        check_thresholds("col", &col_thresholds)?;

        Ok(Self {
            row_thresholds,
            col_thresholds,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.row_thresholds.len()
    }

    pub fn n_cols(&self) -> usize {
        self.col_thresholds.len()
    }

    /// Bucket of `row_value` and `col_value`, or `None` if either lies above
    /// the last threshold.
    pub fn locate(&self, row_value: f64, col_value: f64) -> Option<(usize, usize)> {
        let row = bucket(&self.row_thresholds, row_value)?;
        let col = bucket(&self.col_thresholds, col_value)?;
        Some((row, col))
    }

    /// Places every row of `x`, reading the row category from column
    /// `row_dim` and the column category from column `col_dim`.
    ///
    /// Points outside the grid are left out.
    pub fn cells(
        &self,
        x: &Matrix,
        labels: &[usize],
        row_dim: usize,
        col_dim: usize,
    ) -> Result<Vec<GridCell>> {
        if labels.len() != x.nrows() {
            return Err(ClusterError::LabelCountMismatch {
                samples: x.nrows(),
                labels: labels.len(),
            });
        }
        for dim in [row_dim, col_dim] {
            if dim >= x.ncols() {
                return Err(ClusterError::DimensionMismatch {
                    expected: x.ncols(),
                    actual: dim + 1,
                });
            }
        }

        Ok(x.rows()
            .into_iter()
            .zip(labels)
            .enumerate()
            .filter_map(|(index, (point, &cluster))| {
                let (row, col) = self.locate(point[row_dim], point[col_dim])?;
                Some(GridCell {
                    row,
                    col,
                    cluster,
                    index,
                })
            })
            .collect())
    }
}

fn bucket(thresholds: &[f64], value: f64) -> Option<usize> {
    thresholds.iter().position(|&threshold| value <= threshold)
}

fn check_thresholds(axis: &str, thresholds: &[f64]) -> Result<()> {
    if thresholds.is_empty() {
        return Err(ClusterError::InvalidParameter(format!(
            "{} thresholds must not be empty",
            axis
        )));
    }
    if thresholds.iter().any(|t| !t.is_finite()) || thresholds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ClusterError::InvalidParameter(format!(
            "{} thresholds must be finite and strictly ascending, got {:?}",
            axis, thresholds
        )));
    }
    Ok(())
}
