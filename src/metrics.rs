use crate::Matrix;
use crate::error::{ClusterError, Result};
use ndarray::ArrayView1;

/// Euclidean distance between two vectors of equal length.
pub fn euclidean_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
    if a.len() != b.len() {
        return Err(ClusterError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(squared_distance(a, b).sqrt())
}

/// Squared Euclidean distance. Callers guarantee equal lengths.
pub(crate) fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
}

pub(crate) fn row_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Sum of squared distances from every sample to its assigned centroid.
///
/// This is the quantity plotted against `k` for the elbow method.
pub fn distortion(x: &Matrix, labels: &[usize], centroids: &Matrix) -> Result<f64> {
    if labels.len() != x.nrows() {
        return Err(ClusterError::LabelCountMismatch {
            samples: x.nrows(),
            labels: labels.len(),
        });
    }
    if x.ncols() != centroids.ncols() {
        return Err(ClusterError::DimensionMismatch {
            expected: centroids.ncols(),
            actual: x.ncols(),
        });
    }
    if let Some(&label) = labels.iter().find(|&&label| label >= centroids.nrows()) {
        return Err(ClusterError::InvalidParameter(format!(
            "label {} has no centroid (k={})",
            label,
            centroids.nrows()
        )));
    }

    Ok(labels
        .iter()
        .enumerate()
        .map(|(i, &label)| squared_distance(x.row(i), centroids.row(label)))
        .sum())
}
