use crate::Matrix;
use crate::error::{ClusterError, Result};
use crate::metrics::row_distance;
use ndarray::ArrayView1;

/// Majority label among the `k` training rows closest to `query`.
///
/// Neighbors are ranked by Euclidean distance with a stable sort, so equally
/// distant rows keep their training order. On a tally tie the label that
/// appears first in that ranking wins.
pub fn classify<L: Clone + PartialEq>(
    x: &Matrix,
    labels: &[L],
    query: ArrayView1<f64>,
    k: usize,
) -> Result<L> {
    if x.nrows() != labels.len() {
        return Err(ClusterError::LabelCountMismatch {
            samples: x.nrows(),
            labels: labels.len(),
        });
    }
    if k == 0 || k > x.nrows() {
        return Err(ClusterError::InvalidK {
            k,
            n_samples: x.nrows(),
        });
    }
    if query.len() != x.ncols() {
        return Err(ClusterError::DimensionMismatch {
            expected: x.ncols(),
            actual: query.len(),
        });
    }

    let mut neighbors: Vec<(f64, usize)> = x
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| (row_distance(row, query), i))
        .collect();
    neighbors.sort_by(|a, b| a.0.total_cmp(&b.0));

    // (label, count) in order of first appearance
    let mut tally: Vec<(&L, usize)> = Vec::new();
    for &(_, i) in neighbors.iter().take(k) {
        let label = &labels[i];
        match tally.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => tally.push((label, 1)),
        }
    }

    let mut best = tally[0];
    for &entry in &tally[1..] {
        if entry.1 > best.1 {
            best = entry;
        }
    }

    Ok(best.0.clone())
}

/// k-nearest-neighbors classifier over an owned copy of the training set.
#[derive(Clone, Debug)]
pub struct KNeighborsClassifier<L> {
    n_neighbors: usize,
    training: Option<(Matrix, Vec<L>)>,
}

impl<L: Clone + PartialEq> KNeighborsClassifier<L> {
    pub fn new(n_neighbors: usize) -> Self {
        Self {
            n_neighbors,
            training: None,
        }
    }

    pub fn fit(&mut self, x: &Matrix, labels: &[L]) -> Result<()> {
        if x.nrows() != labels.len() {
            return Err(ClusterError::LabelCountMismatch {
                samples: x.nrows(),
                labels: labels.len(),
            });
        }
        if self.n_neighbors == 0 || self.n_neighbors > x.nrows() {
            return Err(ClusterError::InvalidK {
                k: self.n_neighbors,
                n_samples: x.nrows(),
            });
        }

        self.training = Some((x.clone(), labels.to_vec()));
        Ok(())
    }

    pub fn predict_one(&self, query: ArrayView1<f64>) -> Result<L> {
        let (x, labels) = self
            .training
            .as_ref()
            .ok_or(ClusterError::NotFitted("KNeighborsClassifier"))?;
        classify(x, labels, query, self.n_neighbors)
    }

    pub fn predict(&self, queries: &Matrix) -> Result<Vec<L>> {
        queries
            .rows()
            .into_iter()
            .map(|query| self.predict_one(query))
            .collect()
    }
}
