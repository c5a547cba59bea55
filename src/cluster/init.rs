use crate::Matrix;
use crate::error::{ClusterError, Result};
use crate::metrics::row_distance;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

/// How the initial centroids are picked from the dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Seeding {
    /// `k` distinct rows chosen uniformly at random.
    Random,
    /// k-means++: later seeds are drawn with probability proportional to
    /// their distance from the seeds already chosen.
    #[default]
    #[serde(alias = "k-means++", alias = "kmeans++")]
    KMeansPlusPlus,
}

impl Seeding {
    /// Returns a `k × d` matrix of seeds copied out of `x`.
    pub fn seed<R: Rng + ?Sized>(&self, x: &Matrix, k: usize, rng: &mut R) -> Result<Matrix> {
        if k == 0 || k > x.nrows() {
            return Err(ClusterError::InvalidK {
                k,
                n_samples: x.nrows(),
            });
        }

        match self {
            Seeding::Random => random_seeds(x, k, rng),
            Seeding::KMeansPlusPlus => Ok(plus_plus_seeds(x, k, rng)),
        }
    }
}

/// Number of rows that differ by content. `-0.0` and `0.0` count as equal.
pub(crate) fn count_distinct_rows(x: &Matrix) -> usize {
    let rows: HashSet<Vec<u64>> = x
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|&v| if v == 0.0 { 0 } else { v.to_bits() })
                .collect()
        })
        .collect();
    rows.len()
}

fn random_seeds<R: Rng + ?Sized>(x: &Matrix, k: usize, rng: &mut R) -> Result<Matrix> {
    let distinct = count_distinct_rows(x);
    if distinct < k {
        return Err(ClusterError::InsufficientDistinctPoints { k, distinct });
    }

    let mut centroids = Matrix::zeros((k, x.ncols()));
    let mut chosen: Vec<usize> = Vec::with_capacity(k);

    while chosen.len() < k {
        let idx = rng.gen_range(0..x.nrows());
        if chosen.iter().any(|&c| x.row(c) == x.row(idx)) {
            continue;
        }

        centroids.row_mut(chosen.len()).assign(&x.row(idx));
        chosen.push(idx);
    }

    trace!(seeds = ?chosen, "random seeding");
    Ok(centroids)
}

fn plus_plus_seeds<R: Rng + ?Sized>(x: &Matrix, k: usize, rng: &mut R) -> Matrix {
    let n_samples = x.nrows();
    let mut centroids = Matrix::zeros((k, x.ncols()));

    let first = rng.gen_range(0..n_samples);
    centroids.row_mut(0).assign(&x.row(first));
    let mut chosen = vec![first];

    // Distance from every sample to its nearest seed so far
    let mut min_distances: Vec<f64> = (0..n_samples)
        .map(|i| row_distance(x.row(i), centroids.row(0)))
        .collect();

    for c in 1..k {
        let total: f64 = min_distances.iter().sum();

        let idx = if total > 0.0 {
            let draw = rng.gen_range(0.0..1.0);
            select_by_cumulative(&min_distances, total, draw)
        } else {
            debug!(seed = c, "all samples coincide with chosen seeds, picking uniformly");
            rng.gen_range(0..n_samples)
        };

        centroids.row_mut(c).assign(&x.row(idx));
        chosen.push(idx);

        for (i, min_distance) in min_distances.iter_mut().enumerate() {
            let distance = row_distance(x.row(i), centroids.row(c));
            if distance < *min_distance {
                *min_distance = distance;
            }
        }
    }

    trace!(seeds = ?chosen, "k-means++ seeding");
    centroids
}

/// First index whose cumulative probability `sum(weights[..=i]) / total`
/// is strictly greater than `draw`.
///
/// Rounding can leave the final cumulative value just below `draw`; the
/// last index with non-zero weight is returned in that case.
pub(crate) fn select_by_cumulative(weights: &[f64], total: f64, draw: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, &weight) in weights.iter().enumerate() {
        cumulative += weight / total;
        if cumulative > draw {
            return i;
        }
    }

    let fallback = weights
        .iter()
        .rposition(|&w| w > 0.0)
        .unwrap_or(weights.len().saturating_sub(1));
    debug!(draw, cumulative, fallback, "cumulative probability never exceeded draw");
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;
    use ndarray::array;

    #[test]
    fn test_random_seeds_are_distinct() {
        let x = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
        let mut rng = seeded_rng(Some(11));

        for _ in 0..20 {
            let seeds = Seeding::Random.seed(&x, 3, &mut rng).unwrap();
            assert_eq!(count_distinct_rows(&seeds), 3);
        }
    }

    #[test]
    fn test_random_seeds_insufficient_distinct_points() {
        let x = array![[1.0, 1.0], [1.0, 1.0], [2.0, 2.0]];
        let mut rng = seeded_rng(Some(0));

        let err = Seeding::Random.seed(&x, 3, &mut rng).unwrap_err();
        assert_eq!(
            err,
            ClusterError::InsufficientDistinctPoints { k: 3, distinct: 2 }
        );
    }

    #[test]
    fn test_count_distinct_rows_signed_zero() {
        let x = array![[0.0, 1.0], [-0.0, 1.0], [0.0, -1.0]];
        assert_eq!(count_distinct_rows(&x), 2);
    }

    #[test]
    fn test_plus_plus_covers_distinct_points() {
        // Already chosen points have zero weight, so k == n picks every row once
        let x = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [5.0, 5.0]];
        let mut rng = seeded_rng(Some(3));

        let seeds = Seeding::KMeansPlusPlus.seed(&x, 4, &mut rng).unwrap();
        assert_eq!(count_distinct_rows(&seeds), 4);
    }

    #[test]
    fn test_plus_plus_degenerate_dataset() {
        let x = array![[2.0, 2.0], [2.0, 2.0], [2.0, 2.0]];
        let mut rng = seeded_rng(Some(3));

        let seeds = Seeding::KMeansPlusPlus.seed(&x, 3, &mut rng).unwrap();
        assert_eq!(seeds, array![[2.0, 2.0], [2.0, 2.0], [2.0, 2.0]]);
    }

    #[test]
    fn test_plus_plus_prefers_far_points() {
        // One far point carries almost all of the probability mass
        let x = array![[0.0], [0.0], [0.0], [0.0], [1000.0]];
        let mut picked_far = 0;

        for seed in 0..50 {
            let mut rng = seeded_rng(Some(seed));
            let seeds = Seeding::KMeansPlusPlus.seed(&x, 2, &mut rng).unwrap();
            if seeds[[0, 0]] == 1000.0 || seeds[[1, 0]] == 1000.0 {
                picked_far += 1;
            }
        }
        assert_eq!(picked_far, 50);
    }

    #[test]
    fn test_seed_rejects_invalid_k() {
        let x = array![[1.0], [2.0]];
        let mut rng = seeded_rng(Some(0));

        for init in [Seeding::Random, Seeding::KMeansPlusPlus] {
            assert!(matches!(
                init.seed(&x, 0, &mut rng),
                Err(ClusterError::InvalidK { .. })
            ));
            assert!(matches!(
                init.seed(&x, 3, &mut rng),
                Err(ClusterError::InvalidK { .. })
            ));
        }
    }

    #[test]
    fn test_select_by_cumulative() {
        let weights = [1.0, 1.0, 2.0];
        assert_eq!(select_by_cumulative(&weights, 4.0, 0.0), 0);
        assert_eq!(select_by_cumulative(&weights, 4.0, 0.25), 1);
        assert_eq!(select_by_cumulative(&weights, 4.0, 0.49), 1);
        assert_eq!(select_by_cumulative(&weights, 4.0, 0.5), 2);
    }

    #[test]
    fn test_select_skips_zero_weights() {
        let weights = [0.0, 5.0, 0.0];
        assert_eq!(select_by_cumulative(&weights, 5.0, 0.0), 1);
        assert_eq!(select_by_cumulative(&weights, 5.0, 0.999), 1);
    }

    #[test]
    fn test_select_draw_at_upper_boundary() {
        let weights = [1.0, 2.0, 0.0];

        let draw = 1.0 - f64::EPSILON;
        assert_eq!(select_by_cumulative(&weights, 3.0, draw), 1);

        // Nothing exceeds a draw of exactly 1.0: fall back to the last weighted index
        assert_eq!(select_by_cumulative(&weights, 3.0, 1.0), 1);
    }
}
