use super::config::KMeansConfig;
use super::kmeans::cluster;
use crate::Matrix;
use crate::error::{ClusterError, Result};
use rand::Rng;
use tracing::debug;

/// Distortion of a full clustering run for every `k` in `1..=max_k`.
///
/// `template` supplies everything except `n_clusters`. Runs are independent
/// and draw from `rng` one after another, so only a seeded generator gives a
/// reproducible curve. Plot the result against `k` and look for the elbow.
pub fn distortion_curve<R: Rng + ?Sized>(
    x: &Matrix,
    max_k: usize,
    template: &KMeansConfig,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if max_k == 0 || max_k > x.nrows() {
        return Err(ClusterError::InvalidK {
            k: max_k,
            n_samples: x.nrows(),
        });
    }

    (1..=max_k)
        .map(|k| -> Result<f64> {
            let config = KMeansConfig {
                n_clusters: k,
                ..template.clone()
            };
            let result = cluster(x, &config, rng)?;
            debug!(k, distortion = result.inertia, n_iter = result.n_iter, "elbow point");
            Ok(result.inertia)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{Convergence, Seeding};
    use crate::random::seeded_rng;
    use ndarray::{Axis, array};

    #[test]
    fn test_distortion_curve_endpoints() {
        let x = array![[0.0, 0.0], [1.0, 0.0], [0.0, 2.0], [8.0, 8.0], [9.0, 7.0]];
        let mut rng = seeded_rng(Some(12));

        let curve = distortion_curve(&x, 5, &KMeansConfig::default(), &mut rng).unwrap();
        assert_eq!(curve.len(), 5);
        assert!(curve.iter().all(|&d| d >= 0.0));

        // k = 1 is the total sum of squares about the mean
        let mean = x.mean_axis(Axis(0)).unwrap();
        let total: f64 = x
            .rows()
            .into_iter()
            .map(|row| (&row - &mean).mapv(|v| v * v).sum())
            .sum();
        assert!((curve[0] - total).abs() < 1e-9);

        // k = n puts every distinct point in its own cluster
        assert!(curve[4].abs() < 1e-12);
    }

    #[test]
    fn test_distortion_curve_drops_at_true_k() {
        let x = array![
            [0.0, 0.0],
            [0.2, 0.1],
            [0.1, 0.3],
            [50.0, 50.0],
            [50.2, 49.9],
            [49.8, 50.1]
        ];
        let template = KMeansConfig {
            convergence: Convergence::ExactMatch,
            init: Seeding::KMeansPlusPlus,
            ..KMeansConfig::default()
        };
        let mut rng = seeded_rng(Some(21));

        let curve = distortion_curve(&x, 3, &template, &mut rng).unwrap();
        assert!(curve[1] < curve[0] / 100.0);
        assert!(curve[2] <= curve[1] + 1e-12);
    }

    #[test]
    fn test_distortion_curve_invalid_max_k() {
        let x = array![[1.0], [2.0]];
        let mut rng = seeded_rng(Some(0));

        assert_eq!(
            distortion_curve(&x, 0, &KMeansConfig::default(), &mut rng).unwrap_err(),
            ClusterError::InvalidK { k: 0, n_samples: 2 }
        );
        assert_eq!(
            distortion_curve(&x, 3, &KMeansConfig::default(), &mut rng).unwrap_err(),
            ClusterError::InvalidK { k: 3, n_samples: 2 }
        );
    }
}
