use super::init::Seeding;
use crate::error::{ClusterError, Result};
use serde::{Deserialize, Serialize};

/// When the Lloyd iteration stops before `max_iter`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Convergence {
    /// Stop once a pass produces the same assignment vector as the previous one.
    ExactMatch,
    /// Stop once the summed centroid displacement of a pass drops below epsilon.
    Tolerance(f64),
}

impl Default for Convergence {
    fn default() -> Self {
        Convergence::Tolerance(1e-9)
    }
}

/// Parameters of one k-means run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansConfig {
    pub n_clusters: usize,
    pub max_iter: usize,
    pub convergence: Convergence,
    pub init: Seeding,
    /// Seed for the generator `KMeans::fit` builds. `cluster` and
    /// `distortion_curve` ignore it and draw only from the generator passed in.
    pub random_state: Option<u64>,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            n_clusters: 1,
            max_iter: 100,
            convergence: Convergence::default(),
            init: Seeding::default(),
            random_state: None,
        }
    }
}

impl KMeansConfig {
    pub fn new(n_clusters: usize) -> Self {
        Self {
            n_clusters,
            ..Self::default()
        }
    }

    pub fn validate(&self, n_samples: usize) -> Result<()> {
        if self.n_clusters == 0 || self.n_clusters > n_samples {
            return Err(ClusterError::InvalidK {
                k: self.n_clusters,
                n_samples,
            });
        }

        if self.max_iter == 0 {
            return Err(ClusterError::InvalidParameter(
                "max_iter must be > 0".to_string(),
            ));
        }

        if let Convergence::Tolerance(eps) = self.convergence {
            if !(eps > 0.0) || !eps.is_finite() {
                return Err(ClusterError::InvalidParameter(format!(
                    "tolerance must be positive and finite, got {}",
                    eps
                )));
            }
        }

        Ok(())
    }
}
