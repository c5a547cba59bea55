use super::config::{Convergence, KMeansConfig};
use super::init::Seeding;
use crate::Matrix;
use crate::error::{ClusterError, Result};
use crate::metrics::{distortion, row_distance};
use crate::random::seeded_rng;
use rand::Rng;
use tracing::{debug, info, warn};

/// Output of a completed k-means run.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusteringResult {
    /// Cluster index of every input row, in input order.
    pub labels: Vec<usize>,
    /// `k × d` centroid coordinates.
    pub centroids: Matrix,
    /// Sum of squared distances from each row to its centroid.
    pub inertia: f64,
    /// Assignment passes performed.
    pub n_iter: usize,
    pub converged: bool,
}

/// Runs Lloyd's algorithm on the rows of `x`.
///
/// Each pass assigns every row to its nearest centroid (ties go to the
/// lowest centroid index) and moves each centroid to the mean of its rows.
/// A centroid left without rows is re-seeded to a uniformly random row.
/// The loop stops when `config.convergence` is satisfied or after
/// `config.max_iter` passes; running out of passes is not an error.
pub fn cluster<R: Rng + ?Sized>(
    x: &Matrix,
    config: &KMeansConfig,
    rng: &mut R,
) -> Result<ClusteringResult> {
    validate_samples(x)?;
    config.validate(x.nrows())?;

    let k = config.n_clusters;
    let mut centroids = config.init.seed(x, k, rng)?;
    let mut labels: Option<Vec<usize>> = None;
    let mut converged = false;
    let mut n_iter = 0;

    while n_iter < config.max_iter {
        n_iter += 1;

        let new_labels = assign_labels(x, &centroids);
        let new_centroids = update_centroids(x, &new_labels, k, rng);

        let changed = changed_labels(labels.as_deref(), &new_labels);
        converged = match config.convergence {
            Convergence::ExactMatch => {
                debug!(iteration = n_iter, changed, "assignment pass");
                labels.is_some() && changed == 0
            }
            Convergence::Tolerance(eps) => {
                let shift = total_shift(&centroids, &new_centroids);
                debug!(iteration = n_iter, changed, shift, "assignment pass");
                shift < eps
            }
        };

        labels = Some(new_labels);
        centroids = new_centroids;

        if converged {
            break;
        }
    }

    // max_iter >= 1 is validated, so at least one pass ran
    let labels = match labels {
        Some(labels) => labels,
        None => assign_labels(x, &centroids),
    };
    let inertia = distortion(x, &labels, &centroids)?;

    if converged {
        info!(k, n_iter, inertia, "k-means converged");
    } else {
        warn!(k, max_iter = config.max_iter, inertia, "k-means stopped without converging");
    }

    Ok(ClusteringResult {
        labels,
        centroids,
        inertia,
        n_iter,
        converged,
    })
}

fn validate_samples(x: &Matrix) -> Result<()> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(ClusterError::InvalidInput(
            "Input matrix must have at least one sample and one feature".to_string(),
        ));
    }

    if let Some(((row, col), value)) = x.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(ClusterError::InvalidInput(format!(
            "non-finite value {} at row {}, column {}",
            value, row, col
        )));
    }

    Ok(())
}

/// Index of the nearest centroid for every row. Strict comparison keeps the
/// lowest index on ties.
pub(crate) fn assign_labels(x: &Matrix, centroids: &Matrix) -> Vec<usize> {
    x.rows()
        .into_iter()
        .map(|point| {
            let mut min_distance = f64::INFINITY;
            let mut closest_cluster = 0;

            for (k, centroid) in centroids.rows().into_iter().enumerate() {
                let distance = row_distance(point, centroid);
                if distance < min_distance {
                    min_distance = distance;
                    closest_cluster = k;
                }
            }

            closest_cluster
        })
        .collect()
}

fn update_centroids<R: Rng + ?Sized>(
    x: &Matrix,
    labels: &[usize],
    k: usize,
    rng: &mut R,
) -> Matrix {
    let mut centroids = Matrix::zeros((k, x.ncols()));
    let mut counts = vec![0usize; k];

    for (point, &label) in x.rows().into_iter().zip(labels) {
        let mut centroid = centroids.row_mut(label);
        centroid += &point;
        counts[label] += 1;
    }

    for (cluster, &count) in counts.iter().enumerate() {
        if count == 0 {
            let idx = rng.gen_range(0..x.nrows());
            debug!(cluster, sample = idx, "empty cluster re-seeded");
            centroids.row_mut(cluster).assign(&x.row(idx));
        } else {
            let mut centroid = centroids.row_mut(cluster);
            centroid /= count as f64;
        }
    }

    centroids
}

/// Rows whose label differs from the previous pass; every row on the first.
pub(crate) fn changed_labels(previous: Option<&[usize]>, current: &[usize]) -> usize {
    match previous {
        Some(previous) => previous
            .iter()
            .zip(current)
            .filter(|(old, new)| old != new)
            .count(),
        None => current.len(),
    }
}

fn total_shift(old_centroids: &Matrix, new_centroids: &Matrix) -> f64 {
    old_centroids
        .rows()
        .into_iter()
        .zip(new_centroids.rows())
        .map(|(old, new)| row_distance(old, new))
        .sum()
}

#[derive(Clone, Debug)]
pub struct KMeans {
    pub cluster_centers: Option<Matrix>,
    pub labels: Option<Vec<usize>>,
    pub inertia: Option<f64>,
    pub n_iter: Option<usize>,
    config: KMeansConfig,
}

impl KMeans {
    pub fn new(n_clusters: usize) -> Self {
        Self::from_config(KMeansConfig::new(n_clusters))
    }

    pub fn from_config(config: KMeansConfig) -> Self {
        Self {
            cluster_centers: None,
            labels: None,
            inertia: None,
            n_iter: None,
            config,
        }
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iter = max_iter;
        self
    }

    pub fn convergence(mut self, convergence: Convergence) -> Self {
        self.config.convergence = convergence;
        self
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.convergence = Convergence::Tolerance(tolerance);
        self
    }

    pub fn init(mut self, init: Seeding) -> Self {
        self.config.init = init;
        self
    }

    pub fn random_state(mut self, random_state: u64) -> Self {
        self.config.random_state = Some(random_state);
        self
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Fits with a generator built from `random_state` (entropy when unset).
    pub fn fit(&mut self, x: &Matrix) -> Result<ClusteringResult> {
        let mut rng = seeded_rng(self.config.random_state);
        self.fit_with_rng(x, &mut rng)
    }

    pub fn fit_with_rng<R: Rng + ?Sized>(
        &mut self,
        x: &Matrix,
        rng: &mut R,
    ) -> Result<ClusteringResult> {
        let result = cluster(x, &self.config, rng)?;

        self.cluster_centers = Some(result.centroids.clone());
        self.labels = Some(result.labels.clone());
        self.inertia = Some(result.inertia);
        self.n_iter = Some(result.n_iter);

        Ok(result)
    }

    pub fn fit_predict(&mut self, x: &Matrix) -> Result<Vec<usize>> {
        Ok(self.fit(x)?.labels)
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vec<usize>> {
        let centroids = self.fitted_centroids(x)?;
        Ok(assign_labels(x, centroids))
    }

    /// Distance from every row of `x` to every centroid (`n × k`).
    pub fn transform(&self, x: &Matrix) -> Result<Matrix> {
        let centroids = self.fitted_centroids(x)?;

        let mut distances = Matrix::zeros((x.nrows(), centroids.nrows()));
        for i in 0..x.nrows() {
            for k in 0..centroids.nrows() {
                distances[[i, k]] = row_distance(x.row(i), centroids.row(k));
            }
        }

        Ok(distances)
    }

    fn fitted_centroids(&self, x: &Matrix) -> Result<&Matrix> {
        let centroids = self
            .cluster_centers
            .as_ref()
            .ok_or(ClusterError::NotFitted("KMeans"))?;

        if x.ncols() != centroids.ncols() {
            return Err(ClusterError::DimensionMismatch {
                expected: centroids.ncols(),
                actual: x.ncols(),
            });
        }

        Ok(centroids)
    }
}
