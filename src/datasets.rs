use crate::Matrix;
use crate::error::{ClusterError, Result};
use ndarray::{Axis, s};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::Rng;

/// `n_per_center` points around each row of `centers`, every coordinate
/// jittered uniformly in `[-spread, spread)`.
///
/// Rows come out grouped by center, in the order of `centers`.
pub fn make_blobs<R: Rng>(
    centers: &Matrix,
    n_per_center: usize,
    spread: f64,
    rng: &mut R,
) -> Result<Matrix> {
    if !(spread > 0.0) || !(2.0 * spread).is_finite() {
        return Err(ClusterError::InvalidRange {
            min: -spread,
            max: spread,
        });
    }

    let n_features = centers.ncols();
    let n_samples = centers.nrows() * n_per_center;
    let mut points = Matrix::random_using(
        (n_samples, n_features),
        Uniform::new(-spread, spread),
        rng,
    );

    for (c, center) in centers.axis_iter(Axis(0)).enumerate() {
        let mut block = points.slice_mut(s![c * n_per_center..(c + 1) * n_per_center, ..]);
        block += &center;
    }

    Ok(points)
}
