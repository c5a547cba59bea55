use crate::error::{ClusterError, Result};
use crate::{Matrix, Vector};
use ndarray::Axis;

/// Maps every column to `(value - min) / (max - min)`.
pub fn normalize(data: &Matrix, min: &Vector, max: &Vector) -> Result<Matrix> {
    validate_bounds(data, min, max)?;

    let range = max - min;
    let mut result = data.clone();
    for mut row in result.axis_iter_mut(Axis(0)) {
        row -= min;
        row /= &range;
    }

    Ok(result)
}

/// Inverse of [`normalize`]: `value * (max - min) + min`.
pub fn denormalize(data: &Matrix, min: &Vector, max: &Vector) -> Result<Matrix> {
    validate_bounds(data, min, max)?;

    let range = max - min;
    let mut result = data.clone();
    for mut row in result.axis_iter_mut(Axis(0)) {
        row *= &range;
        row += min;
    }

    Ok(result)
}

fn validate_bounds(data: &Matrix, min: &Vector, max: &Vector) -> Result<()> {
    for bound in [min, max] {
        if bound.len() != data.ncols() {
            return Err(ClusterError::DimensionMismatch {
                expected: data.ncols(),
                actual: bound.len(),
            });
        }
    }

    for (dimension, (&lo, &hi)) in min.iter().zip(max.iter()).enumerate() {
        if !lo.is_finite() || !hi.is_finite() || !(hi - lo).is_finite() {
            return Err(ClusterError::InvalidRange { min: lo, max: hi });
        }
        if lo == hi {
            return Err(ClusterError::DegenerateRange {
                dimension,
                value: lo,
            });
        }
    }

    Ok(())
}

/// Min-max scaler over fixed or learned per-column bounds.
#[derive(Clone, Debug, Default)]
pub struct MinMaxScaler {
    pub data_min: Option<Vector>,
    pub data_max: Option<Vector>,
}

impl MinMaxScaler {
    pub fn new() -> Self {
        Self {
            data_min: None,
            data_max: None,
        }
    }

    /// Scaler with caller-supplied bounds, e.g. the full domain of each axis
    /// rather than the range observed in one sample.
    pub fn with_range(min: Vector, max: Vector) -> Result<Self> {
        if min.len() != max.len() {
            return Err(ClusterError::DimensionMismatch {
                expected: min.len(),
                actual: max.len(),
            });
        }

        Ok(Self {
            data_min: Some(min),
            data_max: Some(max),
        })
    }

    pub fn fit(&mut self, data: &Matrix) -> Result<()> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(ClusterError::InvalidInput(
                "Input matrix must have at least one sample and one feature".to_string(),
            ));
        }

        let min = data.fold_axis(Axis(0), f64::INFINITY, |&acc, &v| acc.min(v));
        let max = data.fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &v| acc.max(v));

        self.data_min = Some(min);
        self.data_max = Some(max);
        Ok(())
    }

    pub fn transform(&self, data: &Matrix) -> Result<Matrix> {
        let (min, max) = self.bounds()?;
        normalize(data, min, max)
    }

    pub fn inverse_transform(&self, data: &Matrix) -> Result<Matrix> {
        let (min, max) = self.bounds()?;
        denormalize(data, min, max)
    }

    pub fn fit_transform(&mut self, data: &Matrix) -> Result<Matrix> {
        self.fit(data)?;
        self.transform(data)
    }

    fn bounds(&self) -> Result<(&Vector, &Vector)> {
        match (self.data_min.as_ref(), self.data_max.as_ref()) {
            (Some(min), Some(max)) => Ok((min, max)),
            _ => Err(ClusterError::NotFitted("MinMaxScaler")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_normalize() {
        let data = array![[0.0, 50.0], [15.0, 100.0], [7.5, 0.0]];
        let min = array![0.0, 0.0];
        let max = array![15.0, 100.0];

        let scaled = normalize(&data, &min, &max).unwrap();
        assert_eq!(scaled, array![[0.0, 0.5], [1.0, 1.0], [0.5, 0.0]]);
    }

    #[test]
    fn test_denormalize_inverts_normalize() {
        let data = array![[1.25, 33.3], [14.9, 99.0], [3.0, 0.5], [0.0, 66.6]];
        let min = array![0.0, 0.0];
        let max = array![15.0, 100.0];

        let restored = denormalize(&normalize(&data, &min, &max).unwrap(), &min, &max).unwrap();
        for (a, b) in data.iter().zip(restored.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_range() {
        let data = array![[1.0, 2.0]];
        let min = array![0.0, 2.0];
        let max = array![1.0, 2.0];

        let err = normalize(&data, &min, &max).unwrap_err();
        assert_eq!(
            err,
            ClusterError::DegenerateRange {
                dimension: 1,
                value: 2.0
            }
        );
    }

    #[test]
    fn test_range_overflow_rejected() {
        let data = array![[1e308], [-1e308], [0.0]];
        let min = array![-1.5e308];
        let max = array![1.5e308];

        let expected = ClusterError::InvalidRange {
            min: -1.5e308,
            max: 1.5e308,
        };
        assert_eq!(normalize(&data, &min, &max).unwrap_err(), expected);
        assert_eq!(denormalize(&data, &min, &max).unwrap_err(), expected);
    }

    #[test]
    fn test_bounds_dimension_mismatch() {
        let data = array![[1.0, 2.0, 3.0]];
        let min = array![0.0, 0.0];
        let max = array![1.0, 1.0];

        assert!(matches!(
            denormalize(&data, &min, &max),
            Err(ClusterError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_min_max_scaler() {
        let data = array![[1.0, -2.0], [3.0, 4.0], [5.0, 1.0]];
        let mut scaler = MinMaxScaler::new();

        let scaled = scaler.fit_transform(&data).unwrap();
        assert_eq!(scaled.shape(), data.shape());
        assert_eq!(scaled.column(0).to_vec(), vec![0.0, 0.5, 1.0]);
        assert_eq!(scaled.column(1).to_vec(), vec![0.0, 1.0, 0.5]);

        let restored = scaler.inverse_transform(&scaled).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn test_scaler_not_fitted() {
        let scaler = MinMaxScaler::new();
        assert_eq!(
            scaler.transform(&array![[1.0]]).unwrap_err(),
            ClusterError::NotFitted("MinMaxScaler")
        );
    }
}
