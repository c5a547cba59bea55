use thiserror::Error;

/// Failures surfaced by the clustering engine, the classifier and their helpers.
///
/// All variants are validation failures raised before (or during the first
/// pass of) an algorithm. Nothing is retried and `k` is never adjusted on the
/// caller's behalf.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusterError {
    /// Two vectors of unequal length were compared.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// `k` outside `[1, n_samples]`.
    #[error("Invalid k={k}: must be between 1 and the number of samples ({n_samples})")]
    InvalidK { k: usize, n_samples: usize },

    /// Uniform seeding asked for more clusters than there are distinct points.
    #[error("Cannot seed {k} clusters from {distinct} distinct points")]
    InsufficientDistinctPoints { k: usize, distinct: usize },

    /// Zero-width normalization range.
    #[error("Degenerate range in dimension {dimension}: min == max == {value}")]
    DegenerateRange { dimension: usize, value: f64 },

    /// Malformed bounds handed to a random draw.
    #[error("Invalid range [{min}, {max})")]
    InvalidRange { min: f64, max: f64 },

    /// Empty matrix or non-finite coordinates.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Training points and labels have different lengths.
    #[error("Number of samples ({samples}) and labels ({labels}) must match")]
    LabelCountMismatch { samples: usize, labels: usize },

    #[error("{0} not fitted. Call fit() first.")]
    NotFitted(&'static str),
}

pub type Result<T> = std::result::Result<T, ClusterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ClusterError::InvalidK { k: 0, n_samples: 4 };
        assert_eq!(
            err.to_string(),
            "Invalid k=0: must be between 1 and the number of samples (4)"
        );

        let err = ClusterError::NotFitted("KMeans");
        assert_eq!(err.to_string(), "KMeans not fitted. Call fit() first.");
    }
}
