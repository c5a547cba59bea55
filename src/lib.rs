//! K-means clustering, nearest-neighbor classification and the helpers
//! around them (min-max scaling, elbow curves, risk-grid bucketing).
//!
//! All algorithms work on dense `f64` matrices where rows are samples and
//! columns are features. Randomness is always injected through a
//! [`rand::Rng`], so any run can be reproduced from a seed.
//!
//! ```rust
//! use ndarray::array;
//! use riskcluster::{Convergence, KMeans, Seeding};
//!
//! let x = array![
//!     [0.0, 0.0],
//!     [0.5, 0.2],
//!     [10.0, 10.0],
//!     [10.2, 9.7]
//! ];
//!
//! let mut kmeans = KMeans::new(2)
//!     .init(Seeding::KMeansPlusPlus)
//!     .convergence(Convergence::ExactMatch)
//!     .random_state(7);
//! let labels = kmeans.fit_predict(&x).unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//! ```

pub use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub mod cluster;
pub mod datasets;
pub mod error;
pub mod metrics;
pub mod neighbors;
pub mod preprocessing;
pub mod random;
pub mod risk;

pub use cluster::{
    ClusteringResult, Convergence, KMeans, KMeansConfig, Seeding, cluster, distortion_curve,
};
pub use error::{ClusterError, Result};
pub use metrics::{distortion, euclidean_distance};
pub use neighbors::{KNeighborsClassifier, classify};
pub use preprocessing::{MinMaxScaler, denormalize, normalize};
pub use risk::{GridCell, RiskGrid};

pub type Vector = Array1<f64>;
pub type Matrix = Array2<f64>;
