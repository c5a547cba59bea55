//! Partitional clustering with Lloyd's algorithm.
//!
//! This module provides:
//! - `KMeans`: estimator wrapper around a single engine
//! - `cluster`: the engine itself, parameterized by a [`Seeding`] strategy
//!   and a [`Convergence`] policy
//! - `distortion_curve`: distortion for `k = 1..=max_k`, for elbow-method
//!   model selection
//!
//! # Examples
//!
//! ## K-Means Clustering
//! ```rust
//! use ndarray::array;
//! use riskcluster::{Convergence, KMeans};
//!
//! let x = array![
//!     [1.0, 1.0],
//!     [1.5, 2.0],
//!     [3.0, 4.0],
//!     [5.0, 7.0],
//!     [3.5, 5.0],
//!     [4.5, 5.0]
//! ];
//!
//! let mut kmeans = KMeans::new(2)
//!     .max_iter(100)
//!     .convergence(Convergence::Tolerance(1e-6))
//!     .random_state(42);
//! let labels = kmeans.fit_predict(&x).unwrap();
//! assert_eq!(labels.len(), 6);
//!
//! // Get cluster centers
//! let centers = kmeans.cluster_centers.as_ref().unwrap();
//! println!("Cluster centers: {:?}", centers);
//!
//! // Get within-cluster sum of squares
//! let inertia = kmeans.inertia.unwrap();
//! println!("Inertia: {:.4}", inertia);
//! ```
//!
//! ## Elbow curve
//! ```rust
//! use ndarray::array;
//! use riskcluster::random::seeded_rng;
//! use riskcluster::{KMeansConfig, distortion_curve};
//!
//! let x = array![[0.0], [0.5], [9.0], [9.5], [20.0]];
//! let mut rng = seeded_rng(Some(1));
//!
//! let curve = distortion_curve(&x, 4, &KMeansConfig::default(), &mut rng).unwrap();
//! assert_eq!(curve.len(), 4);
//! ```

mod config;
mod elbow;
mod init;
mod kmeans;

pub use config::{Convergence, KMeansConfig};
pub use elbow::distortion_curve;
pub use init::Seeding;
pub use kmeans::{ClusteringResult, KMeans, cluster};
