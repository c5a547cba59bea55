//! Distance-based classification.
//!
//! ```rust
//! use ndarray::array;
//! use riskcluster::classify;
//!
//! let x = array![[10.0, 90.0], [12.0, 80.0], [1.0, 5.0], [2.0, 10.0]];
//! let labels = ["high", "high", "low", "low"];
//!
//! let query = array![11.0, 70.0];
//! assert_eq!(classify(&x, &labels, query.view(), 3).unwrap(), "high");
//! ```

mod knn;

pub use knn::{KNeighborsClassifier, classify};
