//! City Tour Library
//!
//! Plans an approximate shortest route visiting a set of geographic places:
//! a nearest-neighbor construction followed by optional 2-opt refinement
//! over a precomputed geodesic distance matrix.
//!
//! # Features
//!
//! - CSV place loading and haversine distance matrices
//! - Nearest-neighbor construction (deterministic, randomized, multi-start)
//! - 2-opt local search with incremental move evaluation
//! - GeoJSON export and SVG rendering of the computed route
//!
//! # Example
//!
//! ```no_run
//! use city_tour::instance::TourInstance;
//! use city_tour::heuristics::{nearest_neighbor, two_opt};
//! use city_tour::tour::path_length;
//!
//! let instance = TourInstance::from_csv_file("places.csv").unwrap();
//! let matrix = instance.matrix();
//!
//! let initial = nearest_neighbor(matrix, 0).unwrap();
//! let refined = two_opt(&initial, matrix).unwrap();
//!
//! let total = path_length(&refined, matrix).unwrap();
//! println!("Total distance: {total:.2} km");
//! ```

pub mod error;
pub mod export;
pub mod heuristics;
pub mod instance;
pub mod matrix;
pub mod tour;
pub mod visualization;

pub use error::{Error, Result};
pub use heuristics::{nearest_neighbor, two_opt};
pub use instance::{Place, TourInstance};
pub use matrix::DistanceMatrix;
pub use tour::{close_tour, path_length, Route};
