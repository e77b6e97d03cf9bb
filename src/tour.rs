//! Tour representation and evaluation.
//!
//! A tour is an ordered sequence of place indices. Open tours visit each
//! index exactly once; a closed tour repeats the first index at the end.
//! Length is always recomputed from the distance matrix, never cached.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matrix::DistanceMatrix;

/// Sum of distances between consecutive indices of `path`.
///
/// Works on open and closed tours alike; a path with fewer than two stops
/// has length 0. Fails if any index falls outside the matrix.
pub fn path_length(path: &[usize], matrix: &DistanceMatrix) -> Result<f64> {
    for &index in path {
        matrix.check_index(index)?;
    }
    let mut length = 0.0;
    for pair in path.windows(2) {
        length += matrix.distance(pair[0], pair[1]);
    }
    Ok(length)
}

/// Check that `path` is a permutation of `0..path.len()` addressable by
/// `matrix`: no duplicates, no gaps, no index beyond the matrix dimension.
pub fn validate_tour(path: &[usize], matrix: &DistanceMatrix) -> Result<()> {
    let n = path.len();
    if n > matrix.dim() {
        return Err(Error::InvalidTour(format!(
            "tour visits {n} places but the matrix only covers {}",
            matrix.dim()
        )));
    }
    let mut seen = vec![false; n];
    for &index in path {
        if index >= n {
            return Err(Error::InvalidTour(format!(
                "index {index} out of range for a tour of {n} places"
            )));
        }
        if seen[index] {
            return Err(Error::InvalidTour(format!("index {index} visited twice")));
        }
        seen[index] = true;
    }
    Ok(())
}

/// Close an open tour by appending its first index, turning the path into a
/// cycle. An empty tour stays empty.
pub fn close_tour(path: &[usize]) -> Vec<usize> {
    let mut closed = path.to_vec();
    if let Some(&first) = path.first() {
        closed.push(first);
    }
    closed
}

/// A computed route: the visiting order plus its evaluated length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// Sequence of place indices (closed if the first index is repeated).
    pub path: Vec<usize>,
    /// Total length in the matrix's distance unit (km for geodesic input).
    pub length: f64,
    /// Algorithm that produced the route.
    pub algorithm: String,
    /// Computation time in seconds.
    pub computation_time: f64,
}

impl Route {
    /// Evaluate `path` against `matrix` and wrap it up as a route.
    pub fn from_path(matrix: &DistanceMatrix, path: Vec<usize>, algorithm: &str) -> Result<Self> {
        let length = path_length(&path, matrix)?;
        Ok(Route {
            path,
            length,
            algorithm: algorithm.to_string(),
            computation_time: 0.0,
        })
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Route ({})", self.algorithm)?;
        writeln!(f, "  Length: {:.2}", self.length)?;
        writeln!(f, "  Time: {:.4}s", self.computation_time)?;
        writeln!(f, "  Path: {:?}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> DistanceMatrix {
        DistanceMatrix::from_values(vec![
            vec![0.0, 1.0, 2.0, 3.0],
            vec![1.0, 0.0, 4.0, 5.0],
            vec![2.0, 4.0, 0.0, 6.0],
            vec![3.0, 5.0, 6.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_path_length_open() {
        let m = matrix();
        let len = path_length(&[0, 1, 2, 3], &m).unwrap();
        assert!((len - (1.0 + 4.0 + 6.0)).abs() < 1e-10);
    }

    #[test]
    fn test_path_length_closed() {
        let m = matrix();
        let closed = close_tour(&[0, 1, 2, 3]);
        assert_eq!(closed, vec![0, 1, 2, 3, 0]);
        let len = path_length(&closed, &m).unwrap();
        assert!((len - (1.0 + 4.0 + 6.0 + 3.0)).abs() < 1e-10);
    }

    #[test]
    fn test_path_length_single_stop() {
        let m = matrix();
        assert_eq!(path_length(&[2], &m).unwrap(), 0.0);
        assert_eq!(path_length(&[], &m).unwrap(), 0.0);
    }

    #[test]
    fn test_path_length_out_of_range() {
        let m = matrix();
        assert!(matches!(
            path_length(&[0, 4], &m),
            Err(Error::IndexOutOfRange { index: 4, dim: 4 })
        ));
    }

    #[test]
    fn test_validate_tour_accepts_permutation() {
        let m = matrix();
        assert!(validate_tour(&[2, 0, 3, 1], &m).is_ok());
        assert!(validate_tour(&[0, 1], &m).is_ok());
        assert!(validate_tour(&[], &m).is_ok());
    }

    #[test]
    fn test_validate_tour_rejects_duplicate() {
        let m = matrix();
        assert!(validate_tour(&[0, 1, 1, 2], &m).is_err());
    }

    #[test]
    fn test_validate_tour_rejects_gap() {
        let m = matrix();
        // 3 is out of range for a 3-stop tour even though the matrix has it.
        assert!(validate_tour(&[0, 1, 3], &m).is_err());
    }

    #[test]
    fn test_validate_tour_rejects_oversized() {
        let m = matrix();
        assert!(validate_tour(&[0, 1, 2, 3, 4], &m).is_err());
    }

    #[test]
    fn test_close_tour_empty() {
        assert!(close_tour(&[]).is_empty());
    }

    #[test]
    fn test_route_from_path() {
        let m = matrix();
        let route = Route::from_path(&m, vec![0, 1, 2], "test").unwrap();
        assert!((route.length - 5.0).abs() < 1e-10);
        assert_eq!(route.algorithm, "test");
    }
}
