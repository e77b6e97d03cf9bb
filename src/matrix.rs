//! Pairwise distance matrix between places.
//!
//! The matrix is built once (from coordinates or raw values), validated, and
//! then treated as immutable by every heuristic that reads it.

use crate::error::{Error, Result};

const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A square, symmetric table of non-negative pairwise distances with a zero
/// diagonal. Heuristics borrow it read-only; it is never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    values: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Build a matrix from raw row-major values, rejecting anything that is
    /// not square, symmetric (within tolerance), non-negative, and zero on
    /// the diagonal.
    pub fn from_values(values: Vec<Vec<f64>>) -> Result<Self> {
        let n = values.len();
        for (i, row) in values.iter().enumerate() {
            if row.len() != n {
                return Err(Error::InvalidMatrix(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
        }
        for i in 0..n {
            if values[i][i] != 0.0 {
                return Err(Error::InvalidMatrix(format!(
                    "diagonal entry [{i}][{i}] is {}, expected 0",
                    values[i][i]
                )));
            }
            for j in 0..n {
                let d = values[i][j];
                if !d.is_finite() || d < 0.0 {
                    return Err(Error::InvalidMatrix(format!(
                        "entry [{i}][{j}] is {d}, expected a finite non-negative value"
                    )));
                }
                if (d - values[j][i]).abs() > SYMMETRY_TOLERANCE {
                    return Err(Error::InvalidMatrix(format!(
                        "asymmetric entries [{i}][{j}]={d} vs [{j}][{i}]={}",
                        values[j][i]
                    )));
                }
            }
        }
        Ok(DistanceMatrix { values })
    }

    /// Number of places the matrix covers.
    #[inline]
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// Distance between two places.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    /// Bounds-check an index before it is used to address the matrix.
    #[inline]
    pub fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.dim() {
            return Err(Error::IndexOutOfRange {
                index,
                dim: self.dim(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_matrix() {
        let m = DistanceMatrix::from_values(vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![2.0, 3.0, 0.0],
        ])
        .unwrap();
        assert_eq!(m.dim(), 3);
        assert_eq!(m.distance(1, 2), 3.0);
        assert!(m.check_index(2).is_ok());
        assert!(m.check_index(3).is_err());
    }

    #[test]
    fn test_empty_matrix() {
        let m = DistanceMatrix::from_values(Vec::new()).unwrap();
        assert_eq!(m.dim(), 0);
        assert!(m.check_index(0).is_err());
    }

    #[test]
    fn test_rejects_non_square() {
        let err = DistanceMatrix::from_values(vec![vec![0.0, 1.0], vec![1.0, 0.0, 2.0]]);
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_asymmetric() {
        let err = DistanceMatrix::from_values(vec![vec![0.0, 1.0], vec![2.0, 0.0]]);
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_nonzero_diagonal() {
        let err = DistanceMatrix::from_values(vec![vec![0.5]]);
        assert!(err.is_err());
    }

    #[test]
    fn test_rejects_negative_entry() {
        let err = DistanceMatrix::from_values(vec![vec![0.0, -1.0], vec![-1.0, 0.0]]);
        assert!(err.is_err());
    }
}
