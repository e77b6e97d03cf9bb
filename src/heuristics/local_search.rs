//! Local search improvement heuristics.
//!
//! 2-opt reverses sub-segments of an open tour whenever doing so strictly
//! shortens it, until no improving reversal remains.

use log::debug;

use crate::error::Result;
use crate::matrix::DistanceMatrix;
use crate::tour::validate_tour;

/// Deltas must beat this margin to count as a strict improvement, so
/// floating-point noise cannot keep the search looping on a plateau.
const IMPROVEMENT_EPS: f64 = 1e-9;

/// Trait for local search improvement methods
pub trait LocalSearch {
    /// Improve `path` in place. Returns whether any move was applied.
    fn improve(&self, path: &mut [usize], matrix: &DistanceMatrix) -> Result<bool>;
    fn name(&self) -> &str;
}

/// Refine an open tour to a 2-opt local optimum.
///
/// The input must be a permutation of `0..path.len()` covered by the matrix;
/// anything else is rejected as an invalid tour. Tours of fewer than 4 stops
/// are returned unchanged. The first stop is preserved: reversals never
/// include position 0, so callers that fix a start place keep it.
pub fn two_opt(path: &[usize], matrix: &DistanceMatrix) -> Result<Vec<usize>> {
    let mut refined = path.to_vec();
    TwoOpt::new().improve(&mut refined, matrix)?;
    Ok(refined)
}

/// 2-Opt Local Search
///
/// Hill-climbs by segment reversal with first-improvement adoption: each
/// pass scans all segment bounds on the current tour and applies every
/// strictly improving reversal as it is found, then repeats until a full
/// pass finds none.
pub struct TwoOpt {
    /// Stop after this many full passes and keep the best tour so far.
    /// `None` runs to a local optimum.
    pub max_passes: Option<usize>,
}

impl TwoOpt {
    pub fn new() -> Self {
        TwoOpt { max_passes: None }
    }

    pub fn with_max_passes(max_passes: usize) -> Self {
        TwoOpt {
            max_passes: Some(max_passes),
        }
    }
}

impl Default for TwoOpt {
    fn default() -> Self {
        Self::new()
    }
}

/// Length change from reversing `path[i..=j]`, for `1 <= i < j <= n-1`.
///
/// Only the two boundary edges change: `(i-1, i)` becomes `(i-1, j)`, and
/// `(j, j+1)` becomes `(i, j+1)` when the segment does not end the tour.
/// Interior edges keep their summed length because the matrix is symmetric.
fn reversal_delta(path: &[usize], matrix: &DistanceMatrix, i: usize, j: usize) -> f64 {
    let mut delta =
        matrix.distance(path[i - 1], path[j]) - matrix.distance(path[i - 1], path[i]);
    if j + 1 < path.len() {
        delta += matrix.distance(path[i], path[j + 1]) - matrix.distance(path[j], path[j + 1]);
    }
    delta
}

impl LocalSearch for TwoOpt {
    fn improve(&self, path: &mut [usize], matrix: &DistanceMatrix) -> Result<bool> {
        validate_tour(path, matrix)?;

        let n = path.len();
        if n < 4 {
            // No reversal can strictly improve this few stops.
            return Ok(false);
        }

        let mut improved_any = false;
        let mut passes = 0usize;

        loop {
            let mut improved = false;
            for i in 1..n - 1 {
                for j in i + 1..n {
                    let delta = reversal_delta(path, matrix, i, j);
                    if delta < -IMPROVEMENT_EPS {
                        path[i..=j].reverse();
                        improved = true;
                        improved_any = true;
                    }
                }
            }
            passes += 1;

            if !improved {
                debug!("2-opt converged after {passes} passes");
                break;
            }
            if let Some(max_passes) = self.max_passes {
                if passes >= max_passes {
                    debug!("2-opt stopped at pass cap {max_passes}");
                    break;
                }
            }
        }

        Ok(improved_any)
    }

    fn name(&self) -> &str {
        "2-Opt"
    }
}
