//! Construction heuristics: build an initial feasible tour from scratch.

use log::debug;
use ordered_float::OrderedFloat;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::error::Result;
use crate::matrix::DistanceMatrix;
use crate::tour::path_length;

pub trait ConstructionHeuristic {
    /// Build an open tour over all matrix indices, beginning at `start`.
    fn construct(&self, matrix: &DistanceMatrix, start: usize) -> Result<Vec<usize>>;
    fn name(&self) -> &str;
}

/// Build an open tour greedily: from the last stop, always move to the
/// nearest unvisited place. Distance ties go to the lowest index.
///
/// Returns a permutation of `0..matrix.dim()` whose first element is
/// `start`, or an out-of-range error for an invalid `start`.
pub fn nearest_neighbor(matrix: &DistanceMatrix, start: usize) -> Result<Vec<usize>> {
    NearestNeighbor::new().construct(matrix, start)
}

/// Nearest Neighbor Heuristic
///
/// Builds a tour by repeatedly visiting the nearest unvisited place. The
/// randomized variant picks among the closest few candidates instead of
/// strictly the closest, which diversifies multi-start runs.
pub struct NearestNeighbor {
    pub randomized: bool,
    pub seed: u64,
}

impl NearestNeighbor {
    pub fn new() -> Self {
        NearestNeighbor {
            randomized: false,
            seed: 42,
        }
    }

    pub fn randomized(seed: u64) -> Self {
        NearestNeighbor {
            randomized: true,
            seed,
        }
    }

    /// Nearest unvisited place; strict `<` keeps the lowest index on ties.
    fn find_nearest(&self, matrix: &DistanceMatrix, current: usize, visited: &[bool]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for candidate in 0..matrix.dim() {
            if visited[candidate] {
                continue;
            }
            let d = matrix.distance(current, candidate);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((candidate, d)),
            }
        }
        best.map(|(candidate, _)| candidate)
    }

    /// Pick uniformly among the up-to-3 nearest unvisited places.
    fn find_nearest_randomized(
        &self,
        matrix: &DistanceMatrix,
        current: usize,
        visited: &[bool],
        rng: &mut ChaCha8Rng,
    ) -> Option<usize> {
        let mut candidates: Vec<(usize, f64)> = (0..matrix.dim())
            .filter(|&c| !visited[c])
            .map(|c| (c, matrix.distance(current, c)))
            .collect();

        if candidates.is_empty() {
            return None;
        }

        candidates.sort_by_key(|&(_, d)| OrderedFloat(d));

        let top_k = candidates.len().min(3);
        let idx = rng.gen_range(0..top_k);
        Some(candidates[idx].0)
    }
}

impl Default for NearestNeighbor {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionHeuristic for NearestNeighbor {
    fn construct(&self, matrix: &DistanceMatrix, start: usize) -> Result<Vec<usize>> {
        let n = matrix.dim();
        matrix.check_index(start)?;

        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut visited = vec![false; n];
        visited[start] = true;

        let mut path = Vec::with_capacity(n);
        path.push(start);

        while path.len() < n {
            let current = path[path.len() - 1];
            let next = if self.randomized {
                self.find_nearest_randomized(matrix, current, &visited, &mut rng)
            } else {
                self.find_nearest(matrix, current, &visited)
            };
            match next {
                Some(next) => {
                    visited[next] = true;
                    path.push(next);
                }
                None => break,
            }
        }

        Ok(path)
    }

    fn name(&self) -> &str {
        if self.randomized {
            "NearestNeighbor-Randomized"
        } else {
            "NearestNeighbor"
        }
    }
}

/// Multi-Start Nearest Neighbor
///
/// Runs the nearest-neighbor construction from every start index in
/// parallel and keeps the shortest tour. The winner is selected by a single
/// min-reduction after all runs finish, so the result matches the
/// sequential loop exactly; length ties go to the lowest start index.
pub struct MultiStart {
    heuristic: NearestNeighbor,
}

impl MultiStart {
    pub fn new() -> Self {
        MultiStart {
            heuristic: NearestNeighbor::new(),
        }
    }

    pub fn randomized(seed: u64) -> Self {
        MultiStart {
            heuristic: NearestNeighbor::randomized(seed),
        }
    }

    /// Best nearest-neighbor tour over all start indices. An empty matrix
    /// yields an empty tour.
    pub fn construct(&self, matrix: &DistanceMatrix) -> Result<Vec<usize>> {
        let n = matrix.dim();
        if n == 0 {
            return Ok(Vec::new());
        }

        let runs: Vec<(usize, f64, Vec<usize>)> = (0..n)
            .into_par_iter()
            .map(|start| {
                let path = self.heuristic.construct(matrix, start)?;
                let length = path_length(&path, matrix)?;
                Ok((start, length, path))
            })
            .collect::<Result<Vec<_>>>()?;

        // Serialized min-reduction; strict `<` keeps the lowest start on ties.
        let mut best: Option<(usize, f64, Vec<usize>)> = None;
        for (start, length, path) in runs {
            let better = match &best {
                Some((_, best_length, _)) => length < *best_length,
                None => true,
            };
            if better {
                best = Some((start, length, path));
            }
        }
        match best {
            Some((start, length, path)) => {
                debug!("multi-start winner: start={start}, length={length:.3}");
                Ok(path)
            }
            None => Ok(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        "MultiStartNearestNeighbor"
    }
}

impl Default for MultiStart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn euclidean_matrix(points: &[(f64, f64)]) -> DistanceMatrix {
        let n = points.len();
        let mut values = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in 0..n {
                let dx = points[i].0 - points[j].0;
                let dy = points[i].1 - points[j].1;
                values[i][j] = (dx * dx + dy * dy).sqrt();
            }
        }
        DistanceMatrix::from_values(values).unwrap()
    }

    fn assert_permutation(path: &[usize], n: usize) {
        let mut sorted = path.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn test_returns_permutation_from_every_start() {
        let matrix = euclidean_matrix(&[
            (0.0, 0.0),
            (3.0, 1.0),
            (1.0, 4.0),
            (5.0, 5.0),
            (2.0, 2.0),
        ]);
        for start in 0..5 {
            let path = nearest_neighbor(&matrix, start).unwrap();
            assert_eq!(path[0], start);
            assert_permutation(&path, 5);
        }
    }

    #[test]
    fn test_single_place() {
        let matrix = DistanceMatrix::from_values(vec![vec![0.0]]).unwrap();
        assert_eq!(nearest_neighbor(&matrix, 0).unwrap(), vec![0]);
    }

    #[test]
    fn test_start_out_of_range() {
        let matrix = DistanceMatrix::from_values(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert!(matches!(
            nearest_neighbor(&matrix, 2),
            Err(Error::IndexOutOfRange { index: 2, dim: 2 })
        ));
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = DistanceMatrix::from_values(Vec::new()).unwrap();
        assert!(nearest_neighbor(&matrix, 0).is_err());
    }

    #[test]
    fn test_greedy_picks_nearest() {
        // 0 -> 2 (dist 1) -> 1 (dist 2) -> 3 is the greedy order.
        let matrix = DistanceMatrix::from_values(vec![
            vec![0.0, 5.0, 1.0, 9.0],
            vec![5.0, 0.0, 2.0, 4.0],
            vec![1.0, 2.0, 0.0, 7.0],
            vec![9.0, 4.0, 7.0, 0.0],
        ])
        .unwrap();
        assert_eq!(nearest_neighbor(&matrix, 0).unwrap(), vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_tie_break_lowest_index() {
        // All distances equal: greedy must fall back to index order.
        let c = 2.5;
        let matrix = DistanceMatrix::from_values(vec![
            vec![0.0, c, c, c],
            vec![c, 0.0, c, c],
            vec![c, c, 0.0, c],
            vec![c, c, c, 0.0],
        ])
        .unwrap();
        assert_eq!(nearest_neighbor(&matrix, 2).unwrap(), vec![2, 0, 1, 3]);
    }

    #[test]
    fn test_randomized_is_seeded_permutation() {
        let matrix = euclidean_matrix(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (2.0, 1.0),
            (0.0, 3.0),
            (4.0, 4.0),
            (1.0, 1.0),
        ]);
        let a = NearestNeighbor::randomized(7).construct(&matrix, 3).unwrap();
        let b = NearestNeighbor::randomized(7).construct(&matrix, 3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0], 3);
        assert_permutation(&a, 6);
    }

    #[test]
    fn test_multi_start_never_worse_than_any_single_start() {
        let matrix = euclidean_matrix(&[
            (0.0, 0.0),
            (6.0, 0.0),
            (6.0, 5.0),
            (0.0, 5.0),
            (3.0, 2.0),
            (1.0, 4.0),
        ]);
        let best = MultiStart::new().construct(&matrix).unwrap();
        assert_permutation(&best, 6);
        let best_length = path_length(&best, &matrix).unwrap();
        for start in 0..6 {
            let path = nearest_neighbor(&matrix, start).unwrap();
            let length = path_length(&path, &matrix).unwrap();
            assert!(best_length <= length + 1e-9);
        }
    }

    #[test]
    fn test_multi_start_empty() {
        let matrix = DistanceMatrix::from_values(Vec::new()).unwrap();
        assert!(MultiStart::new().construct(&matrix).unwrap().is_empty());
    }
}
