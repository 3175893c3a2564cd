//! Rectangular linear sum assignment
//!
//! Shortest-augmenting-path Hungarian method with row/column potentials,
//! O(n^2 m) for an `n x m` problem with `n <= m`. Taller matrices are solved
//! transposed. [`CostMatrix`] bounds every cost by [`MAX_COST`](super::cost::MAX_COST), so the
//! potentials stay finite and every augmenting search reaches a free column.

use super::cost::CostMatrix;
use crate::traits::AssignmentSolver;

/// Minimum-cost matching between the rows and columns of a cost matrix
#[derive(Debug, Clone, Copy, Default)]
pub struct HungarianSolver;

impl HungarianSolver {
    pub fn new() -> Self {
        Self
    }
}

impl AssignmentSolver for HungarianSolver {
    fn solve(&self, costs: &CostMatrix) -> Vec<(usize, usize)> {
        if costs.is_empty() {
            return Vec::new();
        }

        let transposed = costs.rows() > costs.cols();
        let (n, m) = if transposed {
            (costs.cols(), costs.rows())
        } else {
            (costs.rows(), costs.cols())
        };
        let cost = |i: usize, j: usize| {
            if transposed {
                costs.get(j, i)
            } else {
                costs.get(i, j)
            }
        };

        // 1-based: index 0 of `owner` and `way` is the virtual source column.
        let mut u = vec![0.0_f64; n + 1];
        let mut v = vec![0.0_f64; m + 1];
        let mut owner = vec![0usize; m + 1];
        let mut way = vec![0usize; m + 1];

        'rows: for row in 1..=n {
            owner[0] = row;
            let mut j0 = 0;
            let mut min_slack = vec![f64::INFINITY; m + 1];
            let mut visited = vec![false; m + 1];

            loop {
                visited[j0] = true;
                let i0 = owner[j0];
                let mut delta = f64::INFINITY;
                let mut j1 = 0;

                for j in 1..=m {
                    if visited[j] {
                        continue;
                    }
                    let reduced = cost(i0 - 1, j - 1) - u[i0] - v[j];
                    if reduced < min_slack[j] {
                        min_slack[j] = reduced;
                        way[j] = j0;
                    }
                    if min_slack[j] < delta {
                        delta = min_slack[j];
                        j1 = j;
                    }
                }

                if j1 == 0 || !delta.is_finite() {
                    // No reachable free column; leave the remaining rows unassigned.
                    log::warn!("Assignment search stalled at row {}; stopping early", row - 1);
                    break 'rows;
                }

                for j in 0..=m {
                    if visited[j] {
                        u[owner[j]] += delta;
                        v[j] -= delta;
                    } else {
                        min_slack[j] -= delta;
                    }
                }

                j0 = j1;
                if owner[j0] == 0 {
                    break;
                }
            }

            // Flip the augmenting path back to the source.
            while j0 != 0 {
                let prev = way[j0];
                owner[j0] = owner[prev];
                j0 = prev;
            }
        }

        let mut pairs: Vec<(usize, usize)> = (1..=m)
            .filter(|&j| owner[j] != 0)
            .map(|j| {
                let (i, j) = (owner[j] - 1, j - 1);
                if transposed { (j, i) } else { (i, j) }
            })
            .collect();
        pairs.sort_unstable();
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn matrix(rows: usize, cols: usize, data: &[f64]) -> CostMatrix {
        CostMatrix::from_vec(rows, cols, data.to_vec()).unwrap()
    }

    /// Exhaustive minimum over all injective row->column maps (rows <= cols)
    fn brute_force(costs: &CostMatrix) -> f64 {
        fn search(costs: &CostMatrix, row: usize, used: &mut Vec<bool>, transposed: bool) -> f64 {
            let (n, m) = if transposed {
                (costs.cols(), costs.rows())
            } else {
                (costs.rows(), costs.cols())
            };
            if row == n {
                return 0.0;
            }
            let mut best = f64::INFINITY;
            for j in 0..m {
                if used[j] {
                    continue;
                }
                used[j] = true;
                let c = if transposed { costs.get(j, row) } else { costs.get(row, j) };
                best = best.min(c + search(costs, row + 1, used, transposed));
                used[j] = false;
            }
            best
        }

        if costs.is_empty() {
            return 0.0;
        }
        let transposed = costs.rows() > costs.cols();
        let width = costs.rows().max(costs.cols());
        search(costs, 0, &mut vec![false; width], transposed)
    }

    fn assert_valid(costs: &CostMatrix, pairs: &[(usize, usize)]) {
        assert_eq!(pairs.len(), costs.rows().min(costs.cols()));
        let mut rows: Vec<_> = pairs.iter().map(|p| p.0).collect();
        let mut cols: Vec<_> = pairs.iter().map(|p| p.1).collect();
        assert!(rows.windows(2).all(|w| w[0] < w[1]), "rows not ascending");
        rows.dedup();
        cols.sort_unstable();
        cols.dedup();
        assert_eq!(rows.len(), pairs.len());
        assert_eq!(cols.len(), pairs.len());
    }

    #[test]
    fn test_square_prefers_global_optimum() {
        // Greedy on the smallest entry (1.0) would force a total of 1 + 100.
        let costs = matrix(2, 2, &[1.0, 2.0, 2.0, 100.0]);
        let pairs = HungarianSolver.solve(&costs);
        assert_eq!(pairs, vec![(0, 1), (1, 0)]);
        assert_eq!(costs.total(&pairs), 4.0);
    }

    #[test]
    fn test_wide_and_tall() {
        let wide = matrix(2, 3, &[4.0, 1.0, 3.0, 2.0, 0.0, 5.0]);
        let pairs = HungarianSolver.solve(&wide);
        assert_valid(&wide, &pairs);
        assert_eq!(wide.total(&pairs), 3.0);

        let tall = matrix(3, 2, &[4.0, 2.0, 1.0, 0.0, 3.0, 5.0]);
        let pairs = HungarianSolver.solve(&tall);
        assert_valid(&tall, &pairs);
        assert_eq!(tall.total(&pairs), 3.0);
    }

    #[test]
    fn test_rejects_non_finite_costs() {
        assert!(CostMatrix::from_vec(2, 2, vec![1.0, f64::NAN, 2.0, 3.0]).is_none());
        assert!(CostMatrix::from_vec(1, 2, vec![f64::INFINITY, f64::INFINITY]).is_none());
    }

    #[test]
    fn test_huge_but_finite_costs() {
        let costs = matrix(3, 3, &[1e300, 4e300, 2e300, 3e300, 1e300, 4e300, 2e300, 5e300, 6e300]);
        let pairs = HungarianSolver.solve(&costs);
        assert_valid(&costs, &pairs);
        assert_eq!(pairs, vec![(0, 2), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_empty() {
        assert!(HungarianSolver.solve(&matrix(0, 3, &[])).is_empty());
        assert!(HungarianSolver.solve(&matrix(3, 0, &[])).is_empty());
    }

    #[test]
    fn test_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let rows = rng.gen_range(1..=6);
            let cols = rng.gen_range(1..=6);
            let data: Vec<f64> = (0..rows * cols).map(|_| rng.gen_range(0.0..100.0)).collect();
            let costs = matrix(rows, cols, &data);

            let pairs = HungarianSolver.solve(&costs);
            assert_valid(&costs, &pairs);

            let expected = brute_force(&costs);
            let total = costs.total(&pairs);
            assert!(
                (total - expected).abs() < 1e-9,
                "{}x{}: solver {} vs brute force {}",
                rows,
                cols,
                total,
                expected
            );
        }
    }
}
