//! Forest fire transition rule
//!
//! Synchronous update over the von Neumann (4-connected) neighbourhood. Every
//! next state is computed from the frozen previous grid, which is only ever
//! borrowed immutably while the output buffer is written.
//!
//! Rule, in priority order:
//! 1. `Fire` → `Empty` (burns out after one step)
//! 2. `Tree` with a `Fire` neighbour above, below, left or right → `Fire`
//! 3. Anything else is unchanged
//!
//! Positions outside the grid count as non-burning, so corner cells have two
//! neighbours and edge cells three.

use crate::grid::{CellState, Grid};
use rayon::prelude::*;

/// Next state of the cell at `(row, col)` given the previous generation
///
/// `current` is the row-major cell buffer of a `size × size` grid.
#[inline]
pub fn next_state(current: &[CellState], size: usize, row: usize, col: usize) -> CellState {
    match current[row * size + col] {
        CellState::Fire => CellState::Empty,
        CellState::Tree if has_burning_neighbor(current, size, row, col) => CellState::Fire,
        state => state,
    }
}

#[inline]
fn has_burning_neighbor(current: &[CellState], size: usize, row: usize, col: usize) -> bool {
    let burning = |r: usize, c: usize| current[r * size + c].is_burning();

    (row > 0 && burning(row - 1, col))
        || (row + 1 < size && burning(row + 1, col))
        || (col > 0 && burning(row, col - 1))
        || (col + 1 < size && burning(row, col + 1))
}

/// Apply one step from `current` into `next`, rows partitioned across Rayon workers
///
/// # Panics
///
/// Panics if the grids differ in size
pub fn step_into(current: &Grid, next: &mut Grid) {
    assert_eq!(current.size(), next.size(), "Grid sizes must match");
    let size = current.size();
    let cells = current.as_slice();

    next.as_mut_slice()
        .par_chunks_mut(size)
        .enumerate()
        .for_each(|(row, out)| {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = next_state(cells, size, row, col);
            }
        });
}

/// Single-threaded equivalent of [`step_into`]
///
/// # Panics
///
/// Panics if the grids differ in size
pub fn step_into_sequential(current: &Grid, next: &mut Grid) {
    assert_eq!(current.size(), next.size(), "Grid sizes must match");
    let size = current.size();
    let cells = current.as_slice();

    for (row, out) in next.as_mut_slice().chunks_mut(size).enumerate() {
        for (col, cell) in out.iter_mut().enumerate() {
            *cell = next_state(cells, size, row, col);
        }
    }
}

/// Apply one step and return the new grid, leaving `grid` untouched
pub fn apply(grid: &Grid) -> Grid {
    let mut next = grid.clone();
    step_into(grid, &mut next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: usize, raw: &[u8]) -> Grid {
        Grid::from_raw(size, raw).unwrap()
    }

    #[test]
    fn test_fire_burns_out() {
        let g = grid(2, &[2, 2, 2, 2]);
        let next = apply(&g);
        assert_eq!(next.count(CellState::Empty), 4);
    }

    #[test]
    fn test_empty_stays_empty_next_to_fire() {
        let g = grid(3, &[0, 0, 0, 0, 2, 0, 0, 0, 0]);
        let next = apply(&g);
        assert_eq!(next.count(CellState::Empty), 9);
    }

    #[test]
    fn test_tree_ignites_from_each_direction() {
        // Fire above, below, left and right of the centre tree respectively
        for fire_at in [(0, 1), (2, 1), (1, 0), (1, 2)] {
            let mut g = Grid::filled(3, CellState::Empty).unwrap();
            g.set(1, 1, CellState::Tree);
            g.set(fire_at.0, fire_at.1, CellState::Fire);
            assert_eq!(
                next_state(g.as_slice(), 3, 1, 1),
                CellState::Fire,
                "fire at {fire_at:?} should ignite centre"
            );
        }
    }

    #[test]
    fn test_diagonal_fire_does_not_ignite() {
        let g = grid(3, &[2, 0, 2, 0, 1, 0, 2, 0, 2]);
        assert_eq!(next_state(g.as_slice(), 3, 1, 1), CellState::Tree);
    }

    #[test]
    fn test_corner_without_burning_neighbors_stays_tree() {
        // (0,0) is a tree whose only real neighbours are a tree and an empty cell
        let g = grid(3, &[1, 1, 0, 0, 0, 0, 0, 0, 2]);
        let next = apply(&g);
        assert_eq!(next.get(0, 0), CellState::Tree);
    }

    #[test]
    fn test_edges_do_not_wrap() {
        // Fire on the right edge must not reach the left edge of the same row
        let g = grid(3, &[1, 0, 2, 0, 0, 0, 0, 0, 0]);
        let next = apply(&g);
        assert_eq!(next.get(0, 0), CellState::Tree);
        // Fire on the last row must not reach the first row
        let g = grid(3, &[1, 0, 0, 0, 0, 0, 2, 0, 0]);
        assert_eq!(apply(&g).get(0, 0), CellState::Tree);
    }

    #[test]
    fn test_update_is_synchronous() {
        // A row of trees with fire at one end only advances one cell per step
        let g = grid(5, &{
            let mut raw = [0_u8; 25];
            raw[..5].copy_from_slice(&[2, 1, 1, 1, 1]);
            raw
        });
        let next = apply(&g);
        assert_eq!(next.get(0, 0), CellState::Empty);
        assert_eq!(next.get(0, 1), CellState::Fire);
        assert_eq!(next.get(0, 2), CellState::Tree);
        assert_eq!(next.get(0, 3), CellState::Tree);
    }

    #[test]
    fn test_single_cell_grid() {
        let g = grid(1, &[2]);
        assert_eq!(apply(&g).get(0, 0), CellState::Empty);
        let g = grid(1, &[1]);
        assert_eq!(apply(&g).get(0, 0), CellState::Tree);
    }

    #[test]
    fn test_apply_leaves_input_untouched() {
        let g = grid(3, &[1, 1, 1, 1, 2, 1, 1, 1, 1]);
        let before = g.clone();
        let _ = apply(&g);
        assert_eq!(g, before);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(11);
        let g = Grid::random(97, 0.65, &mut rng).unwrap();
        let mut par = g.clone();
        let mut seq = g.clone();
        step_into(&g, &mut par);
        step_into_sequential(&g, &mut seq);
        assert_eq!(par, seq);
    }

    #[test]
    #[should_panic(expected = "Grid sizes must match")]
    fn test_mismatched_buffers_panic() {
        let a = Grid::filled(3, CellState::Tree).unwrap();
        let mut b = Grid::filled(4, CellState::Tree).unwrap();
        step_into(&a, &mut b);
    }
}
