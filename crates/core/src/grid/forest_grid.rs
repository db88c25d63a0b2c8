//! Square forest grid
//!
//! Stores cell states as a flat `Vec<CellState>` in row-major order
//! (`row * size + col`). The side length is fixed for the lifetime of the grid.

use super::cell::CellState;
use crate::config::{check_density, check_size};
use crate::error::{FireSimError, Result};
use rand::Rng;

/// Per-state cell counts for a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellCensus {
    /// Number of `Empty` cells
    pub empty: usize,
    /// Number of `Tree` cells
    pub tree: usize,
    /// Number of `Fire` cells
    pub fire: usize,
}

impl CellCensus {
    /// Total number of cells counted
    pub fn total(&self) -> usize {
        self.empty + self.tree + self.fire
    }
}

/// Square 2D grid of cell states
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellState>,
    size: usize,
}

impl Grid {
    /// Create a grid with every cell set to `state`
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::InvalidConfig`] if `size` is zero.
    pub fn filled(size: usize, state: CellState) -> Result<Self> {
        check_size(size)?;
        Ok(Self {
            cells: vec![state; size * size],
            size,
        })
    }

    /// Create a randomly forested grid with the centre cell ignited
    ///
    /// Each cell is independently a `Tree` with probability `density`,
    /// otherwise `Empty`. The cell at `(size / 2, size / 2)` is then forced to
    /// `Fire` so every run has an ignition point. Parameters are validated
    /// before anything is allocated.
    ///
    /// # Arguments
    ///
    /// * `size` - Grid side length (at least 1)
    /// * `density` - Tree probability in `[0, 1]`
    /// * `rng` - Random source; pass a seeded RNG for reproducible layouts
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::InvalidConfig`] for a zero size or a density
    /// that is not a finite value in `[0, 1]`.
    pub fn random<R: Rng + ?Sized>(size: usize, density: f64, rng: &mut R) -> Result<Self> {
        check_size(size)?;
        check_density(density)?;

        let cells = (0..size * size)
            .map(|_| {
                if rng.random::<f64>() < density {
                    CellState::Tree
                } else {
                    CellState::Empty
                }
            })
            .collect();

        let mut grid = Self { cells, size };
        grid.ignite_center();
        Ok(grid)
    }

    /// Build a grid from an existing row-major cell buffer
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::InvalidConfig`] for a zero size and
    /// [`FireSimError::GridShape`] if `cells.len() != size * size`.
    pub fn from_cells(size: usize, cells: Vec<CellState>) -> Result<Self> {
        check_size(size)?;
        if cells.len() != size * size {
            return Err(FireSimError::GridShape {
                expected: size * size,
                actual: cells.len(),
            });
        }
        Ok(Self { cells, size })
    }

    /// Decode a grid from raw state bytes (`0 = Empty`, `1 = Tree`, `2 = Fire`)
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::InvalidCellState`] on the first byte that is
    /// not a valid state, plus the shape errors of [`Grid::from_cells`].
    pub fn from_raw(size: usize, raw: &[u8]) -> Result<Self> {
        let cells = raw
            .iter()
            .map(|&b| CellState::try_from(b))
            .collect::<Result<Vec<_>>>()?;
        Self::from_cells(size, cells)
    }

    /// Grid side length
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cells in row-major order
    #[inline]
    pub fn as_slice(&self) -> &[CellState] {
        &self.cells
    }

    /// Mutable cells in row-major order
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [CellState] {
        &mut self.cells
    }

    /// Raw state bytes in row-major order
    pub fn to_raw(&self) -> Vec<u8> {
        self.cells.iter().map(|c| c.as_u8()).collect()
    }

    /// Get state at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> CellState {
        assert!(
            row < self.size && col < self.size,
            "Coordinates out of bounds"
        );
        self.cells[row * self.size + col]
    }

    /// Set state at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, row: usize, col: usize, state: CellState) {
        assert!(
            row < self.size && col < self.size,
            "Coordinates out of bounds"
        );
        self.cells[row * self.size + col] = state;
    }

    /// Centre coordinates `(size / 2, size / 2)`
    #[inline]
    pub fn center(&self) -> (usize, usize) {
        (self.size / 2, self.size / 2)
    }

    /// Force the centre cell to `Fire`
    pub fn ignite_center(&mut self) {
        let (row, col) = self.center();
        self.set(row, col, CellState::Fire);
    }

    /// Number of cells in `state`
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Count cells in every state in a single pass
    pub fn census(&self) -> CellCensus {
        self.cells
            .iter()
            .fold(CellCensus::default(), |mut census, cell| {
                match cell {
                    CellState::Empty => census.empty += 1,
                    CellState::Tree => census.tree += 1,
                    CellState::Fire => census.fire += 1,
                }
                census
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_filled_grid() {
        let grid = Grid::filled(4, CellState::Tree).unwrap();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.as_slice().len(), 16);
        assert_eq!(grid.count(CellState::Tree), 16);
    }

    #[test]
    fn test_get_set_row_major() {
        let mut grid = Grid::filled(5, CellState::Empty).unwrap();
        grid.set(3, 1, CellState::Fire);
        assert_eq!(grid.get(3, 1), CellState::Fire);
        assert_eq!(grid.as_slice()[3 * 5 + 1], CellState::Fire);
    }

    #[test]
    #[should_panic(expected = "Coordinates out of bounds")]
    fn test_bounds_check() {
        let grid = Grid::filled(3, CellState::Empty).unwrap();
        let _ = grid.get(3, 0);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            Grid::filled(0, CellState::Tree),
            Err(FireSimError::InvalidConfig(_))
        ));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            Grid::random(0, 0.5, &mut rng),
            Err(FireSimError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_overflowing_size_rejected_before_allocation() {
        let huge = 1_usize << (usize::BITS / 2);
        assert!(matches!(
            Grid::filled(huge, CellState::Tree),
            Err(FireSimError::InvalidConfig(_))
        ));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            Grid::random(huge, 0.5, &mut rng),
            Err(FireSimError::InvalidConfig(_))
        ));
        assert!(matches!(
            Grid::from_cells(huge, Vec::new()),
            Err(FireSimError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_density_out_of_range_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        for density in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    Grid::random(10, density, &mut rng),
                    Err(FireSimError::InvalidConfig(_))
                ),
                "density {density} should be rejected"
            );
        }
    }

    #[test]
    fn test_center_ignited_for_any_density() {
        let mut rng = StdRng::seed_from_u64(7);
        for size in [1, 2, 3, 10, 51] {
            for density in [0.0, 0.3, 1.0] {
                let grid = Grid::random(size, density, &mut rng).unwrap();
                assert_eq!(grid.get(size / 2, size / 2), CellState::Fire);
                assert_eq!(grid.count(CellState::Fire), 1);
            }
        }
    }

    #[test]
    fn test_density_extremes() {
        let mut rng = StdRng::seed_from_u64(3);
        let bare = Grid::random(20, 0.0, &mut rng).unwrap();
        assert_eq!(bare.count(CellState::Tree), 0);
        assert_eq!(bare.count(CellState::Empty), 399);

        let full = Grid::random(20, 1.0, &mut rng).unwrap();
        assert_eq!(full.count(CellState::Tree), 399);
        assert_eq!(full.count(CellState::Empty), 0);
    }

    #[test]
    fn test_seeded_layout_is_reproducible() {
        let a = Grid::random(64, 0.6, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = Grid::random(64, 0.6, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_cells_shape_mismatch() {
        let err = Grid::from_cells(3, vec![CellState::Tree; 8]).unwrap_err();
        assert!(matches!(
            err,
            FireSimError::GridShape {
                expected: 9,
                actual: 8
            }
        ));
    }

    #[test]
    fn test_from_raw_decodes_and_rejects() {
        let grid = Grid::from_raw(2, &[0, 1, 2, 1]).unwrap();
        assert_eq!(grid.get(0, 0), CellState::Empty);
        assert_eq!(grid.get(1, 0), CellState::Fire);
        assert_eq!(grid.to_raw(), vec![0, 1, 2, 1]);

        assert!(matches!(
            Grid::from_raw(2, &[0, 1, 3, 1]),
            Err(FireSimError::InvalidCellState(3))
        ));
    }

    #[test]
    fn test_census() {
        let grid = Grid::from_raw(3, &[0, 1, 1, 2, 1, 0, 1, 1, 1]).unwrap();
        let census = grid.census();
        assert_eq!(census.empty, 2);
        assert_eq!(census.tree, 6);
        assert_eq!(census.fire, 1);
        assert_eq!(census.total(), 9);
    }
}
