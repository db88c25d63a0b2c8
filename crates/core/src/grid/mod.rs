//! Grid state: cell states and the square grid that holds them

pub mod cell;
pub mod forest_grid;

// Re-export main types
pub use cell::CellState;
pub use forest_grid::{CellCensus, Grid};
