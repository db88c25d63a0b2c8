//! Forest Fire Cellular Automaton Core Library
//!
//! Simulates fire spread on a square grid where each cell is `Empty`, `Tree`
//! or `Fire`. Every step is a synchronous update over the von Neumann
//! neighbourhood: fire burns out after one step, and a tree ignites when any
//! orthogonal neighbour is burning. Cells beyond the edge never burn.
//!
//! The crate is built for throughput benchmarking:
//! - Rayon-parallel transitions over ping-pong grid buffers
//! - A timing contract that measures transitions only
//! - An append-only CSV benchmark log shared with other producers
//!
//! ```rust
//! use forest_fire_core::{CellState, Grid, Simulation};
//!
//! let mut grid = Grid::filled(3, CellState::Tree).unwrap();
//! grid.ignite_center();
//! let mut sim = Simulation::new(grid);
//! let report = sim.run(1, None).unwrap();
//! assert_eq!(report.steps, 1);
//! assert_eq!(sim.grid().get(1, 1), CellState::Empty);
//! assert_eq!(sim.grid().get(0, 1), CellState::Fire);
//! ```

pub mod benchmark;
pub mod config;
pub mod error;
pub mod grid;
pub mod simulation;
pub mod solver;

// Re-export core types
pub use config::SimulationConfig;
pub use error::{FireSimError, Result};
pub use grid::{CellCensus, CellState, Grid};

// Re-export driver and solver types
pub use simulation::{
    run, ImageSnapshotWriter, RunReport, Simulation, SnapshotEmitter, SnapshotSchedule, Snapshots,
};
pub use solver::StepBackend;

// Re-export benchmark log types
pub use benchmark::{
    aggregate, append_record, read_log, BenchmarkRecord, BenchmarkRecorder, CsvLogRecorder,
    LogReadout, LANGUAGE_ID, LOG_HEADER,
};
