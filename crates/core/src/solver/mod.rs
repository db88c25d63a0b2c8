//! Transition solver module
//!
//! The transition rule itself lives in [`transition`]; this module selects
//! between the Rayon-parallel backend and the single-threaded reference
//! backend. Both produce identical grids for the same input.

pub mod profiler;
pub mod transition;

// Re-exports
pub use profiler::{ProfilerScope, StepTimer};
pub use transition::{apply, next_state, step_into, step_into_sequential};

use crate::grid::Grid;
use serde::{Deserialize, Serialize};

/// Execution strategy for one transition step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepBackend {
    /// Rows partitioned across the Rayon thread pool
    #[default]
    Parallel,
    /// Single thread, row by row
    Sequential,
}

impl StepBackend {
    /// Compute the next generation of `current` into `next`
    #[inline]
    pub fn step_into(self, current: &Grid, next: &mut Grid) {
        match self {
            Self::Parallel => step_into(current, next),
            Self::Sequential => step_into_sequential(current, next),
        }
    }

    /// Short name used in log output
    pub const fn name(self) -> &'static str {
        match self {
            Self::Parallel => "parallel",
            Self::Sequential => "sequential",
        }
    }
}
