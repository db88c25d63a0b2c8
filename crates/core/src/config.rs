//! Run configuration
//!
//! Parameters can come from a JSON file (`SimulationConfig::load`), from
//! command-line flags, or both; flags override file values in the binary.

use crate::error::{FireSimError, Result};
use crate::solver::StepBackend;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default grid side length
pub const DEFAULT_SIZE: usize = 1000;
/// Default number of transition steps
pub const DEFAULT_STEPS: usize = 100;
/// Default tree-occupation probability
pub const DEFAULT_DENSITY: f64 = 0.6;
/// Default step interval between snapshots
pub const DEFAULT_SNAPSHOT_INTERVAL: usize = 10;

/// Parameters for a single benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Grid side length
    pub size: usize,
    /// Number of transition applications
    pub steps: usize,
    /// Initial tree-occupation probability in `[0, 1]`
    pub density: f64,
    /// RNG seed for reproducible initial grids (thread RNG when absent)
    pub seed: Option<u64>,
    /// Benchmark log file to append the run record to
    pub append_to: Option<PathBuf>,
    /// Directory for grid snapshots; enables snapshot output
    pub snapshot_dir: Option<PathBuf>,
    /// Step interval between snapshots
    pub snapshot_interval: usize,
    /// Transition execution strategy
    pub backend: StepBackend,
    /// Worker thread count for the parallel backend (Rayon default when absent)
    pub threads: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            steps: DEFAULT_STEPS,
            density: DEFAULT_DENSITY,
            seed: None,
            append_to: None,
            snapshot_dir: None,
            snapshot_interval: DEFAULT_SNAPSHOT_INTERVAL,
            backend: StepBackend::Parallel,
            threads: None,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a JSON file
    ///
    /// Missing fields take their defaults. The result is not validated;
    /// call [`SimulationConfig::validate`] once overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::Io`] if the file cannot be read and
    /// [`FireSimError::ConfigParse`] if it is not valid configuration JSON.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| FireSimError::io(path, e))?;
        serde_json::from_str(&contents).map_err(|e| FireSimError::ConfigParse(e.to_string()))
    }

    /// Check every parameter before any grid is allocated
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::InvalidConfig`] for a zero size, a density
    /// outside `[0, 1]`, a zero snapshot interval, or a zero thread count.
    pub fn validate(&self) -> Result<()> {
        check_size(self.size)?;
        check_density(self.density)?;
        if self.snapshot_interval == 0 {
            return Err(FireSimError::InvalidConfig(
                "snapshot interval must be at least 1".to_string(),
            ));
        }
        if self.threads == Some(0) {
            return Err(FireSimError::InvalidConfig(
                "thread count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn check_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(FireSimError::InvalidConfig(
            "grid size must be at least 1".to_string(),
        ));
    }
    if size.checked_mul(size).is_none() {
        return Err(FireSimError::InvalidConfig(format!(
            "grid size {size} is too large: {size}x{size} cells overflow usize"
        )));
    }
    Ok(())
}

pub(crate) fn check_density(density: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&density) {
        return Err(FireSimError::InvalidConfig(format!(
            "density must be in [0, 1], got {density}"
        )));
    }
    Ok(())
}
