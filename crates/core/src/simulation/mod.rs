//! Simulation driver
//!
//! Owns the grid for the duration of a run and applies the transition rule
//! step after step. Two buffers are kept: each step reads `current`, writes
//! `next`, then the buffers swap roles.
//!
//! # Timing
//!
//! The measured interval starts immediately before the first transition and
//! stops after the last one. Grid initialization is never timed. Snapshot
//! rendering is excluded as well: the timer is paused while the emitter runs
//! and snapshot time is reported separately in [`RunReport::snapshot_time`].

pub mod snapshot;

pub use snapshot::{
    cell_color, render_image, ImageSnapshotWriter, SnapshotEmitter, SnapshotSchedule,
};

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::grid::{CellCensus, CellState, Grid};
use crate::solver::{ProfilerScope, StepBackend, StepTimer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, info, Level};

/// Snapshot output attached to a run
pub struct Snapshots<'a> {
    /// Receives the grid at scheduled steps
    pub emitter: &'a mut dyn SnapshotEmitter,
    /// Which steps are captured
    pub schedule: SnapshotSchedule,
}

/// Outcome of [`Simulation::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Number of transitions applied
    pub steps: usize,
    /// Wall-clock time spent in transitions only
    pub elapsed: Duration,
    /// Number of snapshots handed to the emitter, including the initial grid
    pub snapshots_written: usize,
    /// Wall-clock time spent in the emitter (not part of `elapsed`)
    pub snapshot_time: Duration,
    /// Cell counts of the final grid
    pub census: CellCensus,
}

impl RunReport {
    /// Elapsed transition time in seconds
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Mean time per transition, `None` when no steps ran
    pub fn time_per_step(&self) -> Option<Duration> {
        u32::try_from(self.steps)
            .ok()
            .filter(|&n| n > 0)
            .map(|n| self.elapsed / n)
    }
}

/// Forest fire simulation over a square grid
#[derive(Debug, Clone)]
pub struct Simulation {
    current: Grid,
    next: Grid,
    backend: StepBackend,
    steps_taken: usize,
}

impl Simulation {
    /// Create a simulation starting from `grid`, using the parallel backend
    pub fn new(grid: Grid) -> Self {
        Self::with_backend(grid, StepBackend::Parallel)
    }

    /// Create a simulation starting from `grid` with an explicit backend
    pub fn with_backend(grid: Grid, backend: StepBackend) -> Self {
        let next = grid.clone();
        Self {
            current: grid,
            next,
            backend,
            steps_taken: 0,
        }
    }

    /// Validate `config` and build the randomized initial grid it describes
    ///
    /// Uses a seeded `StdRng` when `config.seed` is set, otherwise the thread
    /// RNG, so unseeded runs start from a different layout every time.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FireSimError::InvalidConfig`] if validation fails; no
    /// grid is allocated in that case.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        let grid = match config.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                Grid::random(config.size, config.density, &mut rng)?
            }
            None => Grid::random(config.size, config.density, &mut rand::rng())?,
        };
        info!(
            "Initialized {}x{} grid (density {:.2}, seed {:?}): {} trees",
            config.size,
            config.size,
            config.density,
            config.seed,
            grid.count(CellState::Tree)
        );
        Ok(Self::with_backend(grid, config.backend))
    }

    /// Current grid
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    /// Consume the simulation, returning the current grid
    pub fn into_grid(self) -> Grid {
        self.current
    }

    /// Transition backend in use
    pub fn backend(&self) -> StepBackend {
        self.backend
    }

    /// Total transitions applied since creation
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Apply one transition
    pub fn step(&mut self) {
        self.backend.step_into(&self.current, &mut self.next);
        std::mem::swap(&mut self.current, &mut self.next);
        self.steps_taken += 1;
    }

    /// Apply `steps` transitions, timing only the transitions
    ///
    /// With `snapshots` attached, the initial grid is emitted as step 0 and
    /// the grid after every step whose 1-indexed number is a multiple of the
    /// schedule interval is emitted with that number.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the snapshot emitter.
    pub fn run(
        &mut self,
        steps: usize,
        mut snapshots: Option<Snapshots<'_>>,
    ) -> Result<RunReport> {
        let size = self.current.size();
        let mut tally = SnapshotTally::default();

        if let Some(s) = snapshots.as_mut() {
            debug!("Snapshot every {} steps", s.schedule.interval());
            emit_snapshot(s, &self.current, 0, &mut tally)?;
        }

        info!(
            "Running {} steps on {}x{} grid ({} backend)",
            steps,
            size,
            size,
            self.backend.name()
        );

        let mut timer = StepTimer::new();
        timer.start();
        for step in 1..=steps {
            self.step();
            if let Some(s) = snapshots.as_mut().filter(|s| s.schedule.should_emit(step)) {
                timer.pause();
                emit_snapshot(s, &self.current, step, &mut tally)?;
                timer.start();
            }
            if tracing::enabled!(Level::DEBUG) {
                timer.pause();
                debug!("Step {}/{} complete", step, steps);
                timer.start();
            }
        }
        timer.pause();

        let report = RunReport {
            steps,
            elapsed: timer.elapsed(),
            snapshots_written: tally.written,
            snapshot_time: tally.time,
            census: self.current.census(),
        };
        info!(
            "Completed {} steps in {:.6}s (snapshots: {} in {:.6}s), {} burning, {} trees left",
            report.steps,
            report.elapsed_seconds(),
            report.snapshots_written,
            report.snapshot_time.as_secs_f64(),
            report.census.fire,
            report.census.tree
        );
        Ok(report)
    }
}

#[derive(Default)]
struct SnapshotTally {
    written: usize,
    time: Duration,
}

fn emit_snapshot(
    snapshots: &mut Snapshots<'_>,
    grid: &Grid,
    step: usize,
    tally: &mut SnapshotTally,
) -> Result<()> {
    let scope = ProfilerScope::new("snapshot");
    snapshots.emitter.emit(grid, step)?;
    tally.time += scope.elapsed();
    tally.written += 1;
    Ok(())
}

/// Apply `steps` transitions to `grid`, returning the final grid and the
/// time spent in transitions
pub fn run(grid: Grid, steps: usize) -> (Grid, Duration) {
    let mut sim = Simulation::new(grid);
    let mut timer = StepTimer::new();
    timer.start();
    for _ in 0..steps {
        sim.step();
    }
    timer.pause();
    (sim.into_grid(), timer.elapsed())
}
