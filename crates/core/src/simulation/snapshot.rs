//! Grid snapshot output
//!
//! The driver hands the current grid to a [`SnapshotEmitter`] after the
//! initial grid and after every step the [`SnapshotSchedule`] selects. The
//! built-in [`ImageSnapshotWriter`] renders each grid as a PNG image, one
//! pixel per cell.

use crate::error::{FireSimError, Result};
use crate::grid::{CellState, Grid};
use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};

/// Receives grids for rendering at scheduled steps
pub trait SnapshotEmitter {
    /// Render `grid` as it stands after `step` transitions (0 = initial grid)
    ///
    /// # Errors
    ///
    /// Implementations return an error if the snapshot cannot be written.
    fn emit(&mut self, grid: &Grid, step: usize) -> Result<()>;
}

/// Which steps produce a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotSchedule {
    interval: usize,
}

impl SnapshotSchedule {
    /// Snapshot every `interval` steps
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::InvalidConfig`] if `interval` is zero.
    pub fn every(interval: usize) -> Result<Self> {
        if interval == 0 {
            return Err(FireSimError::InvalidConfig(
                "snapshot interval must be at least 1".to_string(),
            ));
        }
        Ok(Self { interval })
    }

    /// Step interval
    pub fn interval(&self) -> usize {
        self.interval
    }

    /// Whether the grid after 1-indexed `step` is captured
    ///
    /// Step 0 (the initial grid) is always captured.
    pub fn should_emit(&self, step: usize) -> bool {
        step % self.interval == 0
    }
}

/// RGB colour used for each cell state
pub fn cell_color(state: CellState) -> Rgb<u8> {
    match state {
        CellState::Empty => Rgb([0, 0, 0]),
        CellState::Tree => Rgb([34, 139, 34]),
        CellState::Fire => Rgb([255, 0, 0]),
    }
}

/// Render `grid` as an RGB image, column = x and row = y
///
/// # Errors
///
/// Returns [`FireSimError::InvalidConfig`] if the side length does not fit
/// in an image dimension.
pub fn render_image(grid: &Grid) -> Result<RgbImage> {
    let side = u32::try_from(grid.size()).map_err(|_| {
        FireSimError::InvalidConfig(format!(
            "grid size {} exceeds the maximum image dimension",
            grid.size()
        ))
    })?;
    Ok(RgbImage::from_fn(side, side, |x, y| {
        cell_color(grid.get(y as usize, x as usize))
    }))
}

/// Writes `step_NNNN.png` images into a directory
#[derive(Debug, Clone)]
pub struct ImageSnapshotWriter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl ImageSnapshotWriter {
    /// Create the writer, creating `dir` (and parents) if needed
    ///
    /// # Errors
    ///
    /// Returns [`FireSimError::Io`] if the directory cannot be created.
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| FireSimError::io(&dir, e))?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    /// Output directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths of every snapshot written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File path used for `step`
    pub fn path_for(&self, step: usize) -> PathBuf {
        self.dir.join(format!("step_{step:04}.png"))
    }
}

impl SnapshotEmitter for ImageSnapshotWriter {
    fn emit(&mut self, grid: &Grid, step: usize) -> Result<()> {
        let path = self.path_for(step);
        render_image(grid)?
            .save(&path)
            .map_err(|source| FireSimError::Snapshot {
                path: path.clone(),
                source,
            })?;
        self.written.push(path);
        Ok(())
    }
}
