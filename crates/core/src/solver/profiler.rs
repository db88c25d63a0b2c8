/// Timing helpers for the step loop.
///
/// `StepTimer` is a pausable stopwatch so work outside the measured window
/// (snapshot rendering) can run mid-loop without being counted.
use std::time::{Duration, Instant};
use tracing::trace;

/// Pausable stopwatch accumulating only the time it is running.
#[derive(Debug, Default)]
pub struct StepTimer {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl StepTimer {
    /// Creates a stopped timer with zero elapsed time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or resumes) timing. No effect if already running.
    pub fn start(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    /// Pauses timing, keeping the time measured so far.
    pub fn pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += since.elapsed();
        }
    }

    /// Whether the timer is currently running.
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Total measured time, including the current running span.
    pub fn elapsed(&self) -> Duration {
        self.accumulated
            + self
                .running_since
                .map_or(Duration::ZERO, |since| since.elapsed())
    }
}

/// A profiling scope that measures elapsed time using RAII.
///
/// Emits a `trace` event with the scope name when dropped.
pub struct ProfilerScope {
    start: Instant,
    name: &'static str,
}

impl ProfilerScope {
    /// Creates a new profiling scope.
    pub fn new(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    /// Gets elapsed time since the scope was opened.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for ProfilerScope {
    fn drop(&mut self) {
        trace!(
            "{} took {:.3}ms",
            self.name,
            self.elapsed().as_secs_f64() * 1000.0
        );
    }
}
