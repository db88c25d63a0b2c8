use anyhow::{Context, Result};
use clap::Parser;
use forest_fire_core::benchmark::{aggregate, read_log};
use forest_fire_core::{
    BenchmarkRecord, BenchmarkRecorder, CsvLogRecorder, ImageSnapshotWriter, Simulation,
    SimulationConfig, SnapshotSchedule, Snapshots, StepBackend,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Forest fire cellular automaton benchmark
#[derive(Parser, Debug)]
#[command(name = "fire-bench")]
#[command(about = "Forest fire spread benchmark (Rust, Rayon)", long_about = None)]
struct Args {
    /// JSON config file; flags given on the command line override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid side length [default: 1000]
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Number of simulation steps [default: 100]
    #[arg(short, long)]
    steps: Option<usize>,

    /// Initial tree density in [0, 1] [default: 0.6]
    #[arg(short, long)]
    density: Option<f64>,

    /// Seed for a reproducible initial grid
    #[arg(long)]
    seed: Option<u64>,

    /// Append the benchmark record to this CSV log
    #[arg(long)]
    append_to: Option<PathBuf>,

    /// Write grid snapshots to this directory
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Steps between snapshots [default: 10]
    #[arg(long)]
    snapshot_interval: Option<usize>,

    /// Worker threads for the parallel backend [default: all cores]
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Run transitions on a single thread
    #[arg(long)]
    sequential: bool,

    /// Print mean times per language and size from an existing log, then exit
    #[arg(long, value_name = "LOG")]
    summarize: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(density) = self.density {
            config.density = density;
        }
        if let Some(interval) = self.snapshot_interval {
            config.snapshot_interval = interval;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        if self.sequential {
            config.backend = StepBackend::Sequential;
        }
        config.seed = self.seed.or(config.seed);
        config.append_to = self.append_to.or(config.append_to);
        config.snapshot_dir = self.snapshot_dir.or(config.snapshot_dir);

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Some(log) = &args.summarize {
        return summarize(log);
    }

    let config = args.into_config()?;
    run_benchmark(&config)
}

fn run_benchmark(config: &SimulationConfig) -> Result<()> {
    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring worker threads")?;
    }

    println!("Initializing Grid: {}x{}", config.size, config.size);
    let mut sim = Simulation::from_config(config)?;

    let mut writer = match &config.snapshot_dir {
        Some(dir) => Some(ImageSnapshotWriter::new(dir)?),
        None => None,
    };
    let snapshots = match writer.as_mut() {
        Some(w) => Some(Snapshots {
            emitter: w,
            schedule: SnapshotSchedule::every(config.snapshot_interval)?,
        }),
        None => None,
    };

    let report = sim.run(config.steps, snapshots)?;

    println!("Simulation completed in: {:?}", report.elapsed);
    if let Some(per_step) = report.time_per_step() {
        println!("Time per step: {:?}", per_step);
    }
    if let Some(w) = &writer {
        println!(
            "Snapshots: {} written to {} in {:?} (excluded from timing)",
            report.snapshots_written,
            w.dir().display(),
            report.snapshot_time
        );
    }

    if let Some(path) = &config.append_to {
        let record = BenchmarkRecord::from_report(config.size, &report);
        let mut recorder = CsvLogRecorder::new(path);
        recorder
            .append(&record)
            .with_context(|| format!("recording result to {}", path.display()))?;
        info!("Recorded result to {}", recorder.path().display());
    }

    Ok(())
}

fn summarize(log: &Path) -> Result<()> {
    let readout = read_log(log).with_context(|| format!("reading {}", log.display()))?;
    if !readout.skipped.is_empty() {
        println!("Skipped {} malformed row(s)", readout.skipped.len());
    }

    println!("Language | Size  | Runs | Mean(s)    | Best(s)");
    println!("---------|-------|------|------------|-----------");
    for row in aggregate(&readout.records) {
        println!(
            "{:8} | {:5} | {:4} | {:10.6} | {:10.6}",
            row.language, row.size, row.runs, row.mean_seconds, row.min_seconds
        );
    }
    Ok(())
}
