//! rush — rush-hour scenario for the escalator simulator.
//!
//! People arrive at the bottom landing at random, queue for a free entry
//! slot, and ride to the top.  At the end the run prints throughput, ride
//! times, and the worst queue length; with `--output` it also writes per-tick
//! CSV files.
//!
//! ```text
//! cargo run -p rush -- --config demos/rush/rush.json --output out/
//! RUST_LOG=debug cargo run -p rush -- --ticks 60 --lanes 1
//! ```

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use esc_core::{LanePolicy, SimConfig, Tick};
use esc_output::{CsvWriter, SimOutputObserver};
use esc_sim::{ArrivalModel, NoopObserver, Sim, SimBuilder, SimEscalator, SimObserver, TickSummary};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Policy {
    Random,
    FirstEmpty,
}

#[derive(Parser, Debug)]
#[command(name = "rush", about = "Rush-hour escalator simulation")]
struct Args {
    /// JSON run configuration; missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for `tick_summaries.csv` and `occupancy_snapshots.csv`.
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long)]
    ticks: Option<u64>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    lanes: Option<usize>,

    #[arg(long)]
    length: Option<usize>,

    #[arg(long)]
    belt_velocity: Option<f64>,

    #[arg(long, value_enum)]
    policy: Option<Policy>,

    /// Log a progress line every N ticks (0 = never).
    #[arg(long, default_value_t = 60)]
    progress_every: u64,
}

impl Args {
    fn load_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => SimConfig::default(),
        };

        if let Some(t) = self.ticks {
            config.total_ticks = t;
        }
        if let Some(s) = self.seed {
            config.seed = s;
        }
        if let Some(n) = self.lanes {
            config.escalator.lane_count = n;
        }
        if let Some(n) = self.length {
            config.escalator.length = n;
        }
        if let Some(v) = self.belt_velocity {
            config.escalator.belt_velocity = v;
        }
        match self.policy {
            Some(Policy::Random) => config.arrivals.lane_policy = LanePolicy::Random,
            Some(Policy::FirstEmpty) => config.arrivals.lane_policy = LanePolicy::FirstEmpty,
            None => {}
        }
        Ok(config)
    }
}

// ── Observer wrapper collecting run statistics ────────────────────────────────

struct RunStats<O: SimObserver> {
    inner:          O,
    progress_every: u64,
    max_queue:      usize,
    max_on_board:   usize,
    rejections:     usize,
    collisions:     usize,
}

impl<O: SimObserver> RunStats<O> {
    fn new(inner: O, progress_every: u64) -> Self {
        Self {
            inner,
            progress_every,
            max_queue: 0,
            max_on_board: 0,
            rejections: 0,
            collisions: 0,
        }
    }
}

impl<O: SimObserver> SimObserver for RunStats<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.max_queue = self.max_queue.max(summary.queued);
        self.max_on_board = self.max_on_board.max(summary.on_board);
        self.rejections += summary.rejected;
        self.collisions += summary.collisions;
        if self.progress_every > 0 && summary.tick.0.is_multiple_of(self.progress_every) {
            info!(
                tick = summary.tick.0,
                on_board = summary.on_board,
                queued = summary.queued,
                exited = summary.exited,
                "progress"
            );
        }
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, escalator: &SimEscalator) {
        self.inner.on_snapshot(tick, escalator);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = args.load_config()?;
    let mut sim = SimBuilder::from_config(config).build().context("building simulation")?;

    let started = Instant::now();
    let stats = match &args.output {
        Some(dir) => {
            let writer = CsvWriter::new(dir)
                .with_context(|| format!("opening output in {}", dir.display()))?;
            let mut obs = RunStats::new(SimOutputObserver::new(writer), args.progress_every);
            sim.run(&mut obs)?;
            if let Some(e) = obs.inner.take_error() {
                return Err(e).context("writing simulation output");
            }
            info!(dir = %dir.display(), "wrote CSV output");
            Summary::from_stats(&obs)
        }
        None => {
            let mut obs = RunStats::new(NoopObserver, args.progress_every);
            sim.run(&mut obs)?;
            Summary::from_stats(&obs)
        }
    };

    print_report(&sim, &stats, started.elapsed().as_secs_f64());
    Ok(())
}

/// The observer-independent parts of `RunStats`.
struct Summary {
    max_queue:    usize,
    max_on_board: usize,
    rejections:   usize,
    collisions:   usize,
}

impl Summary {
    fn from_stats<O: SimObserver>(s: &RunStats<O>) -> Self {
        Self {
            max_queue:    s.max_queue,
            max_on_board: s.max_on_board,
            rejections:   s.rejections,
            collisions:   s.collisions,
        }
    }
}

fn print_report<A: ArrivalModel>(sim: &Sim<A>, stats: &Summary, wall_secs: f64) {
    let trips = sim.trips();
    let elapsed = sim.clock.elapsed_secs().max(1) as f64;
    let throughput_per_min = trips.len() as f64 * 60.0 / elapsed;

    println!("── rush ─────────────────────────────────────────");
    println!("  simulated        {}", sim.clock);
    println!(
        "  escalator        {} lanes × {} cells, belt {:.2} cells/tick",
        sim.escalator.lane_count(),
        sim.escalator.length(),
        sim.escalator.belt_velocity()
    );
    println!("  completed rides  {}", trips.len());
    println!("  throughput       {throughput_per_min:.1} riders/min");
    match sim.mean_ride_ticks() {
        Some(mean) => println!("  mean ride        {mean:.2} ticks"),
        None => println!("  mean ride        n/a"),
    }
    println!("  still on board   {}", sim.escalator.occupant_count());
    println!("  still queued     {} (max {})", sim.queue.len(), stats.max_queue);
    println!("  peak on board    {}", stats.max_on_board);
    println!("  refused boarding {}", stats.rejections);
    if stats.collisions > 0 {
        println!("  collision losses {}", stats.collisions);
    }
    println!("  wall time        {wall_secs:.3} s");
}
