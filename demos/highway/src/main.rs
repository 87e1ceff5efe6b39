//! highway — one thread per vehicle on a shared multi-lane road.
//!
//! Every vehicle enters, circulates until its countdown runs out, sometimes
//! changes lane, advances, and repeats until it drives off the far end.  The
//! main thread is the clock: it ticks at a fixed cadence and cancels lane
//! changes that have waited too long, since a full segment can otherwise
//! hold one forever.
//!
//! ```text
//! RUST_LOG=debug cargo run -p highway -- --segments 4 --lanes 2 --vehicles 12 --trace out/
//! ```

mod journey;


use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use parking_lot::Mutex;

use cw_coord::{Realization, Road, RoadBuilder};
use cw_core::{OpKind, RoadConfig, WakePolicy};
use cw_output::{CsvTraceWriter, TraceObserver};

use journey::{Journey, JourneyPlan};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RealizationArg {
    Monitor,
    Channel,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PolicyArg {
    Precedence,
    GlobalFifo,
}

#[derive(Debug, Parser)]
#[command(about = "Drive vehicle threads along a coordinated multi-lane road")]
struct Opts {
    /// Number of sequential segments.
    #[arg(short, long, default_value_t = 3)]
    segments: usize,

    /// Number of parallel lanes per segment.
    #[arg(short, long, default_value_t = 2)]
    lanes: usize,

    /// Number of vehicle threads.
    #[arg(short = 'n', long, default_value_t = 8)]
    vehicles: usize,

    /// Synchronization strategy behind the road.
    #[arg(short, long, value_enum, default_value_t = RealizationArg::Monitor)]
    realization: RealizationArg,

    /// Order in which waiting requests of different kinds are woken.
    #[arg(short, long, value_enum, default_value_t = PolicyArg::Precedence)]
    policy: PolicyArg,

    /// Largest tick budget a vehicle draws for one segment.
    #[arg(long, default_value_t = 3)]
    max_budget: u32,

    /// Probability of requesting a lane change in each segment.
    #[arg(long, default_value_t = 0.2)]
    change_lane: f64,

    /// Wall-clock milliseconds between ticks.
    #[arg(long, default_value_t = 5)]
    tick_ms: u64,

    /// Ticks a lane change may wait before it is cancelled.
    #[arg(long, default_value_t = 5)]
    patience: u64,

    /// Give up if the fleet has not left the road after this many ticks.
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write `events.csv` and `ticks.csv` into this directory.
    #[arg(long)]
    trace: Option<PathBuf>,
}

impl Opts {
    fn config(&self) -> RoadConfig {
        let policy = match self.policy {
            PolicyArg::Precedence => WakePolicy::Precedence,
            PolicyArg::GlobalFifo => WakePolicy::GlobalFifo,
        };
        RoadConfig::new(self.segments, self.lanes).with_policy(policy)
    }

    fn realization(&self) -> Realization {
        match self.realization {
            RealizationArg::Monitor => Realization::Monitor,
            RealizationArg::Channel => Realization::Channel,
        }
    }
}

type CsvTrace = Arc<Mutex<TraceObserver<CsvTraceWriter>>>;

fn main() -> Result<()> {
    env_logger::init();
    let opts = Opts::parse();
    if !(0.0..=1.0).contains(&opts.change_lane) {
        bail!("--change-lane must be a probability, got {}", opts.change_lane);
    }

    let config = opts.config();
    println!("=== highway ===");
    println!(
        "Road: {} segment(s) x {} lane(s)  |  Vehicles: {}  |  {:?}, {:?}  |  Seed: {}",
        config.segments, config.lanes, opts.vehicles, opts.realization, config.policy, opts.seed
    );

    let mut builder = RoadBuilder::new(config);
    let trace: Option<CsvTrace> = match &opts.trace {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating trace directory {}", dir.display()))?;
            let writer = CsvTraceWriter::new(dir)?;
            let trace = Arc::new(Mutex::new(TraceObserver::new(writer)));
            builder = builder.observer(Arc::clone(&trace));
            Some(trace)
        }
        None => None,
    };
    let road = builder.build(opts.realization())?;

    let t0 = Instant::now();
    let (journeys, ticks) = drive(&*road, &opts)?;
    let elapsed = t0.elapsed();

    let final_snapshot = road.snapshot()?;
    drop(road); // flushes the trace

    println!("All vehicles left the road after {ticks} tick(s) in {:.3} s", elapsed.as_secs_f64());
    println!();
    println!(
        "{:<10} {:>9} {:>9} {:>9} {:>12}",
        "Vehicle", "Entered", "Left", "Changes", "Cancelled"
    );
    println!("{}", "-".repeat(53));
    for j in &journeys {
        println!(
            "{:<10} {:>9} {:>9} {:>9} {:>12}",
            j.vehicle.as_str(),
            j.entered_lane,
            j.exit.to_string(),
            j.lane_changes,
            j.cancelled_changes,
        );
    }

    if !final_snapshot.vehicles.is_empty() || !final_snapshot.pending.is_empty() {
        bail!("road not empty at shutdown: {final_snapshot:?}");
    }

    if let Some(trace) = trace {
        if let Some(e) = trace.lock().take_error() {
            eprintln!("trace error: {e}");
        } else if let Some(dir) = &opts.trace {
            println!();
            println!("Trace written to {}", dir.display());
        }
    }
    Ok(())
}

/// Run every vehicle to completion while ticking the clock.  Returns the
/// journeys in vehicle order and the number of ticks it took.
fn drive(road: &dyn Road, opts: &Opts) -> Result<(Vec<Journey>, u64)> {
    let finished = AtomicUsize::new(0);
    let cadence = Duration::from_millis(opts.tick_ms);

    thread::scope(|s| {
        let handles: Vec<_> = (0..opts.vehicles)
            .map(|i| {
                let plan = JourneyPlan {
                    index:       i,
                    seed:        opts.seed.wrapping_add(i as u64),
                    max_budget:  opts.max_budget,
                    change_lane: opts.change_lane,
                };
                let finished = &finished;
                thread::Builder::new()
                    .name(format!("vehicle-{i}"))
                    .spawn_scoped(s, move || {
                        let journey = plan.run(road);
                        finished.fetch_add(1, Ordering::SeqCst);
                        journey
                    })
                    .context("spawning vehicle thread")
            })
            .collect::<Result<_>>()?;

        let mut ticks = 0;
        let mut gave_up = false;
        while finished.load(Ordering::SeqCst) < opts.vehicles {
            thread::sleep(cadence);
            road.tick()?;
            ticks += 1;
            if ticks >= opts.max_ticks {
                // Release every waiter so the scope can join the threads.
                gave_up = true;
                for p in &road.snapshot()?.pending {
                    road.cancel(p.seq)?;
                }
            } else {
                watchdog(road, opts.patience)?;
            }
        }
        if gave_up {
            bail!("fleet still on the road after {} ticks", opts.max_ticks);
        }

        let journeys = handles
            .into_iter()
            .map(|h| h.join().map_err(|_| anyhow!("vehicle thread panicked"))?)
            .collect::<Result<Vec<_>>>()?;
        Ok((journeys, ticks))
    })
}

/// Cancel lane changes that have waited more than `patience` ticks.
/// Returns how many were withdrawn.
///
/// Each cancel names the request seen in the snapshot, so a lane change that
/// completed in the meantime is skipped rather than hitting whatever its
/// vehicle asked for next.
fn watchdog(road: &dyn Road, patience: u64) -> Result<usize> {
    let snapshot = road.snapshot()?;
    let mut cancelled = 0;
    for p in &snapshot.pending {
        let waited = snapshot.tick.since(p.since);
        if p.op == OpKind::ChangeLane && waited > patience {
            if road.cancel(p.seq)? {
                info!("{} gave up changing lane after {waited} tick(s)", p.vehicle);
                cancelled += 1;
            }
        } else if waited > patience.saturating_mul(20) {
            warn!("{} {} has waited since {}", p.vehicle, p.op, p.since);
        }
    }
    Ok(cancelled)
}
