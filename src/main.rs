use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use sched_model::{
    core::Ticks,
    metrics::MetricSummary,
    scheduler::RequeueMode,
    sim::{Algorithm, Sim, SimConfig, Workload, WorkloadParams, generate_workload},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "sched-model")]
#[command(about = "Simulate textbook CPU scheduling policies tick by tick", long_about = None)]
struct Args {
    #[arg(short, long, value_enum, default_value_t = Algorithm::RoundRobin)]
    algorithm: Algorithm,

    /// Round Robin time slice in ticks
    #[arg(short, long, default_value_t = 2)]
    time_slice: Ticks,

    /// Start Round Robin queueing new arrivals ahead of a preempted process
    #[arg(long)]
    arrivals_first: bool,

    /// Ticks at which the Round Robin requeue mode flips (comma-separated)
    #[arg(long, value_delimiter = ',')]
    toggle_at: Vec<Ticks>,

    /// JSON workload file; a random workload is generated when omitted
    #[arg(short, long)]
    workload: Option<PathBuf>,

    /// Horizon over which random jobs may arrive
    #[arg(long, default_value_t = 20)]
    ticks: Ticks,

    #[arg(long, default_value_t = 0.3)]
    p_arrival: f64,

    #[arg(long, default_value_t = 0.3)]
    p_short: f64,

    #[arg(long, default_value_t = 2)]
    short_ticks: Ticks,

    #[arg(long, default_value_t = 6)]
    long_ticks: Ticks,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Annotate each tick with the running process's remaining work
    #[arg(long)]
    show_remaining: bool,

    /// Write the full report as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sched_model=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let workload = match &args.workload {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading workload {}", path.display()))?;
            Workload::from_json(&json)
                .with_context(|| format!("parsing workload {}", path.display()))?
        }
        None => {
            let params = WorkloadParams {
                ticks: args.ticks,
                p_arrival: args.p_arrival,
                p_short: args.p_short,
                short_ticks: args.short_ticks,
                long_ticks: args.long_ticks,
            };
            info!(?params, seed = args.seed, "generating random workload");
            generate_workload(params, args.seed)
        }
    };

    let initial_mode = if args.arrivals_first {
        RequeueMode::ArrivalsFirst
    } else {
        RequeueMode::IncumbentFirst
    };
    let sim = Sim::new(SimConfig {
        algorithm: args.algorithm,
        time_slice: args.time_slice,
        initial_mode,
        mode_toggle_ticks: args.toggle_at.clone(),
    });

    let report = sim.run(&workload).context("simulation failed")?;

    println!("{}\n", report.trace.render(args.show_remaining));

    println!("Intervals:");
    for interval in &report.intervals {
        println!(
            "  {:<8} {:>4} .. {:<4}",
            interval.process_name, interval.start_tick, interval.end_tick
        );
    }
    println!();

    print_metric("Wait time", &report.metrics.wait_time);
    print_metric("Wait time (excluding burst)", &report.metrics.wait_time_excluding_burst);
    print_metric("Return time", &report.metrics.return_time);

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    Ok(())
}

fn print_metric(title: &str, summary: &MetricSummary) {
    println!("{title}:");
    for (name, value) in &summary.per_process {
        println!("  {name:<8} {value:>4}");
    }
    println!("  Average: {:.2} ticks\n", summary.average);
}
