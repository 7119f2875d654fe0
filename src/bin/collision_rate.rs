//! 中心区域碰撞率
//!
//! 静态拓扑碰撞实验的后处理：只统计原点附近区域内节点之间的收发。

use clap::Parser;
use prr_rs::estimate::{EstimatorConfig, collision_stats};
use prr_rs::report::write_summary_json;
use prr_rs::trace::{load_events, load_positions};
use std::path::PathBuf;
use tracing::error;

#[derive(Debug, Parser)]
#[command(
    name = "collision-rate",
    about = "Collision rate among nodes inside the central area of a static topology"
)]
struct Args {
    /// Event log CSV (must carry a `src` column)
    #[arg(long)]
    events: PathBuf,

    /// Position log CSV
    #[arg(long)]
    positions: PathBuf,

    /// Output JSON summary
    #[arg(long)]
    out: PathBuf,

    /// Estimator config JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override communication range in meters (area radius is half of it)
    #[arg(long)]
    comm_range: Option<f64>,
}

fn run(args: Args) -> Result<(), prr_rs::Error> {
    let cfg = EstimatorConfig::resolve(args.config.as_deref(), args.comm_range, None)?;
    let events = load_events(&args.events)?;
    let samples = load_positions(&args.positions)?;

    let stats = collision_stats(&events, &samples, &cfg);
    write_summary_json(&args.out, &stats)?;

    println!(
        "done in_range_nodes={} num_sent={} num_rcvd={} collision_rate={:.6}",
        stats.in_range_nodes, stats.num_sent, stats.num_rcvd, stats.collision_rate
    );
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        error!(error = %err, "❌ 运行失败");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
