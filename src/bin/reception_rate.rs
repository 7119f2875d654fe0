//! 逐包接收率估计
//!
//! 读取一次仿真运行的事件日志与位置日志，写出逐包接收率表，
//! 可选写出 JSON 运行摘要并尽力上传到共享存储。

use clap::Parser;
use prr_rs::estimate::{EstimatorConfig, estimate_reception};
use prr_rs::persist::{JsonLinesStore, PersistOutcome, RetryPolicy, persist_with_retry};
use prr_rs::report::{RunParams, RunSummary, write_reception_csv, write_summary_json};
use prr_rs::trace::{load_events, load_kpi, load_positions};
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(
    name = "reception-rate",
    about = "Per-packet reception rate from a simulation event log and position log"
)]
struct Args {
    /// Event log CSV (timestamp,nodeId,eventType,seqNo,numHops,pL,...)
    #[arg(long)]
    events: PathBuf,

    /// Position log CSV (timestamp,nodeId,pos_x,pos_y,...)
    #[arg(long)]
    positions: PathBuf,

    /// Output reception-rate table
    #[arg(long)]
    out: PathBuf,

    /// Output JSON run summary
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Simulator KPI CSV; its counters take precedence in the summary
    #[arg(long)]
    kpi: Option<PathBuf>,

    /// Estimator config JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override communication range in meters
    #[arg(long)]
    comm_range: Option<f64>,

    /// Count relayed receptions (numHops > 0) as actual receivers too
    #[arg(long)]
    include_relayed: bool,

    /// Shared JSON-lines store to append the run summary to (best effort)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Initial backoff window for store retries (ms)
    #[arg(long, default_value_t = 10_000)]
    retry_window_ms: u64,

    /// Give up once the backoff window exceeds this (ms)
    #[arg(long, default_value_t = 1_000_000)]
    retry_max_window_ms: u64,

    /// Wall-clock start of the whole run (unix seconds); duration is measured from here
    #[arg(long)]
    start_time: Option<f64>,

    #[arg(long)]
    v: Option<String>,
    #[arg(long)]
    i: Option<i64>,
    #[arg(long)]
    q: Option<i64>,
    #[arg(long)]
    run: Option<i64>,
    #[arg(long)]
    num_nodes: Option<i64>,
    #[arg(long)]
    min_gain: Option<i64>,
    #[arg(long = "p-l")]
    p_l: Option<i64>,
}

fn elapsed_secs(start_time: Option<f64>, started: Instant) -> f64 {
    let Some(start) = start_time else {
        return started.elapsed().as_secs_f64();
    };
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs_f64();
    (now - start).max(0.0)
}

fn run(args: Args, started: Instant) -> Result<(), prr_rs::Error> {
    let require_direct = args.include_relayed.then_some(false);
    let cfg = EstimatorConfig::resolve(args.config.as_deref(), args.comm_range, require_direct)?;

    let events = load_events(&args.events)?;
    let samples = load_positions(&args.positions)?;
    let kpi = args.kpi.as_deref().map(load_kpi).transpose()?;

    let records = estimate_reception(&events, &samples, &cfg);
    write_reception_csv(&args.out, &records)?;

    let params = RunParams {
        v: args.v,
        i: args.i,
        q: args.q,
        run: args.run,
        num_nodes: args.num_nodes,
        min_gain: args.min_gain,
        p_l: args.p_l,
    };
    let summary = RunSummary::build(
        &records,
        &events,
        kpi.as_ref(),
        params,
        elapsed_secs(args.start_time, started),
    );
    if let Some(path) = &args.summary_json {
        write_summary_json(path, &summary)?;
    }

    if let Some(path) = args.store {
        let policy = RetryPolicy {
            initial_window: Duration::from_millis(args.retry_window_ms),
            max_window: Duration::from_millis(args.retry_max_window_ms),
            ..RetryPolicy::default()
        };
        let mut store = JsonLinesStore::new(path);
        match persist_with_retry(&mut store, &summary, &policy, &mut rand::rng()) {
            PersistOutcome::Stored { attempts } => {
                info!(attempts, store = %store.path().display(), "摘要已写入共享存储")
            }
            PersistOutcome::Abandoned { attempts } => {
                info!(attempts, "共享存储不可用，仅保留本地结果")
            }
        }
    }

    println!(
        "done packets={} undefined_rates={} avg_loss_rate={:.6} out={}",
        summary.num_packets,
        summary.num_undefined_rates,
        summary.avg_loss_rate,
        args.out.display()
    );
    Ok(())
}

fn main() {
    let started = Instant::now();
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
    if let Err(err) = run(args, started) {
        error!(error = %err, "❌ 运行失败");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
