//! 轨迹加载器
//!
//! 以表头匹配列名读取 CSV；多余的列被忽略，缺失的可选列（`pL`、`src`）取默认值，
//! 缺失必需列是解析错误。
//! 任何读取/解析错误都直接返回，不产生部分结果。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::error::TraceError;
use super::event::{Event, EventKind};
use super::id::{NodeId, SeqNo};
use super::kpi::Kpi;
use super::position::{Position, PositionSample};
use super::time::SimTime;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRow {
    timestamp: f64,
    node_id: usize,
    event_type: EventKind,
    seq_no: SeqField,
    num_hops: u32,
    #[serde(rename = "pL", alias = "lossParam", default)]
    loss_param: Option<f64>,
    #[serde(default)]
    src: Option<usize>,
}

/// `seqNo` 列：整数，或碰撞实验日志中的 `"<节点>-<序号>"` 复合写法。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeqField {
    Int(u64),
    Text(String),
}

impl SeqField {
    fn resolve(self, origin: &str, idx: usize) -> Result<SeqNo, TraceError> {
        match self {
            SeqField::Int(v) => Ok(SeqNo(v)),
            SeqField::Text(text) => {
                let parsed = text.split_once('-').and_then(|(node, seq)| {
                    let node: u32 = node.trim().parse().ok()?;
                    let seq: u32 = seq.trim().parse().ok()?;
                    Some(SeqNo::composite(node, seq))
                });
                parsed.ok_or_else(|| TraceError::InvalidSeqNo {
                    origin: origin.to_string(),
                    row: idx as u64 + 1,
                    value: text,
                })
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct PositionRow {
    timestamp: f64,
    #[serde(rename = "nodeId")]
    node_id: usize,
    pos_x: f64,
    pos_y: f64,
}

fn open(path: &Path) -> Result<File, TraceError> {
    File::open(path).map_err(|source| TraceError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(rdr)
}

fn csv_err(origin: &str, source: csv::Error) -> TraceError {
    TraceError::Csv {
        origin: origin.to_string(),
        source,
    }
}

fn parse_time(origin: &str, idx: usize, value: f64) -> Result<SimTime, TraceError> {
    SimTime::from_secs_f64(value).ok_or_else(|| TraceError::InvalidTimestamp {
        origin: origin.to_string(),
        row: idx as u64 + 1,
        value,
    })
}

/// 从文件加载事件日志
pub fn load_events(path: &Path) -> Result<Vec<Event>, TraceError> {
    let file = open(path)?;
    read_events(file, &path.display().to_string())
}

/// 从任意 reader 读取事件日志；`origin` 仅用于错误信息。
#[tracing::instrument(skip(rdr))]
pub fn read_events<R: Read>(rdr: R, origin: &str) -> Result<Vec<Event>, TraceError> {
    let mut reader = csv_reader(rdr);
    let mut events = Vec::new();
    for (idx, row) in reader.deserialize::<EventRow>().enumerate() {
        let row = row.map_err(|source| csv_err(origin, source))?;
        let at = parse_time(origin, idx, row.timestamp)?;
        let seq_no = row.seq_no.resolve(origin, idx)?;
        events.push(Event {
            at,
            node: NodeId(row.node_id),
            kind: row.event_type,
            seq_no,
            num_hops: row.num_hops,
            loss_param: row.loss_param,
            src: row.src.map(NodeId),
        });
    }

    let other = events
        .iter()
        .filter(|e| e.kind == EventKind::Other)
        .count();
    if other > 0 {
        debug!(other, "忽略未知类型的事件");
    }
    info!(events = events.len(), "📥 事件日志加载完成");
    Ok(events)
}

/// 从文件加载位置日志
pub fn load_positions(path: &Path) -> Result<Vec<PositionSample>, TraceError> {
    let file = open(path)?;
    read_positions(file, &path.display().to_string())
}

/// 从任意 reader 读取位置日志
#[tracing::instrument(skip(rdr))]
pub fn read_positions<R: Read>(rdr: R, origin: &str) -> Result<Vec<PositionSample>, TraceError> {
    let mut reader = csv_reader(rdr);
    let mut samples = Vec::new();
    for (idx, row) in reader.deserialize::<PositionRow>().enumerate() {
        let row = row.map_err(|source| csv_err(origin, source))?;
        let at = parse_time(origin, idx, row.timestamp)?;
        if !row.pos_x.is_finite() || !row.pos_y.is_finite() {
            return Err(TraceError::InvalidPosition {
                origin: origin.to_string(),
                row: idx as u64 + 1,
                x: row.pos_x,
                y: row.pos_y,
            });
        }
        samples.push(PositionSample {
            at,
            node: NodeId(row.node_id),
            pos: Position::new(row.pos_x, row.pos_y),
        });
    }
    info!(samples = samples.len(), "📥 位置日志加载完成");
    Ok(samples)
}

/// 从文件加载仿真器的 KPI 计数
pub fn load_kpi(path: &Path) -> Result<Kpi, TraceError> {
    let file = open(path)?;
    read_kpi(file, &path.display().to_string())
}

/// 读取 KPI 文件的第一行
pub fn read_kpi<R: Read>(rdr: R, origin: &str) -> Result<Kpi, TraceError> {
    let mut reader = csv_reader(rdr);
    match reader.deserialize::<Kpi>().next() {
        Some(row) => row.map_err(|source| csv_err(origin, source)),
        None => Err(TraceError::Empty {
            origin: origin.to_string(),
        }),
    }
}
