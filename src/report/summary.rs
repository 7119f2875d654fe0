//! 运行摘要
//!
//! 单次运行的聚合标量（总数、平均丢包率、运行参数），写成键有序的 JSON 对象。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::ReportError;
use crate::estimate::ReceptionRecord;
use crate::trace::{Event, EventKind, Kpi};

/// 参数扫描脚本传入的运行参数，原样记录在摘要中。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<String>,
    /// 发送间隔（毫秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i: Option<i64>,
    /// 衰减因子 ×100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_nodes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_gain: Option<i64>,
    /// 配置的丢包率 ×100
    #[serde(rename = "p_L", default, skip_serializing_if = "Option::is_none")]
    pub p_l: Option<i64>,
}

/// 事件日志中各类事件的计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub num_sent: u64,
    pub num_rcvd: u64,
    pub num_fwd: u64,
}

impl EventCounts {
    pub fn from_events(events: &[Event]) -> Self {
        let mut counts = EventCounts::default();
        for e in events {
            match e.kind {
                EventKind::Sent => counts.num_sent += 1,
                EventKind::Received => counts.num_rcvd += 1,
                EventKind::Forwarded => counts.num_fwd += 1,
                EventKind::Other => {}
            }
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub num_sent: u64,
    pub num_rcvd: u64,
    pub num_fwd: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_coded: Option<u64>,
    #[serde(
        rename = "excess_probability_1_R_peak",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub excess_probability_peak: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_dissemination_rate: Option<f64>,
    /// `1 - mean(reception_rate)`，只计有定义的接收率；没有时为 -1
    pub avg_loss_rate: f64,
    pub num_packets: usize,
    pub num_undefined_rates: usize,
    /// 本次运行耗时（秒）
    pub duration: f64,
    #[serde(flatten)]
    pub params: RunParams,
}

/// 平均丢包率：`1 - ` 有定义接收率的均值；没有任何有定义的接收率时为 -1。
pub fn avg_loss_rate(records: &[ReceptionRecord]) -> f64 {
    let rates: Vec<f64> = records.iter().filter_map(|r| r.reception_rate).collect();
    if rates.is_empty() {
        return -1.0;
    }
    1.0 - rates.iter().sum::<f64>() / rates.len() as f64
}

impl RunSummary {
    /// 汇总一次运行。给出 KPI 时以仿真器自报的计数为准，否则从事件日志计数。
    pub fn build(
        records: &[ReceptionRecord],
        events: &[Event],
        kpi: Option<&Kpi>,
        params: RunParams,
        duration: f64,
    ) -> Self {
        let counts = EventCounts::from_events(events);
        let (num_sent, num_rcvd, num_fwd) = match kpi {
            Some(k) => (k.sum_sent, k.sum_rcvd, k.sum_fwd),
            None => (counts.num_sent, counts.num_rcvd, counts.num_fwd),
        };
        Self {
            num_sent,
            num_rcvd,
            num_fwd,
            num_coded: kpi.and_then(|k| k.sum_sent_coded),
            excess_probability_peak: kpi.and_then(|k| k.pe500),
            avg_dissemination_rate: kpi.and_then(|k| k.pd),
            avg_loss_rate: avg_loss_rate(records),
            num_packets: records.len(),
            num_undefined_rates: records
                .iter()
                .filter(|r| r.reception_rate.is_none())
                .count(),
            duration,
            params,
        }
    }
}

/// 序列化为键有序、缩进 4 空格的 JSON。
pub fn summary_json<T: Serialize>(summary: &T) -> Result<String, ReportError> {
    // serde_json::Map 默认按键排序
    let value = serde_json::to_value(summary)?;
    let mut out = Vec::new();
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, fmt);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

pub fn write_summary_json<T: Serialize>(path: &Path, summary: &T) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let json = summary_json(summary)?;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    fs::write(path, json).map_err(io_err)?;
    info!(path = %path.display(), "📝 运行摘要已写出");
    Ok(())
}
