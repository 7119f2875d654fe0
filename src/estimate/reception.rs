//! 逐包接收率
//!
//! 串联插值、连接、接收者统计与候选者统计，得到每个发送事件的接收率。

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::{debug, info, warn};

use super::candidates::{SendStats, SentRow, TimeRow, group_by_time, summarize_group};
use super::config::EstimatorConfig;
use super::join::{LocatedEvent, locate_events};
use super::receivers::collect_receivers;
use crate::interp::{interpolate_positions, query_times};
use crate::trace::{Event, NodeId, Position, PositionSample, SeqNo, SimTime};

/// 一个发送事件的接收统计
#[derive(Debug, Clone, PartialEq)]
pub struct ReceptionRecord {
    pub at: SimTime,
    pub seq_no: SeqNo,
    pub sender: NodeId,
    /// 发送时刻发送者的位置
    pub pos: Position,
    /// 发送时刻位于通信范围内、且上报接收的节点数
    pub num_actual_receivers: usize,
    /// 通信范围内的节点数，含发送者自身
    pub num_candidate_receivers: usize,
    /// `num_actual_receivers / (num_candidate_receivers - 1)`；
    /// 候选者只有发送者自身时无定义（`None`）。
    pub reception_rate: Option<f64>,
    pub loss_param: Option<f64>,
}

impl ReceptionRecord {
    fn new(stats: SendStats) -> Self {
        let SendStats {
            row,
            in_range: num_candidate_receivers,
            actual: num_actual_receivers,
        } = stats;
        let reception_rate = if num_candidate_receivers <= 1 {
            None
        } else {
            Some(num_actual_receivers as f64 / (num_candidate_receivers - 1) as f64)
        };
        Self {
            at: row.at,
            seq_no: row.seq_no,
            sender: row.sender,
            pos: row.pos,
            num_actual_receivers,
            num_candidate_receivers,
            reception_rate,
            loss_param: row.loss_param,
        }
    }
}

/// 为每个已定位的发送事件附上上报的接收者。
///
/// 没有任何接收记录的序列号得到空集合，未送达的数据包不会被丢弃。
pub fn attach_receivers(
    located: &[LocatedEvent],
    receivers: &HashMap<SeqNo, BTreeSet<NodeId>>,
) -> Vec<SentRow> {
    let mut seen: HashSet<SeqNo> = HashSet::new();
    located
        .iter()
        .filter(|le| le.event.is_sent())
        .map(|le| {
            let e = &le.event;
            if !seen.insert(e.seq_no) {
                warn!(seq_no = %e.seq_no, "同一序列号出现多个发送事件");
            }
            SentRow {
                at: e.at,
                seq_no: e.seq_no,
                sender: e.node,
                pos: le.pos,
                loss_param: e.loss_param,
                receivers: receivers
                    .get(&e.seq_no)
                    .map(|set| set.iter().copied().collect())
                    .unwrap_or_default(),
            }
        })
        .collect()
}

/// 聚合全部时刻分组，输出按 (发送时刻, 序列号) 排序的记录。
pub fn reception_records(
    groups: &BTreeMap<SimTime, Vec<TimeRow>>,
    range_sq: f64,
) -> Vec<ReceptionRecord> {
    let mut records = Vec::new();
    for (at, rows) in groups {
        let summary = summarize_group(*at, rows, range_sq);
        if summary.pos_rows == 0 {
            warn!(at_s = at.as_secs_f64(), "发送时刻没有位置快照，跳过");
            continue;
        }
        let mut sends = summary.sends;
        sends.sort_by_key(|stats| stats.row.seq_no);
        records.extend(sends.into_iter().map(ReceptionRecord::new));
    }
    records
}

/// 完整估计流程：插值 → 连接 → 接收者收集 → 候选者统计 → 接收率。
#[tracing::instrument(skip_all, fields(events = events.len(), samples = samples.len()))]
pub fn estimate_reception(
    events: &[Event],
    samples: &[PositionSample],
    cfg: &EstimatorConfig,
) -> Vec<ReceptionRecord> {
    let queries = query_times(events);
    let table = interpolate_positions(samples, &queries);
    let located = locate_events(events, &table);

    let receivers = collect_receivers(&located, cfg.require_direct);
    debug!(packets_with_receivers = receivers.len(), "实际接收者统计完成");

    let sent = attach_receivers(&located, &receivers);
    let groups = group_by_time(sent, &table);
    let records = reception_records(&groups, cfg.comm_range_sq());

    let undefined = records
        .iter()
        .filter(|r| r.reception_rate.is_none())
        .count();
    info!(
        packets = records.len(),
        undefined_rates = undefined,
        comm_range_m = cfg.comm_range_m,
        "✅ 接收率估计完成"
    );
    records
}
