//! 候选接收者统计
//!
//! 发送事件行与同一时刻的全体位置快照行放入同一个按时刻分组的序列，
//! 每行带来源标签（`TimeRow`），分组聚合时据此区分，而不依赖排序次序。

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::interp::PositionTable;
use crate::trace::{NodeId, Position, SeqNo, SimTime};

/// 已定位、已附上上报接收者的发送事件
#[derive(Debug, Clone, PartialEq)]
pub struct SentRow {
    pub at: SimTime,
    pub seq_no: SeqNo,
    pub sender: NodeId,
    pub pos: Position,
    pub loss_param: Option<f64>,
    /// 日志中上报接收该数据包的节点（升序，去重）
    pub receivers: Vec<NodeId>,
}

/// 分组序列中的一行，标明来源
#[derive(Debug, Clone, PartialEq)]
pub enum TimeRow {
    /// 发送事件
    Sent(SentRow),
    /// 该时刻某节点的插值位置
    Snapshot { node: NodeId, pos: Position },
}

/// 一个发送事件在其时刻分组内的统计
#[derive(Debug, Clone, PartialEq)]
pub struct SendStats {
    pub row: SentRow,
    /// 通信范围内的位置数（含发送者自身）
    pub in_range: usize,
    /// 发送时刻位于通信范围内的上报接收者数，不超过 `in_range - 1`
    pub actual: usize,
}

/// 一个时刻分组的聚合结果
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub at: SimTime,
    /// 组内位置快照行数（快照是否存在的健全性检查）
    pub pos_rows: usize,
    pub sends: Vec<SendStats>,
}

/// 将发送行与其发送时刻的位置快照合并为按时刻分组的序列。
///
/// 组内先是发送行（保持输入顺序），后是快照行（保持位置表顺序）。
pub fn group_by_time(sent: Vec<SentRow>, table: &PositionTable) -> BTreeMap<SimTime, Vec<TimeRow>> {
    let mut groups: BTreeMap<SimTime, Vec<TimeRow>> = BTreeMap::new();
    for row in sent {
        groups.entry(row.at).or_default().push(TimeRow::Sent(row));
    }
    for (at, rows) in groups.iter_mut() {
        rows.extend(
            table
                .snapshot(*at)
                .iter()
                .map(|(node, pos)| TimeRow::Snapshot {
                    node: *node,
                    pos: *pos,
                }),
        );
    }
    groups
}

/// 聚合一个时刻分组：对每个发送行，统计组内与发送者距离平方不超过 `range_sq` 的位置数，
/// 以及其中上报了接收的节点数。
///
/// 发送时刻不在范围内（或没有位置）的接收者不计入，并记录警告。
pub fn summarize_group(at: SimTime, rows: &[TimeRow], range_sq: f64) -> GroupSummary {
    let snapshot: HashMap<NodeId, Position> = rows
        .iter()
        .filter_map(|r| match r {
            TimeRow::Snapshot { node, pos } => Some((*node, *pos)),
            TimeRow::Sent(_) => None,
        })
        .collect();

    let sends: Vec<SendStats> = rows
        .iter()
        .filter_map(|r| match r {
            TimeRow::Sent(s) => Some(s),
            TimeRow::Snapshot { .. } => None,
        })
        .map(|s| {
            let in_range = snapshot
                .values()
                .filter(|p| p.dist_sq(&s.pos) <= range_sq)
                .count();
            let actual = s
                .receivers
                .iter()
                .filter(|node| **node != s.sender)
                .filter(|node| {
                    snapshot
                        .get(*node)
                        .is_some_and(|p| p.dist_sq(&s.pos) <= range_sq)
                })
                .count();
            let out_of_range = s.receivers.len() - actual;
            if out_of_range > 0 {
                warn!(
                    at_s = at.as_secs_f64(),
                    seq_no = %s.seq_no,
                    out_of_range,
                    "接收者在发送时刻不在通信范围内，不计入"
                );
            }
            SendStats {
                row: s.clone(),
                in_range,
                actual,
            }
        })
        .collect();

    if sends.len() > 1 {
        warn!(
            at_s = at.as_secs_f64(),
            sends = sends.len(),
            "同一时刻存在多个发送事件，各自独立统计"
        );
    }

    GroupSummary {
        at,
        pos_rows: snapshot.len(),
        sends,
    }
}
