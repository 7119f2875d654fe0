//! 插值位置表
//!
//! 对所有节点在查询时刻集合上插值后得到的稠密查找表。

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use super::trajectory::Trajectory;
use crate::trace::{Event, NodeId, Position, PositionSample, SimTime};

/// 按 `(节点, 时刻)` 索引的插值位置，同时保留每个时刻的全体快照。
#[derive(Debug, Default)]
pub struct PositionTable {
    by_key: HashMap<(NodeId, SimTime), Position>,
    snapshots: BTreeMap<SimTime, Vec<(NodeId, Position)>>,
}

impl PositionTable {
    pub fn insert(&mut self, node: NodeId, at: SimTime, pos: Position) {
        if self.by_key.insert((node, at), pos).is_some() {
            if let Some(row) = self
                .snapshots
                .get_mut(&at)
                .and_then(|rows| rows.iter_mut().find(|(n, _)| *n == node))
            {
                row.1 = pos;
            }
            return;
        }
        self.snapshots.entry(at).or_default().push((node, pos));
    }

    pub fn get(&self, node: NodeId, at: SimTime) -> Option<Position> {
        self.by_key.get(&(node, at)).copied()
    }

    /// 时刻 `at` 上所有有定义的节点位置（按节点插入顺序）。
    pub fn snapshot(&self, at: SimTime) -> &[(NodeId, Position)] {
        self.snapshots.get(&at).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 所有行，按 (时刻, 节点插入顺序) 排列
    pub fn rows(&self) -> impl Iterator<Item = (SimTime, NodeId, Position)> + '_ {
        self.snapshots
            .iter()
            .flat_map(|(at, rows)| rows.iter().map(move |(node, pos)| (*at, *node, *pos)))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// 事件日志中出现过的全部时刻（升序、去重）。
pub fn query_times(events: &[Event]) -> Vec<SimTime> {
    let mut times: Vec<SimTime> = events.iter().map(|e| e.at).collect();
    times.sort_unstable();
    times.dedup();
    times
}

/// 对每个节点在 `queries`（升序、去重）上插值，生成位置表。
///
/// 采样少于两个的节点不产生任何行；区间外的查询时刻被丢弃。
#[tracing::instrument(skip_all, fields(samples = samples.len(), queries = queries.len()))]
pub fn interpolate_positions(samples: &[PositionSample], queries: &[SimTime]) -> PositionTable {
    let mut per_node: BTreeMap<NodeId, Vec<(SimTime, Position)>> = BTreeMap::new();
    for s in samples {
        per_node.entry(s.node).or_default().push((s.at, s.pos));
    }

    let mut table = PositionTable::default();
    let mut skipped_nodes = 0usize;
    for (node, node_samples) in per_node {
        let traj = Trajectory::new(node_samples);
        if traj.span().is_none() {
            skipped_nodes += 1;
            debug!(node = %node, "采样不足两个，无法插值");
            continue;
        }
        for (at, pos) in traj.resample(queries) {
            table.insert(node, at, pos);
        }
    }

    info!(
        rows = table.len(),
        skipped_nodes,
        "📍 位置插值完成"
    );
    table
}
