//! 中心区域碰撞率
//!
//! 用于静态拓扑的碰撞实验：只统计位于原点周围 `comm_range_m / 2` 半径内的节点，
//! 且数据包的原始发送者也在该区域内的事件。

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::info;

use super::config::EstimatorConfig;
use crate::trace::{Event, EventKind, NodeId, PositionSample};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollisionStats {
    /// 区域内节点数
    pub in_range_nodes: usize,
    pub num_sent: u64,
    pub num_rcvd: u64,
    pub num_fwd: u64,
    /// `1 - num_rcvd / (num_sent * (in_range_nodes - 1))`；
    /// 区域内不足两个节点或没有发送时为 -1。
    pub collision_rate: f64,
}

/// 所有采样都落在原点周围 `radius` 以内的节点。
pub fn inner_nodes(samples: &[PositionSample], radius: f64) -> BTreeSet<NodeId> {
    let radius_sq = radius * radius;
    let mut inside: BTreeMap<NodeId, bool> = BTreeMap::new();
    for s in samples {
        let ok = s.pos.norm_sq() <= radius_sq;
        inside
            .entry(s.node)
            .and_modify(|v| *v = *v && ok)
            .or_insert(ok);
    }
    inside
        .into_iter()
        .filter_map(|(node, ok)| ok.then_some(node))
        .collect()
}

#[tracing::instrument(skip_all, fields(events = events.len(), samples = samples.len()))]
pub fn collision_stats(
    events: &[Event],
    samples: &[PositionSample],
    cfg: &EstimatorConfig,
) -> CollisionStats {
    let inner = inner_nodes(samples, cfg.comm_range_m / 2.0);

    let (mut num_sent, mut num_rcvd, mut num_fwd) = (0u64, 0u64, 0u64);
    for e in events {
        let src_inside = e.src.is_some_and(|src| inner.contains(&src));
        if !src_inside || !inner.contains(&e.node) {
            continue;
        }
        match e.kind {
            EventKind::Sent => num_sent += 1,
            EventKind::Received => num_rcvd += 1,
            EventKind::Forwarded => num_fwd += 1,
            EventKind::Other => {}
        }
    }

    let in_range_nodes = inner.len();
    let collision_rate = if in_range_nodes <= 1 || num_sent == 0 {
        -1.0
    } else {
        1.0 - num_rcvd as f64 / (num_sent as f64 * (in_range_nodes - 1) as f64)
    };

    info!(
        in_range_nodes,
        num_sent,
        num_rcvd,
        num_fwd,
        collision_rate,
        "✅ 碰撞率统计完成"
    );
    CollisionStats {
        in_range_nodes,
        num_sent,
        num_rcvd,
        num_fwd,
        collision_rate,
    }
}
