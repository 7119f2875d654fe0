//! 事件-位置连接
//!
//! 以 `(节点, 时刻)` 精确相等为键，对事件流与插值位置表做内连接。

use tracing::{debug, warn};

use crate::interp::PositionTable;
use crate::trace::{Event, Position};

/// 附带观测节点当时位置的事件
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedEvent {
    pub event: Event,
    pub pos: Position,
}

/// 内连接：节点在该时刻没有定义位置的事件被丢弃（位于采样区间之外）。
#[tracing::instrument(skip_all, fields(events = events.len()))]
pub fn locate_events(events: &[Event], table: &PositionTable) -> Vec<LocatedEvent> {
    let located: Vec<LocatedEvent> = events
        .iter()
        .filter_map(|e| {
            table.get(e.node, e.at).map(|pos| LocatedEvent {
                event: e.clone(),
                pos,
            })
        })
        .collect();

    let dropped = events.len() - located.len();
    if dropped > 0 && located.is_empty() {
        warn!(dropped, "没有任何事件落在节点的位置采样区间内");
    } else if dropped > 0 {
        warn!(located = located.len(), dropped, "部分事件不在节点的位置采样区间内，已丢弃");
    } else {
        debug!(located = located.len(), "事件位置连接完成");
    }
    located
}
