use std::collections::{BTreeSet, HashMap};

use super::join::LocatedEvent;
use crate::trace::{EventKind, NodeId, SeqNo};

/// 按序列号收集实际接收者节点。
///
/// `require_direct` 为真时只收集 `numHops = 0` 的接收（第一跳直接接收），
/// 多跳中继的副本不计入。同一节点对同一数据包的重复接收只算一次。
pub fn collect_receivers(
    located: &[LocatedEvent],
    require_direct: bool,
) -> HashMap<SeqNo, BTreeSet<NodeId>> {
    let mut receivers: HashMap<SeqNo, BTreeSet<NodeId>> = HashMap::new();
    for le in located {
        let e = &le.event;
        let counted = if require_direct {
            e.is_direct_reception()
        } else {
            e.kind == EventKind::Received
        };
        if counted {
            receivers.entry(e.seq_no).or_default().insert(e.node);
        }
    }
    receivers
}
