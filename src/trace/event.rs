//! 通信事件
//!
//! 事件日志中的一条记录：某节点在某时刻对某个数据包执行的协议动作。

use serde::{Deserialize, Serialize};

use super::id::{NodeId, SeqNo};
use super::time::SimTime;

/// 事件类型
///
/// 同时接受仿真器的原始写法（`PktSent` 等）与全称（`Sent` 等）。
/// 其他取值统一解析为 `Other`，不参与任何统计。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "PktSent", alias = "Sent")]
    Sent,
    #[serde(rename = "PktRcvd", alias = "Received")]
    Received,
    #[serde(rename = "PktFwd", alias = "Forwarded")]
    Forwarded,
    #[serde(other)]
    Other,
}

/// 一条通信事件；加载后不可变。
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub at: SimTime,
    /// 观测到该事件的节点
    pub node: NodeId,
    pub kind: EventKind,
    pub seq_no: SeqNo,
    /// 0 表示直接从原始发送者收到
    pub num_hops: u32,
    /// 仿真器为该事件配置/估计的丢包概率，原样透传
    pub loss_param: Option<f64>,
    /// 数据包的原始发送者（部分日志才有）
    pub src: Option<NodeId>,
}

impl Event {
    pub fn is_sent(&self) -> bool {
        self.kind == EventKind::Sent
    }

    /// 第一跳直接接收（`numHops = 0` 的 Received 事件）
    pub fn is_direct_reception(&self) -> bool {
        self.kind == EventKind::Received && self.num_hops == 0
    }
}
