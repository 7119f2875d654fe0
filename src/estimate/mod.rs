//! 接收率估计模块
//!
//! 将事件与插值位置连接，统计每个数据包的实际接收者与候选接收者，
//! 计算逐包接收率；另含基于中心区域的碰撞率估计。

// 子模块声明
mod candidates;
mod collision;
mod config;
mod join;
mod reception;
mod receivers;

// 重新导出公共接口
pub use candidates::{GroupSummary, SendStats, SentRow, TimeRow, group_by_time, summarize_group};
pub use collision::{CollisionStats, collision_stats, inner_nodes};
pub use config::{ConfigError, DEFAULT_COMM_RANGE_M, EstimatorConfig};
pub use join::{LocatedEvent, locate_events};
pub use reception::{ReceptionRecord, attach_receivers, estimate_reception, reception_records};
pub use receivers::collect_receivers;
