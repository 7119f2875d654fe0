//! 位置插值模块
//!
//! 将每个节点稀疏的位置采样重建为连续轨迹，并在事件时刻上求值，
//! 得到按 `(节点, 时刻)` 索引的稠密位置表。插值只在采样区间内进行，不外推。

// 子模块声明
mod table;
mod trajectory;

// 重新导出公共接口
pub use table::{PositionTable, interpolate_positions, query_times};
pub use trajectory::Trajectory;
