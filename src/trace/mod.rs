//! 仿真轨迹数据模块
//!
//! 此模块定义仿真器输出的两类日志（事件日志、位置日志）的数据模型，
//! 以及从 CSV 文件加载它们的读取器。

// 子模块声明
mod error;
mod event;
mod id;
mod kpi;
mod loader;
mod position;
mod time;

// 重新导出公共接口
pub use error::TraceError;
pub use event::{Event, EventKind};
pub use id::{NodeId, SeqNo};
pub use kpi::Kpi;
pub use loader::{
    load_events, load_kpi, load_positions, read_events, read_kpi, read_positions,
};
pub use position::{Position, PositionSample};
pub use time::SimTime;
