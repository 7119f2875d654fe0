//! 结果输出模块
//!
//! 写出逐包接收率表，以及供跨运行比较的 JSON 运行摘要。

// 子模块声明
mod error;
mod summary;
mod writer;

// 重新导出公共接口
pub use error::ReportError;
pub use summary::{EventCounts, RunParams, RunSummary, avg_loss_rate, summary_json, write_summary_json};
pub use writer::{RECEPTION_COLUMNS, write_reception_csv, write_reception_table};
