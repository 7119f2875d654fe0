//! 运行摘要持久化
//!
//! 将运行摘要尽力写入共享的分析存储；失败时按抖动指数退避重试，
//! 超过上限后放弃（只记录日志，不让运行失败）。本地结果文件才是权威数据。

// 子模块声明
mod retry;
mod sink;

// 重新导出公共接口
pub use retry::{PersistOutcome, RetryPolicy, persist_with_retry};
pub use sink::{JsonLinesStore, PersistError, SummarySink};
