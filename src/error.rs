use thiserror::Error;

use crate::estimate::ConfigError;
use crate::report::ReportError;
use crate::trace::TraceError;

/// 一次运行中的致命错误（不含持久化失败，后者只记录日志）。
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Trace(#[from] TraceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
