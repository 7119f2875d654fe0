use std::path::PathBuf;

use thiserror::Error;

/// 加载轨迹文件时的错误；任何一种都会终止本次运行。
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{origin}: malformed record: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },
    #[error("{origin}: row {row}: invalid timestamp {value}")]
    InvalidTimestamp { origin: String, row: u64, value: f64 },
    #[error("{origin}: row {row}: invalid sequence number {value:?}")]
    InvalidSeqNo {
        origin: String,
        row: u64,
        value: String,
    },
    #[error("{origin}: row {row}: non-finite position ({x}, {y})")]
    InvalidPosition {
        origin: String,
        row: u64,
        x: f64,
        y: f64,
    },
    #[error("{origin}: no data rows")]
    Empty { origin: String },
}
