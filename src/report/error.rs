use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv output: {0}")]
    Csv(#[from] csv::Error),
    #[error("json output: {0}")]
    Json(#[from] serde_json::Error),
}
