use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::report::RunSummary;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("store {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot encode summary: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("store rejected summary: {0}")]
    Rejected(String),
}

/// 运行摘要的目的地；每次调用写入一条摘要。
pub trait SummarySink {
    fn persist(&mut self, summary: &RunSummary) -> Result<(), PersistError>;
}

/// 以 JSON Lines 追加写入的共享表：每条摘要一行。
#[derive(Debug, Clone)]
pub struct JsonLinesStore {
    path: PathBuf,
}

impl JsonLinesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SummarySink for JsonLinesStore {
    fn persist(&mut self, summary: &RunSummary) -> Result<(), PersistError> {
        let io_err = |source| PersistError::Io {
            path: self.path.clone(),
            source,
        };
        let mut line = serde_json::to_string(summary)?;
        line.push('\n');
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        // 每条摘要一次 write_all
        file.write_all(line.as_bytes()).map_err(io_err)?;
        Ok(())
    }
}
