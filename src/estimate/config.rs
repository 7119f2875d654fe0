//! 估计器配置
//!
//! 可从 JSON 文件加载，命令行参数再覆盖文件中的值。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 直接接收在物理上可能的最大距离（米），由仿真器使用的无线模型得出。
pub const DEFAULT_COMM_RANGE_M: f64 = 509.8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("communication range must be finite and positive, got {0}")]
    InvalidRange(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Pairwise sender-to-node distance threshold for candidate receivers.
    ///
    /// The area collision estimator uses half of this value as a radius
    /// around the origin.
    #[serde(default = "default_comm_range_m")]
    pub comm_range_m: f64,
    /// Count only first-hop (`numHops = 0`) receptions as actual receivers.
    #[serde(default = "default_require_direct")]
    pub require_direct: bool,
}

fn default_comm_range_m() -> f64 {
    DEFAULT_COMM_RANGE_M
}

fn default_require_direct() -> bool {
    true
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            comm_range_m: DEFAULT_COMM_RANGE_M,
            require_direct: true,
        }
    }
}

impl EstimatorConfig {
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: EstimatorConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// 配置文件（可选）之上叠加命令行覆盖值，再校验。
    pub fn resolve(
        file: Option<&Path>,
        comm_range_m: Option<f64>,
        require_direct: Option<bool>,
    ) -> Result<Self, ConfigError> {
        let mut cfg = match file {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        if let Some(range) = comm_range_m {
            cfg.comm_range_m = range;
        }
        if let Some(direct) = require_direct {
            cfg.require_direct = direct;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.comm_range_m.is_finite() || self.comm_range_m <= 0.0 {
            return Err(ConfigError::InvalidRange(self.comm_range_m));
        }
        Ok(())
    }

    pub fn comm_range_sq(&self) -> f64 {
        self.comm_range_m * self.comm_range_m
    }
}
