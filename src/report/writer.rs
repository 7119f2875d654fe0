//! 接收率表写出
//!
//! 每个保留下来的发送事件一行，不做任何额外变换。

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::error::ReportError;
use crate::estimate::ReceptionRecord;

/// 输出表的列（顺序即写出顺序）
pub const RECEPTION_COLUMNS: [&str; 4] = ["pos_x", "pos_y", "reception_rate", "estimated_loss_rate"];

/// 无定义的接收率与缺失的丢包参数写为空单元格。
#[derive(Debug, Serialize)]
struct ReceptionRow {
    pos_x: f64,
    pos_y: f64,
    reception_rate: Option<f64>,
    estimated_loss_rate: Option<f64>,
}

impl From<&ReceptionRecord> for ReceptionRow {
    fn from(r: &ReceptionRecord) -> Self {
        Self {
            pos_x: r.pos.x,
            pos_y: r.pos.y,
            reception_rate: r.reception_rate,
            estimated_loss_rate: r.loss_param,
        }
    }
}

/// 写出接收率表（总是带表头，即使没有记录）。
pub fn write_reception_table<W: Write>(w: W, records: &[ReceptionRecord]) -> Result<(), ReportError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(w);
    writer.write_record(RECEPTION_COLUMNS)?;
    for r in records {
        writer.serialize(ReceptionRow::from(r))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_reception_csv(path: &Path, records: &[ReceptionRecord]) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_err)?;
    }
    let file = File::create(path).map_err(io_err)?;
    write_reception_table(file, records)?;
    info!(rows = records.len(), path = %path.display(), "📝 接收率表已写出");
    Ok(())
}
