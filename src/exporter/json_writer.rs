// ==========================================
// 经销商/商城 ETL - JSON 导出写入器
// ==========================================
// 职责: 导出记录 → 缩进格式 JSON 文件
// 约定: 输出目录不存在时自动创建；同名文件整体覆盖
// ==========================================

use crate::exporter::error::{ExportError, ExportResult};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

pub struct JsonExporter {
    export_dir: PathBuf,
}

impl JsonExporter {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    /// 写入一个导出文件
    ///
    /// # 返回
    /// - Ok(PathBuf): 写入的完整路径
    pub fn write<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> ExportResult<PathBuf> {
        fs::create_dir_all(&self.export_dir).map_err(|e| ExportError::DirectoryCreateError {
            path: self.export_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let json = serde_json::to_string_pretty(value).map_err(|e| ExportError::SerializeError {
            file: file_name.to_string(),
            message: e.to_string(),
        })?;

        let path = self.export_dir.join(file_name);
        fs::write(&path, json).map_err(|e| ExportError::FileWriteError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        info!(file = %path.display(), "导出文件已写入");
        Ok(path)
    }

    /// 写入记录列表（附带条数日志）
    pub fn write_records<T: Serialize>(&self, file_name: &str, records: &[T]) -> ExportResult<PathBuf> {
        let path = self.write(file_name, records)?;
        info!(file = file_name, count = records.len(), "导出记录数");
        Ok(path)
    }
}
