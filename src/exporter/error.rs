// ==========================================
// 经销商/商城 ETL - 导出模块错误类型
// ==========================================

use thiserror::Error;

/// 导出模块错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("目录创建失败 ({path}): {message}")]
    DirectoryCreateError { path: String, message: String },

    #[error("文件写入失败 ({path}): {message}")]
    FileWriteError { path: String, message: String },

    #[error("JSON 序列化失败 ({file}): {message}")]
    SerializeError { file: String, message: String },
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
