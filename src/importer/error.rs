// ==========================================
// 经销商/商城 ETL - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .json）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 反序列化错误 =====
    #[error("JSON 解析失败 (文件 {file}, 行 {line}, 列 {column}): {message}")]
    JsonParseError {
        file: String,
        line: usize,
        column: usize,
        message: String,
    },
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl ImportError {
    /// 携带文件名包装 serde_json 错误
    pub fn json(file: &str, err: serde_json::Error) -> Self {
        ImportError::JsonParseError {
            file: file.to_string(),
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
