// ==========================================
// 经销商/商城 ETL - 批处理错误类型
// ==========================================
// 红线: 任一阶段失败即终止整个运行，不做部分成功追踪
// ==========================================

use crate::config::ConfigError;
use crate::engine::SynthesisError;
use crate::exporter::ExportError;
use crate::importer::ImportError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// 批处理错误类型（汇总各层错误）
#[derive(Error, Debug)]
pub enum EtlError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("持久化失败: {0}")]
    Repository(#[from] RepositoryError),

    #[error("关系生成失败: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("导出失败: {0}")]
    Export(#[from] ExportError),
}

/// Result 类型别名
pub type EtlResult<T> = Result<T, EtlError>;
