// ==========================================
// 经销商/商城 ETL - 配置层
// ==========================================
// 职责: 运行配置加载（环境变量 + 默认值）
// ==========================================

pub mod etl_config;

// 重导出核心配置
pub use etl_config::{
    env_keys, ConfigError, ConfigResult, EtlConfig, LogFormat,
    DEFAULT_DATASETS_DIR,
};
