// ==========================================
// 经销商/商城 ETL - 运行配置
// ==========================================
// 来源: 环境变量（可选）+ 默认值
// 说明: 程序入口无参数，所有可调项都在这里收口
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 默认数据集根目录
pub const DEFAULT_DATASETS_DIR: &str = "Datasets";

/// 环境变量键
pub mod env_keys {
    /// 数据集根目录（Import/ Export/ 与数据库文件所在位置）
    pub const DATASETS_DIR: &str = "DEALER_SHOP_ETL_DATASETS_DIR";
    /// 随机种子（u64，设置后结果可复现）
    pub const SEED: &str = "DEALER_SHOP_ETL_SEED";
    /// 日志格式: text（默认）/ json
    pub const LOG_FORMAT: &str = "DEALER_SHOP_ETL_LOG_FORMAT";
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// 配置错误类型
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// EtlConfig - 运行配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EtlConfig {
    /// 数据集根目录
    pub datasets_dir: PathBuf,
    /// 随机种子（None 表示取系统熵）
    pub rng_seed: Option<u64>,
    /// 日志输出格式
    pub log_format: LogFormat,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATASETS_DIR)
    }
}

impl EtlConfig {
    pub fn new(datasets_dir: impl Into<PathBuf>) -> Self {
        Self {
            datasets_dir: datasets_dir.into(),
            rng_seed: None,
            log_format: LogFormat::Text,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// 从进程环境变量加载
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载（空白值视为未设置）
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = match read(env_keys::DATASETS_DIR) {
            Some(dir) => Self::new(dir),
            None => Self::default(),
        };

        if let Some(raw) = read(env_keys::SEED) {
            let seed = raw
                .parse::<u64>()
                .map_err(|e| ConfigError::ConfigValueError {
                    key: env_keys::SEED.to_string(),
                    value: raw.clone(),
                    message: e.to_string(),
                })?;
            config.rng_seed = Some(seed);
        }

        if let Some(raw) = read(env_keys::LOG_FORMAT) {
            config.log_format = match raw.to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::ConfigValueError {
                        key: env_keys::LOG_FORMAT.to_string(),
                        value: raw,
                        message: "仅支持 text / json".to_string(),
                    })
                }
            };
        }

        Ok(config)
    }

    pub fn datasets_dir(&self) -> &Path {
        &self.datasets_dir
    }

    /// 夹具输入目录
    pub fn import_dir(&self) -> PathBuf {
        self.datasets_dir.join("Import")
    }

    /// 导出目录
    pub fn export_dir(&self) -> PathBuf {
        self.datasets_dir.join("Export")
    }

    pub fn car_dealer_db_path(&self) -> PathBuf {
        self.datasets_dir.join("car_dealer.db")
    }

    pub fn product_shop_db_path(&self) -> PathBuf {
        self.datasets_dir.join("product_shop.db")
    }
}
