// ==========================================
// 经销商/商城 ETL - 夹具文件解析器
// ==========================================
// 阶段 0: 文件读取与反序列化
// 支持: JSON 对象数组 (.json)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

// ==========================================
// FixtureParser Trait
// ==========================================
// 用途: 夹具文件 → DTO 列表
// 实现者: JsonFixtureParser
pub trait FixtureParser {
    /// 读取并反序列化一个夹具文件
    ///
    /// # 返回
    /// - Ok(Vec<T>): 按文件顺序排列的 DTO
    /// - Err: 文件缺失 / 扩展名不支持 / JSON 不合法
    fn parse_fixture<T: DeserializeOwned>(&self, file_path: &Path) -> ImportResult<Vec<T>>;
}

// ==========================================
// JSON Parser 实现
// ==========================================
pub struct JsonFixtureParser;

impl FixtureParser for JsonFixtureParser {
    fn parse_fixture<T: DeserializeOwned>(&self, file_path: &Path) -> ImportResult<Vec<T>> {
        let path_str = file_path.display().to_string();

        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(path_str));
        }

        // 检查扩展名
        match file_path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => {}
            Some(ext) => return Err(ImportError::UnsupportedFormat(ext.to_string())),
            None => return Err(ImportError::UnsupportedFormat(path_str)),
        }

        let content = fs::read_to_string(file_path)?;
        let records: Vec<T> =
            serde_json::from_str(&content).map_err(|e| ImportError::json(&path_str, e))?;

        debug!(file = %path_str, rows = records.len(), "夹具文件解析完成");
        Ok(records)
    }
}
