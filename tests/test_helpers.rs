// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 在临时目录中搭建 Datasets/（Import 夹具 + 运行配置）
// ==========================================

#![allow(dead_code)]

use dealer_shop_etl::EtlConfig;
use serde_json::{json, Value};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 临时数据集目录（TempDir 需要保持存活）
pub struct TestDatasets {
    pub temp_dir: TempDir,
}

impl TestDatasets {
    pub fn datasets_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn import_dir(&self) -> PathBuf {
        self.temp_dir.path().join("Import")
    }

    pub fn export_dir(&self) -> PathBuf {
        self.temp_dir.path().join("Export")
    }

    /// 带固定种子的运行配置
    pub fn config(&self, seed: u64) -> EtlConfig {
        EtlConfig::new(self.datasets_dir()).with_seed(seed)
    }

    /// 写入（覆盖）一个夹具文件
    pub fn write_fixture(&self, file_name: &str, value: &Value) -> Result<(), Box<dyn Error>> {
        fs::write(
            self.import_dir().join(file_name),
            serde_json::to_string_pretty(value)?,
        )?;
        Ok(())
    }

    /// 写入原始文本（用于构造格式错误的夹具）
    pub fn write_raw_fixture(&self, file_name: &str, content: &str) -> Result<(), Box<dyn Error>> {
        fs::write(self.import_dir().join(file_name), content)?;
        Ok(())
    }

    pub fn remove_fixture(&self, file_name: &str) -> Result<(), Box<dyn Error>> {
        fs::remove_file(self.import_dir().join(file_name))?;
        Ok(())
    }

    pub fn export_path(&self, file_name: &str) -> PathBuf {
        self.export_dir().join(file_name)
    }

    /// 读取导出文件并反序列化
    pub fn read_export<T: serde::de::DeserializeOwned>(
        &self,
        file_name: &str,
    ) -> Result<T, Box<dyn Error>> {
        let content = fs::read_to_string(self.export_path(file_name))?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// 创建空的临时数据集目录（仅含 Import/）
pub fn create_empty_datasets() -> Result<TestDatasets, Box<dyn Error>> {
    let temp_dir = TempDir::new()?;
    fs::create_dir_all(temp_dir.path().join("Import"))?;
    Ok(TestDatasets { temp_dir })
}

/// 创建临时数据集目录，并复制仓库自带的示例夹具
pub fn create_sample_datasets() -> Result<TestDatasets, Box<dyn Error>> {
    let datasets = create_empty_datasets()?;
    let sample_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("Datasets")
        .join("Import");

    for entry in fs::read_dir(&sample_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            fs::copy(&path, datasets.import_dir().join(entry.file_name()))?;
        }
    }
    Ok(datasets)
}

/// 创建临时数据集目录，写入一组小而可手算的夹具
///
/// - 3 个供应商 / 4 个零件 / 4 辆车（3 辆 Toyota）/ 4 个客户
/// - 3 个用户 / 4 个商品 / 3 个分类
pub fn create_small_datasets() -> Result<TestDatasets, Box<dyn Error>> {
    let datasets = create_empty_datasets()?;

    datasets.write_fixture(
        "suppliers.json",
        &json!([
            { "name": "Zeta Parts", "isImporter": false },
            { "name": "Alpha Motors", "isImporter": true },
            { "name": "Mid Supply", "isImporter": false }
        ]),
    )?;
    datasets.write_fixture(
        "parts.json",
        &json!([
            { "name": "Bonnet", "price": 100.25, "quantity": 3 },
            { "name": "Bumper", "price": 200, "quantity": 1 },
            { "name": "Mirror", "price": 19.99 },
            { "name": "Spoiler", "price": 1001.34, "quantity": 7 }
        ]),
    )?;
    datasets.write_fixture(
        "cars.json",
        &json!([
            { "make": "Toyota", "model": "Camry", "travelledDistance": 200 },
            { "make": "Toyota", "model": "Camry", "travelledDistance": 900 },
            { "make": "Opel", "model": "Astra", "travelledDistance": 10 },
            { "make": "Toyota", "model": "Auris", "travelledDistance": 50 }
        ]),
    )?;
    datasets.write_fixture(
        "customers.json",
        &json!([
            { "name": "Young Late", "birthDate": "1999-01-01T00:00:00", "isYoungDriver": true },
            { "name": "Same Day Young", "birthDate": "1990-05-05T00:00:00", "isYoungDriver": true },
            { "name": "Same Day Old", "birthDate": "1990-05-05", "isYoungDriver": false },
            { "name": "Oldest", "birthDate": "1970-12-31T00:00:00", "isYoungDriver": false }
        ]),
    )?;
    datasets.write_fixture(
        "users.json",
        &json!([
            { "firstName": "Ann", "lastName": "Smith", "age": 30 },
            { "lastName": "Brown" },
            { "firstName": "Carl", "lastName": "Adams", "age": 45 }
        ]),
    )?;
    datasets.write_fixture(
        "products.json",
        &json!([
            { "name": "Lamp", "price": 500 },
            { "name": "Desk", "price": 1000 },
            { "name": "Chair", "price": 499.99 },
            { "name": "Sofa", "price": 750.5 }
        ]),
    )?;
    datasets.write_fixture(
        "categories.json",
        &json!([
            { "name": "Home" },
            { "name": "Garden" },
            { "name": "Office" }
        ]),
    )?;

    Ok(datasets)
}
