// ==========================================
// 经销商/商城 ETL - 商品商城批处理流程
// ==========================================
// 阶段顺序:
// 1. 用户  2. 商品（随机卖家/买家）  3. 分类  4. 商品分类关联
// 5. 四个导出查询
// 约束: 每一阶段只依赖上一阶段已落库的状态
// ==========================================

use crate::app::error::EtlResult;
use crate::domain::product_shop::Product;
use crate::engine::product_shop_queries;
use crate::engine::RelationshipSynthesizer;
use crate::exporter::{export_files, JsonExporter};
use crate::importer::dto::{CategoryDto, ProductDto, UserDto};
use crate::importer::field_mapper::{map_category, map_product, map_user, map_with_ids};
use crate::importer::{fixture_files, FixtureParser, JsonFixtureParser};
use crate::repository::ProductShopRepository;
use rand::Rng;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};

/// 商品商城运行汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductShopRunSummary {
    pub users: usize,
    pub products: usize,
    pub categories: usize,
    pub category_products: usize,
    pub exported_files: Vec<PathBuf>,
}

// ==========================================
// ProductShopPipeline - 商品商城流程
// ==========================================
pub struct ProductShopPipeline {
    repo: ProductShopRepository,
    parser: JsonFixtureParser,
    import_dir: PathBuf,
    exporter: JsonExporter,
}

impl ProductShopPipeline {
    pub fn new(
        repo: ProductShopRepository,
        import_dir: impl Into<PathBuf>,
        export_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repo,
            parser: JsonFixtureParser,
            import_dir: import_dir.into(),
            exporter: JsonExporter::new(export_dir),
        }
    }

    fn fixture_path(&self, file_name: &str) -> PathBuf {
        self.import_dir.join(file_name)
    }

    /// 执行完整流程（重建 schema → 导入 → 生成关联 → 导出）
    #[instrument(skip(self, synthesizer), fields(import_dir = %self.import_dir.display()))]
    pub fn run<R: Rng>(
        &self,
        synthesizer: &mut RelationshipSynthesizer<R>,
    ) -> EtlResult<ProductShopRunSummary> {
        self.repo.init_schema()?;

        let users = self.import_users()?;
        let products = self.import_products(synthesizer)?;
        let categories = self.import_categories()?;
        let category_products = self.import_category_products(synthesizer)?;
        let exported_files = self.export_all()?;

        Ok(ProductShopRunSummary {
            users,
            products,
            categories,
            category_products,
            exported_files,
        })
    }

    pub fn import_users(&self) -> EtlResult<usize> {
        let dtos: Vec<UserDto> = self
            .parser
            .parse_fixture(&self.fixture_path(fixture_files::USERS))?;
        let users = map_with_ids(dtos, map_user);
        let count = self.repo.batch_insert_users(&users)?;
        info!(count, "用户导入完成");
        Ok(count)
    }

    /// 商品导入：卖家/买家从已落库的用户 id 中随机指派（买家 ≠ 卖家）
    pub fn import_products<R: Rng>(
        &self,
        synthesizer: &mut RelationshipSynthesizer<R>,
    ) -> EtlResult<usize> {
        let dtos: Vec<ProductDto> = self
            .parser
            .parse_fixture(&self.fixture_path(fixture_files::PRODUCTS))?;
        let user_ids = self.repo.list_user_ids()?;
        let pairs = synthesizer.draw_trade_pairs(dtos.len(), &user_ids)?;

        let products: Vec<Product> = dtos
            .into_iter()
            .zip(pairs)
            .zip(1_i64..)
            .map(|((dto, pair), id)| map_product(dto, id, pair))
            .collect();

        let count = self.repo.batch_insert_products(&products)?;
        info!(count, "商品导入完成");
        Ok(count)
    }

    pub fn import_categories(&self) -> EtlResult<usize> {
        let dtos: Vec<CategoryDto> = self
            .parser
            .parse_fixture(&self.fixture_path(fixture_files::CATEGORIES))?;
        let categories = map_with_ids(dtos, map_category);
        let count = self.repo.batch_insert_categories(&categories)?;
        info!(count, "分类导入完成");
        Ok(count)
    }

    pub fn import_category_products<R: Rng>(
        &self,
        synthesizer: &mut RelationshipSynthesizer<R>,
    ) -> EtlResult<usize> {
        let product_ids = self.repo.list_product_ids()?;
        let category_ids = self.repo.list_category_ids()?;
        let links = synthesizer.generate_category_products(&product_ids, &category_ids)?;
        let count = self.repo.batch_insert_category_products(&links)?;
        info!(count, "商品分类关联生成完成");
        Ok(count)
    }

    /// 读取全量快照并写出四个导出文件
    pub fn export_all(&self) -> EtlResult<Vec<PathBuf>> {
        let snapshot = self.repo.load_snapshot()?;
        let exporter = &self.exporter;

        let files = vec![
            exporter.write_records(
                export_files::PRODUCTS_IN_RANGE,
                &product_shop_queries::products_in_range(&snapshot),
            )?,
            exporter.write_records(
                export_files::USERS_SOLD_PRODUCTS,
                &product_shop_queries::sold_products_by_user(&snapshot),
            )?,
            exporter.write_records(
                export_files::CATEGORIES_BY_PRODUCTS,
                &product_shop_queries::categories_by_product_count(&snapshot),
            )?,
            exporter.write(
                export_files::USERS_AND_PRODUCTS,
                &product_shop_queries::users_and_products(&snapshot),
            )?,
        ];

        Ok(files)
    }
}
