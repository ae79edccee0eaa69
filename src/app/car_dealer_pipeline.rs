// ==========================================
// 经销商/商城 ETL - 汽车经销商批处理流程
// ==========================================
// 阶段顺序:
// 1. 供应商   2. 零件（随机供应商）  3. 车辆  4. 车辆零件关联
// 5. 客户     6. 销售（随机车辆/客户/折扣）
// 7. 六个导出查询
// 约束: 每一阶段只依赖上一阶段已落库的状态
// ==========================================

use crate::app::error::EtlResult;
use crate::domain::car_dealer::Part;
use crate::engine::car_dealer_queries;
use crate::engine::RelationshipSynthesizer;
use crate::exporter::{export_files, JsonExporter};
use crate::importer::dto::{CarDto, CustomerDto, PartDto, SupplierDto};
use crate::importer::field_mapper::{
    map_car, map_customer, map_part, map_supplier, map_with_ids,
};
use crate::importer::{fixture_files, FixtureParser, JsonFixtureParser};
use crate::repository::CarDealerRepository;
use rand::Rng;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, instrument};

/// 汽车经销商运行汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CarDealerRunSummary {
    pub suppliers: usize,
    pub parts: usize,
    pub cars: usize,
    pub part_cars: usize,
    pub customers: usize,
    pub sales: usize,
    pub exported_files: Vec<PathBuf>,
}

// ==========================================
// CarDealerPipeline - 汽车经销商流程
// ==========================================
pub struct CarDealerPipeline {
    repo: CarDealerRepository,
    parser: JsonFixtureParser,
    import_dir: PathBuf,
    exporter: JsonExporter,
}

impl CarDealerPipeline {
    pub fn new(
        repo: CarDealerRepository,
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
    ) -> EtlResult<CarDealerRunSummary> {
        self.repo.init_schema()?;

        let suppliers = self.import_suppliers()?;
        let parts = self.import_parts(synthesizer)?;
        let cars = self.import_cars()?;
        let part_cars = self.import_part_cars(synthesizer)?;
        let customers = self.import_customers()?;
        let sales = self.import_sales(synthesizer)?;
        let exported_files = self.export_all()?;

        Ok(CarDealerRunSummary {
            suppliers,
            parts,
            cars,
            part_cars,
            customers,
            sales,
            exported_files,
        })
    }

    // ==========================================
    // 导入阶段
    // ==========================================

    pub fn import_suppliers(&self) -> EtlResult<usize> {
        let dtos: Vec<SupplierDto> = self
            .parser
            .parse_fixture(&self.fixture_path(fixture_files::SUPPLIERS))?;
        let suppliers = map_with_ids(dtos, map_supplier);
        let count = self.repo.batch_insert_suppliers(&suppliers)?;
        info!(count, "供应商导入完成");
        Ok(count)
    }

    /// 零件导入：供应商从已落库的供应商 id 中随机指派
    pub fn import_parts<R: Rng>(
        &self,
        synthesizer: &mut RelationshipSynthesizer<R>,
    ) -> EtlResult<usize> {
        let dtos: Vec<PartDto> = self
            .parser
            .parse_fixture(&self.fixture_path(fixture_files::PARTS))?;
        let supplier_ids = self.repo.list_supplier_ids()?;
        let drawn = synthesizer.draw_part_suppliers(dtos.len(), &supplier_ids)?;

        let parts: Vec<Part> = dtos
            .into_iter()
            .zip(drawn)
            .zip(1_i64..)
            .map(|((dto, supplier_id), id)| map_part(dto, id, supplier_id))
            .collect();

        let count = self.repo.batch_insert_parts(&parts)?;
        info!(count, "零件导入完成");
        Ok(count)
    }

    pub fn import_cars(&self) -> EtlResult<usize> {
        let dtos: Vec<CarDto> = self
            .parser
            .parse_fixture(&self.fixture_path(fixture_files::CARS))?;
        let cars = map_with_ids(dtos, map_car);
        let count = self.repo.batch_insert_cars(&cars)?;
        info!(count, "车辆导入完成");
        Ok(count)
    }

    pub fn import_part_cars<R: Rng>(
        &self,
        synthesizer: &mut RelationshipSynthesizer<R>,
    ) -> EtlResult<usize> {
        let car_ids = self.repo.list_car_ids()?;
        let part_ids = self.repo.list_part_ids()?;
        let links = synthesizer.generate_part_cars(&car_ids, &part_ids)?;
        let count = self.repo.batch_insert_part_cars(&links)?;
        info!(count, "车辆零件关联生成完成");
        Ok(count)
    }

    pub fn import_customers(&self) -> EtlResult<usize> {
        let dtos: Vec<CustomerDto> = self
            .parser
            .parse_fixture(&self.fixture_path(fixture_files::CUSTOMERS))?;
        let customers = map_with_ids(dtos, map_customer);
        let count = self.repo.batch_insert_customers(&customers)?;
        info!(count, "客户导入完成");
        Ok(count)
    }

    pub fn import_sales<R: Rng>(
        &self,
        synthesizer: &mut RelationshipSynthesizer<R>,
    ) -> EtlResult<usize> {
        let car_ids = self.repo.list_car_ids()?;
        let customer_ids = self.repo.list_customer_ids()?;
        let sales = synthesizer.generate_sales(&car_ids, &customer_ids)?;
        let count = self.repo.batch_insert_sales(&sales)?;
        info!(count, "销售记录生成完成");
        Ok(count)
    }

    // ==========================================
    // 导出阶段
    // ==========================================

    /// 读取全量快照并写出六个导出文件
    pub fn export_all(&self) -> EtlResult<Vec<PathBuf>> {
        let snapshot = self.repo.load_snapshot()?;
        let exporter = &self.exporter;

        let files = vec![
            exporter.write_records(
                export_files::ORDERED_CUSTOMERS,
                &car_dealer_queries::ordered_customers(&snapshot),
            )?,
            exporter.write_records(
                export_files::TOYOTA_CARS,
                &car_dealer_queries::toyota_cars(&snapshot),
            )?,
            exporter.write_records(
                export_files::LOCAL_SUPPLIERS,
                &car_dealer_queries::local_suppliers(&snapshot),
            )?,
            exporter.write_records(
                export_files::CARS_AND_PARTS,
                &car_dealer_queries::cars_with_parts(&snapshot),
            )?,
            exporter.write_records(
                export_files::CUSTOMERS_TOTAL_SALES,
                &car_dealer_queries::total_sales_by_customer(&snapshot),
            )?,
            exporter.write_records(
                export_files::SALES_DISCOUNTS,
                &car_dealer_queries::sales_with_discount(&snapshot),
            )?,
        ];

        Ok(files)
    }
}
