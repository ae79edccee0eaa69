// ==========================================
// 经销商/商城 ETL - 应用层
// ==========================================
// 职责: 串联两套领域的批处理流程（单线程、顺序执行）
// 红线: 整个运行只创建一个随机数发生器
// ==========================================

pub mod car_dealer_pipeline;
pub mod error;
pub mod product_shop_pipeline;

pub use car_dealer_pipeline::{CarDealerPipeline, CarDealerRunSummary};
pub use error::{EtlError, EtlResult};
pub use product_shop_pipeline::{ProductShopPipeline, ProductShopRunSummary};

use crate::config::EtlConfig;
use crate::engine::RelationshipSynthesizer;
use crate::importer::ImportError;
use crate::repository::{CarDealerRepository, ProductShopRepository};
use serde::Serialize;
use tracing::{info, info_span};
use uuid::Uuid;

/// 单次运行汇总
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub car_dealer: CarDealerRunSummary,
    pub product_shop: ProductShopRunSummary,
}

/// 执行一次完整批处理：汽车经销商 → 商品商城
pub fn run(config: &EtlConfig) -> EtlResult<RunSummary> {
    let run_id = Uuid::new_v4();
    let span = info_span!("etl_run", run_id = %run_id);
    let _guard = span.enter();

    let import_dir = config.import_dir();
    if !import_dir.is_dir() {
        return Err(ImportError::FileNotFound(import_dir.display().to_string()).into());
    }
    let export_dir = config.export_dir();

    info!(
        datasets_dir = %config.datasets_dir().display(),
        seeded = config.rng_seed.is_some(),
        "开始批处理"
    );

    let mut synthesizer = RelationshipSynthesizer::with_seed(config.rng_seed);

    let car_dealer_repo =
        CarDealerRepository::new(&config.car_dealer_db_path().to_string_lossy())?;
    let car_dealer = CarDealerPipeline::new(car_dealer_repo, &import_dir, &export_dir)
        .run(&mut synthesizer)?;
    info!(
        suppliers = car_dealer.suppliers,
        parts = car_dealer.parts,
        cars = car_dealer.cars,
        customers = car_dealer.customers,
        sales = car_dealer.sales,
        "汽车经销商流程完成"
    );

    let product_shop_repo =
        ProductShopRepository::new(&config.product_shop_db_path().to_string_lossy())?;
    let product_shop = ProductShopPipeline::new(product_shop_repo, &import_dir, &export_dir)
        .run(&mut synthesizer)?;
    info!(
        users = product_shop.users,
        products = product_shop.products,
        categories = product_shop.categories,
        "商品商城流程完成"
    );

    Ok(RunSummary {
        run_id,
        car_dealer,
        product_shop,
    })
}
