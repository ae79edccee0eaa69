// ==========================================
// 汽车经销商 / 商品商城 ETL - 主入口
// ==========================================
// 无命令行参数；可选环境变量见 config::env_keys
// ==========================================

use anyhow::Context;
use dealer_shop_etl::{logging, EtlConfig};

fn main() -> anyhow::Result<()> {
    // 先读配置（日志格式由配置决定）
    let config = EtlConfig::from_env().context("读取运行配置失败")?;

    logging::try_init(config.log_format)
        .map_err(|e| anyhow::anyhow!(e))
        .context("日志系统初始化失败")?;

    tracing::info!("==================================================");
    tracing::info!("{}", dealer_shop_etl::APP_NAME);
    tracing::info!("系统版本: {}", dealer_shop_etl::VERSION);
    tracing::info!("==================================================");

    tracing::info!(datasets_dir = %config.datasets_dir().display(), "使用数据集目录");

    let summary = dealer_shop_etl::run(&config).context("批处理运行失败")?;

    tracing::info!(
        run_id = %summary.run_id,
        exported = summary.car_dealer.exported_files.len() + summary.product_shop.exported_files.len(),
        "批处理完成"
    );
    Ok(())
}
