// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 级别由 RUST_LOG 控制，输出格式由运行配置决定（text / json）
// ==========================================

use crate::config::LogFormat;
use tracing_subscriber::{fmt, EnvFilter};

/// 未设置 RUST_LOG 时的默认过滤级别
pub const DEFAULT_FILTER: &str = "info";

/// 日志初始化错误（全局订阅器只能安装一次）
pub type LoggingError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// 从环境变量读取过滤器，读取失败时回退到默认级别
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// 按配置的输出格式安装全局日志订阅器
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=dealer_shop_etl::engine=trace
///
/// # 返回
/// - Err: 已有全局订阅器（重复初始化不会 panic）
///
/// # 示例
/// ```no_run
/// use dealer_shop_etl::{logging, LogFormat};
/// logging::try_init(LogFormat::Json).expect("日志初始化失败");
/// ```
pub fn try_init(format: LogFormat) -> Result<(), LoggingError> {
    match format {
        // 人读格式：带模块路径与行号
        LogFormat::Text => fmt()
            .with_env_filter(env_filter())
            .with_target(true)
            .with_thread_ids(false)
            .with_line_number(true)
            .try_init(),
        // 采集格式：每行一个 JSON 对象，附带当前 span（含 run_id）
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(env_filter())
            .with_current_span(true)
            .with_span_list(false)
            .try_init(),
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试；重复调用静默忽略
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_returns_error() {
        // 第一次可能因其他测试已安装订阅器而失败，这里只关心第二次
        let _ = try_init(LogFormat::Text);
        assert!(try_init(LogFormat::Json).is_err());
        assert!(try_init(LogFormat::Text).is_err());
    }
}
