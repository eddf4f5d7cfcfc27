// ==========================================
// 多库并发入库系统 - 日志初始化
// ==========================================
// 基于 tracing / tracing-subscriber
// 入库流水线按 batch_id + 实体类型打点，级别由 RUST_LOG 控制
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统（进程入口调用一次）
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=concurrent_ingest=trace
///   单条记录的校验/落库细节在 debug 级别
///
/// # 示例
/// ```no_run
/// use concurrent_ingest::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // target + 行号便于定位到具体 worker/仓储
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// 初始化测试环境的日志系统
///
/// debug 级别 + test_writer; 可重复调用（并发测试各自初始化时只生效一次）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
