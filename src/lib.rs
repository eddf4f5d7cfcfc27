// ==========================================
// 多库并发入库系统 - 核心库
// ==========================================
// 技术栈: Rust + Tokio + SQLite
// 系统定位: 批量记录校验与并发写入（每库独立存储目标）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与结果类型
pub mod domain;

// 校验层 - 业务规则（纯函数）
pub mod validator;

// 数据仓储层 - 持久化网关
pub mod repository;

// 引擎层 - 并发入库流水线
pub mod engine;

// 配置层 - 存储目标路径
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// 报表渲染 - 汇总结果消费端
pub mod report;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AggregatedResult, EntityType, InputRecord, OrderRecord, OutcomeRecord, OutcomeStatus,
    ProductRecord, UserRecord, ValidationOutcome,
};

// 校验函数
pub use validator::{validate_order, validate_product, validate_user};

// 仓储
pub use repository::{
    InsertGateway, OrderRepository, ProductRepository, RepositoryError, RepositoryResult,
    UserRepository,
};

// 引擎
pub use engine::{IngestBatches, IngestOrchestrator, ResultAggregator};

// 配置
pub use config::IngestConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "多库并发入库系统";

// ==========================================
// 预编译检查
// ==========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
