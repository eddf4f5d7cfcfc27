// ==========================================
// 多库并发入库系统 - 数据仓储层
// ==========================================
// 职责: 提供按实体类型隔离的持久化网关
// 约束: 所有写入使用参数化 SQL，防止注入
// 约束: 三个存储目标相互独立，核心永不跨库写入
// ==========================================

pub mod error;
pub mod gateway;
pub mod order_repo;
pub mod product_repo;
pub mod user_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use gateway::InsertGateway;
pub use order_repo::OrderRepository;
pub use product_repo::ProductRepository;
pub use user_repo::UserRepository;
