// ==========================================
// 多库并发入库系统 - 配置层
// ==========================================
// 职责: 解析三个存储目标的数据库路径
// 优先级: 环境变量 > 用户数据目录 > 当前目录回退
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 入库配置
///
/// 三个存储目标各自独立，互不交叉写入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// users 目标库路径
    pub users_db_path: String,

    /// products 目标库路径
    pub products_db_path: String,

    /// orders 目标库路径
    pub orders_db_path: String,
}

impl IngestConfig {
    /// 从环境变量与默认路径解析配置
    ///
    /// # 环境变量
    /// - CONCURRENT_INGEST_USERS_DB: users 目标库路径
    /// - CONCURRENT_INGEST_PRODUCTS_DB: products 目标库路径
    /// - CONCURRENT_INGEST_ORDERS_DB: orders 目标库路径
    pub fn from_env() -> Self {
        Self {
            users_db_path: resolve_db_path("CONCURRENT_INGEST_USERS_DB", "users.db"),
            products_db_path: resolve_db_path("CONCURRENT_INGEST_PRODUCTS_DB", "products.db"),
            orders_db_path: resolve_db_path("CONCURRENT_INGEST_ORDERS_DB", "orders.db"),
        }
    }

    /// 使用显式路径构造配置（测试/嵌入场景）
    pub fn with_paths(
        users_db_path: impl Into<String>,
        products_db_path: impl Into<String>,
        orders_db_path: impl Into<String>,
    ) -> Self {
        Self {
            users_db_path: users_db_path.into(),
            products_db_path: products_db_path.into(),
            orders_db_path: orders_db_path.into(),
        }
    }
}

/// 解析单个目标库路径
///
/// 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
fn resolve_db_path(env_key: &str, file_name: &str) -> String {
    if let Ok(path) = std::env::var(env_key) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 先给一个当前目录回退值，后续如果能拿到 data_dir 再覆盖
    let mut path = PathBuf::from(".").join(file_name);

    if let Some(data_dir) = dirs::data_dir() {
        let app_dir = data_dir.join("concurrent-ingest");
        // 确保目录存在
        if std::fs::create_dir_all(&app_dir).is_ok() {
            path = app_dir.join(file_name);
        }
    }

    path.to_string_lossy().into_owned()
}
