// ==========================================
// 多库并发入库系统 - 商品仓储
// ==========================================
// 存储目标: products 库（products.db）
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db;
use crate::domain::ProductRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::gateway::InsertGateway;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

pub struct ProductRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductRepository {
    /// 打开 products 目标库并确保表结构存在
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = db::open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        db::ensure_products_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

#[async_trait]
impl InsertGateway<ProductRecord> for ProductRepository {
    /// 写入一条商品记录，返回目标库分配的主键
    ///
    /// 契约上 price 已通过校验; 仓储仍不信任输入，解析失败以错误上报
    async fn insert(&self, record: &ProductRecord) -> RepositoryResult<i64> {
        let price: f64 = record.price.trim().parse().map_err(|_| {
            RepositoryError::FieldValueError {
                field: "price".to_string(),
                message: format!("无法解析为实数: {}", record.price),
            }
        })?;

        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        conn.execute(
            "INSERT INTO products (name, price) VALUES (?1, ?2)",
            params![record.name, price],
        )?;

        Ok(conn.last_insert_rowid())
    }
}
