// ==========================================
// 多库并发入库系统 - 订单仓储
// ==========================================
// 存储目标: orders 库（orders.db）
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db;
use crate::domain::OrderRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::gateway::InsertGateway;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

pub struct OrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderRepository {
    /// 打开 orders 目标库并确保表结构存在
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = db::open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        db::ensure_orders_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

#[async_trait]
impl InsertGateway<OrderRecord> for OrderRepository {
    /// 写入一条订单记录，返回目标库分配的主键
    ///
    /// 契约上 quantity 已通过校验; 仓储仍不信任输入，解析失败以错误上报
    async fn insert(&self, record: &OrderRecord) -> RepositoryResult<i64> {
        let quantity: i64 = record.quantity.trim().parse().map_err(|_| {
            RepositoryError::FieldValueError {
                field: "quantity".to_string(),
                message: format!("无法解析为整数: {}", record.quantity),
            }
        })?;

        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        conn.execute(
            "INSERT INTO orders (user_id, product_id, quantity) VALUES (?1, ?2, ?3)",
            params![record.user_id, record.product_id, quantity],
        )?;

        Ok(conn.last_insert_rowid())
    }
}
