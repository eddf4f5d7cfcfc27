// ==========================================
// 多库并发入库系统 - 用户仓储
// ==========================================
// 存储目标: users 库（users.db）
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::db;
use crate::domain::UserRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::gateway::InsertGateway;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

pub struct UserRepository {
    conn: Arc<Mutex<Connection>>,
}

impl UserRepository {
    /// 打开 users 目标库并确保表结构存在
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = db::open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        db::ensure_users_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

#[async_trait]
impl InsertGateway<UserRecord> for UserRepository {
    /// 写入一条用户记录，返回目标库分配的主键
    async fn insert(&self, record: &UserRecord) -> RepositoryResult<i64> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        conn.execute(
            "INSERT INTO users (name, email) VALUES (?1, ?2)",
            params![record.name, record.email],
        )?;

        Ok(conn.last_insert_rowid())
    }
}
