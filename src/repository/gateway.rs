// ==========================================
// 多库并发入库系统 - 持久化网关 Trait
// ==========================================
// 职责: 定义单实体写入能力（不包含实现）
// 契约: 仅在校验通过后调用，每条记录至多调用一次;
//       失败原因与输入合法性无关（目标不可达、目标侧约束等），
//       以 RepositoryError 上报，核心不重试
// ==========================================

use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// InsertGateway Trait
// ==========================================
// 用途: 核心流水线依赖的唯一持久化接口
// 实现者: UserRepository / ProductRepository / OrderRepository（每库一个实现）
#[async_trait]
pub trait InsertGateway<R>: Send + Sync
where
    R: Send + Sync,
{
    /// 写入一条已校验记录
    ///
    /// # 返回
    /// - Ok(i64): 目标库分配的主键（区别于调用方行号）
    /// - Err: 落库故障
    async fn insert(&self, record: &R) -> RepositoryResult<i64>;
}
