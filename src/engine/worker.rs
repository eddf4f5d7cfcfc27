// ==========================================
// 多库并发入库系统 - 单记录入库任务
// ==========================================
// 流程: 校验 → 落库 → 分类
// 约束: 任何故障不越过任务边界，一律转为 OutcomeRecord，
//       兄弟任务不受影响
// ==========================================

use crate::domain::{
    EntityType, OrderRecord, OutcomeRecord, ProductRecord, UserRecord, ValidationOutcome,
};
use crate::engine::aggregator::ResultAggregator;
use crate::repository::InsertGateway;
use crate::validator;
use std::sync::Arc;
use tracing::{debug, warn};

// ==========================================
// IngestRecord Trait
// ==========================================
// 用途: 把三种实体的校验与消息差异折叠到统一任务里
pub trait IngestRecord: Send + Sync + 'static {
    /// 实体类型标签（路由到对应分桶/存储目标）
    const ENTITY: EntityType;

    /// 调用方行号
    fn input_id(&self) -> i64;

    /// 执行本实体的业务规则校验（委托校验层纯函数）
    fn validate(&self) -> ValidationOutcome;

    /// 成功落库时的报表消息
    fn success_message(&self) -> String;
}

impl IngestRecord for UserRecord {
    const ENTITY: EntityType = EntityType::User;

    fn input_id(&self) -> i64 {
        self.id
    }

    fn validate(&self) -> ValidationOutcome {
        validator::validate_user(self)
    }

    fn success_message(&self) -> String {
        format!("User '{}' inserted successfully", self.name)
    }
}

impl IngestRecord for ProductRecord {
    const ENTITY: EntityType = EntityType::Product;

    fn input_id(&self) -> i64 {
        self.id
    }

    fn validate(&self) -> ValidationOutcome {
        validator::validate_product(self)
    }

    fn success_message(&self) -> String {
        format!("Product '{}' inserted successfully", self.name)
    }
}

impl IngestRecord for OrderRecord {
    const ENTITY: EntityType = EntityType::Order;

    fn input_id(&self) -> i64 {
        self.id
    }

    fn validate(&self) -> ValidationOutcome {
        validator::validate_order(self)
    }

    fn success_message(&self) -> String {
        format!(
            "Order for user_id={}, product_id={} inserted successfully",
            self.user_id, self.product_id
        )
    }
}

// ==========================================
// 任务体
// ==========================================

/// 单条记录的并发执行单元
///
/// 汇总追加是任务的最后一步; 此前任何 panic 由 JoinHandle 捕获，
/// 编排器据此补记 Error 结果
pub async fn run_insert_task<R: IngestRecord>(
    record: R,
    gateway: Arc<dyn InsertGateway<R>>,
    aggregator: Arc<ResultAggregator>,
) {
    let outcome = build_outcome(&record, gateway.as_ref()).await;
    aggregator.record(R::ENTITY, outcome);
}

/// 校验 → 落库 → 分类
async fn build_outcome<R: IngestRecord>(
    record: &R,
    gateway: &dyn InsertGateway<R>,
) -> OutcomeRecord {
    match record.validate() {
        ValidationOutcome::Invalid(reasons) => {
            let message = reasons.join("; ");
            debug!(
                entity = %R::ENTITY,
                input_id = record.input_id(),
                message = %message,
                "记录未通过校验"
            );
            OutcomeRecord::failed(record.input_id(), message)
        }
        ValidationOutcome::Valid => match gateway.insert(record).await {
            Ok(assigned_id) => {
                debug!(
                    entity = %R::ENTITY,
                    input_id = record.input_id(),
                    assigned_id = assigned_id,
                    "记录落库成功"
                );
                OutcomeRecord::success(record.input_id(), record.success_message(), assigned_id)
            }
            Err(fault) => {
                warn!(
                    entity = %R::ENTITY,
                    input_id = record.input_id(),
                    error = %fault,
                    "记录落库故障"
                );
                OutcomeRecord::error(record.input_id(), format!("Unexpected error: {}", fault))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OutcomeStatus;
    use crate::repository::{RepositoryError, RepositoryResult};
    use async_trait::async_trait;

    struct StubGateway {
        fail: bool,
    }

    #[async_trait]
    impl<R: Send + Sync> InsertGateway<R> for StubGateway {
        async fn insert(&self, _record: &R) -> RepositoryResult<i64> {
            if self.fail {
                Err(RepositoryError::DatabaseConnectionError(
                    "target unavailable".to_string(),
                ))
            } else {
                Ok(42)
            }
        }
    }

    fn valid_user() -> UserRecord {
        UserRecord {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_valid_record_success_outcome() {
        let gateway = StubGateway { fail: false };
        let outcome = build_outcome(&valid_user(), &gateway).await;
        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert_eq!(outcome.assigned_id, Some(42));
        assert_eq!(outcome.message, "User 'Alice' inserted successfully");
    }

    #[tokio::test]
    async fn test_invalid_record_failed_outcome_joins_reasons() {
        let gateway = StubGateway { fail: false };
        let record = UserRecord {
            id: 2,
            name: "".to_string(),
            email: "bad".to_string(),
        };
        let outcome = build_outcome(&record, &gateway).await;
        assert_eq!(outcome.status, OutcomeStatus::Failed);
        assert_eq!(
            outcome.message,
            "Row 2: Name is required; Row 2: Invalid email format"
        );
        assert!(outcome.assigned_id.is_none());
    }

    #[tokio::test]
    async fn test_gateway_fault_error_outcome() {
        let gateway = StubGateway { fail: true };
        let outcome = build_outcome(&valid_user(), &gateway).await;
        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert!(outcome.message.starts_with("Unexpected error:"));
        assert!(outcome.message.contains("target unavailable"));
    }

    #[tokio::test]
    async fn test_invalid_record_never_reaches_gateway() {
        // 落库网关若被调用会返回成功; Failed 结果证明其未被触达
        let gateway = StubGateway { fail: false };
        let record = OrderRecord {
            id: 3,
            user_id: 0,
            product_id: 1,
            quantity: "1".to_string(),
        };
        let outcome = build_outcome(&record, &gateway).await;
        assert_eq!(outcome.status, OutcomeStatus::Failed);
        assert!(outcome.assigned_id.is_none());
    }
}
