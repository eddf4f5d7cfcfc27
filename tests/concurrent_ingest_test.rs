// ==========================================
// 并发入库测试
// ==========================================
// 测试目标: 汇总器在并发 worker 下不丢/不重结果，
//           故障分类不跨任务传播
// ==========================================


use async_trait::async_trait;
use concurrent_ingest::engine::{IngestBatches, IngestOrchestrator};
use concurrent_ingest::repository::{InsertGateway, RepositoryError, RepositoryResult};
use concurrent_ingest::{logging, EntityType, OutcomeStatus};
use rand::Rng;
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ==========================================
// 网关替身
// ==========================================

/// 总是成功的网关替身，带随机调度延迟（竞态压力）
struct CountingStubGateway {
    next_id: AtomicI64,
    max_delay_ms: u64,
}

impl CountingStubGateway {
    fn new(max_delay_ms: u64) -> Self {
        Self {
            next_id: AtomicI64::new(1),
            max_delay_ms,
        }
    }
}

#[async_trait]
impl<R: Send + Sync> InsertGateway<R> for CountingStubGateway {
    async fn insert(&self, _record: &R) -> RepositoryResult<i64> {
        if self.max_delay_ms > 0 {
            let delay = rand::thread_rng().gen_range(0..=self.max_delay_ms);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

/// 总是失败的网关替身（目标不可达）
struct FailingGateway;

#[async_trait]
impl<R: Send + Sync> InsertGateway<R> for FailingGateway {
    async fn insert(&self, _record: &R) -> RepositoryResult<i64> {
        Err(RepositoryError::DatabaseConnectionError(
            "target unreachable".to_string(),
        ))
    }
}

/// 落库时 panic 的网关替身（编程故障）
struct PanickingGateway;

#[async_trait]
impl<R: Send + Sync> InsertGateway<R> for PanickingGateway {
    async fn insert(&self, _record: &R) -> RepositoryResult<i64> {
        panic!("simulated programming fault");
    }
}

fn valid_batches() -> IngestBatches {
    IngestBatches {
        users: (1..=10)
            .map(|i| test_helpers::user(i, &format!("User{}", i), &format!("u{}@example.com", i)))
            .collect(),
        products: (1..=10)
            .map(|i| test_helpers::product(i, &format!("Product{}", i), "10.00"))
            .collect(),
        orders: (1..=10)
            .map(|i| test_helpers::order(i, i, i, "1"))
            .collect(),
    }
}

// ==========================================
// 测试用例
// ==========================================

/// 30 个独立任务（每实体 10 个）反复在随机延迟下执行:
/// 不丢结果、不重结果、全部 Success
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_stress_30_tasks_no_lost_or_duplicated_outcomes() {
    logging::init_test();

    for round in 0..10 {
        let stub = Arc::new(CountingStubGateway::new(5));
        let orchestrator =
            IngestOrchestrator::new(stub.clone(), stub.clone(), stub.clone());

        let result = orchestrator.run(valid_batches()).await;

        for entity in [EntityType::User, EntityType::Product, EntityType::Order] {
            let outcomes = result.outcomes(entity);
            assert_eq!(outcomes.len(), 10, "第 {} 轮 {} 序列条数不符", round, entity);

            let ids: HashSet<i64> = outcomes.iter().map(|o| o.input_id).collect();
            assert_eq!(
                ids,
                (1..=10).collect::<HashSet<i64>>(),
                "第 {} 轮 {} 序列行号不完整",
                round,
                entity
            );

            assert!(
                outcomes.iter().all(|o| o.status == OutcomeStatus::Success),
                "第 {} 轮 {} 序列存在非 Success 结果",
                round,
                entity
            );
            assert!(outcomes.iter().all(|o| o.assigned_id.is_some()));
        }
    }
}

/// 网关失败: 每条记录一条 Error 结果，带 Unexpected error 前缀
#[tokio::test]
async fn test_failing_gateway_yields_error_outcomes() {
    logging::init_test();

    let failing = Arc::new(FailingGateway);
    let orchestrator =
        IngestOrchestrator::new(failing.clone(), failing.clone(), failing.clone());

    let result = orchestrator.run(valid_batches()).await;

    for entity in [EntityType::User, EntityType::Product, EntityType::Order] {
        let outcomes = result.outcomes(entity);
        assert_eq!(outcomes.len(), 10);
        for outcome in outcomes {
            assert_eq!(outcome.status, OutcomeStatus::Error);
            assert!(outcome.message.starts_with("Unexpected error:"));
            assert!(outcome.message.contains("target unreachable"));
            assert!(outcome.assigned_id.is_none());
        }
        assert_eq!(result.success_count(entity), 0);
    }
}

/// 任务 panic: 不影响兄弟任务，panic 记录补记为 Error
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_panicking_gateway_contained_per_task() {
    logging::init_test();

    // 仅 products 网关 panic，users/orders 正常
    let ok = Arc::new(CountingStubGateway::new(0));
    let orchestrator =
        IngestOrchestrator::new(ok.clone(), Arc::new(PanickingGateway), ok.clone());

    let result = orchestrator.run(valid_batches()).await;

    assert_eq!(result.success_count(EntityType::User), 10);
    assert_eq!(result.success_count(EntityType::Order), 10);

    let products = result.outcomes(EntityType::Product);
    assert_eq!(products.len(), 10, "panic 任务也必须留下结果");
    for outcome in products {
        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert!(outcome.message.starts_with("Unexpected error:"));
    }
}

/// 行号不保证唯一: 重复行号各自保留一条结果
#[tokio::test]
async fn test_duplicate_input_ids_each_keep_an_outcome() {
    logging::init_test();

    let stub = Arc::new(CountingStubGateway::new(2));
    let orchestrator = IngestOrchestrator::new(stub.clone(), stub.clone(), stub.clone());

    let batches = IngestBatches {
        users: vec![
            test_helpers::user(1, "Alice", "alice@example.com"),
            test_helpers::user(1, "Alice2", "alice2@example.com"),
            test_helpers::user(2, "Bob", "bob@example.com"),
        ],
        products: Vec::new(),
        orders: Vec::new(),
    };

    let result = orchestrator.run(batches).await;
    let users = result.outcomes(EntityType::User);

    assert_eq!(users.len(), 3);
    let ids: Vec<i64> = users.iter().map(|o| o.input_id).collect();
    assert_eq!(ids, vec![1, 1, 2]);
}
