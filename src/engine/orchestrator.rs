// ==========================================
// 多库并发入库系统 - 入库编排器
// ==========================================
// 用途: 扇出全部记录任务 → join 屏障 → 定稿汇总
// 约束: 单条记录的 Failed/Error 不取消、不阻塞兄弟任务
// ==========================================

use crate::domain::{
    AggregatedResult, EntityType, InputRecord, OrderRecord, OutcomeRecord, ProductRecord,
    UserRecord,
};
use crate::engine::aggregator::ResultAggregator;
use crate::engine::worker::run_insert_task;
use crate::repository::InsertGateway;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};
use uuid::Uuid;

// ==========================================
// IngestBatches - 三个实体批次
// ==========================================
// 批次在进入编排器前已完成解析（解析不在本系统范围内）
#[derive(Debug, Clone, Default)]
pub struct IngestBatches {
    pub users: Vec<UserRecord>,
    pub products: Vec<ProductRecord>,
    pub orders: Vec<OrderRecord>,
}

impl IngestBatches {
    /// 由混合记录流构造批次: 按实体类型标签分桶，桶内保持输入顺序
    pub fn from_records(records: impl IntoIterator<Item = InputRecord>) -> Self {
        let mut batches = Self::default();
        for record in records {
            match record {
                InputRecord::User(r) => batches.users.push(r),
                InputRecord::Product(r) => batches.products.push(r),
                InputRecord::Order(r) => batches.orders.push(r),
            }
        }
        batches
    }

    /// 全部批次的记录总数（= 并发任务数）
    pub fn total(&self) -> usize {
        self.users.len() + self.products.len() + self.orders.len()
    }
}

// ==========================================
// IngestOrchestrator - 入库编排器
// ==========================================
// 持久化能力按实体类型显式注入，核心不做全局配置解析
pub struct IngestOrchestrator {
    user_gateway: Arc<dyn InsertGateway<UserRecord>>,
    product_gateway: Arc<dyn InsertGateway<ProductRecord>>,
    order_gateway: Arc<dyn InsertGateway<OrderRecord>>,
}

impl IngestOrchestrator {
    /// 创建编排器
    ///
    /// # 参数
    /// - user_gateway / product_gateway / order_gateway: 每实体一个存储目标能力
    pub fn new(
        user_gateway: Arc<dyn InsertGateway<UserRecord>>,
        product_gateway: Arc<dyn InsertGateway<ProductRecord>>,
        order_gateway: Arc<dyn InsertGateway<OrderRecord>>,
    ) -> Self {
        Self {
            user_gateway,
            product_gateway,
            order_gateway,
        }
    }

    /// 执行一个批次的并发入库
    ///
    /// # 流程
    /// 1. 生成批次 ID，按记录数扇出独立任务（N 条记录 ⇒ N 个任务）
    /// 2. join 屏障等待全部任务完成（无取消/超时语义）
    /// 3. panic 的任务按 (实体, 行号) 补记 Error 结果
    /// 4. 定稿: 每个序列按 input_id 升序稳定排序
    #[instrument(skip_all)]
    pub async fn run(&self, batches: IngestBatches) -> AggregatedResult {
        let batch_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let total = batches.total();

        info!(
            batch_id = %batch_id,
            users = batches.users.len(),
            products = batches.products.len(),
            orders = batches.orders.len(),
            "开始并发入库"
        );

        let aggregator = Arc::new(ResultAggregator::new());

        // (实体, 行号) 与 handle 同序，用于 panic 任务的结果补记
        let mut task_meta: Vec<(EntityType, i64)> = Vec::with_capacity(total);
        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(total);

        // 启动前立即取起始时刻
        let start = Instant::now();

        for record in batches.users {
            task_meta.push((EntityType::User, record.id));
            handles.push(tokio::spawn(run_insert_task(
                record,
                self.user_gateway.clone(),
                aggregator.clone(),
            )));
        }
        for record in batches.products {
            task_meta.push((EntityType::Product, record.id));
            handles.push(tokio::spawn(run_insert_task(
                record,
                self.product_gateway.clone(),
                aggregator.clone(),
            )));
        }
        for record in batches.orders {
            task_meta.push((EntityType::Order, record.id));
            handles.push(tokio::spawn(run_insert_task(
                record,
                self.order_gateway.clone(),
                aggregator.clone(),
            )));
        }

        // join 屏障: 编排器唯一的阻塞点
        let join_results = futures::future::join_all(handles).await;
        let elapsed = start.elapsed();

        for ((entity, input_id), join_result) in task_meta.into_iter().zip(join_results) {
            if let Err(join_err) = join_result {
                // 任务 panic: 补记 Error，维持"每条输入恰好一条结果"
                error!(
                    entity = %entity,
                    input_id = input_id,
                    error = %join_err,
                    "入库任务异常终止"
                );
                aggregator.record(
                    entity,
                    OutcomeRecord::error(input_id, format!("Unexpected error: {}", join_err)),
                );
            }
        }

        let result = aggregator.finalize(batch_id, started_at, elapsed);

        info!(
            batch_id = %result.batch_id,
            users_success = result.success_count(EntityType::User),
            products_success = result.success_count(EntityType::Product),
            orders_success = result.success_count(EntityType::Order),
            elapsed_ms = result.elapsed.as_millis() as u64,
            "并发入库完成"
        );

        result
    }
}
