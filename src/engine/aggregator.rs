// ==========================================
// 多库并发入库系统 - 结果汇总器
// ==========================================
// 职责: 并发 worker 的结果合并点（唯一共享可变状态）
// 约束: 三个分桶共用一把互斥锁，临界区仅为追加操作，
//       不在校验/落库期间持锁
// 约束: 定稿前不提供任何读取入口
// ==========================================

use crate::domain::{AggregatedResult, EntityType, OutcomeRecord};
use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Default)]
struct OutcomeBuckets {
    users: Vec<OutcomeRecord>,
    products: Vec<OutcomeRecord>,
    orders: Vec<OutcomeRecord>,
}

/// 结果汇总器
///
/// 对外仅暴露原子追加与一次性定稿，底层序列不可直接修改
#[derive(Debug, Default)]
pub struct ResultAggregator {
    buckets: Mutex<OutcomeBuckets>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条记录结果（O(1) 临界区）
    ///
    /// 锁中毒视为兄弟任务的编程故障: 恢复内部数据继续追加，
    /// 保证"每条输入恰好一条结果"的不变式
    pub fn record(&self, entity: EntityType, outcome: OutcomeRecord) {
        let mut buckets = self
            .buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match entity {
            EntityType::User => buckets.users.push(outcome),
            EntityType::Product => buckets.products.push(outcome),
            EntityType::Order => buckets.orders.push(outcome),
        }
    }

    /// 定稿: 取出全部分桶并按 input_id 升序稳定排序
    ///
    /// 仅在编排器确认所有 worker 完成后调用一次;
    /// input_id 不保证唯一，重复值保持完成顺序（稳定排序）
    pub fn finalize(
        &self,
        batch_id: String,
        started_at: DateTime<Utc>,
        elapsed: Duration,
    ) -> AggregatedResult {
        let mut buckets = self
            .buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut users = std::mem::take(&mut buckets.users);
        let mut products = std::mem::take(&mut buckets.products);
        let mut orders = std::mem::take(&mut buckets.orders);
        drop(buckets);

        users.sort_by_key(|o| o.input_id);
        products.sort_by_key(|o| o.input_id);
        orders.sort_by_key(|o| o.input_id);

        AggregatedResult {
            batch_id,
            started_at,
            users,
            products,
            orders,
            elapsed,
        }
    }
}
