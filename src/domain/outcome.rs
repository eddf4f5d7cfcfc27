// ==========================================
// 多库并发入库系统 - 校验结果与汇总模型
// ==========================================
// 约束: 校验违规以数据形式返回，不抛错
// 约束: 每条输入记录恰好产生一条 OutcomeRecord
// ==========================================

use crate::domain::record::EntityType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

// ==========================================
// ValidationOutcome - 校验结果
// ==========================================
// 多条违规累积到同一个 Invalid，不在首条短路
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationOutcome {
    Valid,
    Invalid(Vec<String>),
}

impl ValidationOutcome {
    /// 由违规列表构造（空列表 ⇒ Valid）
    pub fn from_violations(violations: Vec<String>) -> Self {
        if violations.is_empty() {
            ValidationOutcome::Valid
        } else {
            ValidationOutcome::Invalid(violations)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

// ==========================================
// OutcomeStatus - 记录级最终分类
// ==========================================
// Failed = 业务规则拒绝; Error = 校验/落库过程中的意外故障
// 两者对运维含义不同，必须保留区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeStatus {
    Success,
    Failed,
    Error,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutcomeStatus::Success => "SUCCESS",
            OutcomeStatus::Failed => "FAILED",
            OutcomeStatus::Error => "ERROR",
        };
        f.write_str(s)
    }
}

// ==========================================
// OutcomeRecord - 单条记录的报表条目
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub input_id: i64,            // 调用方行号（非目标库主键）
    pub status: OutcomeStatus,    // 最终分类
    pub message: String,          // 人读消息
    pub assigned_id: Option<i64>, // 目标库分配的主键（仅 Success）
}

impl OutcomeRecord {
    pub fn success(input_id: i64, message: String, assigned_id: i64) -> Self {
        Self {
            input_id,
            status: OutcomeStatus::Success,
            message,
            assigned_id: Some(assigned_id),
        }
    }

    pub fn failed(input_id: i64, message: String) -> Self {
        Self {
            input_id,
            status: OutcomeStatus::Failed,
            message,
            assigned_id: None,
        }
    }

    pub fn error(input_id: i64, message: String) -> Self {
        Self {
            input_id,
            status: OutcomeStatus::Error,
            message,
            assigned_id: None,
        }
    }
}

// ==========================================
// AggregatedResult - 批次汇总结果
// ==========================================
// 由并发 worker 增量构建，Orchestrator 在全部完成后一次性定稿（排序）
// 定稿前不存在并发读取方
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedResult {
    pub batch_id: String,            // 本次入库批次标识（uuid v4）
    pub started_at: DateTime<Utc>,   // 批次启动时刻
    pub users: Vec<OutcomeRecord>,   // users 序列（按 input_id 升序）
    pub products: Vec<OutcomeRecord>, // products 序列（按 input_id 升序）
    pub orders: Vec<OutcomeRecord>,  // orders 序列（按 input_id 升序）
    pub elapsed: Duration,           // 启动到全部任务完成的耗时
}

impl AggregatedResult {
    /// 按实体类型取结果序列
    pub fn outcomes(&self, entity: EntityType) -> &[OutcomeRecord] {
        match entity {
            EntityType::User => &self.users,
            EntityType::Product => &self.products,
            EntityType::Order => &self.orders,
        }
    }

    /// 实体批次总条数（不变式: 每条输入恰好一条结果）
    pub fn total(&self, entity: EntityType) -> usize {
        self.outcomes(entity).len()
    }

    /// 实体批次成功条数
    pub fn success_count(&self, entity: EntityType) -> usize {
        self.outcomes(entity)
            .iter()
            .filter(|o| o.status == OutcomeStatus::Success)
            .count()
    }
}
