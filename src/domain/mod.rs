// ==========================================
// 多库并发入库系统 - 领域模型层
// ==========================================
// 职责: 定义记录实体、校验结果与汇总结构
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod outcome;
pub mod record;

// 重导出核心类型
pub use outcome::{
    AggregatedResult, OutcomeRecord, OutcomeStatus, ValidationOutcome,
};
pub use record::{EntityType, InputRecord, OrderRecord, ProductRecord, UserRecord};
