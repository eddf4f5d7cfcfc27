// ==========================================
// 多库并发入库系统 - 引擎层
// ==========================================
// 职责: 并发入库流水线（任务 → 汇总 → 编排）
// 红线: 故障不越过任务边界; 共享状态仅限汇总器
// ==========================================

pub mod aggregator;
pub mod orchestrator;
pub mod worker;

// 重导出核心引擎
pub use aggregator::ResultAggregator;
pub use orchestrator::{IngestBatches, IngestOrchestrator};
pub use worker::{run_insert_task, IngestRecord};
