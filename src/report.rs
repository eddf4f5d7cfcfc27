// ==========================================
// 多库并发入库系统 - 报表渲染
// ==========================================
// 职责: 汇总结果的消费端（文本 + JSON）
// 约定: 渲染只读取 AggregatedResult，不参与核心契约
// ==========================================

use crate::domain::{AggregatedResult, EntityType};
use std::fmt::Write as _;

const BANNER: &str =
    "================================================================================";
const RULE: &str =
    "--------------------------------------------------------------------------------";

/// 渲染操作员文本报表
///
/// 每个实体一节: `Row {id}: [STATUS] {message}`，末尾为成功率汇总与总耗时
pub fn render(result: &AggregatedResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", BANNER);
    let _ = writeln!(out, "CONCURRENT INSERTION RESULTS");
    let _ = writeln!(out, "{}", BANNER);

    render_section(&mut out, result, EntityType::User, "USERS TABLE (users.db):");
    render_section(
        &mut out,
        result,
        EntityType::Product,
        "PRODUCTS TABLE (products.db):",
    );
    render_section(
        &mut out,
        result,
        EntityType::Order,
        "ORDERS TABLE (orders.db):",
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", BANNER);
    let _ = writeln!(out, "SUMMARY:");
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(
        out,
        "Users: {}/{} successful insertions",
        result.success_count(EntityType::User),
        result.total(EntityType::User)
    );
    let _ = writeln!(
        out,
        "Products: {}/{} successful insertions",
        result.success_count(EntityType::Product),
        result.total(EntityType::Product)
    );
    let _ = writeln!(
        out,
        "Orders: {}/{} successful insertions",
        result.success_count(EntityType::Order),
        result.total(EntityType::Order)
    );
    let _ = writeln!(
        out,
        "Total execution time: {:.4} seconds",
        result.elapsed.as_secs_f64()
    );
    let _ = writeln!(out, "{}", BANNER);

    out
}

fn render_section(out: &mut String, result: &AggregatedResult, entity: EntityType, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", RULE);
    for outcome in result.outcomes(entity) {
        let _ = writeln!(
            out,
            "Row {}: [{}] {}",
            outcome.input_id, outcome.status, outcome.message
        );
    }
}

/// 渲染 JSON 报表（机器可读）
pub fn render_json(result: &AggregatedResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OutcomeRecord;
    use chrono::Utc;
    use std::time::Duration;

    fn sample_result() -> AggregatedResult {
        AggregatedResult {
            batch_id: "batch".to_string(),
            started_at: Utc::now(),
            users: vec![
                OutcomeRecord::success(1, "User 'Alice' inserted successfully".to_string(), 1),
                OutcomeRecord::failed(2, "Row 2: Name is required".to_string()),
            ],
            products: Vec::new(),
            orders: Vec::new(),
            elapsed: Duration::from_millis(120),
        }
    }

    #[test]
    fn test_render_contains_rows_and_summary() {
        let text = render(&sample_result());
        assert!(text.contains("CONCURRENT INSERTION RESULTS"));
        assert!(text.contains("Row 1: [SUCCESS] User 'Alice' inserted successfully"));
        assert!(text.contains("Row 2: [FAILED] Row 2: Name is required"));
        assert!(text.contains("Users: 1/2 successful insertions"));
        assert!(text.contains("Products: 0/0 successful insertions"));
    }

    #[test]
    fn test_render_json_round_trips() {
        let json = render_json(&sample_result()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["users"][0]["input_id"], 1);
        assert_eq!(parsed["users"][1]["status"], "Failed");
    }
}
