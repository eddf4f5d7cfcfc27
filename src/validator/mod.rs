// ==========================================
// 多库并发入库系统 - 记录校验器
// ==========================================
// 职责: 每种实体一个纯校验函数
// 红线: 不做 I/O、不 panic，所有违规以数据返回
// 约束: 多条违规累积上报，不在首条短路
// ==========================================

use crate::domain::{OrderRecord, ProductRecord, UserRecord, ValidationOutcome};
use once_cell::sync::Lazy;
use regex::Regex;

/// 邮箱格式: ASCII local part + 点分域名 + 末级标签 ≥2 个字母
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("邮箱正则不合法")
});

/// 校验用户记录
///
/// 规则:
/// - name 去空白后非空
/// - email 去空白后非空，且匹配 local@domain.tld 格式
///   （格式匹配作用于原始值: 带空白的地址按格式错误处理，不做清洗）
///
/// name 与 email 两项检查总是都执行，违规一并上报
pub fn validate_user(record: &UserRecord) -> ValidationOutcome {
    let mut violations = Vec::new();

    if record.name.trim().is_empty() {
        violations.push(format!("Row {}: Name is required", record.id));
    }

    if record.email.trim().is_empty() {
        violations.push(format!("Row {}: Email is required", record.id));
    } else if !EMAIL_REGEX.is_match(&record.email) {
        violations.push(format!("Row {}: Invalid email format", record.id));
    }

    ValidationOutcome::from_violations(violations)
}

/// 校验商品记录
///
/// 规则:
/// - name 去空白后非空
/// - price 可解析为实数; 解析失败报格式错误，解析成功且为负报负值错误
///   （两者互斥: 无法解析的值不再做符号检查）
pub fn validate_product(record: &ProductRecord) -> ValidationOutcome {
    let mut violations = Vec::new();

    if record.name.trim().is_empty() {
        violations.push(format!("Row {}: Product name is required", record.id));
    }

    match record.price.trim().parse::<f64>() {
        Ok(price) => {
            if price < 0.0 {
                violations.push(format!("Row {}: Price cannot be negative", record.id));
            }
        }
        Err(_) => {
            violations.push(format!("Row {}: Invalid price format", record.id));
        }
    }

    ValidationOutcome::from_violations(violations)
}

/// 校验订单记录
///
/// 规则:
/// - user_id/product_id 必须存在（0 视为缺失；不做数值格式校验）
/// - quantity 可解析为整数; 解析失败报格式错误，解析成功且 <=0 报范围错误
pub fn validate_order(record: &OrderRecord) -> ValidationOutcome {
    let mut violations = Vec::new();

    if record.user_id == 0 {
        violations.push(format!("Row {}: User ID is required", record.id));
    }

    if record.product_id == 0 {
        violations.push(format!("Row {}: Product ID is required", record.id));
    }

    match record.quantity.trim().parse::<i64>() {
        Ok(quantity) => {
            if quantity <= 0 {
                violations.push(format!(
                    "Row {}: Quantity must be greater than 0",
                    record.id
                ));
            }
        }
        Err(_) => {
            violations.push(format!("Row {}: Invalid quantity format", record.id));
        }
    }

    ValidationOutcome::from_violations(violations)
}
