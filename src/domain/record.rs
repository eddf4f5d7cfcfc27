// ==========================================
// 多库并发入库系统 - 输入记录模型
// ==========================================
// 对齐: 源系统三张表 users/products/orders
// 约束: 记录自批次读入后不可变
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// EntityType - 实体类型标签
// ==========================================
// 用途: 路由到对应存储目标 + 汇总分桶
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    User,
    Product,
    Order,
}

impl EntityType {
    /// 存储目标名称（与目标库表名一致）
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::User => "users",
            EntityType::Product => "products",
            EntityType::Order => "orders",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// UserRecord - 用户记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,       // 调用方行号（仅用于报表，不保证唯一）
    pub name: String,  // 用户名
    pub email: String, // 邮箱
}

// ==========================================
// ProductRecord - 商品记录
// ==========================================
// 注意: price 保留原始文本，格式错误由校验层判定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: i64,       // 调用方行号
    pub name: String,  // 商品名
    pub price: String, // 价格（原始文本）
}

// ==========================================
// OrderRecord - 订单记录
// ==========================================
// 注意: quantity 保留原始文本; user_id/product_id 为 0 视为缺失
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: i64,          // 调用方行号
    pub user_id: i64,     // 关联用户（跨库引用，不做格式校验）
    pub product_id: i64,  // 关联商品（跨库引用，不做格式校验）
    pub quantity: String, // 数量（原始文本）
}

// ==========================================
// InputRecord - 输入记录联合类型
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum InputRecord {
    User(UserRecord),
    Product(ProductRecord),
    Order(OrderRecord),
}

impl InputRecord {
    /// 实体类型标签
    pub fn entity_type(&self) -> EntityType {
        match self {
            InputRecord::User(_) => EntityType::User,
            InputRecord::Product(_) => EntityType::Product,
            InputRecord::Order(_) => EntityType::Order,
        }
    }

    /// 调用方行号
    pub fn input_id(&self) -> i64 {
        match self {
            InputRecord::User(r) => r.id,
            InputRecord::Product(r) => r.id,
            InputRecord::Order(r) => r.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_as_str() {
        assert_eq!(EntityType::User.as_str(), "users");
        assert_eq!(EntityType::Product.as_str(), "products");
        assert_eq!(EntityType::Order.as_str(), "orders");
    }

    #[test]
    fn test_input_record_routing() {
        let record = InputRecord::Order(OrderRecord {
            id: 7,
            user_id: 1,
            product_id: 2,
            quantity: "3".to_string(),
        });
        assert_eq!(record.entity_type(), EntityType::Order);
        assert_eq!(record.input_id(), 7);
    }
}
