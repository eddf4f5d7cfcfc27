// ==========================================
// 多库并发入库系统 - 主入口
// ==========================================
// 技术栈: Rust + Tokio + SQLite
// 用途: 以内置示例批次执行一次并发入库并输出操作员报表
// ==========================================

use anyhow::Context;
use concurrent_ingest::engine::{IngestBatches, IngestOrchestrator};
use concurrent_ingest::repository::{OrderRepository, ProductRepository, UserRepository};
use concurrent_ingest::{config::IngestConfig, logging, report};
use concurrent_ingest::{OrderRecord, ProductRecord, UserRecord};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", concurrent_ingest::APP_NAME);
    tracing::info!("系统版本: {}", concurrent_ingest::VERSION);
    tracing::info!("==================================================");

    // 解析三个存储目标路径
    let config = IngestConfig::from_env();
    tracing::info!("users 目标库: {}", config.users_db_path);
    tracing::info!("products 目标库: {}", config.products_db_path);
    tracing::info!("orders 目标库: {}", config.orders_db_path);

    // 每个存储目标一个持久化能力，显式注入编排器
    let user_repo =
        UserRepository::new(&config.users_db_path).context("初始化 users 目标库失败")?;
    let product_repo =
        ProductRepository::new(&config.products_db_path).context("初始化 products 目标库失败")?;
    let order_repo =
        OrderRepository::new(&config.orders_db_path).context("初始化 orders 目标库失败")?;

    let orchestrator = IngestOrchestrator::new(
        Arc::new(user_repo),
        Arc::new(product_repo),
        Arc::new(order_repo),
    );

    let result = orchestrator.run(sample_batches()).await;

    // 文本报表输出到标准输出
    println!("{}", report::render(&result));

    // 可选: JSON 报表写入指定路径
    if let Ok(path) = std::env::var("CONCURRENT_INGEST_REPORT_JSON") {
        let json = report::render_json(&result).context("JSON 报表渲染失败")?;
        std::fs::write(&path, json).with_context(|| format!("JSON 报表写入失败: {}", path))?;
        tracing::info!("JSON 报表已写入: {}", path);
    }

    Ok(())
}

/// 内置示例批次（含各类校验失败样本）
///
/// - users 第 10 行: 空用户名
/// - products 第 10 行: 负价格
/// - orders 第 8/9 行: 数量 0 / 负数
fn sample_batches() -> IngestBatches {
    let users = vec![
        user(1, "Alice", "alice@example.com"),
        user(2, "Bob", "bob@example.com"),
        user(3, "Charlie", "charlie@example.com"),
        user(4, "David", "david@example.com"),
        user(5, "Eve", "eve@example.com"),
        user(6, "Frank", "frank@example.com"),
        user(7, "Grace", "grace@example.com"),
        user(8, "Alice", "alice@example.com"),
        user(9, "Henry", "henry@example.com"),
        user(10, "", "jane@example.com"),
    ];

    let products = vec![
        product(1, "Laptop", "1000.00"),
        product(2, "Smartphone", "700.00"),
        product(3, "Headphones", "150.00"),
        product(4, "Monitor", "300.00"),
        product(5, "Keyboard", "50.00"),
        product(6, "Mouse", "30.00"),
        product(7, "Laptop", "1000.00"),
        product(8, "Smartwatch", "250.00"),
        product(9, "Gaming Chair", "500.00"),
        product(10, "Earbuds", "-50.00"),
    ];

    let orders = vec![
        order(1, 1, 1, "2"),
        order(2, 2, 2, "1"),
        order(3, 3, 3, "5"),
        order(4, 4, 4, "1"),
        order(5, 5, 5, "3"),
        order(6, 6, 6, "4"),
        order(7, 7, 7, "2"),
        order(8, 8, 8, "0"),
        order(9, 9, 1, "-1"),
        order(10, 10, 11, "2"),
    ];

    IngestBatches {
        users,
        products,
        orders,
    }
}

fn user(id: i64, name: &str, email: &str) -> UserRecord {
    UserRecord {
        id,
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn product(id: i64, name: &str, price: &str) -> ProductRecord {
    ProductRecord {
        id,
        name: name.to_string(),
        price: price.to_string(),
    }
}

fn order(id: i64, user_id: i64, product_id: i64, quantity: &str) -> OrderRecord {
    OrderRecord {
        id,
        user_id,
        product_id,
        quantity: quantity.to_string(),
    }
}
