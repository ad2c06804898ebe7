use reqwest::StatusCode;
use serde_json::{json, Value};

use super::checks::{envelope, expect_json, require_fields, require_min_items, text, CaseFailure, CaseResult, Verdict};
use super::DEMO_SHOP_ID;
use crate::client::ApiClient;

pub const LIST: &str = "Orders - GET All";
pub const CREATE: &str = "Orders - POST Create";

const ORDER_FIELDS: &[&str] = &["id", "customerName", "items", "total", "status"];
const MIN_ORDERS: usize = 3;

fn new_order() -> Value {
    json!({
        "customerName": "Test Customer",
        "items": [
            {"productId": "p1", "quantity": 2, "price": 180},
            {"productId": "p3", "quantity": 1, "price": 60}
        ],
        "total": 420,
        "paymentMethod": "UPI",
        "shopId": DEMO_SHOP_ID
    })
}

pub async fn list(client: &ApiClient) -> CaseResult {
    let response = client.get("/orders", &[("shopId", DEMO_SHOP_ID)]).await?;
    let body = expect_json(&response, StatusCode::OK)?;

    let orders = require_min_items(envelope(&body, "orders")?, MIN_ORDERS, "orders")?;
    require_fields(&orders[0], ORDER_FIELDS, "order")?;

    Ok(Verdict::new(format!("Retrieved {} orders", orders.len())))
}

/// Place a two-line order and check the customer name is echoed back
pub async fn create(client: &ApiClient) -> CaseResult {
    let payload = new_order();
    let response = client.post("/orders", payload.clone()).await?;
    let body = expect_json(&response, StatusCode::OK)?;

    let order = envelope(&body, "order")?;
    if order.get("customerName") != payload.get("customerName") || order.get("id").is_none() {
        return Err(CaseFailure::assertion("Order creation response invalid"));
    }

    Ok(Verdict::new(format!(
        "Created order for: {} (ID: {})",
        text(&order["customerName"]),
        text(&order["id"])
    ))
    .with_data(order.clone()))
}
