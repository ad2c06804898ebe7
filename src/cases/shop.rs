use reqwest::StatusCode;

use super::checks::{array_len, expect_json, require_fields, text, truthy_key, CaseFailure, CaseResult, Verdict};
use crate::client::ApiClient;

pub const DEMO_SHOP: &str = "Shop Data - Demo Shop";

const SHOP_FIELDS: &[&str] = &["id", "name", "owner", "phone", "address"];
const MIN_PRODUCTS: usize = 10;
const MIN_ORDERS: usize = 3;

/// Demo shop snapshot: complete shop record plus enough seeded products and orders
pub async fn demo_shop(client: &ApiClient) -> CaseResult {
    let response = client.get("/shop/demo", &[]).await?;
    let body = expect_json(&response, StatusCode::OK)?;

    if !truthy_key(&body, "success") {
        return Err(CaseFailure::assertion("Response success=false"));
    }

    let shop = body.get("shop").cloned().unwrap_or_default();
    require_fields(&shop, SHOP_FIELDS, "shop")?;

    let products = array_len(body.get("products"));
    let orders = array_len(body.get("orders"));
    if products < MIN_PRODUCTS || orders < MIN_ORDERS {
        return Err(CaseFailure::assertion(format!(
            "Insufficient demo data - Products: {}, Orders: {}",
            products, orders
        )));
    }

    Ok(Verdict::new(format!(
        "Shop: {}, Products: {}, Orders: {}",
        text(&shop["name"]),
        products,
        orders
    ))
    .with_data(body))
}
