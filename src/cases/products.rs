use reqwest::StatusCode;
use serde_json::{json, Value};

use super::checks::{envelope, expect_json, require_fields, require_min_items, text, truthy_key, CaseFailure, CaseResult, Verdict};
use super::DEMO_SHOP_ID;
use crate::client::ApiClient;

pub const LIST: &str = "Products - GET All";
pub const CREATE: &str = "Products - POST Create";
pub const UPDATE: &str = "Products - PUT Update";
pub const DELETE: &str = "Products - DELETE";

const PRODUCT_FIELDS: &[&str] = &["id", "name", "category", "price", "stock", "unit"];
const MIN_PRODUCTS: usize = 10;

fn new_product() -> Value {
    json!({
        "name": "Test Product",
        "category": "Test Category",
        "price": 100,
        "cost": 80,
        "stock": 50,
        "unit": "pieces",
        "barcode": "1234567890999",
        "shopId": DEMO_SHOP_ID
    })
}

fn product_update() -> Value {
    json!({
        "name": "Updated Test Product",
        "price": 120,
        "stock": 45
    })
}

pub async fn list(client: &ApiClient) -> CaseResult {
    let response = client.get("/products", &[("shopId", DEMO_SHOP_ID)]).await?;
    let body = expect_json(&response, StatusCode::OK)?;

    let products = require_min_items(envelope(&body, "products")?, MIN_PRODUCTS, "products")?;
    require_fields(&products[0], PRODUCT_FIELDS, "product")?;

    Ok(Verdict::new(format!("Retrieved {} products", products.len())))
}

/// Create the throwaway product; on success also yields its assigned id
pub async fn create(client: &ApiClient) -> Result<(Verdict, String), CaseFailure> {
    let payload = new_product();
    let response = client.post("/products", payload.clone()).await?;
    let body = expect_json(&response, StatusCode::OK)?;

    let product = envelope(&body, "product")?;
    let id = match product.get("id") {
        Some(id) if product.get("name") == payload.get("name") => text(id),
        _ => return Err(CaseFailure::assertion("Product creation response invalid")),
    };

    let verdict = Verdict::new(format!(
        "Created product: {} (ID: {})",
        text(&product["name"]),
        id
    ))
    .with_data(product.clone());
    Ok((verdict, id))
}

pub async fn update(client: &ApiClient, product_id: &str) -> CaseResult {
    let payload = product_update();
    let response = client
        .put(&format!("/products/{}", product_id), payload.clone())
        .await?;
    let body = expect_json(&response, StatusCode::OK)?;

    let product = envelope(&body, "product")?;
    if product.get("name") != payload.get("name") {
        return Err(CaseFailure::assertion("Product update not reflected"));
    }

    Ok(Verdict::new(format!("Updated product: {}", text(&product["name"]))).with_data(product.clone()))
}

pub async fn delete(client: &ApiClient, product_id: &str) -> CaseResult {
    let response = client.delete(&format!("/products/{}", product_id)).await?;
    let body = expect_json(&response, StatusCode::OK)?;

    if !truthy_key(&body, "success") {
        return Err(CaseFailure::assertion("Delete response success=false"));
    }

    Ok(Verdict::new(format!("Deleted product ID: {}", product_id)))
}
