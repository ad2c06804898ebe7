//! Mock SmartLocal backend shared by the integration suites.

#![allow(dead_code)]

use axum::extract::{Path, Query};
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::set_header::SetResponseHeaderLayer;

/// Results recorded by a run against a conforming backend
pub const FULL_RUN: usize = 21;

type Params = Query<HashMap<String, String>>;

fn shop() -> Value {
    json!({
        "id": "demo-shop-123", "name": "Shree Ganesh Kirana", "owner": "Ramesh Kumar",
        "phone": "+919876543210", "address": "Shop No. 15, Gandhi Nagar, Mumbai - 400001"
    })
}

fn catalogue(count: usize) -> Value {
    let items: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "id": format!("p{}", i), "name": format!("Product {}", i), "category": "Grains",
                "price": 40 + i * 5, "cost": 30 + i * 4, "stock": 25, "unit": "kg"
            })
        })
        .collect();
    Value::Array(items)
}

fn orders() -> Value {
    json!([
        {"id": "o1", "customerName": "Priya Mehta", "items": [{"productId": "p1", "quantity": 2}], "total": 420, "status": "completed"},
        {"id": "o2", "customerName": "Amit Singh", "items": [{"productId": "p2", "quantity": 1}], "total": 130, "status": "pending"},
        {"id": "o3", "customerName": "Sunita Devi", "items": [{"productId": "p3", "quantity": 4}], "total": 260, "status": "completed"}
    ])
}

fn not_found(error: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"success": false, "error": error})))
}

async fn demo_login(Query(params): Params) -> Json<Value> {
    let role = params.get("role").map(|r| r.to_uppercase()).unwrap_or_else(|| "OWNER".into());
    Json(json!({
        "success": true,
        "user": {
            "id": "user-1", "email": "demo@smartlocal.in", "name": "Ramesh Kumar",
            "phone": "+919876543210", "role": role, "shopId": "demo-shop-123"
        },
        "shop": shop()
    }))
}

async fn demo_shop() -> Json<Value> {
    Json(json!({"success": true, "shop": shop(), "products": catalogue(12), "orders": orders()}))
}

async fn list_products() -> Json<Value> {
    Json(json!({"success": true, "products": catalogue(12)}))
}

async fn create_product(Json(body): Json<Value>) -> Json<Value> {
    let mut product = body;
    product["id"] = json!("prod-1001");
    Json(json!({"success": true, "product": product}))
}

async fn update_product(Path(id): Path<String>, Json(body): Json<Value>) -> Json<Value> {
    let mut product = body;
    product["id"] = json!(id);
    Json(json!({"success": true, "product": product}))
}

async fn delete_product(Path(_id): Path<String>) -> Json<Value> {
    Json(json!({"success": true}))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn list_orders() -> Json<Value> {
    Json(json!({"success": true, "orders": orders()}))
}

async fn create_order(Json(body): Json<Value>) -> Json<Value> {
    let mut order = body;
    order["id"] = json!("order-2001");
    order["status"] = json!("completed");
    Json(json!({"success": true, "order": order}))
}

async fn dashboard() -> Json<Value> {
    Json(json!({
        "success": true,
        "analytics": {
            "totalSales": 15600, "ordersToday": 18, "lowStockCount": 2, "revenue": 2300,
            "salesTrend": [{"date": "2024-01-07", "sales": 2300, "orders": 18}],
            "topProducts": catalogue(3),
            "categoryBreakdown": [{"category": "Grains", "value": 4200}]
        }
    }))
}

async fn suggest(Query(params): Params) -> impl IntoResponse {
    match params.get("productId").map(String::as_str) {
        Some("p1") => (StatusCode::OK, Json(json!({
            "success": true,
            "suggestion": {
                "suggestedPrice": 189, "confidence": 0.85, "margin": 20.6,
                "reasoning": "Festival demand", "currentPrice": 180,
                "productId": "p1", "productName": "Basmati Rice 1kg"
            }
        }))),
        _ => not_found("Product not found"),
    }
}

async fn parse_voice(Query(params): Params) -> Json<Value> {
    let transcript = params.get("text").cloned().unwrap_or_default();
    Json(json!({
        "success": true,
        "parsed": {
            "action": "ADD_PRODUCT",
            "data": {"quantity": 5, "unit": "kg", "name": "rice", "price": 70}
        },
        "transcript": transcript
    }))
}

async fn festival_bundle(Query(params): Params) -> impl IntoResponse {
    match params.get("festival").map(String::as_str) {
        Some(name @ ("diwali" | "ramzan" | "holi")) => (StatusCode::OK, Json(json!({
            "success": true,
            "bundle": {
                "name": format!("{} Special", name), "products": catalogue(4),
                "discount": 15, "totalPrice": 400, "discountedPrice": 340
            }
        }))),
        _ => not_found("Festival not found"),
    }
}

fn cash_session_body() -> Value {
    json!({
        "success": true,
        "session": {
            "id": "cs-2024-01-07", "date": "2024-01-07", "openingCash": 2000, "sales": 5400,
            "expectedCash": 7400, "actualCash": 7350, "difference": -50,
            "denominations": {"500": 10, "200": 5, "100": 13, "50": 1}
        }
    })
}

async fn placeholder(Path((w, h)): Path<(u32, u32)>) -> impl IntoResponse {
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}"><rect width="100%" height="100%" fill="#eee"/><text x="50%" y="50%">Product Image</text></svg>"##
    );
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg)
}

async fn fallback() -> (StatusCode, Json<Value>) {
    not_found("Endpoint not found")
}

/// Mock backend; the cash-session endpoint waits `cash_delay` before answering
pub fn backend(cash_delay: Duration) -> Router {
    let api = Router::new()
        .route("/auth/demo-login", get(demo_login))
        .route("/shop/demo", get(demo_shop))
        .route(
            "/products",
            get(list_products).post(create_product).options(preflight),
        )
        .route("/products/:id", put(update_product).delete(delete_product))
        .route("/orders", get(list_orders).post(create_order))
        .route("/analytics/dashboard", get(dashboard))
        .route("/pricing/suggest", get(suggest))
        .route("/voice/parse", get(parse_voice))
        .route("/bundles/festival", get(festival_bundle))
        .route(
            "/cash-session",
            get(move || async move {
                tokio::time::sleep(cash_delay).await;
                Json(cash_session_body())
            }),
        )
        .route("/placeholder/:w/:h", get(placeholder));

    Router::new()
        .nest("/api", api)
        .fallback(fallback)
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-origin"),
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-methods"),
            HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-headers"),
            HeaderValue::from_static("Content-Type, Authorization"),
        ))
}

pub async fn spawn_backend(cash_delay: Duration) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, backend(cash_delay)).await.unwrap();
    });
    addr
}

/// An address nothing is listening on
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}
