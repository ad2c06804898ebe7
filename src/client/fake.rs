//! Scripted in-memory transport for unit tests.
//!
//! Routes are keyed by the request's display form (`GET /path?k=v`), with a
//! fallback on method + path. Unrouted requests get the backend's generic
//! 404 body.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{ApiRequest, ApiResponse, Transport, TransportError};

#[derive(Debug, Clone)]
pub enum FakeReply {
    Json(u16, Value),
    Raw {
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
    },
    Timeout,
    Refused,
}

#[derive(Default)]
pub struct ScriptedTransport {
    routes: HashMap<String, FakeReply>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport answering every catalogue request like the seeded demo backend
    pub fn demo() -> Self {
        let mut t = Self::new();
        t.route("GET /auth/demo-login?role=owner", FakeReply::Json(200, json!({
            "success": true, "user": demo_user("OWNER"), "shop": demo_shop()
        })));
        t.route("GET /auth/demo-login?role=staff", FakeReply::Json(200, json!({
            "success": true, "user": demo_user("STAFF"), "shop": demo_shop()
        })));
        t.route("GET /shop/demo", FakeReply::Json(200, json!({
            "success": true, "shop": demo_shop(), "products": demo_products(10), "orders": demo_orders()
        })));
        t.route("GET /products", FakeReply::Json(200, json!({
            "success": true, "products": demo_products(10)
        })));
        t.route("POST /products", FakeReply::Json(200, json!({
            "success": true, "product": {"id": "new-product-1", "name": "Test Product", "price": 100}
        })));
        t.route("PUT /products/new-product-1", FakeReply::Json(200, json!({
            "success": true, "product": {"id": "new-product-1", "name": "Updated Test Product", "price": 120}
        })));
        t.route("DELETE /products/new-product-1", FakeReply::Json(200, json!({"success": true})));
        t.route("GET /orders", FakeReply::Json(200, json!({
            "success": true, "orders": demo_orders()
        })));
        t.route("POST /orders", FakeReply::Json(200, json!({
            "success": true, "order": {"id": "order-1", "customerName": "Test Customer", "total": 420}
        })));
        t.route("GET /analytics/dashboard", FakeReply::Json(200, json!({
            "success": true,
            "analytics": {
                "totalSales": 15600, "ordersToday": 20, "lowStockCount": 3, "revenue": 2300,
                "salesTrend": [{"date": "2024-01-01", "sales": 1200, "orders": 8}],
                "topProducts": demo_products(5),
                "categoryBreakdown": [{"category": "Grains", "sales": 45, "value": 4200}]
            }
        })));
        t.route("GET /pricing/suggest?productId=p1", FakeReply::Json(200, pricing(json!(0.85))));
        t.route("GET /pricing/suggest?productId=invalid", FakeReply::Json(404, json!({
            "success": false, "error": "Product not found"
        })));
        t.route("GET /voice/parse", FakeReply::Json(200, json!({
            "success": true,
            "parsed": {"action": "ADD_PRODUCT", "data": {"quantity": 5, "unit": "kg", "name": "rice", "price": 70}},
            "transcript": "add 5 kg rice at 70 rupees"
        })));
        for festival in ["diwali", "ramzan", "holi"] {
            t.route(&format!("GET /bundles/festival?festival={}", festival), FakeReply::Json(200, json!({
                "success": true,
                "bundle": {
                    "name": format!("{} Special", festival),
                    "products": demo_products(3),
                    "discount": 15, "totalPrice": 300, "discountedPrice": 255
                }
            })));
        }
        t.route("GET /bundles/festival?festival=invalid", FakeReply::Json(404, json!({
            "success": false, "error": "Festival not found"
        })));
        t.route("GET /cash-session", FakeReply::Json(200, json!({
            "success": true,
            "session": {
                "id": "cs-1", "date": "2024-01-07", "openingCash": 2000, "sales": 5400,
                "expectedCash": 7400, "actualCash": 7350, "difference": -50,
                "denominations": {"500": 10, "100": 20}
            }
        })));
        t.route("GET /placeholder/200/200", FakeReply::Raw {
            status: 200,
            headers: vec![("content-type".into(), "image/svg+xml".into())],
            body: r#"<svg width="200" height="200"><text>Product Image</text></svg>"#.into(),
        });
        t.route("OPTIONS /products", FakeReply::Raw {
            status: 200,
            headers: vec![
                ("access-control-allow-origin".into(), "*".into()),
                ("access-control-allow-methods".into(), "GET, POST, PUT, DELETE, OPTIONS".into()),
                ("access-control-allow-headers".into(), "Content-Type, Authorization".into()),
            ],
            body: "{}".into(),
        });
        t
    }

    pub fn route(&mut self, key: &str, reply: FakeReply) -> &mut Self {
        self.routes.insert(key.to_string(), reply);
        self
    }

    pub fn with(mut self, key: &str, reply: FakeReply) -> Self {
        self.route(key, reply);
        self
    }

    /// Requests seen so far, in order
    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }

    fn reply_for(&self, request: &ApiRequest) -> FakeReply {
        let bare = format!("{} {}", request.method, request.path);
        self.routes
            .get(&request.display())
            .or_else(|| self.routes.get(&bare))
            .cloned()
            .unwrap_or_else(|| {
                FakeReply::Json(404, json!({
                    "success": false, "error": "Endpoint not found", "path": request.path
                }))
            })
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let reply = self.reply_for(&request);
        self.sent.lock().unwrap().push(request);

        match reply {
            FakeReply::Json(status, body) => Ok(response(
                status,
                vec![("content-type".into(), "application/json".into())],
                body.to_string(),
            )),
            FakeReply::Raw { status, headers, body } => Ok(response(status, headers, body)),
            FakeReply::Timeout => Err(TransportError::Timeout("operation timed out".into())),
            FakeReply::Refused => Err(TransportError::Connect("connection refused".into())),
        }
    }

    fn endpoint(&self) -> String {
        "scripted://api".to_string()
    }
}

/// Shared handle, so a test can inspect `sent()` after boxing the transport
#[async_trait]
impl Transport for Arc<ScriptedTransport> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).send(request).await
    }

    fn endpoint(&self) -> String {
        (**self).endpoint()
    }
}

fn response(status: u16, headers: Vec<(String, String)>, body: String) -> ApiResponse {
    let mut map = HeaderMap::new();
    for (k, v) in headers {
        map.insert(
            HeaderName::from_bytes(k.as_bytes()).unwrap(),
            HeaderValue::from_str(&v).unwrap(),
        );
    }
    ApiResponse {
        status: StatusCode::from_u16(status).unwrap(),
        headers: map,
        body,
    }
}

pub fn demo_shop() -> Value {
    json!({
        "id": "demo-shop-123", "name": "Shree Ganesh Kirana", "owner": "Ramesh Kumar",
        "phone": "+919876543210", "address": "Shop No. 15, Gandhi Nagar, Mumbai - 400001"
    })
}

pub fn demo_user(role: &str) -> Value {
    json!({
        "id": format!("user-{}", role.to_lowercase()), "email": "demo@smartlocal.in",
        "name": "Ramesh Kumar", "phone": "+919876543210", "role": role, "shopId": "demo-shop-123"
    })
}

pub fn demo_products(count: usize) -> Value {
    let products: Vec<Value> = (1..=count)
        .map(|i| json!({
            "id": format!("p{}", i), "name": format!("Product {}", i), "category": "Grocery",
            "price": 50 + i * 10, "stock": 20, "unit": "kg"
        }))
        .collect();
    Value::Array(products)
}

pub fn demo_orders() -> Value {
    json!([
        {"id": "o1", "customerName": "Priya Mehta", "items": [], "total": 420, "status": "completed"},
        {"id": "o2", "customerName": "Amit Singh", "items": [], "total": 130, "status": "pending"},
        {"id": "o3", "customerName": "Sunita Devi", "items": [], "total": 420, "status": "completed"}
    ])
}

pub fn pricing(confidence: Value) -> Value {
    json!({
        "success": true,
        "suggestion": {
            "suggestedPrice": 189, "confidence": confidence, "margin": 20.6,
            "reasoning": "High demand", "currentPrice": 180, "productId": "p1",
            "productName": "Basmati Rice 1kg"
        }
    })
}
