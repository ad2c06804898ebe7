use reqwest::StatusCode;

use super::checks::{expect_json, text, truthy_key, CaseFailure, CaseResult, Verdict};
use crate::client::ApiClient;

pub const NOT_FOUND: &str = "Error Handling - 404";

/// Unknown paths must yield a structured 404 body
pub async fn unknown_endpoint(client: &ApiClient) -> CaseResult {
    let response = client.get("/invalid/endpoint", &[]).await?;
    let body = expect_json(&response, StatusCode::NOT_FOUND)?;

    match body.get("error") {
        Some(error) if !truthy_key(&body, "success") => {
            Ok(Verdict::new(format!("Proper 404 response: {}", text(error))).with_data(body.clone()))
        }
        _ => Err(CaseFailure::assertion("Invalid error response structure")),
    }
}
