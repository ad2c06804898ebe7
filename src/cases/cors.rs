use reqwest::StatusCode;

use super::checks::{expect_status, CaseFailure, CaseResult, Verdict};
use crate::client::ApiClient;

pub const PREFLIGHT: &str = "CORS Headers - OPTIONS";

const CORS_HEADERS: &[&str] = &[
    "Access-Control-Allow-Origin",
    "Access-Control-Allow-Methods",
    "Access-Control-Allow-Headers",
];

/// Preflight-style OPTIONS must carry the three cross-origin permission headers
pub async fn preflight(client: &ApiClient) -> CaseResult {
    let response = client.options("/products").await?;
    expect_status(&response, StatusCode::OK)?;

    let missing: Vec<&str> = CORS_HEADERS
        .iter()
        .copied()
        .filter(|h| response.header(h).is_none())
        .collect();

    if !missing.is_empty() {
        return Err(CaseFailure::assertion(format!(
            "Missing CORS headers: {:?}",
            missing
        )));
    }

    Ok(Verdict::new("All required CORS headers present"))
}
