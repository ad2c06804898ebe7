use reqwest::StatusCode;
use std::ops::RangeInclusive;

use super::checks::{envelope, expect_json, expect_not_found, require_fields, require_in_range, text, CaseResult, Verdict};
use crate::client::ApiClient;

pub const SUGGEST: &str = "Dynamic Pricing - Suggest";
pub const INVALID_PRODUCT: &str = "Dynamic Pricing - Invalid Product";

const SUGGESTION_FIELDS: &[&str] = &[
    "suggestedPrice",
    "confidence",
    "margin",
    "reasoning",
    "currentPrice",
    "productId",
    "productName",
];

/// Acceptable confidence for a suggestion on a seeded product
pub const CONFIDENCE_RANGE: RangeInclusive<f64> = 0.7..=1.0;

pub async fn suggest(client: &ApiClient) -> CaseResult {
    let response = client.get("/pricing/suggest", &[("productId", "p1")]).await?;
    let body = expect_json(&response, StatusCode::OK)?;

    let suggestion = envelope(&body, "suggestion")?;
    require_fields(suggestion, SUGGESTION_FIELDS, "suggestion")?;
    let confidence = require_in_range(&suggestion["confidence"], CONFIDENCE_RANGE, "confidence score")?;

    Ok(Verdict::new(format!(
        "Product: {}, Current: ₹{}, Suggested: ₹{}, Confidence: {:.2}%",
        text(&suggestion["productName"]),
        text(&suggestion["currentPrice"]),
        text(&suggestion["suggestedPrice"]),
        confidence * 100.0
    ))
    .with_data(suggestion.clone()))
}

/// Unknown product ids must be rejected with 404
pub async fn invalid_product(client: &ApiClient) -> CaseResult {
    let response = client
        .get("/pricing/suggest", &[("productId", "invalid")])
        .await?;
    expect_not_found(&response, "invalid product")
}
