use reqwest::StatusCode;

use super::checks::{envelope, expect_json, require_fields, text, CaseFailure, CaseResult, Verdict};
use crate::client::ApiClient;

pub const ADD_PRODUCT: &str = "Voice Parsing - Add Product";

pub const COMMAND: &str = "add 5 kg rice at 70 rupees";
const EXPECTED_ACTION: &str = "ADD_PRODUCT";
const EXTRACTED_FIELDS: &[&str] = &["quantity", "unit", "name", "price"];

/// Send a spoken-style command and check the parsed intent and slots
pub async fn add_product(client: &ApiClient) -> CaseResult {
    let response = client.get("/voice/parse", &[("text", COMMAND)]).await?;
    let body = expect_json(&response, StatusCode::OK)?;

    let parsed = envelope(&body, "parsed")?;
    let action = parsed.get("action").and_then(|a| a.as_str());
    let transcript = body.get("transcript").and_then(|t| t.as_str());

    if action != Some(EXPECTED_ACTION) || parsed.get("data").is_none() || transcript != Some(COMMAND) {
        return Err(CaseFailure::assertion(format!(
            "Invalid parsing result: {}",
            parsed
        )));
    }

    let data = &parsed["data"];
    require_fields(data, EXTRACTED_FIELDS, "parsed")?;

    Ok(Verdict::new(format!(
        "Parsed: {} {} {} at ₹{}",
        text(&data["quantity"]),
        text(&data["unit"]),
        text(&data["name"]),
        text(&data["price"])
    ))
    .with_data(parsed.clone()))
}
