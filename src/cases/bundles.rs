use reqwest::StatusCode;

use super::checks::{envelope, expect_json, expect_not_found, is_non_empty_array, require_fields, text, CaseFailure, CaseResult, Verdict};
use crate::client::ApiClient;

pub const INVALID_FESTIVAL: &str = "Festival Bundles - Invalid Festival";

/// Festivals the demo backend ships bundles for
pub const FESTIVALS: &[&str] = &["diwali", "ramzan", "holi"];

const BUNDLE_FIELDS: &[&str] = &["name", "products", "discount", "totalPrice", "discountedPrice"];

/// Recorded name for one festival lookup, e.g. `Festival Bundles - Diwali`
pub fn case_name(festival: &str) -> String {
    format!("Festival Bundles - {}", title_case(festival))
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub async fn festival(client: &ApiClient, festival: &str) -> CaseResult {
    let response = client
        .get("/bundles/festival", &[("festival", festival)])
        .await?;
    let body = expect_json(&response, StatusCode::OK)?;

    let bundle = envelope(&body, "bundle")?;
    require_fields(bundle, BUNDLE_FIELDS, "bundle")?;

    let products = &bundle["products"];
    if !is_non_empty_array(products) {
        return Err(CaseFailure::assertion("No products in bundle"));
    }

    Ok(Verdict::new(format!(
        "Bundle: {}, Products: {}, Discount: {}%",
        text(&bundle["name"]),
        products.as_array().map_or(0, Vec::len),
        text(&bundle["discount"])
    ))
    .with_data(bundle.clone()))
}

pub async fn invalid_festival(client: &ApiClient) -> CaseResult {
    let response = client
        .get("/bundles/festival", &[("festival", "invalid")])
        .await?;
    expect_not_found(&response, "invalid festival")
}
