use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use super::checks::{expect_status, CaseFailure, CaseResult, Verdict};
use crate::client::ApiClient;

pub const SVG_200: &str = "Placeholder Images - 200x200";

const SVG_MIME: &str = "image/svg+xml";
const SVG_MARKERS: &[&str] = &["<svg", "Product Image"];

/// The placeholder generator answers with an SVG, not JSON
pub async fn svg_200(client: &ApiClient) -> CaseResult {
    let response = client.get("/placeholder/200/200", &[]).await?;
    expect_status(&response, StatusCode::OK)?;

    let content_type = response.header(CONTENT_TYPE.as_str()).unwrap_or_default();
    if !content_type.contains(SVG_MIME) {
        return Err(CaseFailure::assertion(format!(
            "Expected SVG, got {}",
            content_type
        )));
    }

    if !SVG_MARKERS.iter().all(|m| response.body.contains(m)) {
        return Err(CaseFailure::assertion("Invalid SVG content"));
    }

    Ok(Verdict::new("SVG placeholder generated successfully"))
}
