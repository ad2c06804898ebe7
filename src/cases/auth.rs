use reqwest::StatusCode;

use super::checks::{expect_json, require_fields, text, truthy_key, CaseFailure, CaseResult, Verdict};
use crate::client::ApiClient;

pub const OWNER_LOGIN: &str = "Authentication - Owner Login";
pub const STAFF_LOGIN: &str = "Authentication - Staff Login";

const USER_FIELDS: &[&str] = &["id", "email", "name", "phone", "role", "shopId"];

/// Demo login as the shop owner: user and shop must both come back
pub async fn owner_login(client: &ApiClient) -> CaseResult {
    let response = client.get("/auth/demo-login", &[("role", "owner")]).await?;
    let body = expect_json(&response, StatusCode::OK)?;

    if !(truthy_key(&body, "success") && truthy_key(&body, "user") && truthy_key(&body, "shop")) {
        return Err(CaseFailure::assertion(
            "Missing success, user, or shop in response",
        ));
    }

    let user = &body["user"];
    require_fields(user, USER_FIELDS, "user")?;

    Ok(Verdict::new(format!(
        "User: {}, Shop: {}",
        text(&user["name"]),
        text(&body["shop"]["name"])
    ))
    .with_data(body))
}

/// Demo login as staff: the user must be tagged `STAFF`
pub async fn staff_login(client: &ApiClient) -> CaseResult {
    let response = client.get("/auth/demo-login", &[("role", "staff")]).await?;
    let body = expect_json(&response, StatusCode::OK)?;

    if !(truthy_key(&body, "success") && truthy_key(&body, "user")) {
        return Err(CaseFailure::assertion("Invalid response structure"));
    }

    let user = &body["user"];
    match user.get("role").and_then(|r| r.as_str()) {
        Some("STAFF") => Ok(Verdict::new(format!("Staff User: {}", text(&user["name"]))).with_data(body)),
        other => Err(CaseFailure::assertion(format!(
            "Expected STAFF role, got: {}",
            other.unwrap_or("none")
        ))),
    }
}
