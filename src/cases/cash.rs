use reqwest::StatusCode;

use super::checks::{envelope, expect_json, non_empty_object, require_fields, text, CaseFailure, CaseResult, Verdict};
use crate::client::ApiClient;

pub const SESSION: &str = "Cash Session - Get Session";

const SESSION_FIELDS: &[&str] = &[
    "id",
    "date",
    "openingCash",
    "sales",
    "expectedCash",
    "actualCash",
    "difference",
    "denominations",
];

/// Today's cash-drawer snapshot with its reconciliation fields
pub async fn session(client: &ApiClient) -> CaseResult {
    let response = client.get("/cash-session", &[]).await?;
    let body = expect_json(&response, StatusCode::OK)?;

    let session = envelope(&body, "session")?;
    require_fields(session, SESSION_FIELDS, "session")?;

    if non_empty_object(&session["denominations"]).is_none() {
        return Err(CaseFailure::assertion("Invalid denominations structure"));
    }

    Ok(Verdict::new(format!(
        "Session ID: {}, Sales: ₹{}, Difference: ₹{}",
        text(&session["id"]),
        text(&session["sales"]),
        text(&session["difference"])
    ))
    .with_data(session.clone()))
}
