use reqwest::StatusCode;

use super::checks::{envelope, expect_json, is_non_empty_array, require_fields, text, CaseFailure, CaseResult, Verdict};
use super::DEMO_SHOP_ID;
use crate::client::ApiClient;

pub const DASHBOARD: &str = "Analytics - Dashboard";

const ANALYTICS_FIELDS: &[&str] = &[
    "totalSales",
    "ordersToday",
    "lowStockCount",
    "revenue",
    "salesTrend",
    "topProducts",
    "categoryBreakdown",
];

/// Derived series that must each hold at least one entry
const SERIES: &[&str] = &["salesTrend", "topProducts", "categoryBreakdown"];

pub async fn dashboard(client: &ApiClient) -> CaseResult {
    let response = client
        .get("/analytics/dashboard", &[("shopId", DEMO_SHOP_ID)])
        .await?;
    let body = expect_json(&response, StatusCode::OK)?;

    let analytics = envelope(&body, "analytics")?;
    require_fields(analytics, ANALYTICS_FIELDS, "analytics")?;

    if !SERIES.iter().all(|key| is_non_empty_array(&analytics[*key])) {
        return Err(CaseFailure::assertion("Analytics data structure invalid"));
    }

    Ok(Verdict::new(format!(
        "Total Sales: ₹{}, Orders Today: {}",
        text(&analytics["totalSales"]),
        text(&analytics["ordersToday"])
    )))
}
