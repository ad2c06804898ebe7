use crate::runner::state::{SkippedCase, Summary, TestResult};
use serde::{Deserialize, Serialize};

/// Test results for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResults {
    pub session_id: String,
    /// API root the run was pointed at
    pub base_url: String,
    pub results: Vec<TestResult>,
    #[serde(default)]
    pub skipped: Vec<SkippedCase>,
    pub summary: Summary,
    pub generated_at: String,
}

impl TestResults {
    pub fn new(
        session_id: &str,
        base_url: &str,
        results: Vec<TestResult>,
        skipped: Vec<SkippedCase>,
    ) -> Self {
        let summary = Summary::from_results(&results);
        Self {
            session_id: session_id.to_string(),
            base_url: base_url.to_string(),
            results,
            skipped,
            summary,
            generated_at: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        }
    }
}
