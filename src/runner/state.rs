use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cases::CaseResult;

/// Recorded outcome of one attempted case. Never changes once logged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub details: String,
    pub timestamp: DateTime<Local>,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_data: Option<Value>,
}

impl TestResult {
    pub fn from_outcome(name: &str, outcome: CaseResult, duration_ms: u64) -> Self {
        let (passed, details, response_data) = match outcome {
            Ok(verdict) => (true, verdict.details, verdict.response_data),
            Err(failure) => (false, failure.to_string(), None),
        };
        Self {
            name: name.to_string(),
            passed,
            details,
            timestamp: Local::now(),
            duration_ms,
            response_data,
        }
    }
}

/// A dependent case that was never attempted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkippedCase {
    pub name: String,
    pub reason: String,
}

/// Ordered, append-only record of every attempted case
#[derive(Debug, Clone, Default)]
pub struct ResultsLog {
    results: Vec<TestResult>,
}

impl ResultsLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, result: TestResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    /// True when no recorded case failed
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn summary(&self) -> Summary {
        Summary::from_results(&self.results)
    }

    pub fn into_results(self) -> Vec<TestResult> {
        self.results
    }
}

/// Tally derived from a results log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    /// Percentage of passed cases, 0 when nothing ran
    pub success_rate: f64,
    pub failed_tests: Vec<String>,
    pub total_duration_ms: u64,
}

impl Summary {
    pub fn from_results(results: &[TestResult]) -> Self {
        let total = results.len() as u32;
        let passed = results.iter().filter(|r| r.passed).count() as u32;
        let failed_tests: Vec<String> = results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.name.clone())
            .collect();
        let success_rate = if total > 0 {
            passed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total,
            passed,
            failed: total - passed,
            success_rate,
            failed_tests,
            total_duration_ms: results.iter().map(|r| r.duration_ms).sum(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
