pub mod context;
pub mod events;
pub mod executor;
pub mod state;

use anyhow::{Context, Result};

use crate::client::{ApiClient, HttpTransport};
use crate::report::types::TestResults;
use crate::utils::config::HarnessConfig;

pub use context::SuiteContext;
pub use events::*;
pub use executor::SuiteExecutor;
pub use state::*;

/// Outcome of one complete run
pub struct SuiteRun {
    /// True only when every recorded case passed
    pub success: bool,
    pub report: TestResults,
}

/// Run the whole catalogue against the configured backend
pub async fn run_suite(config: &HarnessConfig) -> Result<SuiteRun> {
    let transport = HttpTransport::new(
        &config.base_url,
        &config.api_prefix,
        config.request_timeout,
    )
    .context("Failed to build HTTP client")?;
    let client = ApiClient::new(Box::new(transport));

    log::info!("Running suite against {}", client.endpoint());

    let mut executor = SuiteExecutor::new(client, config.console);
    let success = executor.run_all_tests().await;
    let report = executor.into_report();

    if config.report {
        crate::report::write_reports(&report, &config.output_dir)?;
        if config.console {
            println!("Reports written to {}", config.output_dir.display());
        }
    }

    Ok(SuiteRun { success, report })
}
