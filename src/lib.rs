pub mod cases;
pub mod client;
pub mod report;
pub mod runner;
pub mod utils;

// Re-export common items
pub use report::generate_report;
pub use runner::{run_suite, SuiteRun};
pub use utils::config::HarnessConfig;
