pub mod config;

pub use config::HarnessConfig;
