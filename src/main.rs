use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use smartlocal_tester::report;
use smartlocal_tester::runner;
use smartlocal_tester::utils::config::{HarnessConfig, BASE_URL_ENV};

#[derive(Parser)]
#[command(name = "smartlocal-tester")]
#[command(version = "0.1.0")]
#[command(about = "API conformance smoke tests for the SmartLocal Suite backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full case catalogue against a backend
    Run {
        /// Backend root, e.g. http://localhost:3000
        #[arg(short, long, env = BASE_URL_ENV)]
        base_url: Option<String>,

        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for reports
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Generate reports (JSON, HTML, JUnit)
        #[arg(long, default_value = "false")]
        report: bool,
    },

    /// Generate report from test results
    Report {
        /// Path to test results JSON
        results: PathBuf,

        /// Output format (json, html, junit)
        #[arg(short, long, default_value = "html")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Exit status when the harness could not start a run at all
const SETUP_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            base_url,
            config,
            output,
            report,
        } => {
            let mut harness = match HarnessConfig::resolve(config.as_deref()) {
                Ok(harness) => harness,
                Err(e) => return setup_failure(e),
            };
            if let Some(url) = base_url {
                harness = harness.with_base_url(&url);
            }
            if let Some(dir) = output {
                harness.output_dir = dir;
            }
            harness.report |= report;

            match runner::run_suite(&harness).await {
                Ok(run) if run.success => ExitCode::SUCCESS,
                Ok(_) => ExitCode::FAILURE,
                Err(e) => setup_failure(e),
            }
        }

        Commands::Report {
            results,
            format,
            output,
        } => {
            println!(
                "{} Generating {} report from: {}",
                "📊".to_string().blue(),
                format.cyan(),
                results.display()
            );
            match report::generate_report(&results, &format, output.as_deref()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => setup_failure(e),
            }
        }
    }
}

fn setup_failure(error: anyhow::Error) -> ExitCode {
    eprintln!("{} {:#}", "Error:".red().bold(), error);
    ExitCode::from(SETUP_FAILURE)
}
