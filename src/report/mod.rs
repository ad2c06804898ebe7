pub mod html;
pub mod json;
pub mod junit;
pub mod types;

use anyhow::{Context, Result};
use std::path::Path;

use types::TestResults;

/// Generate report from a saved results file
pub fn generate_report(results_path: &Path, format: &str, output: Option<&Path>) -> Result<()> {
    let test_results = json::load(results_path)
        .with_context(|| format!("Failed to load results: {}", results_path.display()))?;

    match format {
        "json" => json::generate(&test_results, output),
        "html" => html::generate(&test_results, output),
        "junit" => {
            let xml = junit::generate_junit_xml(&test_results)?;
            if let Some(path) = output {
                std::fs::write(path, xml)?;
                println!("JUnit report saved to: {}", path.display());
            } else {
                println!("{}", xml);
            }
            Ok(())
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}

/// Write the JSON, JUnit and HTML reports for one run, replacing any earlier ones
pub fn write_reports(results: &TestResults, output_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir: {}", output_dir.display()))?;

    json::write_report(results, output_dir)?;
    junit::write_report(results, output_dir)?;
    html::write_report(results, output_dir)?;
    Ok(())
}
