use super::types::TestResults;
use anyhow::Result;
use std::path::Path;

pub const FILE_NAME: &str = "test-results.json";

/// Generate JSON report
pub fn generate(results: &TestResults, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;

    if let Some(path) = output {
        std::fs::write(path, json)?;
        println!("JSON report saved to: {}", path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

/// Write `test-results.json` into the output directory
pub fn write_report(results: &TestResults, output_dir: &Path) -> Result<()> {
    let path = output_dir.join(FILE_NAME);
    std::fs::write(&path, serde_json::to_string_pretty(results)?)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Load a previously written results file
pub fn load(path: &Path) -> Result<TestResults> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
