use super::types::TestResults;
use crate::runner::state::{SkippedCase, TestResult};
use anyhow::Result;
use std::path::Path;

pub const FILE_NAME: &str = "report.html";

/// Generate HTML report
pub fn generate(results: &TestResults, output: Option<&Path>) -> Result<()> {
    let html = generate_html(results);

    if let Some(path) = output {
        std::fs::write(path, html)?;
        println!("HTML report saved to: {}", path.display());
    } else {
        println!("{}", html);
    }

    Ok(())
}

/// Write `report.html` into the output directory
pub fn write_report(results: &TestResults, output_dir: &Path) -> Result<()> {
    let path = output_dir.join(FILE_NAME);
    std::fs::write(&path, generate_html(results))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

fn case_row(result: &TestResult) -> String {
    let (icon, class) = if result.passed {
        ("✓", "passed")
    } else {
        ("✗", "failed")
    };

    let data_html = match &result.response_data {
        Some(data) => format!(
            r#"<details class="data"><summary>Response data</summary><pre>{}</pre></details>"#,
            html_escape(&serde_json::to_string_pretty(data).unwrap_or_default())
        ),
        None => String::new(),
    };

    format!(
        r#"
            <div class="case {class}">
                <div class="case-icon">{icon}</div>
                <div class="case-content">
                    <div class="case-name">{}</div>
                    <div class="case-details">{}</div>
                    {data_html}
                </div>
                <span class="duration">{}</span>
            </div>"#,
        html_escape(&result.name),
        html_escape(&result.details),
        format_duration(result.duration_ms),
    )
}

fn skipped_row(case: &SkippedCase) -> String {
    format!(
        r#"
            <div class="case skipped">
                <div class="case-icon">○</div>
                <div class="case-content">
                    <div class="case-name">{}</div>
                    <div class="case-details">{}</div>
                </div>
            </div>"#,
        html_escape(&case.name),
        html_escape(&case.reason),
    )
}

fn generate_html(results: &TestResults) -> String {
    let summary = &results.summary;
    let pass_rate = summary.success_rate.round() as u32;

    let mut cases_html: String = results.results.iter().map(case_row).collect();
    cases_html.extend(results.skipped.iter().map(skipped_row));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>SmartLocal API Report - {session}</title>
    <style>
        :root {{
            --bg-primary: #0a0f1d;
            --bg-secondary: #141b2d;
            --border: #374151;
            --text-primary: #f9fafb;
            --text-secondary: #9ca3af;
            --green: #10b981;
            --red: #ef4444;
            --yellow: #f59e0b;
            --purple: #8b5cf6;
        }}
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: system-ui, -apple-system, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.5;
            padding: 3rem 1rem;
        }}
        .container {{ max-width: 1100px; margin: 0 auto; }}
        header {{ margin-bottom: 2rem; }}
        .eyebrow {{
            font-size: 0.875rem;
            font-weight: 600;
            color: var(--purple);
            text-transform: uppercase;
            letter-spacing: 0.1em;
        }}
        h1 {{ font-size: 2.25rem; font-weight: 800; }}
        .endpoint {{ color: var(--text-secondary); font-family: monospace; }}
        .summary {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
            gap: 1.5rem;
            margin-bottom: 2rem;
        }}
        .stat {{
            background: var(--bg-secondary);
            border: 1px solid var(--border);
            padding: 1.5rem;
            border-radius: 1rem;
        }}
        .stat-value {{ font-size: 2.5rem; font-weight: 800; }}
        .stat-label {{
            color: var(--text-secondary);
            font-size: 0.875rem;
            text-transform: uppercase;
        }}
        .stat.passed .stat-value {{ color: var(--green); }}
        .stat.failed .stat-value {{ color: var(--red); }}
        .stat.skipped .stat-value {{ color: var(--yellow); }}
        .progress-bar {{
            height: 0.75rem;
            background: var(--bg-secondary);
            border-radius: 9999px;
            overflow: hidden;
            margin-bottom: 3rem;
        }}
        .progress-fill {{ height: 100%; background: var(--green); }}
        .case {{
            display: flex;
            gap: 1rem;
            align-items: flex-start;
            padding: 1rem;
            border-radius: 0.75rem;
            background: var(--bg-secondary);
            margin-bottom: 0.5rem;
        }}
        .case-icon {{ width: 2rem; font-size: 1.25rem; text-align: center; }}
        .case.passed .case-icon {{ color: var(--green); }}
        .case.failed .case-icon {{ color: var(--red); }}
        .case.skipped .case-icon {{ color: var(--yellow); }}
        .case-content {{ flex: 1; }}
        .case-name {{ font-family: monospace; font-weight: 500; }}
        .case-details {{ color: var(--text-secondary); font-size: 0.875rem; }}
        .case.failed .case-details {{ color: #fca5a5; }}
        .duration {{ color: var(--text-secondary); font-size: 0.75rem; }}
        .data summary {{ cursor: pointer; font-size: 0.75rem; color: var(--purple); }}
        .data pre {{ font-size: 0.75rem; overflow-x: auto; }}
        .meta {{
            margin-top: 3rem;
            color: var(--text-secondary);
            font-size: 0.875rem;
            display: flex;
            justify-content: center;
            gap: 2rem;
        }}
    </style>
</head>
<body>
    <div class="container">
        <header>
            <div class="eyebrow">API Conformance</div>
            <h1>SmartLocal Backend Report</h1>
            <div class="endpoint">{endpoint}</div>
        </header>

        <div class="summary">
            <div class="stat">
                <div class="stat-value">{total}</div>
                <div class="stat-label">Total</div>
            </div>
            <div class="stat passed">
                <div class="stat-value">{passed}</div>
                <div class="stat-label">Passed</div>
            </div>
            <div class="stat failed">
                <div class="stat-value">{failed}</div>
                <div class="stat-label">Failed</div>
            </div>
            <div class="stat skipped">
                <div class="stat-value">{skipped}</div>
                <div class="stat-label">Skipped</div>
            </div>
        </div>

        <div class="progress-bar">
            <div class="progress-fill" style="width: {pass_rate}%"></div>
        </div>

        {cases_html}

        <div class="meta">
            <span>Session: {session}</span>
            <span>Success rate: {success_rate:.1}%</span>
            <span>Duration: {duration}</span>
            <span>Generated: {generated}</span>
        </div>
    </div>
</body>
</html>"#,
        session = html_escape(&results.session_id),
        endpoint = html_escape(&results.base_url),
        total = summary.total,
        passed = summary.passed,
        failed = summary.failed,
        skipped = results.skipped.len(),
        success_rate = summary.success_rate,
        duration = format_duration(summary.total_duration_ms),
        generated = html_escape(&results.generated_at),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        let minutes = ms / 60000;
        let seconds = (ms % 60000) as f64 / 1000.0;
        format!("{}m {:.0}s", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::{CaseFailure, Verdict};
    use serde_json::json;

    #[test]
    fn test_html_lists_every_case() {
        let results = TestResults::new(
            "session-1",
            "http://localhost:3000/api",
            vec![
                TestResult::from_outcome(
                    "Shop Data - Demo Shop",
                    Ok(Verdict::new("Shop: Sharma Kirana Store").with_data(json!({"id": "demo-shop-123"}))),
                    8,
                ),
                TestResult::from_outcome(
                    "Error Handling - 404",
                    Err(CaseFailure::assertion("Expected 404, got 200")),
                    3,
                ),
            ],
            vec![SkippedCase {
                name: "Products - DELETE".to_string(),
                reason: "no product id from create".to_string(),
            }],
        );

        let html = generate_html(&results);
        assert!(html.contains("Shop Data - Demo Shop"));
        assert!(html.contains("Expected 404, got 200"));
        assert!(html.contains("Products - DELETE"));
        assert!(html.contains("&quot;demo-shop-123&quot;"));
        assert!(html.contains("Success rate: 50.0%"));
    }

    #[test]
    fn test_escape_markup_in_details() {
        assert_eq!(html_escape("<b>\"x\" & y</b>"), "&lt;b&gt;&quot;x&quot; &amp; y&lt;/b&gt;");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(250), "250ms");
        assert_eq!(format_duration(1500), "1.5s");
        assert_eq!(format_duration(61000), "1m 1s");
    }
}
