use super::state::{SkippedCase, Summary};
use tokio::sync::broadcast;

/// Suite execution events for console output
#[derive(Debug, Clone)]
pub enum SuiteEvent {
    // Session events
    SessionStarted {
        session_id: String,
        endpoint: String,
    },
    SessionFinished {
        summary: Summary,
        skipped: Vec<SkippedCase>,
    },

    // A capability group (products, orders, ...) begins
    GroupStarted {
        icon: String,
        title: String,
    },

    // Case events
    CaseStarted {
        name: String,
    },
    CasePassed {
        name: String,
        details: String,
        duration_ms: u64,
    },
    CaseFailed {
        name: String,
        details: String,
        duration_ms: u64,
    },
    CaseSkipped {
        name: String,
        reason: String,
    },
}

/// Event emitter for broadcasting suite events
pub struct EventEmitter {
    sender: Option<broadcast::Sender<SuiteEvent>>,
}

impl EventEmitter {
    pub fn new() -> (Self, broadcast::Receiver<SuiteEvent>) {
        let (sender, receiver) = broadcast::channel(100);
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    pub fn emit(&self, event: SuiteEvent) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(event);
        }
    }

    /// Drop the sender so listeners drain what is queued and stop
    pub fn close(&mut self) {
        self.sender = None;
    }
}

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration as StdDuration;

/// Console event listener printing one line per case plus the final tally
pub struct ConsoleEventListener;

impl ConsoleEventListener {
    pub async fn listen(mut receiver: broadcast::Receiver<SuiteEvent>) {
        use colored::Colorize;
        use std::io::IsTerminal;

        let is_tty = std::io::stdout().is_terminal();
        let mut spinner: Option<ProgressBar> = None;

        loop {
            let event = match receiver.recv().await {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            };

            match event {
                SuiteEvent::SessionStarted {
                    session_id,
                    endpoint,
                } => {
                    println!(
                        "{} Starting SmartLocal Suite Backend API Tests",
                        "▶".green().bold()
                    );
                    println!("  Testing against: {}", endpoint.cyan());
                    println!("  Session: {}", session_id.dimmed());
                    println!("{}", "=".repeat(60));
                }

                SuiteEvent::GroupStarted { icon, title } => {
                    println!("\n{} {}", icon, title.white().bold());
                }

                SuiteEvent::CaseStarted { name } => {
                    let pb = if is_tty {
                        ProgressBar::new_spinner()
                    } else {
                        // Piped output: keep escape codes out of logs
                        ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
                    };
                    if let Ok(style) = ProgressStyle::default_spinner()
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                        .template("    {spinner} {msg}")
                    {
                        pb.set_style(style);
                    }
                    pb.set_message(format!("{}... ", name.dimmed()));
                    pb.enable_steady_tick(StdDuration::from_millis(100));
                    spinner = Some(pb);
                }

                SuiteEvent::CasePassed {
                    name,
                    details,
                    duration_ms,
                } => {
                    clear(&mut spinner);
                    println!(
                        "    {} {} {}",
                        "✓ PASS".green(),
                        name,
                        format!("({}ms)", duration_ms).dimmed()
                    );
                    if !details.is_empty() {
                        println!("        Details: {}", details);
                    }
                }

                SuiteEvent::CaseFailed {
                    name,
                    details,
                    duration_ms,
                } => {
                    clear(&mut spinner);
                    println!(
                        "    {} {} {}",
                        "✗ FAIL".red(),
                        name,
                        format!("({}ms)", duration_ms).dimmed()
                    );
                    if !details.is_empty() {
                        println!("        Details: {}", details.red());
                    }
                }

                SuiteEvent::CaseSkipped { name, reason } => {
                    clear(&mut spinner);
                    println!("    {} {} ({})", "○ SKIP".yellow(), name, reason.dimmed());
                }

                SuiteEvent::SessionFinished { summary, skipped } => {
                    clear(&mut spinner);
                    println!("\n{}", "=".repeat(60));
                    println!("{} TEST SUMMARY", "■".blue().bold());
                    println!("{}", "=".repeat(60));
                    println!("  Total Tests: {}", summary.total);
                    println!("  {} Passed: {}", "✓".green(), summary.passed.to_string().green());
                    println!("  {} Failed: {}", "✗".red(), summary.failed.to_string().red());
                    if !skipped.is_empty() {
                        println!("  {} Skipped: {}", "○".yellow(), skipped.len().to_string().yellow());
                    }
                    println!("  Success Rate: {:.1}%", summary.success_rate);
                    println!("  Duration: {}ms", summary.total_duration_ms);

                    if !summary.failed_tests.is_empty() {
                        println!("\n{} FAILED TESTS:", "✗".red());
                        for name in &summary.failed_tests {
                            println!("  - {}", name);
                        }
                    }
                    println!("\n{}", "=".repeat(60));
                }
            }
        }

        clear(&mut spinner);
    }
}

fn clear(spinner: &mut Option<ProgressBar>) {
    if let Some(pb) = spinner.take() {
        pb.finish_and_clear();
    }
}
