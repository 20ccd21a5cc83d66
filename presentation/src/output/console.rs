//! Console output formatter for invocation results

use bridge_application::{ConverseOutcome, invocation_error_message};
use bridge_domain::ToolCallResult;
use colored::Colorize;

/// Text written to stdout for a successful result, or to stderr otherwise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Stdout(String),
    Stderr(String),
}

impl Rendered {
    pub fn is_success(&self) -> bool {
        matches!(self, Rendered::Stdout(_))
    }

    /// Print to the matching stream.
    pub fn print(&self) {
        match self {
            Rendered::Stdout(text) => println!("{}", text),
            Rendered::Stderr(text) => eprintln!("{}", text),
        }
    }
}

/// Formats invocation outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Chat reply text as-is
    pub fn chat(model_id: &str, outcome: &ConverseOutcome<String>) -> Rendered {
        match outcome {
            ConverseOutcome::Completed(text) => Rendered::Stdout(text.clone()),
            other => Self::unsuccessful(model_id, other),
        }
    }

    /// Tool calls as pretty-printed OpenAI JSON
    pub fn tool_calls(model_id: &str, outcome: &ConverseOutcome<Vec<ToolCallResult>>) -> Rendered {
        match outcome {
            ConverseOutcome::Completed(calls) => Rendered::Stdout(
                serde_json::to_string_pretty(calls).unwrap_or_else(|_| "[]".to_string()),
            ),
            other => Self::unsuccessful(model_id, other),
        }
    }

    fn unsuccessful<T>(model_id: &str, outcome: &ConverseOutcome<T>) -> Rendered {
        match outcome.failure() {
            Some(e) => {
                let mut message = invocation_error_message(model_id, e).red().bold().to_string();
                if e.is_retryable() {
                    message.push_str(&format!("\n{}", "(transient; retrying may succeed)".dimmed()));
                }
                Rendered::Stderr(message)
            }
            None => Rendered::Stderr("(no content)".yellow().to_string()),
        }
    }

    /// One configuration warning line
    pub fn config_warning(message: &str) -> String {
        format!("{} {}", "warning:".yellow().bold(), message)
    }
}
