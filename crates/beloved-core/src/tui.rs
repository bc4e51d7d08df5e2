//! Console reporter using cliclack (Charm-style inline log lines)
//!
//! This module is optional and only available when the `tui` feature is enabled.

use crate::report::{Outcome, Reporter, Status};
use colored::Colorize;

/// Prints each status line as it is reported
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    quiet: bool,
    failures: usize,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet, failures: 0 }
    }

    /// Number of failed items reported so far
    pub fn failures(&self) -> usize {
        self.failures
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, status: Status) {
        let subject = status.subject.as_str();
        let action = status.action;

        let _ = match &status.outcome {
            Outcome::Failed(reason) => {
                self.failures += 1;
                cliclack::log::error(format!(
                    "{} {} {}: {}",
                    "ERROR!".red().bold(),
                    action,
                    subject.bold(),
                    reason
                ))
            }
            _ if self.quiet => Ok(()),
            Outcome::Started => {
                cliclack::log::info(format!("Creating {} {}", action, subject.magenta().bold()))
            }
            Outcome::Created => {
                cliclack::log::success(format!("{} {}", action, subject.green().bold()))
            }
            Outcome::Skipped => cliclack::log::warning(format!(
                "Skipping! {} {} already exists",
                action,
                subject.yellow()
            )),
        };
    }
}
