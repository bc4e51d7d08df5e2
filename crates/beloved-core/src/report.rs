//! Per-item status reporting
//!
//! Every filesystem action an operation takes is reported as it happens, so a
//! partially successful run shows exactly which items were created, skipped
//! or failed.

use std::fmt;

/// Result of a single filesystem action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Informational line announcing the next step
    Started,
    Created,
    /// The item already existed and was left untouched
    Skipped,
    Failed(String),
}

/// What kind of item a status line is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Folder,
    File,
    Class,
    Library,
    Include,
    Archive,
    ArchiveEntry,
}

impl Action {
    pub fn display_name(&self) -> &'static str {
        match self {
            Action::Folder => "folder",
            Action::File => "file",
            Action::Class => "class",
            Action::Library => "library",
            Action::Include => "include",
            Action::Archive => "archive",
            Action::ArchiveEntry => "entry",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub action: Action,
    pub subject: String,
    pub outcome: Outcome,
}

impl Status {
    pub fn new(action: Action, subject: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            action,
            subject: subject.into(),
            outcome,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failed(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Started => write!(f, "Creating {} {}", self.action, self.subject),
            Outcome::Created => write!(f, "Success! {} {} created", self.action, self.subject),
            Outcome::Skipped => write!(
                f,
                "Skipping! {} {} already exists",
                self.action, self.subject
            ),
            Outcome::Failed(reason) => {
                write!(f, "ERROR! {} {}: {}", self.action, self.subject, reason)
            }
        }
    }
}

/// Sink for status lines
pub trait Reporter {
    fn report(&mut self, status: Status);
}

/// Collects status lines in memory
impl Reporter for Vec<Status> {
    fn report(&mut self, status: Status) {
        self.push(status);
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, status: Status) {
        (**self).report(status);
    }
}
