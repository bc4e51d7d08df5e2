//! Error types shared by every project operation

use crate::templates::TemplateError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures that abort a whole operation.
///
/// Per-item problems (an existing folder, a file that could not be written
/// while its siblings could) are reported through a [`crate::Reporter`]
/// instead and never surface here.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid project directory {}! Run beloved -i <ProjectName> to create a new project", .0.display())]
    NotAProject(PathBuf),

    #[error("Cannot import {0}! Library does not exist")]
    LibraryNotFound(String),

    #[error("Libraries folder {} does not exist", .0.display())]
    LibrariesFolderMissing(PathBuf),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Failed to parse configuration {}: {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("Invalid template definitions in {}: {reason}", path.display())]
    InvalidTemplates { path: PathBuf, reason: String },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Attach a human readable context to an I/O error
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Process exit code for this failure class
    ///
    /// | code | meaning |
    /// |------|---------|
    /// | 2 | not inside a project |
    /// | 3 | library or libraries folder missing |
    /// | 4 | template rendering failed |
    /// | 5 | configuration or template definitions invalid |
    /// | 6 | filesystem failure |
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::NotAProject(_) => 2,
            Error::LibraryNotFound(_) | Error::LibrariesFolderMissing(_) => 3,
            Error::Template(_) => 4,
            Error::InvalidConfig { .. } | Error::InvalidTemplates { .. } => 5,
            Error::Io { .. } => 6,
        }
    }
}

/// Extension for turning `io::Result` into [`Result`] with a lazily built context
pub(crate) trait IoContext<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| Error::io(f(), e))
    }
}
