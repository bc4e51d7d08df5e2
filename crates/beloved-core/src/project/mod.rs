//! Operations on a project directory
//!
//! This module provides:
//! - Project initialization from the configured folders and seed files
//! - Class stub generation
//! - Library listing and importing
//! - Packaging into a `.love` archive
//!
//! Everything except initialization requires `session.root` to be a project,
//! i.e. to contain `main.lua`.

pub mod archive;
pub mod class;
pub mod includes;
pub mod init;
pub mod library;

use crate::error::{Error, Result};
use crate::session::Session;

pub use archive::package;
pub use class::add_classes;
pub use init::init;
pub use library::{import_libraries, list_libraries};

/// Fail with [`Error::NotAProject`] unless `session.root` holds the marker file
pub fn ensure_project(session: &Session) -> Result<()> {
    if session.is_project() {
        Ok(())
    } else {
        Err(Error::NotAProject(session.root.clone()))
    }
}
