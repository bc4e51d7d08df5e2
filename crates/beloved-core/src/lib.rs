//! Beloved Core - Shared library for the `beloved` project tool
//!
//! This library provides everything the `beloved` binary does to a LÖVE project:
//! scaffolding a new project from string templates, generating class stubs,
//! importing reusable libraries and packaging the project into a `.love` archive.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Configuration and templates** - `Config` loading/bootstrap, the
//!   `TemplateRegistry` and the placeholder renderer
//! - **Layer 2: Project operations** - initializer, class generator, library
//!   importer and archiver, all driven by an explicit `Session`
//! - **Layer 3: Console reporting** - optional cliclack-based `Reporter` (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based console reporter
//!
//! # Example Usage
//!
//! ```ignore
//! use beloved_core::{config, project, Session};
//!
//! let loaded = config::load(&config::default_config_path()?)?;
//! let mut session = Session::new(std::env::current_dir()?, loaded.config, loaded.registry);
//! let mut statuses = Vec::new();
//! project::init(&mut session, "Foo", &mut statuses);
//! project::package(&session, None, &mut statuses)?;
//! ```

pub mod config;
pub mod error;
pub mod project;
pub mod report;
pub mod session;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Config, LoadedConfig};
pub use error::{Error, Result};
pub use report::{Outcome, Reporter, Status};
pub use session::Session;
pub use templates::{render, TemplateError, TemplateRegistry};

/// Name of the file whose presence marks a directory as a project root
pub const PROJECT_MARKER: &str = "main.lua";

/// Name of the append-only includes manifest inside a project
pub const INCLUDES_FILE: &str = "includes.lua";

/// Name of the configuration file stored next to the executable
pub const CONFIG_FILE: &str = "beloved.conf";
