//! Per-invocation context threaded through every project operation

use crate::config::Config;
use crate::templates::TemplateRegistry;
use crate::{INCLUDES_FILE, PROJECT_MARKER};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Parameter key holding the project name during initialization
pub const PROJECT_NAME_PARAM: &str = "projectname";

/// Parameter key holding the class name when rendering class stubs
pub const CLASS_NAME_PARAM: &str = "class_name";

/// Everything one run of the tool operates on
///
/// `root` plays the role of the working directory: operations resolve paths
/// against it, and [`crate::project::init`] moves it into the new project.
#[derive(Debug, Clone)]
pub struct Session {
    pub root: PathBuf,
    pub config: Config,
    pub registry: TemplateRegistry,
    pub parameters: BTreeMap<String, String>,
}

impl Session {
    pub fn new(root: PathBuf, config: Config, registry: TemplateRegistry) -> Self {
        Self {
            root,
            config,
            registry,
            parameters: BTreeMap::new(),
        }
    }

    /// Merge `KEY=VALUE` style parameters, later values win
    pub fn extend_parameters<I>(&mut self, parameters: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.parameters.extend(parameters);
    }

    /// Whether `root` contains the project marker file
    pub fn is_project(&self) -> bool {
        self.root.join(PROJECT_MARKER).is_file()
    }

    pub fn includes_path(&self) -> PathBuf {
        self.root.join(INCLUDES_FILE)
    }

    pub fn libraries_folder(&self) -> &Path {
        &self.config.libraries_folder
    }

    /// Default archive name: the project directory's own name
    pub fn project_name(&self) -> String {
        self.root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string())
    }
}
