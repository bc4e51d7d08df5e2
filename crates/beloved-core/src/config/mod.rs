//! Configuration file (`beloved.conf`) loading and bootstrap
//!
//! The configuration lives next to the executable. On first run it does not
//! exist yet, so the default configuration is written there and the run
//! continues with those defaults.

use crate::error::{Error, IoContext, Result};
use crate::templates::{load_definitions, TemplateRegistry};
use crate::CONFIG_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configuration file location
pub const CONFIG_ENV: &str = "BELOVED_CONFIG";

/// Contents of `beloved.conf`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Optional template definitions file replacing the built-in templates
    pub templates: Option<PathBuf>,

    /// Subdirectories created inside a new project, in order
    pub directories: Vec<String>,

    /// Seed files created inside a new project, in order
    pub files: Vec<String>,

    /// Shared folder that libraries are imported from
    pub libraries_folder: PathBuf,

    /// Build output directory inside a project (never archived)
    pub build_directory: String,

    /// Subdirectory of `build_directory` receiving `.love` archives
    pub love_output: String,

    /// Subdirectory of `build_directory` reserved for platform builds
    pub build_output: String,

    /// Extension of the packaged archive
    pub archive_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates: None,
            directories: ["ast", "gfx", "sfx", "lib", "sdr"]
                .map(String::from)
                .to_vec(),
            files: ["main.lua", "conf.lua", "includes.lua"]
                .map(String::from)
                .to_vec(),
            libraries_folder: PathBuf::from("<LIBRARIES_PATH>"),
            build_directory: ".build".to_string(),
            love_output: "love".to_string(),
            build_output: "bin".to_string(),
            archive_extension: "love".to_string(),
        }
    }
}

impl Config {
    /// Directory receiving packaged archives, relative to a project root
    pub fn archive_dir(&self, project_root: &Path) -> PathBuf {
        project_root
            .join(&self.build_directory)
            .join(&self.love_output)
    }

    /// Directory reserved for platform builds, relative to a project root
    pub fn build_output_dir(&self, project_root: &Path) -> PathBuf {
        project_root
            .join(&self.build_directory)
            .join(&self.build_output)
    }
}

/// Result of loading the configuration
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub registry: TemplateRegistry,
    /// True when the configuration file was missing and has just been written
    pub created: bool,
    /// Recoverable problems to show the user
    pub warnings: Vec<String>,
}

/// Default configuration location: `$BELOVED_CONFIG`, else next to the executable
pub fn default_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    let exe = std::env::current_exe().with_context(|| "Failed to locate the executable")?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(CONFIG_FILE))
}

/// Load the configuration at `path`, writing defaults if it does not exist
///
/// A configured template definitions file that does not exist only yields a
/// warning; one that exists but is malformed is an error.
pub fn load(path: &Path) -> Result<LoadedConfig> {
    let builtin = TemplateRegistry::builtin();
    let mut warnings = Vec::new();

    let (config, created) = if path.exists() {
        (read_config(path)?, false)
    } else {
        let created = match write_config(path, builtin.default_config()) {
            Ok(()) => {
                warnings.push(format!(
                    "Cannot load {}! Creating new one with defaults",
                    path.display()
                ));
                true
            }
            Err(e) => {
                warnings.push(format!("Cannot load {}! Using defaults ({})", path.display(), e));
                false
            }
        };
        (builtin.default_config().clone(), created)
    };

    let registry = match &config.templates {
        Some(templates) => {
            let templates = resolve_relative(path, templates);
            if templates.exists() {
                load_definitions(&templates)?
            } else {
                warnings.push(format!(
                    "Templates file {} does not exist! Using built-in templates",
                    templates.display()
                ));
                builtin
            }
        }
        None => builtin,
    };

    Ok(LoadedConfig {
        config,
        registry,
        created,
        warnings,
    })
}

/// Parse a configuration file
pub fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config = serde_json::from_str(&content).map_err(|e| Error::InvalidConfig {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if config.build_directory.is_empty() {
        return Err(Error::InvalidConfig {
            path: path.to_path_buf(),
            reason: "build_directory must not be empty".to_string(),
        });
    }
    Ok(config)
}

/// Write a configuration file as 4-space indented JSON
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    config
        .serialize(&mut serializer)
        .map_err(|e| Error::io("Failed to serialize configuration", e.into()))?;
    buffer.push(b'\n');

    fs::write(path, buffer).with_context(|| format!("Failed to write {}", path.display()))
}

/// Relative template paths are taken relative to the configuration file
fn resolve_relative(config_path: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        return target.to_path_buf();
    }
    match config_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(target),
        _ => target.to_path_buf(),
    }
}
