//! Template registry, rendering and external definitions
//!
//! This module provides:
//! - The built-in LÖVE templates (`main.lua`, `conf.lua`, `class.lua`, `includes.lua`)
//! - `TemplateRegistry`, the name to template mapping handed to each operation
//! - Named placeholder rendering
//! - Loading a replacement registry from a JSON or YAML definitions file

pub mod builtin;
pub mod definitions;
pub mod render;

use crate::config::Config;
use std::collections::BTreeMap;

pub use definitions::load_definitions;
pub use render::{render, TemplateError};

/// Registry key of the class stub template
pub const CLASS_TEMPLATE: &str = "class.lua";

/// Mapping from file name to template text, plus the default configuration
///
/// A registry is obtained once per run and either comes from the built-in
/// templates or wholesale from a definitions file.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, String>,
    default_config: Config,
}

impl TemplateRegistry {
    /// Registry with the templates shipped in the binary
    pub fn builtin() -> Self {
        let templates = builtin::TEMPLATES
            .iter()
            .map(|(name, text)| (name.to_string(), text.to_string()))
            .collect();

        Self {
            templates,
            default_config: Config::default(),
        }
    }

    pub fn new(templates: BTreeMap<String, String>, default_config: Config) -> Self {
        Self {
            templates,
            default_config,
        }
    }

    /// Raw template text for a file name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.templates.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Render the template registered under `name`
    ///
    /// Returns `Ok(None)` when no template exists for that name.
    pub fn render(
        &self,
        name: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Option<String>, TemplateError> {
        self.get(name)
            .map(|text| render::render(name, text, params))
            .transpose()
    }

    /// Configuration-shaped entry of the registry (`beloved.conf`)
    pub fn default_config(&self) -> &Config {
        &self.default_config
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
