//! External template definitions
//!
//! A definitions file replaces the whole registry. It is a mapping of file
//! name to template text, with an optional `beloved.conf` entry shaped like
//! the configuration file:
//!
//! ```yaml
//! main.lua: |
//!   require 'includes'
//! conf.lua: |
//!   function love.conf(t) t.window.title = "{projectname}" end
//! beloved.conf:
//!   directories: [src, assets]
//! ```
//!
//! Files ending in `.yaml`/`.yml` are read as YAML, anything else as JSON.
//! The data is only ever parsed, never evaluated.

use super::TemplateRegistry;
use crate::config::Config;
use crate::error::{Error, IoContext, Result};
use crate::CONFIG_FILE;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Read and validate a definitions file into a registry
pub fn load_definitions(path: &Path) -> Result<TemplateRegistry> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_definitions(path, &content)
}

/// Validate already-read definitions; `path` selects the format and names errors
pub fn parse_definitions(path: &Path, content: &str) -> Result<TemplateRegistry> {
    let invalid = |reason: String| Error::InvalidTemplates {
        path: path.to_path_buf(),
        reason,
    };

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let value: Value = if is_yaml {
        serde_yaml::from_str(content).map_err(|e| invalid(e.to_string()))?
    } else {
        serde_json::from_str(content).map_err(|e| invalid(e.to_string()))?
    };

    let Value::Object(entries) = value else {
        return Err(invalid(
            "expected a mapping of file names to templates".to_string(),
        ));
    };

    let mut templates = BTreeMap::new();
    let mut default_config = Config::default();

    for (name, entry) in entries {
        if name == CONFIG_FILE {
            default_config = serde_json::from_value(entry)
                .map_err(|e| invalid(format!("entry '{}': {}", CONFIG_FILE, e)))?;
            continue;
        }

        match entry {
            Value::String(text) => {
                templates.insert(name, text);
            }
            other => {
                return Err(invalid(format!(
                    "entry '{}' must be template text, found {}",
                    name,
                    kind_of(&other)
                )))
            }
        }
    }

    Ok(TemplateRegistry::new(templates, default_config))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_json_definitions() {
        let content = r#"{
            "main.lua": "print('hi')\n",
            "conf.lua": "title = \"{projectname}\"",
            "beloved.conf": { "directories": ["src"], "files": ["main.lua"] }
        }"#;

        let registry = parse_definitions(&PathBuf::from("defs.json"), content).unwrap();
        assert_eq!(registry.get("main.lua"), Some("print('hi')\n"));
        assert!(!registry.contains("class.lua"));
        assert_eq!(registry.default_config().directories, vec!["src"]);
        assert_eq!(registry.default_config().build_directory, ".build");
    }

    #[test]
    fn test_parse_yaml_definitions() {
        let content = "main.lua: |\n  require 'includes'\nclass.lua: \"local {class_name} = {{}}\"\n";

        let registry = parse_definitions(&PathBuf::from("defs.yml"), content).unwrap();
        assert_eq!(registry.get("main.lua"), Some("require 'includes'\n"));
        assert_eq!(registry.get("class.lua"), Some("local {class_name} = {{}}"));
        assert_eq!(registry.default_config(), &Config::default());
    }

    #[test]
    fn test_rejects_non_string_template() {
        let err = parse_definitions(&PathBuf::from("defs.json"), r#"{"main.lua": 3}"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTemplates { ref reason, .. } if reason.contains("main.lua")));
    }

    #[test]
    fn test_rejects_malformed_config_entry() {
        let content = r#"{"beloved.conf": {"directories": "not-a-list"}}"#;
        let err = parse_definitions(&PathBuf::from("defs.json"), content).unwrap_err();
        assert!(err.to_string().contains("beloved.conf"));
    }

    #[test]
    fn test_rejects_non_mapping_and_syntax_errors() {
        assert!(parse_definitions(&PathBuf::from("defs.json"), "[1, 2]").is_err());
        assert!(parse_definitions(&PathBuf::from("defs.json"), "{'main.lua': ''}").is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_definitions(&PathBuf::from("/nonexistent/defs.json")).unwrap_err();
        assert_eq!(err.exit_code(), 6);
    }
}
