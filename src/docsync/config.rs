use crate::error::{DocsyncError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

pub const ROOT_SCHEMA_KEY: &str = "root-schema";
pub const PRETTY_JSON_KEY: &str = "pretty-json";

/// Client configuration, stored in `<home>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocsyncConfig {
    /// Schema tag sent with root blob requests; omitted from the request when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_schema: Option<String>,

    /// Pretty-print the payloads printed by the CLI
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_pretty_json() -> bool {
    true
}

impl Default for DocsyncConfig {
    fn default() -> Self {
        Self {
            root_schema: None,
            pretty_json: default_pretty_json(),
        }
    }
}

impl DocsyncConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DocsyncError::Io)?;
        let config: DocsyncConfig =
            serde_json::from_str(&content).map_err(DocsyncError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(DocsyncError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(DocsyncError::Serialization)?;
        fs::write(config_path, content).map_err(DocsyncError::Io)?;
        Ok(())
    }

    pub fn exists<P: AsRef<Path>>(config_dir: P) -> bool {
        config_dir.as_ref().join(CONFIG_FILENAME).exists()
    }

    /// An empty value clears the schema.
    pub fn set_root_schema(&mut self, schema: &str) {
        let schema = schema.trim();
        self.root_schema = if schema.is_empty() {
            None
        } else {
            Some(schema.to_string())
        };
    }

    pub fn set_pretty_json(&mut self, value: &str) -> std::result::Result<(), String> {
        self.pretty_json = match value.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => true,
            "false" | "no" | "off" | "0" => false,
            other => return Err(format!("Invalid value for pretty-json: {}", other)),
        };
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &[ROOT_SCHEMA_KEY, PRETTY_JSON_KEY]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            ROOT_SCHEMA_KEY => Some(self.root_schema.clone().unwrap_or_default()),
            PRETTY_JSON_KEY => Some(self.pretty_json.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            ROOT_SCHEMA_KEY => {
                self.set_root_schema(value);
                Ok(())
            }
            PRETTY_JSON_KEY => self.set_pretty_json(value),
            _ => Err(format!("Unknown config key: {}", key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DocsyncConfig::default();
        assert_eq!(config.root_schema, None);
        assert!(config.pretty_json);
    }

    #[test]
    fn test_set_root_schema() {
        let mut config = DocsyncConfig::default();
        config.set_root_schema("3");
        assert_eq!(config.root_schema.as_deref(), Some("3"));
        config.set_root_schema("  ");
        assert_eq!(config.root_schema, None);
    }

    #[test]
    fn test_set_pretty_json() {
        let mut config = DocsyncConfig::default();
        config.set_pretty_json("off").unwrap();
        assert!(!config.pretty_json);
        config.set_pretty_json("TRUE").unwrap();
        assert!(config.pretty_json);
        assert!(config.set_pretty_json("maybe").is_err());
    }

    #[test]
    fn test_get_and_set_by_key() {
        let mut config = DocsyncConfig::default();
        assert_eq!(config.get("root-schema").as_deref(), Some(""));
        assert_eq!(config.get("pretty-json").as_deref(), Some("true"));
        assert_eq!(config.get("colour"), None);

        config.set("root-schema", "3").unwrap();
        config.set("pretty-json", "no").unwrap();
        assert_eq!(config.get("root-schema").as_deref(), Some("3"));
        assert!(!config.pretty_json);
        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = DocsyncConfig::load(temp_dir.path().join("absent")).unwrap();
        assert_eq!(config, DocsyncConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let home = temp_dir.path().join("home");

        let mut config = DocsyncConfig::default();
        config.set_root_schema("3");
        config.save(&home).unwrap();

        assert!(DocsyncConfig::exists(&home));
        let loaded = DocsyncConfig::load(&home).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: DocsyncConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, DocsyncConfig::default());
    }
}
