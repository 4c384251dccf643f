//! Editor configuration.
//!
//! Configuration can be loaded from:
//! - a TOML file named by `INKPAD_CONFIG`
//! - environment variables (`INKPAD_*` prefixed)
//!
//! Anything not set falls back to [`inkpad_core::defaults`].
//!
//! ```toml
//! [editor]
//! allowed_image_types = ["png", "webp"]
//! probe_timeout_secs = 5
//! storage_key = "draft"
//! budget_bytes = 1000000
//! storage_dir = "/var/lib/inkpad"
//! node_limit = 20
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

use inkpad_core::{defaults, DocumentSnapshot, ImageTypes};
use inkpad_store::{is_valid_storage_key, PersistenceConfig};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for an editor session and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// File extensions treated as images.
    pub allowed_image_types: Vec<String>,
    /// Content-type probe timeout.
    pub probe_timeout_secs: u64,
    /// Storage slot name.
    pub storage_key: String,
    /// Largest serialized snapshot accepted, in bytes.
    pub budget_bytes: usize,
    /// Directory of the filesystem slot store.
    pub storage_dir: PathBuf,
    /// Maximum number of top-level nodes; 0 is unlimited.
    pub node_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            allowed_image_types: defaults::IMAGE_TYPES.iter().map(|s| s.to_string()).collect(),
            probe_timeout_secs: defaults::PROBE_TIMEOUT_SECS,
            storage_key: defaults::STORAGE_KEY.to_string(),
            budget_bytes: defaults::SNAPSHOT_BUDGET_BYTES,
            storage_dir: PathBuf::from(defaults::STORAGE_DIR),
            node_limit: defaults::NODE_LIMIT,
        }
    }
}

impl EditorConfig {
    /// Load from the file named by `INKPAD_CONFIG`, falling back to
    /// environment variables.
    pub fn load() -> ConfigResult<Self> {
        match env::var(defaults::ENV_CONFIG) {
            Ok(path) if !path.is_empty() => {
                info!(path = %path, "Loading editor config from file");
                Self::from_file(Path::new(&path))
            }
            _ => {
                debug!("{} not set, using environment variables", defaults::ENV_CONFIG);
                let config = Self::from_env();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Load from a TOML file with an `[editor]` table.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML text. Missing tables and fields take their defaults.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        #[derive(Deserialize, Default)]
        struct TomlRoot {
            #[serde(default)]
            editor: EditorConfig,
        }

        let root: TomlRoot = toml::from_str(content)?;
        Ok(root.editor)
    }

    /// Load from `INKPAD_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or unparsable values
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(list) = lookup(defaults::ENV_IMAGE_TYPES) {
            config.allowed_image_types = ImageTypes::parse_list(&list)
                .iter()
                .map(str::to_string)
                .collect();
        }
        if let Some(timeout) = parse_var(&lookup, defaults::ENV_PROBE_TIMEOUT_SECS) {
            config.probe_timeout_secs = timeout;
        }
        if let Some(key) = lookup(defaults::ENV_STORAGE_KEY) {
            config.storage_key = key;
        }
        if let Some(budget) = parse_var(&lookup, defaults::ENV_BUDGET_BYTES) {
            config.budget_bytes = budget;
        }
        if let Some(dir) = lookup(defaults::ENV_STORAGE_DIR) {
            config.storage_dir = PathBuf::from(dir);
        }
        if let Some(limit) = parse_var(&lookup, defaults::ENV_NODE_LIMIT) {
            config.node_limit = limit;
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.image_types().is_empty() {
            return Err(ConfigError::Validation(
                "allowed_image_types cannot be empty".to_string(),
            ));
        }
        if !is_valid_storage_key(&self.storage_key) {
            return Err(ConfigError::Validation(format!(
                "storage_key {:?} must be non-empty, use only [A-Za-z0-9._-] and not start with '.'",
                self.storage_key
            )));
        }
        if self.probe_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "probe_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// The image allow-list.
    pub fn image_types(&self) -> ImageTypes {
        ImageTypes::new(self.allowed_image_types.iter())
    }

    /// Persistence settings with the default empty document.
    pub fn persistence_config(&self) -> PersistenceConfig {
        PersistenceConfig {
            storage_key: self.storage_key.clone(),
            budget_bytes: self.budget_bytes,
            default_snapshot: DocumentSnapshot::empty_document(),
        }
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!(var = name, value = %raw, "Ignoring unparsable environment value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(
            config.allowed_image_types,
            vec!["jpg", "jpeg", "png", "gif", "svg"]
        );
        assert_eq!(config.probe_timeout_secs, 10);
        assert_eq!(config.storage_key, "content");
        assert_eq!(config.budget_bytes, 5_000_000);
        assert_eq!(config.storage_dir, PathBuf::from(".inkpad"));
        assert_eq!(config.node_limit, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = EditorConfig::from_lookup(lookup(&[
            ("INKPAD_IMAGE_TYPES", " PNG, .webp ,"),
            ("INKPAD_PROBE_TIMEOUT_SECS", "3"),
            ("INKPAD_STORAGE_KEY", "draft"),
            ("INKPAD_BUDGET_BYTES", "1024"),
            ("INKPAD_STORAGE_DIR", "/tmp/inkpad"),
            ("INKPAD_NODE_LIMIT", "12"),
        ]));

        assert_eq!(config.allowed_image_types, vec!["png", "webp"]);
        assert_eq!(config.probe_timeout_secs, 3);
        assert_eq!(config.storage_key, "draft");
        assert_eq!(config.budget_bytes, 1024);
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/inkpad"));
        assert_eq!(config.node_limit, 12);
    }

    #[test]
    fn test_from_lookup_ignores_garbage_numbers() {
        let config = EditorConfig::from_lookup(lookup(&[
            ("INKPAD_BUDGET_BYTES", "lots"),
            ("INKPAD_NODE_LIMIT", "-1"),
        ]));
        assert_eq!(config.budget_bytes, 5_000_000);
        assert_eq!(config.node_limit, 0);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = EditorConfig::from_toml_str(
            r#"
            [editor]
            storage_key = "notes"
            node_limit = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.storage_key, "notes");
        assert_eq!(config.node_limit, 5);
        assert_eq!(config.budget_bytes, 5_000_000);
    }

    #[test]
    fn test_from_toml_without_editor_table() {
        let config = EditorConfig::from_toml_str("").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_from_toml_type_error() {
        let result = EditorConfig::from_toml_str("[editor]\nnode_limit = \"many\"\n");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[editor]\nallowed_image_types = [\"png\"]\nprobe_timeout_secs = 2"
        )
        .unwrap();

        let config = EditorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.allowed_image_types, vec!["png"]);
        assert_eq!(config.probe_timeout_secs, 2);
    }

    #[test]
    fn test_from_file_missing() {
        let result = EditorConfig::from_file(Path::new("/nonexistent/inkpad.toml"));
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }

    #[test]
    fn test_from_file_runs_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[editor]\nprobe_timeout_secs = 0").unwrap();
        assert!(matches!(
            EditorConfig::from_file(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_allow_list() {
        let config = EditorConfig {
            allowed_image_types: vec![" ".to_string()],
            ..EditorConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_empty_storage_key() {
        let config = EditorConfig {
            storage_key: String::new(),
            ..EditorConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_unusable_storage_key() {
        for key in ["my draft", ".content", "notes/today", "../escape"] {
            let config = EditorConfig::from_lookup(lookup(&[("INKPAD_STORAGE_KEY", key)]));
            assert_eq!(config.storage_key, key);
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{:?} should fail validation",
                key
            );
        }
    }

    #[test]
    fn test_from_file_rejects_unusable_storage_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[editor]\nstorage_key = \"my draft\"").unwrap();
        assert!(matches!(
            EditorConfig::from_file(file.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_persistence_config() {
        let config = EditorConfig {
            storage_key: "draft".to_string(),
            budget_bytes: 100,
            ..EditorConfig::default()
        };
        let persistence = config.persistence_config();
        assert_eq!(persistence.storage_key, "draft");
        assert_eq!(persistence.budget_bytes, 100);
        assert_eq!(persistence.default_snapshot, DocumentSnapshot::empty_document());
    }
}
