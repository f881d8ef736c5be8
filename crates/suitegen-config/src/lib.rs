use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use suitegen_engine::{Compare, EmitOptions, InputSource, LineNormalization, SpecStyle};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Checkout of the YAML test suite; fixtures live in its `src` directory
    pub corpus_root: PathBuf,
    /// Where the generated Lua spec is written
    pub output_path: PathBuf,
    #[serde(default)]
    pub emit: EmitSettings,
}

/// The `[emit]` table. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitSettings {
    pub parser_module: String,
    pub json_module: String,
    pub input: InputSource,
    pub input_extension: String,
    pub normalization: LineNormalization,
    pub style: SpecStyle,
    pub compare: Compare,
}

impl Default for EmitSettings {
    fn default() -> Self {
        let defaults = EmitOptions::default();
        Self {
            parser_module: defaults.parser_module,
            json_module: defaults.json_module,
            input: defaults.input,
            input_extension: defaults.input_extension,
            normalization: defaults.normalization,
            style: defaults.style,
            compare: defaults.compare,
        }
    }
}

impl EmitSettings {
    pub fn to_options(&self, corpus_root: impl Into<PathBuf>) -> EmitOptions {
        EmitOptions {
            parser_module: self.parser_module.clone(),
            json_module: self.json_module.clone(),
            input: self.input,
            corpus_root: corpus_root.into(),
            input_extension: self.input_extension.clone(),
            normalization: self.normalization,
            style: self.style,
            compare: self.compare,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        config.corpus_root = Self::expand_path(&config.corpus_root).unwrap_or(config.corpus_root);
        config.output_path = Self::expand_path(&config.output_path).unwrap_or(config.output_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/suitegen");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn sample() -> Config {
        Config {
            corpus_root: PathBuf::from("/tmp/yaml-test-suite"),
            output_path: PathBuf::from("/tmp/spec/tree_spec.lua"),
            emit: EmitSettings::default(),
        }
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/suitegen/config.toml"));
    }

    #[test]
    fn test_emit_table_is_optional() {
        let config: Config = toml::from_str(
            r#"
corpus_root = "/suite"
output_path = "/out/spec.lua"
"#,
        )
        .unwrap();

        assert_eq!(config.emit, EmitSettings::default());
        assert_eq!(config.emit.parser_module, "yalua");
        assert_eq!(config.emit.json_module, "rapidjson");
        assert_eq!(config.emit.input_extension, "yaml");
    }

    #[test]
    fn test_partial_emit_table() {
        let config: Config = toml::from_str(
            r#"
corpus_root = "/suite"
output_path = "/out/spec.lua"

[emit]
parser_module = "lyaml"
input = "file"
normalization = "trailing"
style = "listing"
compare = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.emit.parser_module, "lyaml");
        assert_eq!(config.emit.json_module, "rapidjson");
        assert_eq!(config.emit.input, InputSource::File);
        assert_eq!(config.emit.normalization, LineNormalization::Trailing);
        assert_eq!(config.emit.style, SpecStyle::Listing);
        assert_eq!(config.emit.compare, Compare::Json);
    }

    #[test]
    fn test_unknown_input_source_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "corpus_root = \"/suite\"\noutput_path = \"/o\"\n[emit]\ninput = \"stdin\"\n",
        )
        .unwrap();

        let result = Config::load_from_path(&config_file);

        assert!(matches!(result, Err(ConfigError::ConfigParseError { .. })));
    }

    #[test]
    fn test_emit_options_carry_corpus_root() {
        let config = sample();
        let options = config.emit.to_options(&config.corpus_root);

        assert_eq!(options.corpus_root, PathBuf::from("/tmp/yaml-test-suite"));
        assert_eq!(options.parser_module, "yalua");
        assert_eq!(options.input, InputSource::Embedded);
        assert_eq!(options.compare, Compare::Tree);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let mut test_config = sample();
        test_config.emit.normalization = LineNormalization::Trailing;

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config.corpus_root, test_config.corpus_root);
        assert_eq!(loaded_config.output_path, test_config.output_path);
        assert_eq!(loaded_config.emit, test_config.emit);
    }

    #[test]
    fn test_paths_with_env_var_are_expanded_on_load() {
        unsafe {
            env::set_var("SUITEGEN_TEST_ROOT", "/custom/suite");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            r#"
corpus_root = "$SUITEGEN_TEST_ROOT/yaml-test-suite"
output_path = "$SUITEGEN_TEST_ROOT/spec.lua"
"#,
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            config.corpus_root,
            PathBuf::from("/custom/suite/yaml-test-suite")
        );
        assert_eq!(config.output_path, PathBuf::from("/custom/suite/spec.lua"));

        unsafe {
            env::remove_var("SUITEGEN_TEST_ROOT");
        }
    }
}
