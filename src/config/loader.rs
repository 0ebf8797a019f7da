//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.revbrief.toml` in the project root
//! 4. `~/.config/revbrief/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::env::Env;
use crate::models::ProviderName;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub review: ReviewConfig,
    pub output: OutputConfig,
}

/// LLM provider configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub name: ProviderName,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            name: ProviderName::Gemini,
            model: "gemini-2.0-flash".to_string(),
            base_url: None,
            api_key: None,
        }
    }
}

/// Review generation configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReviewConfig {
    /// Send the assembled context to the provider for a written review.
    pub enabled: bool,
}

/// Output location configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for generated documents; defaults to the project root.
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, project-local config, then applies
    /// environment variable overrides.
    pub fn load(project_root: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            let global = Self::load_file(&global_path)?;
            config.merge(global);
        }

        // Layer 3: project-local config
        if let Some(root) = project_root {
            let local_path = root.join(crate::constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(crate::constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for non-default values).
    fn merge(&mut self, other: Config) {
        let default_provider = ProviderConfig::default();
        if other.provider.name != default_provider.name {
            self.provider.name = other.provider.name;
        }
        if other.provider.model != default_provider.model {
            self.provider.model = other.provider.model;
        }
        if other.provider.base_url.is_some() {
            self.provider.base_url = other.provider.base_url;
        }
        if other.provider.api_key.is_some() {
            self.provider.api_key = other.provider.api_key;
        }

        if other.review.enabled {
            self.review.enabled = true;
        }

        if other.output.dir.is_some() {
            self.output.dir = other.output.dir;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Ok(val) = env.var(crate::constants::ENV_PROVIDER) {
            if let Ok(name) = val.parse::<ProviderName>() {
                self.provider.name = name;
            } else {
                eprintln!(
                    "Warning: ignoring invalid {} value: {val}",
                    crate::constants::ENV_PROVIDER
                );
            }
        }
        if let Ok(val) = env.var(crate::constants::ENV_MODEL) {
            self.provider.model = val;
        }
        if let Ok(val) = env.var(crate::constants::ENV_BASE_URL) {
            self.provider.base_url = Some(val);
        }

        // Provider-specific API key resolution
        let api_key = env
            .var(crate::constants::ENV_API_KEY)
            .or_else(|_| env.var(self.provider.name.api_key_env_var()))
            .ok();
        if api_key.is_some() {
            self.provider.api_key = api_key;
        }

        if let Ok(val) = env.var(crate::constants::ENV_REVIEW) {
            match val.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => self.review.enabled = true,
                "false" | "0" | "no" | "off" => self.review.enabled = false,
                _ => eprintln!(
                    "Warning: ignoring invalid {} value: {val}",
                    crate::constants::ENV_REVIEW
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.provider.name, ProviderName::Gemini);
        assert_eq!(config.provider.model, "gemini-2.0-flash");
        assert!(!config.review.enabled);
        assert!(config.output.dir.is_none());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
[provider]
name = "anthropic"
model = "claude-sonnet-4-20250514"

[review]
enabled = true

[output]
dir = "docs/reviews"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.provider.name, ProviderName::Anthropic);
        assert_eq!(config.provider.model, "claude-sonnet-4-20250514");
        assert!(config.review.enabled);
        assert_eq!(config.output.dir, Some(PathBuf::from("docs/reviews")));
    }

    #[test]
    fn merge_overrides_non_default_values() {
        let mut base = Config::default();
        let mut other = Config::default();

        other.provider.name = ProviderName::OpenAI;
        other.provider.model = "gpt-4o".to_string();
        other.provider.base_url = Some("https://custom.api".to_string());
        other.provider.api_key = Some("sk-test".to_string());
        other.review.enabled = true;
        other.output.dir = Some(PathBuf::from("out"));

        base.merge(other);

        assert_eq!(base.provider.name, ProviderName::OpenAI);
        assert_eq!(base.provider.model, "gpt-4o");
        assert_eq!(base.provider.base_url, Some("https://custom.api".to_string()));
        assert_eq!(base.provider.api_key, Some("sk-test".to_string()));
        assert!(base.review.enabled);
        assert_eq!(base.output.dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn merge_keeps_base_when_other_is_default() {
        let mut base = Config::default();
        base.provider.name = ProviderName::OpenAI;
        base.provider.model = "gpt-4o".to_string();
        base.review.enabled = true;

        base.merge(Config::default());

        assert_eq!(base.provider.name, ProviderName::OpenAI);
        assert_eq!(base.provider.model, "gpt-4o");
        assert!(base.review.enabled);
    }

    #[test]
    fn load_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.toml");
        std::fs::write(
            &path,
            r#"
[provider]
name = "openai"
model = "gpt-4o"
"#,
        )
        .unwrap();

        let config = Config::load_file(&path).unwrap();
        assert_eq!(config.provider.name, ProviderName::OpenAI);
        assert_eq!(config.provider.model, "gpt-4o");
    }

    #[test]
    fn load_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not valid {{ toml").unwrap();

        let result = Config::load_file(&path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("parse"));
    }

    #[test]
    fn load_file_not_found() {
        let result = Config::load_file(Path::new("/tmp/revbrief_not_exist_config.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("read"));
    }

    #[test]
    fn load_from_project_root() {
        let env = Env::mock(Vec::<(&str, &str)>::new());

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".revbrief.toml"),
            r#"
[provider]
name = "openai"
model = "gpt-4o"
"#,
        )
        .unwrap();

        let config = Config::load(Some(dir.path()), &env).unwrap();
        assert_eq!(config.provider.name, ProviderName::OpenAI);
        assert_eq!(config.provider.model, "gpt-4o");
    }

    #[test]
    fn load_without_any_config_files() {
        let env = Env::mock(Vec::<(&str, &str)>::new());

        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path()), &env).unwrap();
        assert_eq!(config.provider.name, ProviderName::Gemini);
    }

    #[test]
    fn global_config_path_returns_some() {
        // May be None in CI with no home dir, but shouldn't panic
        if let Some(p) = Config::global_config_path() {
            assert!(p.to_str().unwrap().contains("revbrief"));
        }
    }

    #[test]
    fn apply_env_vars_provider_and_api_key() {
        let env = Env::mock([
            ("REVBRIEF_PROVIDER", "openai"),
            ("REVBRIEF_API_KEY", "sk-env-test"),
        ]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.name, ProviderName::OpenAI);
        assert_eq!(config.provider.api_key, Some("sk-env-test".to_string()));
    }

    #[test]
    fn apply_env_vars_model_and_base_url() {
        let env = Env::mock([
            ("REVBRIEF_MODEL", "gemini-2.5-pro"),
            ("REVBRIEF_BASE_URL", "https://custom.api/v1"),
        ]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.model, "gemini-2.5-pro");
        assert_eq!(
            config.provider.base_url,
            Some("https://custom.api/v1".to_string())
        );
    }

    #[test]
    fn apply_env_vars_invalid_provider_falls_back() {
        let env = Env::mock([("REVBRIEF_PROVIDER", "not-a-provider")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.name, ProviderName::Gemini);
    }

    #[test]
    fn apply_env_vars_provider_specific_api_key_fallback() {
        let env = Env::mock([("GEMINI_API_KEY", "gm-test")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert_eq!(config.provider.api_key, Some("gm-test".to_string()));
    }

    #[test]
    fn apply_env_vars_review_toggle() {
        let env = Env::mock([("REVBRIEF_REVIEW", "true")]);
        let mut config = Config::default();
        config.apply_env_vars(&env);
        assert!(config.review.enabled);

        let env = Env::mock([("REVBRIEF_REVIEW", "off")]);
        config.apply_env_vars(&env);
        assert!(!config.review.enabled);
    }
}
