// Configuration loading (touchline.toml plus the upstream API key from the
// environment).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use touchline_core::prompt::PromptMode;
use touchline_llm::DEFAULT_BASE_URL;

/// Config file read when `TOUCHLINE_CONFIG` is not set. Optional.
pub const DEFAULT_CONFIG_PATH: &str = "config/touchline.toml";

/// Environment variable naming an explicit config file. The file must exist.
pub const CONFIG_PATH_ENV: &str = "TOUCHLINE_CONFIG";

/// Environment variable holding the upstream API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub prompt: PromptConfig,
    pub credentials: CredentialsConfig,
}

/// Raw deserialization target for touchline.toml. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    server: ServerConfig,
    llm: LlmConfig,
    prompt: PromptConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 600,
        }
    }
}

impl LlmConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub mode: PromptMode,
}

/// Secrets taken from the environment only, never from the config file.
#[derive(Debug, Clone, Default)]
pub struct CredentialsConfig {
    pub openai_api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load configuration from `path`, falling back to defaults when the file
/// does not exist and `required` is false.
pub fn load_config_from(
    path: &Path,
    required: bool,
    credentials: CredentialsConfig,
) -> Result<Config, ConfigError> {
    let file = if path.exists() {
        let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.to_path_buf(),
        })?;
        toml::from_str::<ConfigFile>(&text).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?
    } else if required {
        return Err(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        });
    } else {
        ConfigFile::default()
    };

    let config = Config {
        server: file.server,
        llm: file.llm,
        prompt: file.prompt,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Convenience wrapper: reads `TOUCHLINE_CONFIG` (or the default path
/// relative to the working directory) and `OPENAI_API_KEY`.
pub fn load_config() -> Result<Config, ConfigError> {
    let credentials = CredentialsConfig {
        openai_api_key: std::env::var(API_KEY_ENV).ok(),
    };

    match std::env::var(CONFIG_PATH_ENV) {
        Ok(explicit) => load_config_from(Path::new(&explicit), true, credentials),
        Err(_) => load_config_from(Path::new(DEFAULT_CONFIG_PATH), false, credentials),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.server.host.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "server.host".into(),
            message: "must not be empty".into(),
        });
    }

    if config.llm.model.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "llm.model".into(),
            message: "must not be empty".into(),
        });
    }

    let base_url = &config.llm.base_url;
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "llm.base_url".into(),
            message: format!("must start with http:// or https://, got {base_url:?}"),
        });
    }

    if config.llm.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "llm.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    /// Write `contents` to a fresh temp file and return its path.
    fn write_temp_config(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("touchline.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn shipped_config_loads() {
        let path = project_root().join(DEFAULT_CONFIG_PATH);
        let config = load_config_from(&path, true, CredentialsConfig::default())
            .expect("shipped config should be valid");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.llm.timeout(), Duration::from_secs(600));
        assert_eq!(config.prompt.mode, PromptMode::Random);
    }

    #[test]
    fn missing_optional_file_uses_defaults() {
        let path = std::env::temp_dir().join("touchline_config_absent/none.toml");
        let config = load_config_from(&path, false, CredentialsConfig::default()).unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.prompt.mode, PromptMode::Random);
        assert!(config.credentials.openai_api_key.is_none());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let path = std::env::temp_dir().join("touchline_config_absent/required.toml");
        let err = load_config_from(&path, true, CredentialsConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = write_temp_config(
            "touchline_config_partial",
            "[prompt]\nmode = \"structured\"\n\n[server]\nport = 9100\n",
        );
        let config = load_config_from(&path, true, CredentialsConfig::default()).unwrap();

        assert_eq!(config.prompt.mode, PromptMode::Structured);
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.llm.model, "gpt-4o-mini");
    }

    #[test]
    fn credentials_are_passed_through() {
        let path = std::env::temp_dir().join("touchline_config_absent/creds.toml");
        let creds = CredentialsConfig {
            openai_api_key: Some("sk-test".to_string()),
        };
        let config = load_config_from(&path, false, creds).unwrap();
        assert_eq!(config.credentials.openai_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn rejects_unknown_prompt_mode() {
        let path = write_temp_config("touchline_config_bad_mode", "[prompt]\nmode = \"chaotic\"\n");
        let err = load_config_from(&path, true, CredentialsConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        let path = write_temp_config("touchline_config_malformed", "[server\nport = 1\n");
        let err = load_config_from(&path, true, CredentialsConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn rejects_empty_model() {
        let path = write_temp_config("touchline_config_empty_model", "[llm]\nmodel = \"  \"\n");
        let err = load_config_from(&path, true, CredentialsConfig::default()).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "llm.model"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn rejects_base_url_without_scheme() {
        let path = write_temp_config(
            "touchline_config_bad_url",
            "[llm]\nbase_url = \"api.openai.com/v1\"\n",
        );
        let err = load_config_from(&path, true, CredentialsConfig::default()).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "llm.base_url"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_timeout() {
        let path = write_temp_config("touchline_config_zero_timeout", "[llm]\ntimeout_secs = 0\n");
        let err = load_config_from(&path, true, CredentialsConfig::default()).unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "llm.timeout_secs"),
            other => panic!("expected ValidationError, got {other:?}"),
        }
    }
}
