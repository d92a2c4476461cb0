//! Top-level Matrix configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{InstrumentConfig, LifecycleScope, RuntimeConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "matrix.toml";

/// Top-level configuration aggregating the build-time and runtime sections.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`MATRIX_*`)
/// 3. Project config (`matrix.toml` in project root)
/// 4. User config (`~/.matrix/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MatrixConfig {
    pub instrument: InstrumentConfig,
    pub runtime: RuntimeConfig,
}

/// Override arguments a host can apply on top of files and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub global_binding: Option<String>,
    pub config_module: Option<String>,
    pub lifecycle_scope: Option<LifecycleScope>,
    pub tracked_components: Option<Vec<String>>,
    pub endpoint_url: Option<String>,
    pub flush_interval_secs: Option<u64>,
}

impl MatrixConfig {
    /// Load configuration with layered resolution, then validate it.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &MatrixConfig) -> Result<(), ConfigError> {
        let binding = config.instrument.effective_global_binding();
        if !is_identifier(binding) {
            return Err(ConfigError::ValidationFailed {
                field: "instrument.global_binding".to_string(),
                message: format!("`{binding}` is not a valid identifier"),
            });
        }
        if config.instrument.effective_client_module().trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "instrument.client_module".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if config.instrument.effective_config_module().trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "instrument.config_module".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        let lifecycle = &config.instrument.lifecycle;
        if lifecycle.effective_scope() == LifecycleScope::AllowList
            && lifecycle.tracked_components.is_empty()
        {
            return Err(ConfigError::ValidationFailed {
                field: "instrument.lifecycle.tracked_components".to_string(),
                message: "allow_list scope requires at least one component".to_string(),
            });
        }
        if config.runtime.effective_flush_interval_secs() == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "runtime.flush_interval_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let endpoint = config.runtime.effective_endpoint_url();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed {
                field: "runtime.endpoint_url".to_string(),
                message: format!("`{endpoint}` is not an http(s) URL"),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.matrix/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".matrix").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut MatrixConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: MatrixConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    fn merge(base: &mut MatrixConfig, other: &MatrixConfig) {
        // Instrument
        if other.instrument.global_binding.is_some() {
            base.instrument.global_binding = other.instrument.global_binding.clone();
        }
        if other.instrument.client_module.is_some() {
            base.instrument.client_module = other.instrument.client_module.clone();
        }
        if other.instrument.config_module.is_some() {
            base.instrument.config_module = other.instrument.config_module.clone();
        }
        if other.instrument.lifecycle.scope.is_some() {
            base.instrument.lifecycle.scope = other.instrument.lifecycle.scope;
        }
        if !other.instrument.lifecycle.tracked_components.is_empty() {
            base.instrument.lifecycle.tracked_components =
                other.instrument.lifecycle.tracked_components.clone();
        }

        // Runtime
        if other.runtime.flush_interval_secs.is_some() {
            base.runtime.flush_interval_secs = other.runtime.flush_interval_secs;
        }
        if other.runtime.endpoint_url.is_some() {
            base.runtime.endpoint_url = other.runtime.endpoint_url.clone();
        }
        if other.runtime.request_timeout_secs.is_some() {
            base.runtime.request_timeout_secs = other.runtime.request_timeout_secs;
        }
        if other.runtime.flush_on_shutdown.is_some() {
            base.runtime.flush_on_shutdown = other.runtime.flush_on_shutdown;
        }
        if !other.runtime.tracked_route_names.is_empty() {
            base.runtime.tracked_route_names = other.runtime.tracked_route_names.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `MATRIX_GLOBAL_BINDING`, `MATRIX_FLUSH_INTERVAL_SECS`, etc.
    fn apply_env_overrides(config: &mut MatrixConfig) {
        if let Ok(val) = std::env::var("MATRIX_GLOBAL_BINDING") {
            config.instrument.global_binding = Some(val);
        }
        if let Ok(val) = std::env::var("MATRIX_CLIENT_MODULE") {
            config.instrument.client_module = Some(val);
        }
        if let Ok(val) = std::env::var("MATRIX_CONFIG_MODULE") {
            config.instrument.config_module = Some(val);
        }
        if let Ok(val) = std::env::var("MATRIX_LIFECYCLE_SCOPE") {
            match val.as_str() {
                "all" => config.instrument.lifecycle.scope = Some(LifecycleScope::All),
                "allow_list" => {
                    config.instrument.lifecycle.scope = Some(LifecycleScope::AllowList)
                }
                other => ::tracing::warn!(value = other, "ignoring unknown MATRIX_LIFECYCLE_SCOPE"),
            }
        }
        if let Ok(val) = std::env::var("MATRIX_FLUSH_INTERVAL_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.runtime.flush_interval_secs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("MATRIX_ENDPOINT_URL") {
            config.runtime.endpoint_url = Some(val);
        }
        if let Ok(val) = std::env::var("MATRIX_FLUSH_ON_SHUTDOWN") {
            if let Ok(v) = val.parse::<bool>() {
                config.runtime.flush_on_shutdown = Some(v);
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut MatrixConfig, overrides: &ConfigOverrides) {
        if let Some(ref v) = overrides.global_binding {
            config.instrument.global_binding = Some(v.clone());
        }
        if let Some(ref v) = overrides.config_module {
            config.instrument.config_module = Some(v.clone());
        }
        if let Some(v) = overrides.lifecycle_scope {
            config.instrument.lifecycle.scope = Some(v);
        }
        if let Some(ref v) = overrides.tracked_components {
            config.instrument.lifecycle.tracked_components = v.clone();
        }
        if let Some(ref v) = overrides.endpoint_url {
            config.runtime.endpoint_url = Some(v.clone());
        }
        if let Some(v) = overrides.flush_interval_secs {
            config.runtime.flush_interval_secs = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Whether `name` is a plain JavaScript identifier (ASCII subset).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
