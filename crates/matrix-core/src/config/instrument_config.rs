//! Build-time instrumentation configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CLIENT_MODULE, DEFAULT_CONFIG_MODULE, DEFAULT_GLOBAL_BINDING};

/// Configuration for the syntax-tree rewriter.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct InstrumentConfig {
    /// Global binding the client is installed on. Default: `matrixLog`.
    pub global_binding: Option<String>,
    /// Module the bootstrap imports the client from.
    /// Default: `babel-plugin-matrix/matrixLog`.
    pub client_module: Option<String>,
    /// User configuration module exposing the hooks and endpoint.
    /// Default: `./matrixConfig`.
    pub config_module: Option<String>,
    /// Which component classes get lifecycle instrumentation.
    pub lifecycle: LifecycleConfig,
}

impl InstrumentConfig {
    /// Returns the effective global binding, defaulting to `matrixLog`.
    pub fn effective_global_binding(&self) -> &str {
        self.global_binding.as_deref().unwrap_or(DEFAULT_GLOBAL_BINDING)
    }

    /// Returns the effective client module path.
    pub fn effective_client_module(&self) -> &str {
        self.client_module.as_deref().unwrap_or(DEFAULT_CLIENT_MODULE)
    }

    /// Returns the effective configuration module path.
    pub fn effective_config_module(&self) -> &str {
        self.config_module.as_deref().unwrap_or(DEFAULT_CONFIG_MODULE)
    }
}

/// Gate for lifecycle instrumentation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Scope of lifecycle instrumentation. Default: `all`.
    pub scope: Option<LifecycleScope>,
    /// Component class names instrumented when `scope = "allow_list"`.
    #[serde(default)]
    pub tracked_components: Vec<String>,
}

/// Whether lifecycle hooks are added to every component class or only to
/// an allow-list of class names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleScope {
    #[default]
    All,
    AllowList,
}

impl LifecycleConfig {
    /// Returns the effective scope, defaulting to `All`.
    pub fn effective_scope(&self) -> LifecycleScope {
        self.scope.unwrap_or_default()
    }

    /// Whether a class with this name (if any) is admitted by the gate.
    pub fn admits(&self, class_name: Option<&str>) -> bool {
        match self.effective_scope() {
            LifecycleScope::All => true,
            LifecycleScope::AllowList => class_name
                .is_some_and(|name| self.tracked_components.iter().any(|c| c == name)),
        }
    }
}
