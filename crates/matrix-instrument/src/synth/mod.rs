//! Code synthesizer: structural construction of injected fragments.
//!
//! Every fragment is assembled from typed nodes. Record values travel as
//! string-literal nodes, so no text ever needs escaping here.

mod bootstrap;
mod logging;

use matrix_core::config::InstrumentConfig;

/// Object the client is installed on.
pub const GLOBAL_OBJECT: &str = "global";
/// Client method that buffers a record.
pub const APPEND_LOG_METHOD: &str = "appendLog";
/// Rest parameter of a callback wrapper.
pub const WRAPPER_ARGS: &str = "__matrixArgs";
/// Local that binds the wrapped original.
pub const WRAPPER_CALLBACK: &str = "__matrixCallback";

/// Builds injected code for one build's configuration.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    binding: String,
    client_module: String,
    config_module: String,
}

impl Synthesizer {
    pub fn new(config: &InstrumentConfig) -> Self {
        Self {
            binding: config.effective_global_binding().to_string(),
            client_module: config.effective_client_module().to_string(),
            config_module: config.effective_config_module().to_string(),
        }
    }

    /// Global the client is reachable through.
    pub fn binding(&self) -> &str {
        &self.binding
    }

    pub fn client_module(&self) -> &str {
        &self.client_module
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new(&InstrumentConfig::default())
    }
}
