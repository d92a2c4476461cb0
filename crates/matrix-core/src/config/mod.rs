//! Configuration system for Matrix.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod instrument_config;
pub mod matrix_config;
pub mod runtime_config;

pub use instrument_config::{InstrumentConfig, LifecycleConfig, LifecycleScope};
pub use matrix_config::{is_identifier, ConfigOverrides, MatrixConfig};
pub use runtime_config::RuntimeConfig;
