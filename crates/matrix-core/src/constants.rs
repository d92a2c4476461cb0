//! Compiled defaults shared by the build-time engine and the runtime batcher.

/// Default collector endpoint for flushed batches.
pub const DEFAULT_ENDPOINT_URL: &str = "https://freegolog.ofo.com/report/v1";

/// Default flush period of the runtime batcher, in seconds.
pub const DEFAULT_FLUSH_INTERVAL_SECS: u64 = 8;

/// Global binding the generated bootstrap installs the client on.
pub const DEFAULT_GLOBAL_BINDING: &str = "matrixLog";

/// Module the generated bootstrap imports the telemetry client from.
pub const DEFAULT_CLIENT_MODULE: &str = "babel-plugin-matrix/matrixLog";

/// User configuration module imported by the generated bootstrap.
pub const DEFAULT_CONFIG_MODULE: &str = "./matrixConfig";

/// Literal record appended once when the bootstrap runs.
pub const STARTUP_MARKER: &str = "Matrixlog starts recording.";

/// `elementType` used for lifecycle-hook records.
pub const FUNCTION_ELEMENT_KIND: &str = "function";

/// Mount hook instrumented on component classes.
pub const COMPONENT_DID_MOUNT: &str = "componentDidMount";

/// Unmount hook instrumented on component classes.
pub const COMPONENT_WILL_UNMOUNT: &str = "componentWillUnmount";

/// Lifecycle hooks in the order they are checked.
pub const LIFECYCLE_HOOKS: [&str; 2] = [COMPONENT_DID_MOUNT, COMPONENT_WILL_UNMOUNT];

/// Base classes that mark a class as a UI component.
pub const COMPONENT_BASE_CLASSES: [&str; 2] = ["Component", "PureComponent"];

/// Object and member of the application entry call.
pub const ENTRY_OBJECT: &str = "AppRegistry";
pub const ENTRY_METHOD: &str = "registerComponent";

/// Source-file suffixes stripped before event-id derivation.
pub const SOURCE_SUFFIXES: [&str; 4] = [".tsx", ".jsx", ".ts", ".js"];

/// Maximum number of trailing path segments kept in an event id.
pub const EVENT_ID_SEGMENTS: usize = 3;
