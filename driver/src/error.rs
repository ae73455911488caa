use thiserror::Error;

/// Failures that belong to the driver, not the engine — config I/O and
/// parsing have no domain meaning to the core.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to read config file '{path}'")]
    ReadConfig { path: String, #[source] source: std::io::Error },

    #[error("failed to parse config file '{path}' as JSON")]
    ParseConfig { path: String, #[source] source: serde_json::Error },

    #[error(transparent)]
    Engine(#[from] engine::EngineError),
}
