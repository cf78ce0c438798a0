use thiserror::Error;

/// Errors from the generation engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The next-prime primitive is unavailable or misbehaving in this
    /// runtime. Fatal at startup; there is no recovery.
    #[error("next-prime primitive unavailable: {0}")]
    MissingCapability(String),

    /// Generation was requested with an unusable configuration, such as a
    /// zero block size. Surfaced before any prime is generated.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
