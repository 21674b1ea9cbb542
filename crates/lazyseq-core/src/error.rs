use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    // Built by the operators' fatal path when their own bookkeeping
    // disagrees with the buffer they drive. Never recoverable.
    #[error("Internal invariant failed: {0}")]
    Invariant(String),
}
