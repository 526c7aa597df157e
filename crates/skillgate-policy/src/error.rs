//! Policy error types.

/// Errors raised while reading tool policies.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("invalid tool policy: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PolicyError>;
