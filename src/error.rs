use thiserror::Error;

/// Anything that goes wrong between handing a record to a provider and getting
/// a roast back. The session treats every variant the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("roast service unreachable: {0}")]
    Transport(String),
    #[error("roast service returned {0}")]
    Status(u16),
    #[error("malformed roast response: {0}")]
    Malformed(String),
    #[error("no roast available: {0}")]
    Empty(String),
}

/// A platform feature the presenter asked for is missing or refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityError {
    #[error("{0} is not available on this platform")]
    Unavailable(&'static str),
    #[error("{capability} failed: {reason}")]
    Failed {
        capability: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The user dismissed the share sheet. Not a failure.
    #[error("share cancelled")]
    Cancelled,
    #[error(transparent)]
    Capability(#[from] CapabilityError),
}
