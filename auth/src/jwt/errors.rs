use thiserror::Error;

/// Error type for JWT operations.
///
/// Every decode failure (bad signature, malformed payload, missing claim,
/// expiry, wrong type) collapses into `InvalidToken`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is invalid or expired")]
    InvalidToken,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
