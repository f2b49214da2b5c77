use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;

use super::errors::JwtError;

/// Immutable token configuration, built once at process start.
#[derive(Clone)]
pub struct TokenSettings {
    secret: Vec<u8>,
    algorithm: Algorithm,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenSettings {
    pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 30;
    pub const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;

    /// Settings with HS256 and the default lifetimes (30 minutes / 7 days).
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Rotating the secret invalidates every outstanding token
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            access_ttl: Duration::minutes(Self::DEFAULT_ACCESS_TTL_MINUTES),
            refresh_ttl: Duration::days(Self::DEFAULT_REFRESH_TTL_DAYS),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    /// Parse an algorithm name, accepting only the HMAC family.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Unknown name or an asymmetric algorithm
    pub fn parse_algorithm(name: &str) -> Result<Algorithm, JwtError> {
        match Algorithm::from_str(name) {
            Ok(algorithm @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => {
                Ok(algorithm)
            }
            _ => Err(JwtError::UnsupportedAlgorithm(name.to_string())),
        }
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}
