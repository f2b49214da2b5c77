use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenType;
use super::errors::JwtError;
use super::settings::TokenSettings;

/// Signs and verifies access and refresh tokens with a single shared secret.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtHandler {
    /// Create a handler from immutable token settings.
    pub fn new(settings: &TokenSettings) -> Self {
        let mut validation = Validation::new(settings.algorithm());
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(settings.secret()),
            decoding_key: DecodingKey::from_secret(settings.secret()),
            algorithm: settings.algorithm(),
            validation,
            access_ttl: settings.access_ttl(),
            refresh_ttl: settings.refresh_ttl(),
        }
    }

    /// Sign a token of the given type expiring `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: impl ToString,
        email: &str,
        token_type: TokenType,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(subject, email, token_type, ttl);
        self.encode(&claims)
    }

    /// Sign an access token with the configured access lifetime.
    pub fn issue_access(&self, subject: impl ToString, email: &str) -> Result<String, JwtError> {
        self.issue(subject, email, TokenType::Access, self.access_ttl)
    }

    /// Sign a refresh token with the configured refresh lifetime.
    pub fn issue_refresh(&self, subject: impl ToString, email: &str) -> Result<String, JwtError> {
        self.issue(subject, email, TokenType::Refresh, self.refresh_ttl)
    }

    fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify signature and expiry, then return the claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, malformed payload, missing claim or
    ///   expired token. The reason is only logged.
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(reason = ?e.kind(), "Token rejected");
                JwtError::InvalidToken
            })
    }

    /// Decode and additionally require the `type` claim to match.
    pub fn decode_as(&self, token: &str, expected: TokenType) -> Result<Claims, JwtError> {
        let claims = self.decode(token)?;

        if claims.token_type != expected {
            tracing::debug!(
                expected = %expected,
                actual = %claims.token_type,
                "Token rejected: wrong type"
            );
            return Err(JwtError::InvalidToken);
        }

        Ok(claims)
    }

    /// True only if the token decodes and carries the expected type.
    pub fn verify_type(&self, token: &str, expected: TokenType) -> bool {
        self.decode_as(token, expected).is_ok()
    }
}
