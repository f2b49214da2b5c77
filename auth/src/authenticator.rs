use serde::Deserialize;
use serde::Serialize;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::TokenSettings;
use crate::jwt::TokenType;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password hashing and token handling.
///
/// Holds no per-user state: everything it needs is fixed at construction.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Access and refresh token issued together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `settings` - Secret, algorithm and token lifetimes
    pub fn new(settings: &TokenSettings) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(settings),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored digest.
    pub fn verify_password(&self, password: &str, digest: &str) -> bool {
        self.password_hasher.verify(password, digest)
    }

    /// Issue an access token and a refresh token for the same subject.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token_pair(
        &self,
        subject: impl ToString,
        email: &str,
    ) -> Result<TokenPair, JwtError> {
        let subject = subject.to_string();

        Ok(TokenPair {
            access_token: self.jwt_handler.issue_access(&subject, email)?,
            refresh_token: self.jwt_handler.issue_refresh(&subject, email)?,
        })
    }

    /// Decode a token and require it to be of the expected type.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is invalid, expired or of the wrong type
    pub fn validate_token(&self, token: &str, expected: TokenType) -> Result<Claims, JwtError> {
        self.jwt_handler.decode_as(token, expected)
    }

    /// True only if the token is valid and of the expected type.
    pub fn verify_token_type(&self, token: &str, expected: TokenType) -> bool {
        self.jwt_handler.verify_type(token, expected)
    }

    pub fn jwt_handler(&self) -> &JwtHandler {
        &self.jwt_handler
    }
}
