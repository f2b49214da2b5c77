//! Authentication utilities library
//!
//! Provides the stateless authentication building blocks used by the auth service:
//! - Password hashing (Argon2id)
//! - Access/refresh JWT issuance and validation
//! - An `Authenticator` coordinating both
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## Token Pairs
//! ```
//! use auth::{Authenticator, TokenSettings, TokenType};
//!
//! let settings = TokenSettings::new("secret_key_at_least_32_bytes_long!");
//! let auth = Authenticator::new(&settings);
//!
//! let pair = auth.issue_token_pair(42, "alice@example.com").unwrap();
//! let claims = auth.validate_token(&pair.access_token, TokenType::Access).unwrap();
//! assert_eq!(claims.sub, "42");
//!
//! // A refresh token is never accepted where an access token is required
//! assert!(auth.validate_token(&pair.refresh_token, TokenType::Access).is_err());
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenSettings;
pub use jwt::TokenType;
pub use password::PasswordError;
pub use password::PasswordHasher;
