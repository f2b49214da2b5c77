use std::fmt;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Discriminates what a token may be used for.
///
/// Serialized as the `type` claim (`"access"` or `"refresh"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived credential authorizing API requests.
    Access,
    /// Long-lived credential only good for obtaining a new token pair.
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claim set carried by every access and refresh token.
///
/// `sub`, `email`, `exp` and `type` are mandatory: a payload missing any of
/// them fails to deserialize and the token is rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (string-encoded user identifier)
    pub sub: String,

    /// Email of the subject at issuance time
    pub email: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: i64,

    /// Unique token identifier
    #[serde(default)]
    pub jti: String,

    /// Access or refresh
    #[serde(rename = "type")]
    pub token_type: TokenType,
}

impl Claims {
    /// Build a claim set expiring `ttl` from now.
    ///
    /// The expiry is always derived from the server clock at issuance.
    ///
    /// # Arguments
    /// * `subject` - User identifier
    /// * `email` - User email embedded as a claim
    /// * `token_type` - Access or refresh
    /// * `ttl` - Lifetime of the token
    pub fn new(
        subject: impl ToString,
        email: impl Into<String>,
        token_type: TokenType,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.to_string(),
            email: email.into(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claims() {
        let claims = Claims::new(42, "a@x.com", TokenType::Access, Duration::minutes(30));

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.token_type, TokenType::Access);
        assert_eq!(claims.exp - claims.iat, 30 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_jti_is_unique() {
        let first = Claims::new(1, "a@x.com", TokenType::Refresh, Duration::days(7));
        let second = Claims::new(1, "a@x.com", TokenType::Refresh, Duration::days(7));

        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_type_claim_serialization() {
        let claims = Claims::new(7, "a@x.com", TokenType::Refresh, Duration::days(1));
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["type"], "refresh");
        assert_eq!(value["sub"], "7");
        assert!(value.get("token_type").is_none());
    }

    #[test]
    fn test_missing_type_claim_is_rejected() {
        let payload = serde_json::json!({
            "sub": "1",
            "email": "a@x.com",
            "exp": 9999999999i64
        });

        assert!(serde_json::from_value::<Claims>(payload).is_err());
    }

    #[test]
    fn test_unknown_type_claim_is_rejected() {
        let payload = serde_json::json!({
            "sub": "1",
            "email": "a@x.com",
            "exp": 9999999999i64,
            "type": "mfa"
        });

        assert!(serde_json::from_value::<Claims>(payload).is_err());
    }
}
