use std::sync::Arc;

use auth::Authenticator;
use auth::TokenType;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Resolves bearer access tokens into active users.
///
/// Two tiers: `authenticated` (valid access token, existing and active user)
/// and `privileged` (the same plus the superuser flag).
pub struct AccessGuard<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AccessGuard<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Authenticated tier.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired, not an access token, or
    ///   subject unknown
    /// * `Forbidden` - User is deactivated
    pub async fn authenticated(&self, access_token: &str) -> Result<User, UserError> {
        let claims = self
            .authenticator
            .validate_token(access_token, TokenType::Access)
            .map_err(|_| UserError::Unauthorized)?;

        let user_id = UserId::from_string(&claims.sub).map_err(|e| {
            tracing::warn!(error = %e, "Access token carries a malformed subject");
            UserError::Unauthorized
        })?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = %user_id, "Access token subject no longer exists");
                UserError::Unauthorized
            })?;

        if !user.is_active {
            tracing::debug!(user_id = %user.id, "Rejected deactivated user");
            return Err(UserError::deactivated());
        }

        Ok(user)
    }

    /// Privileged tier: authenticated tier plus superuser.
    pub async fn privileged(&self, access_token: &str) -> Result<User, UserError> {
        let user = self.authenticated(access_token).await?;
        require_superuser(&user)?;
        Ok(user)
    }
}

/// Fail with `Forbidden` unless the user is a superuser.
pub fn require_superuser(user: &User) -> Result<(), UserError> {
    if user.is_superuser {
        Ok(())
    } else {
        Err(UserError::not_enough_permissions())
    }
}

/// A user may act on their own identity; only a superuser may act on others.
pub fn ensure_can_access(actor: &User, target: &UserId) -> Result<(), UserError> {
    if actor.id == *target || actor.is_superuser {
        Ok(())
    } else {
        Err(UserError::not_enough_permissions())
    }
}
