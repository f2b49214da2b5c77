use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenPair;
use auth::TokenType;

use crate::domain::user::guard::AccessGuard;
use crate::domain::user::models::Amount;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user and token lifecycle operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    guard: AccessGuard<UR>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token handling
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            guard: AccessGuard::new(Arc::clone(&repository), Arc::clone(&authenticator)),
            repository,
            authenticator,
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        self.authenticator
            .hash_password(password)
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))
    }

    async fn find_existing(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateEmail(command.email.to_string()));
        }

        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(UserError::DuplicateUsername(command.username.to_string()));
        }

        let password_hash = self.hash_password(command.password.as_str())?;

        let user = self
            .repository
            .create(NewUser {
                email: command.email,
                username: command.username,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, UserError> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            return Ok(None);
        };

        if !self
            .authenticator
            .verify_password(password, &user.password_hash)
        {
            return Ok(None);
        }

        Ok(Some(user))
    }

    async fn issue_token_pair(&self, user: &User) -> Result<TokenPair, UserError> {
        self.authenticator
            .issue_token_pair(user.id, user.email.as_str())
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))
    }

    async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, UserError> {
        let claims = self
            .authenticator
            .validate_token(refresh_token, TokenType::Refresh)
            .map_err(|_| UserError::InvalidToken)?;

        let user_id = UserId::from_string(&claims.sub).map_err(|_| UserError::InvalidToken)?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(UserError::InvalidToken)?;

        if !user.is_active {
            return Err(UserError::deactivated());
        }

        tracing::debug!(user_id = %user.id, "Refresh token exchanged");

        self.issue_token_pair(&user).await
    }

    async fn current_user(&self, access_token: &str) -> Result<User, UserError> {
        self.guard.authenticated(access_token).await
    }

    async fn current_superuser(&self, access_token: &str) -> Result<User, UserError> {
        self.guard.privileged(access_token).await
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.find_existing(id).await
    }

    async fn list_users(&self, skip: i64, limit: i64) -> Result<Vec<User>, UserError> {
        self.repository.list(skip.max(0), limit.max(0)).await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let current = self.find_existing(id).await?;
        let mut changes = UserChanges::default();

        if let Some(new_email) = command.email.filter(|email| *email != current.email) {
            if self
                .repository
                .find_by_email(new_email.as_str())
                .await?
                .is_some()
            {
                return Err(UserError::DuplicateEmail(new_email.to_string()));
            }
            changes.email = Some(new_email);
        }

        if let Some(new_username) = command
            .username
            .filter(|username| *username != current.username)
        {
            if self
                .repository
                .find_by_username(&new_username)
                .await?
                .is_some()
            {
                return Err(UserError::DuplicateUsername(new_username.to_string()));
            }
            changes.username = Some(new_username);
        }

        if let Some(new_password) = command.password {
            changes.password_hash = Some(self.hash_password(new_password.as_str())?);
        }

        let user = self.repository.update(id, changes).await?;
        tracing::info!(user_id = %user.id, "User updated");

        Ok(user)
    }

    async fn deactivate_user(&self, id: &UserId) -> Result<User, UserError> {
        let user = self.repository.deactivate(id).await?;
        tracing::info!(user_id = %user.id, "User deactivated");

        Ok(user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }

    async fn deposit(&self, id: &UserId, amount: Amount) -> Result<User, UserError> {
        let user = self.repository.deposit(id, amount.value()).await?;
        tracing::info!(user_id = %id, amount = %amount, balance = %user.balance, "Balance deposited");

        Ok(user)
    }

    async fn withdraw(&self, id: &UserId, amount: Amount) -> Result<User, UserError> {
        let user = self.repository.withdraw(id, amount.value()).await?;
        tracing::info!(user_id = %id, amount = %amount, balance = %user.balance, "Balance withdrawn");

        Ok(user)
    }
}
