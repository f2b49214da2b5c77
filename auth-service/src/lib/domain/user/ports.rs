use async_trait::async_trait;
use auth::TokenPair;
use rust_decimal::Decimal;

use crate::domain::user::models::Amount;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;

/// Port for user lifecycle, token and access-control operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Returns
    /// Created user (active, not superuser, zero balance)
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DuplicateUsername` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Check credentials.
    ///
    /// # Returns
    /// `None` both for an unknown email and for a wrong password
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, UserError>;

    /// Issue an access/refresh token pair for a user.
    ///
    /// # Errors
    /// * `Unknown` - Token signing failed
    async fn issue_token_pair(&self, user: &User) -> Result<TokenPair, UserError>;

    /// Exchange a refresh token for a fresh token pair.
    ///
    /// The presented refresh token stays valid until it expires.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is invalid, expired, not a refresh token, or
    ///   its subject does not exist
    /// * `Forbidden` - Subject is deactivated
    async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, UserError>;

    /// Resolve the user behind a bearer access token.
    ///
    /// # Errors
    /// * `Unauthorized` - Token is invalid, expired, not an access token, or
    ///   its subject does not exist
    /// * `Forbidden` - User is deactivated
    async fn current_user(&self, access_token: &str) -> Result<User, UserError>;

    /// Resolve the user behind a bearer access token and require superuser.
    ///
    /// # Errors
    /// * Everything `current_user` returns
    /// * `Forbidden` - User is not a superuser
    async fn current_superuser(&self, access_token: &str) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// List users ordered by identifier.
    async fn list_users(&self, skip: i64, limit: i64) -> Result<Vec<User>, UserError>;

    /// Update an existing user with optional fields.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DuplicateEmail` - New email belongs to another user
    /// * `DuplicateUsername` - New username belongs to another user
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Mark a user inactive. Already issued tokens are not revoked.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn deactivate_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Permanently delete a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;

    /// Add `amount` to the user's balance.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `InvalidAmount` - Resulting balance exceeds `Amount::max()`
    async fn deposit(&self, id: &UserId, amount: Amount) -> Result<User, UserError>;

    /// Subtract `amount` from the user's balance.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `InsufficientFunds` - Balance is lower than `amount`
    async fn withdraw(&self, id: &UserId, amount: Amount) -> Result<User, UserError>;
}

/// Persistence operations for user identities.
///
/// Implementations enforce email and username uniqueness themselves; callers'
/// pre-checks are an optimization only.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user and assign its identifier.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `DuplicateUsername` - Username is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user by username.
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;

    /// Retrieve a page of users ordered by identifier.
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<User>, UserError>;

    /// Apply profile changes in a single write and stamp `updated_at`.
    ///
    /// Only the columns set in `changes` are written.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DuplicateEmail` - Email belongs to another user
    /// * `DuplicateUsername` - Username belongs to another user
    async fn update(&self, id: &UserId, changes: UserChanges) -> Result<User, UserError>;

    /// Clear the active flag in a single write.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn deactivate(&self, id: &UserId) -> Result<User, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;

    /// Atomically add to the balance.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `InvalidAmount` - Resulting balance exceeds `Amount::max()`
    async fn deposit(&self, id: &UserId, amount: Decimal) -> Result<User, UserError>;

    /// Atomically subtract from the balance, never going below zero.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `InsufficientFunds` - Balance is lower than `amount`
    async fn withdraw(&self, id: &UserId, amount: Decimal) -> Result<User, UserError>;
}

#[cfg(test)]
pub(crate) mod mocks {
    use mockall::mock;

    use super::*;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn list(&self, skip: i64, limit: i64) -> Result<Vec<User>, UserError>;
            async fn update(&self, id: &UserId, changes: UserChanges) -> Result<User, UserError>;
            async fn deactivate(&self, id: &UserId) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
            async fn deposit(&self, id: &UserId, amount: Decimal) -> Result<User, UserError>;
            async fn withdraw(&self, id: &UserId, amount: Decimal) -> Result<User, UserError>;
        }
    }
}
