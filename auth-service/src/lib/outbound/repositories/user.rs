use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::user::models::Amount;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::AmountError;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = "id, email, username, password_hash, is_active, is_superuser, \
                            is_verified, balance, created_at, updated_at";

/// PostgreSQL implementation of UserRepository.
///
/// Uniqueness of email and username is enforced by the `users_email_key` and
/// `users_username_key` constraints.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape of the `users` table.
#[derive(Debug, sqlx::FromRow)]
struct UserRecord {
    id: i64,
    email: String,
    username: String,
    password_hash: String,
    is_active: bool,
    is_superuser: bool,
    is_verified: bool,
    balance: Decimal,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRecord> for User {
    type Error = UserError;

    fn try_from(r: UserRecord) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(r.id),
            email: EmailAddress::new(r.email)?,
            username: Username::new(r.username)?,
            password_hash: r.password_hash,
            is_active: r.is_active,
            is_superuser: r.is_superuser,
            is_verified: r.is_verified,
            balance: r.balance,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

fn select_where(column: &str) -> String {
    format!("SELECT {} FROM users WHERE {} = $1", USER_COLUMNS, column)
}

/// Translate unique violations into domain errors by constraint name.
fn map_write_error(
    e: sqlx::Error,
    email: Option<&EmailAddress>,
    username: Option<&Username>,
) -> UserError {
    let shown = |value: Option<&str>| value.unwrap_or_default().to_string();

    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some("users_email_key") => {
                    return UserError::DuplicateEmail(shown(email.map(|e| e.as_str())))
                }
                Some("users_username_key") => {
                    return UserError::DuplicateUsername(shown(username.map(|u| u.as_str())))
                }
                _ => {}
            }
        }
    }
    UserError::DatabaseError(e.to_string())
}

/// `numeric_value_out_of_range`: the balance no longer fits `NUMERIC(12, 2)`.
fn map_balance_error(e: sqlx::Error) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.code().as_deref() == Some("22003") {
            return UserError::InvalidAmount(AmountError::BalanceLimitExceeded {
                max: Amount::max(),
            });
        }
    }
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let sql = format!(
            r#"
            INSERT INTO users (email, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(user.email.as_str())
            .bind(user.username.as_str())
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, Some(&user.email), Some(&user.username)))?;

        User::try_from(record)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let sql = select_where("id");

        sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let sql = select_where("email");

        sqlx::query_as::<_, UserRecord>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let sql = select_where("username");

        sqlx::query_as::<_, UserRecord>(&sql)
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .map(User::try_from)
            .transpose()
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<User>, UserError> {
        let sql = format!(
            "SELECT {} FROM users ORDER BY id OFFSET $1 LIMIT $2",
            USER_COLUMNS
        );

        let records = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(skip)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        records.into_iter().map(User::try_from).collect()
    }

    async fn update(&self, id: &UserId, changes: UserChanges) -> Result<User, UserError> {
        let sql = format!(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                username = COALESCE($3, username),
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id.0)
            .bind(changes.email.as_ref().map(|e| e.as_str()))
            .bind(changes.username.as_ref().map(|u| u.as_str()))
            .bind(changes.password_hash.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                map_write_error(e, changes.email.as_ref(), changes.username.as_ref())
            })?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        User::try_from(record)
    }

    async fn deactivate(&self, id: &UserId) -> Result<User, UserError> {
        let sql = format!(
            r#"
            UPDATE users
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        User::try_from(record)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn deposit(&self, id: &UserId, amount: Decimal) -> Result<User, UserError> {
        let sql = format!(
            r#"
            UPDATE users
            SET balance = balance + $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id.0)
            .bind(amount)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_balance_error)?
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        User::try_from(record)
    }

    async fn withdraw(&self, id: &UserId, amount: Decimal) -> Result<User, UserError> {
        let sql = format!(
            r#"
            UPDATE users
            SET balance = balance - $2, updated_at = NOW()
            WHERE id = $1 AND balance >= $2
            RETURNING {}
            "#,
            USER_COLUMNS
        );

        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id.0)
            .bind(amount)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        match record {
            Some(record) => User::try_from(record),
            None => match self.find_by_id(id).await? {
                Some(user) => Err(UserError::InsufficientFunds {
                    balance: user.balance,
                }),
                None => Err(UserError::NotFound(id.to_string())),
            },
        }
    }
}
