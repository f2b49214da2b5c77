use rust_decimal::Decimal;
use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for password policy violations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for balance operation amounts
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount must be positive, got {0}")]
    NotPositive(Decimal),

    #[error("Amount {value} has more than {max_scale} decimal places")]
    TooPrecise { max_scale: u32, value: Decimal },

    #[error("Amount {value} exceeds the maximum of {max}")]
    TooLarge { max: Decimal, value: Decimal },

    #[error("Resulting balance would exceed the maximum of {max}")]
    BalanceLimitExceeded { max: Decimal },
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    // Domain-level errors
    #[error("Email already registered")]
    DuplicateEmail(String),

    #[error("Username already taken")]
    DuplicateUsername(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid refresh token")]
    InvalidToken,

    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("Insufficient funds. Current balance: {balance}")]
    InsufficientFunds { balance: Decimal },

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl UserError {
    pub fn deactivated() -> Self {
        UserError::Forbidden("User is deactivated".to_string())
    }

    pub fn not_enough_permissions() -> Self {
        UserError::Forbidden("Not enough permissions".to_string())
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}
