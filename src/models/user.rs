//! User accounts and login sessions
//!
//! Passwords are hashed with Argon2id and stored as PHC strings; the
//! plaintext is never persisted.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

const MAX_USERNAME_LEN: usize = 32;
const MIN_PASSWORD_LEN: usize = 4;

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    pub username: String,

    /// Argon2id PHC hash string
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user, hashing the given password
    pub fn new(username: impl Into<String>, password: &str) -> Result<Self, UserValidationError> {
        let username = username.into().trim().to_string();
        validate_username(&username)?;
        validate_password(password)?;

        Ok(Self {
            id: UserId::new(),
            username,
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        })
    }

    /// Check a candidate password against the stored hash
    pub fn verify_password(&self, password: &str) -> bool {
        match PasswordHash::new(&self.password_hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.username)
    }
}

fn hash_password(password: &str) -> Result<String, UserValidationError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserValidationError::Hashing(e.to_string()))
}

fn validate_username(username: &str) -> Result<(), UserValidationError> {
    if username.is_empty() {
        return Err(UserValidationError::EmptyUsername);
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(UserValidationError::UsernameTooLong(username.chars().count()));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(UserValidationError::UsernameWhitespace);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(UserValidationError::PasswordTooShort);
    }
    Ok(())
}

/// The logged-in user, passed explicitly to every service call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            logged_in_at: Utc::now(),
        }
    }
}

/// Validation errors for users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong(usize),
    UsernameWhitespace,
    PasswordTooShort,
    Hashing(String),
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "Username cannot be empty"),
            Self::UsernameTooLong(len) => write!(
                f,
                "Username too long ({} chars, max {})",
                len, MAX_USERNAME_LEN
            ),
            Self::UsernameWhitespace => write!(f, "Username cannot contain spaces"),
            Self::PasswordTooShort => write!(
                f,
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            ),
            Self::Hashing(e) => write!(f, "Failed to hash password: {}", e),
        }
    }
}

impl std::error::Error for UserValidationError {}
