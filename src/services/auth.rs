//! Authentication service implementation
//!
//! Handles account registration and credential checks against the user
//! table. Passwords are stored only as salted Argon2id hashes and verified
//! with the password-hash crate's constant-time comparison. Successful
//! authentication yields an explicit [`Session`] that staff-gated operations
//! take as an argument.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::database::repositories::UserRepository;
use crate::models::user::{CreateUserRequest, NewUserAccount, User};
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::helpers::is_valid_email;
use crate::utils::logging::log_user_action;

/// Identity established by authentication, passed to operations that need it
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub is_staff: bool,
}

impl Session {
    /// Require the staff role for event management operations
    pub fn require_staff(&self) -> Result<()> {
        if self.is_staff {
            Ok(())
        } else {
            Err(EventDeskError::PermissionDenied(format!(
                "User {} is not staff",
                self.username
            )))
        }
    }
}

/// Authentication service for account registration and credential checks
#[derive(Debug, Clone)]
pub struct AuthService {
    users: UserRepository,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Register a new user account
    pub async fn register(&self, account: NewUserAccount) -> Result<User> {
        if account.username.trim().is_empty() {
            return Err(EventDeskError::InvalidInput(
                "Username must not be empty".to_string(),
            ));
        }
        if account.password.is_empty() {
            return Err(EventDeskError::InvalidInput(
                "Password must not be empty".to_string(),
            ));
        }
        if !is_valid_email(&account.email) {
            return Err(EventDeskError::InvalidInput(format!(
                "Invalid email address: {}",
                account.email
            )));
        }

        let request = CreateUserRequest {
            username: account.username,
            password_hash: hash_password(&account.password)?,
            email: account.email,
            is_staff: account.is_staff,
        };

        let user = self.users.create(request).await?;
        log_user_action(user.id, "register", Some(&user.username));
        Ok(user)
    }

    /// Authenticate a user by username and password.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Session> {
        let invalid = || EventDeskError::Authentication("Invalid credentials".to_string());

        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(invalid());
        }

        log_user_action(user.id, "login", None);
        Ok(Session {
            user_id: user.id,
            username: user.username,
            is_staff: user.is_staff,
        })
    }
}

/// Hash a password with Argon2id and a freshly generated salt
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| EventDeskError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash in constant time
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| EventDeskError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
