//! Account directory — credential lookup, existence checks, registration.
//!
//! DESIGN
//! ======
//! Accounts live in the mirror; lookups are linear scans over the small
//! account collection. Passwords are stored as salted SHA-256 digests and
//! verified by recomputing the digest. Comparison is not constant-time.

use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::info;
use uuid::Uuid;

use crate::consts::PLACEHOLDER_ORIGIN;
use crate::error::ErrorCode;
use crate::model::{Account, Role};
use crate::session::bytes_to_hex;
use crate::state::Mirror;
use crate::store::StoreError;

const SALT_LEN: usize = 16;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("invalid username or password")]
    AuthenticationFailed,
    #[error("username already taken: {0}")]
    AlreadyExists(String),
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ErrorCode for AccountError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "E_AUTH_FAILED",
            Self::AlreadyExists(_) => "E_ALREADY_EXISTS",
            Self::Storage(_) => "E_STORAGE",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Storage(e) => e.retryable(),
            _ => false,
        }
    }
}

// =============================================================================
// CREDENTIALS
// =============================================================================

pub(crate) fn generate_salt() -> String {
    let bytes: [u8; SALT_LEN] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Digest a password with its salt: hex SHA-256 of the salt followed by the
/// password.
#[must_use]
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    let bytes = hasher.finalize();
    bytes.iter().map(|b| format!("{b:02x}")).collect::<String>()
}

/// Whether `password` matches the account's stored digest.
#[must_use]
pub fn verify_password(account: &Account, password: &str) -> bool {
    hash_password(&account.salt, password) == account.password_hash
}

pub(crate) fn build_account(username: &str, password: &str, role: Role) -> Account {
    let salt = generate_salt();
    let password_hash = hash_password(&salt, password);
    Account {
        id: Uuid::new_v4(),
        username: username.to_owned(),
        password_hash,
        salt,
        ip: PLACEHOLDER_ORIGIN.to_owned(),
        role,
    }
}

// =============================================================================
// DIRECTORY OPERATIONS
// =============================================================================

/// Look up an account by exact username and password match. Case-sensitive.
///
/// # Errors
///
/// Returns `AuthenticationFailed` on any miss; the caller cannot tell a
/// wrong password from an unknown username. No lockout or rate limiting.
pub fn authenticate(mirror: &Mirror, username: &str, password: &str) -> Result<Account, AccountError> {
    mirror
        .accounts()
        .iter()
        .find(|a| a.username == username && verify_password(a, password))
        .cloned()
        .ok_or(AccountError::AuthenticationFailed)
}

/// Whether any account already uses `username`. Case-sensitive.
#[must_use]
pub fn exists(mirror: &Mirror, username: &str) -> bool {
    mirror.accounts().iter().any(|a| a.username == username)
}

/// Register a new member account and persist the updated collection.
///
/// # Errors
///
/// Returns `AlreadyExists` if the username is taken. Returns `Storage` if
/// the durable write failed; the account is still present in memory and
/// [`Mirror::flush_accounts`] retries the write.
pub fn register(mirror: &mut Mirror, username: &str, password: &str) -> Result<Account, AccountError> {
    if exists(mirror, username) {
        return Err(AccountError::AlreadyExists(username.to_owned()));
    }

    let account = build_account(username, password, Role::Member);
    let created = account.clone();
    mirror.push_account(account)?;

    info!(username, id = %created.id, "registered account");
    Ok(created)
}

#[cfg(test)]
#[path = "accounts_test.rs"]
mod tests;
