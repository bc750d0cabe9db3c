//! Session — the account currently authenticated in this client instance.
//!
//! Sessions are process-local: the token identifies the running client and
//! is never persisted. Dropping (or explicitly closing) the session is a
//! logout; the drawing log and message log require a `&Session`, which is
//! how authentication gates those features.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt::Write;

use rand::Rng;
use tracing::info;

use crate::model::{Account, AccountId, Role};
use crate::services::accounts::{self, AccountError};
use crate::state::Mirror;

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// The currently authenticated account for this client instance.
#[derive(Debug, Clone)]
pub struct Session {
    account: Account,
    token: String,
}

impl Session {
    pub(crate) fn new(account: Account) -> Self {
        Self { token: generate_token(), account }
    }

    /// The authenticated account.
    #[must_use]
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Id of the authenticated account.
    #[must_use]
    pub fn user_id(&self) -> AccountId {
        self.account.id
    }

    /// Username of the authenticated account.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.account.username
    }

    /// Role of the authenticated account.
    #[must_use]
    pub fn role(&self) -> Role {
        self.account.role
    }

    /// Whether the authenticated account is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.account.role.is_admin()
    }

    /// Process-local session token. Never persisted.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Close the session.
    pub fn logout(self) {
        info!(username = %self.account.username, "session closed");
    }
}

/// Authenticate against the account directory and open a session.
///
/// # Errors
///
/// Returns `AuthenticationFailed` on a credential miss.
pub fn login(mirror: &Mirror, username: &str, password: &str) -> Result<Session, AccountError> {
    let account = accounts::authenticate(mirror, username, password)?;
    info!(username = %account.username, role = ?account.role, "session opened");
    Ok(Session::new(account))
}

/// Register a new account and open a session for it in one step.
///
/// # Errors
///
/// Returns `AlreadyExists` if the username is taken, or `Storage` if the
/// durable write failed (the account remains in memory; see
/// [`accounts::register`]).
pub fn register(mirror: &mut Mirror, username: &str, password: &str) -> Result<Session, AccountError> {
    let account = accounts::register(mirror, username, password)?;
    info!(username = %account.username, "session opened for new account");
    Ok(Session::new(account))
}
