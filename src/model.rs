//! Domain records: accounts, drawing segments, and chat messages.
//!
//! This module defines the data types persisted by the mirror. Data flows in
//! from the store (JSON deserialization) and from the service modules
//! (construction on append). All three record types are immutable once
//! created; the collections they live in are append-only.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Unique identifier for an account.
pub type AccountId = Uuid;

/// Privilege level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The bootstrap administrator.
    Admin,
    /// A self-registered member.
    Member,
}

impl Role {
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// A registered identity with credentials and a role.
///
/// Usernames are unique across the account collection. Accounts are created
/// at registration or first-run bootstrap and never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for this account.
    pub id: AccountId,
    /// Login name; unique, compared case-sensitively.
    pub username: String,
    /// Hex SHA-256 digest of the salt followed by the password.
    pub password_hash: String,
    /// Per-account random hex salt.
    pub salt: String,
    /// Origin marker; always a placeholder in this offline build.
    pub ip: String,
    /// Privilege level.
    pub role: Role,
}

/// A point in canvas coordinates.
///
/// Coordinates are unconstrained: they may be negative or exceed the canvas
/// bounds, and are replayed as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One short line stroke between two consecutively sampled pointer positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawingSegment {
    /// Unique identifier for this segment.
    pub id: Uuid,
    /// Account that drew the segment. Existence is not enforced.
    pub user_id: AccountId,
    /// Stroke color as a hex color string.
    pub color: String,
    /// Where the stroke starts.
    pub start: Point,
    /// Where the stroke ends.
    pub end: Point,
}

/// One chat entry, rendered in arrival order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique identifier for this message.
    pub id: Uuid,
    /// Account that sent the message.
    pub user_id: AccountId,
    /// Sender's name as it was at send time (denormalized snapshot).
    pub username: String,
    /// Message body; non-empty after trimming.
    pub text: String,
    /// Capture-time timestamp, serialized as RFC 3339.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}
