//! Shared constants for the sketch board core.

// ── Bootstrap ───────────────────────────────────────────────────

/// Username of the administrator account created at first run.
pub const BOOTSTRAP_USERNAME: &str = "admin";

/// Password of the administrator account created at first run.
pub const BOOTSTRAP_PASSWORD: &str = "admin123";

/// Origin marker recorded on every account. Always this placeholder in the
/// offline build; a networked build would record the client address.
pub const PLACEHOLDER_ORIGIN: &str = "localhost";

// ── Drawing ─────────────────────────────────────────────────────

/// Initial brush color before the user picks one.
pub const DEFAULT_STROKE_COLOR: &str = "#000000";

/// Line width for every replayed stroke, in canvas pixels.
pub const LINE_WIDTH: f64 = 2.0;
