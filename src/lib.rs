//! Core state and persistence for a single-device shared sketch board.
//!
//! This crate owns the data layer of a small shared-canvas client: accounts
//! with username/password credentials, a freehand drawing log, and a text
//! chat, all persisted through a synchronous on-device key-value store.
//! There is no server and no network transport — "sharing" happens entirely
//! through one device's storage. The host UI layer is responsible only for
//! wiring pointer/form events to the gesture machine and services here, and
//! for turning [`services::drawing::Stroke`]s into pixels.
//!
//! All state flows through one explicitly constructed [`state::Mirror`]:
//! hydrated from the store once at startup, mutated in place by the service
//! modules, and written through to the store on every append. Appends return
//! the durable-write result so the caller can retry, queue, or warn.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`store`] | Key-value persistence boundary and its implementations |
//! | [`state`] | In-memory mirror of the persisted collections |
//! | [`model`] | Domain records: accounts, segments, messages |
//! | [`services`] | Account directory, drawing log, message log |
//! | [`session`] | The authenticated account for this client instance |
//! | [`input`] | Pointer gesture state machine for freehand drawing |
//! | [`error`] | Grepable error codes for structured error handling |
//! | [`consts`] | Shared constants (bootstrap credentials, stroke width) |

pub mod consts;
pub mod error;
pub mod input;
pub mod model;
pub mod services;
pub mod session;
pub mod state;
pub mod store;
