//! In-memory mirror of the persisted collections.
//!
//! DESIGN
//! ======
//! `Mirror` is constructed once at startup, owns the live collections for
//! the process, and is passed by reference to each service module; there is
//! no ambient global. Every append mutates the owned collection and then
//! writes the affected collection back to the store before returning.
//!
//! ERROR HANDLING
//! ==============
//! Appends surface the durable-write result to the caller. The in-memory
//! copy is authoritative and is never rolled back on a failed write; the
//! `flush_*` methods retry. This prioritizes observable divergence over
//! silent data loss.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use serde::Serialize;
use tracing::{error, info};

use crate::consts::{BOOTSTRAP_PASSWORD, BOOTSTRAP_USERNAME};
use crate::model::{Account, ChatMessage, DrawingSegment, Role};
use crate::services::accounts;
use crate::store::{self, KeyValueStore, StoreError};

/// Persisted key for the account collection.
pub const USERS_KEY: &str = "users";

/// Persisted key for the drawing segment collection.
pub const DRAWINGS_KEY: &str = "drawings";

/// Persisted key for the chat message collection.
pub const MESSAGES_KEY: &str = "messages";

/// Process-lifetime cache of the three persisted collections.
pub struct Mirror {
    store: Box<dyn KeyValueStore>,
    accounts: Vec<Account>,
    segments: Vec<DrawingSegment>,
    messages: Vec<ChatMessage>,
}

impl Mirror {
    /// Hydrate the mirror from the store, bootstrapping on first run.
    ///
    /// If the `users` key is absent or holds an empty sequence, one
    /// administrator account is synthesized and persisted as the sole
    /// account (best effort: a failed bootstrap write is logged and the
    /// in-memory administrator is kept). Missing `drawings`/`messages`
    /// default to empty sequences.
    #[must_use]
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let existing = store::read_collection::<Account>(store.as_ref(), USERS_KEY).unwrap_or_default();

        if existing.is_empty() {
            info!(username = BOOTSTRAP_USERNAME, "no accounts found; bootstrapping administrator");
            let admin = accounts::build_account(BOOTSTRAP_USERNAME, BOOTSTRAP_PASSWORD, Role::Admin);
            let mut mirror =
                Self { store, accounts: vec![admin], segments: Vec::new(), messages: Vec::new() };
            if let Err(e) = mirror.flush_accounts() {
                error!(error = %e, "bootstrap persist failed; continuing with in-memory administrator");
            }
            return mirror;
        }

        let segments = store::read_collection(store.as_ref(), DRAWINGS_KEY).unwrap_or_default();
        let messages = store::read_collection(store.as_ref(), MESSAGES_KEY).unwrap_or_default();
        info!(
            accounts = existing.len(),
            segments = segments.len(),
            messages = messages.len(),
            "hydrated mirror from store"
        );
        Self { store, accounts: existing, segments, messages }
    }

    // --- Reads ---

    /// All accounts, in registration order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// All drawing segments, in arrival order.
    #[must_use]
    pub fn segments(&self) -> &[DrawingSegment] {
        &self.segments
    }

    /// All chat messages, in arrival order.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    // --- Appends (write-through) ---

    pub(crate) fn push_account(&mut self, account: Account) -> Result<(), StoreError> {
        self.accounts.push(account);
        self.flush_accounts()
    }

    pub(crate) fn push_segment(&mut self, segment: DrawingSegment) -> Result<(), StoreError> {
        self.segments.push(segment);
        self.flush_segments()
    }

    pub(crate) fn push_message(&mut self, message: ChatMessage) -> Result<(), StoreError> {
        self.messages.push(message);
        self.flush_messages()
    }

    // --- Flushes (retry hooks) ---

    /// Write the account collection back to the store.
    ///
    /// # Errors
    ///
    /// Returns the storage error; the in-memory collection is unchanged.
    pub fn flush_accounts(&mut self) -> Result<(), StoreError> {
        persist(self.store.as_mut(), USERS_KEY, &self.accounts)
    }

    /// Write the drawing segment collection back to the store.
    ///
    /// # Errors
    ///
    /// Returns the storage error; the in-memory collection is unchanged.
    pub fn flush_segments(&mut self) -> Result<(), StoreError> {
        persist(self.store.as_mut(), DRAWINGS_KEY, &self.segments)
    }

    /// Write the chat message collection back to the store.
    ///
    /// # Errors
    ///
    /// Returns the storage error; the in-memory collection is unchanged.
    pub fn flush_messages(&mut self) -> Result<(), StoreError> {
        persist(self.store.as_mut(), MESSAGES_KEY, &self.messages)
    }

    /// Write all three collections back to the store, stopping at the first
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns the first storage error encountered.
    pub fn flush_all(&mut self) -> Result<(), StoreError> {
        self.flush_accounts()?;
        self.flush_segments()?;
        self.flush_messages()
    }
}

fn persist<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), StoreError> {
    store::write_collection(store, key, items).inspect_err(|e| error!(key, error = %e, "persist failed"))
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub(crate) mod test_helpers {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;
    use crate::store::MemoryStore;

    /// Mirror over a fresh in-memory store (bootstraps the administrator).
    pub(crate) fn memory_mirror() -> Mirror {
        Mirror::open(Box::new(MemoryStore::new()))
    }

    /// Store over shared entries with switchable write failures.
    ///
    /// Clones share the same entries and failure flag, so a test can keep a
    /// handle for inspection (or a "restart") after boxing one into a
    /// mirror.
    #[derive(Clone)]
    pub(crate) struct SharedStore {
        entries: Rc<RefCell<HashMap<String, String>>>,
        fail_writes: Rc<Cell<bool>>,
    }

    impl SharedStore {
        pub(crate) fn new() -> Self {
            Self { entries: Rc::new(RefCell::new(HashMap::new())), fail_writes: Rc::new(Cell::new(false)) }
        }

        pub(crate) fn set_fail_writes(&self, fail: bool) {
            self.fail_writes.set(fail);
        }

        pub(crate) fn raw(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }
    }

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.fail_writes.get() {
                return Err(StoreError::Io(std::io::Error::other("simulated write failure")));
            }
            self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
            Ok(())
        }
    }
}
