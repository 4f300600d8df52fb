//! Process-wide bearer credential storage.
//!
//! The credential is shared by every request the gateway makes. It is written
//! only by the login/logout flow (an external collaborator of the booking
//! workflow); the workflow itself only reads it through the gateway.

use std::sync::{Arc, RwLock};

/// Shared store for a single bearer token.
///
/// Cloning is cheap and all clones observe the same token.
#[derive(Clone, Debug, Default)]
pub struct CredentialStore {
    token: Arc<RwLock<Option<String>>>,
}

impl CredentialStore {
    /// Create an empty store (no credential).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a persisted token, if one exists.
    #[must_use]
    pub fn with_token(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
        }
    }

    /// The current bearer token, if any.
    #[allow(clippy::unwrap_used)] // Lock poison is unrecoverable
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }

    /// Store a bearer token (login).
    #[allow(clippy::unwrap_used)] // Lock poison is unrecoverable
    pub fn set(&self, token: impl Into<String>) {
        *self.token.write().unwrap() = Some(token.into());
    }

    /// Remove the bearer token (logout).
    #[allow(clippy::unwrap_used)] // Lock poison is unrecoverable
    pub fn clear(&self) {
        *self.token.write().unwrap() = None;
    }
}
