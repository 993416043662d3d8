//! Session store — persisted artifacts of the current login.
//!
//! DESIGN
//! ======
//! Three independent slots: access token, refresh token, and the sanitized
//! user snapshot. Each slot has isolated get/set; clearing the session
//! removes all three and never touches the credential store.

use std::fmt::Write;
use std::sync::Arc;

use rand::Rng;
use tracing::warn;

use crate::account::User;
use crate::storage::StorageBackend;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token. Tokens are opaque
/// identifiers with no embedded claims.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// Handle over the persisted session slots.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn StorageBackend>,
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.storage.get(AUTH_TOKEN_KEY)
    }

    pub fn set_auth_token(&self, token: &str) {
        self.storage.set(AUTH_TOKEN_KEY, token);
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get(REFRESH_TOKEN_KEY)
    }

    pub fn set_refresh_token(&self, token: &str) {
        self.storage.set(REFRESH_TOKEN_KEY, token);
    }

    /// Read the persisted user snapshot. Malformed JSON reads as "no
    /// session" rather than an error.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "malformed user snapshot; treating as no session");
                None
            }
        }
    }

    pub fn set_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => self.storage.set(USER_KEY, &json),
            Err(e) => warn!(error = %e, "failed to serialize user snapshot; write skipped"),
        }
    }

    /// Clear all three session slots. Credential data is untouched.
    pub fn clear_auth(&self) {
        self.storage.remove(AUTH_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }

    /// Whether an access token is currently persisted.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.auth_token().is_some()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
