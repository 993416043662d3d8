//! Credential store — the persisted collection of registered accounts.
//!
//! DESIGN
//! ======
//! The whole collection lives under one JSON blob; every mutation is a full
//! read-modify-write of that blob. Serializing concurrent writers is the
//! auth service's job (see [`crate::services::auth`]).
//!
//! ERROR HANDLING
//! ==============
//! A malformed blob is indistinguishable from an absent one: reads recover
//! silently as an empty collection rather than surfacing an error.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::account::{Account, UserType};
use crate::services::auth::hash_password;
use crate::storage::StorageBackend;

/// Storage key for the serialized account collection.
pub const USERS_STORAGE_KEY: &str = "rentzw_mock_users";

/// Shared demo password for the seeded sample accounts.
pub const SAMPLE_PASSWORD: &str = "password123";

/// Handle over the persisted account collection.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn StorageBackend>,
}

impl CredentialStore {
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// Read the whole account collection. An absent blob is an empty
    /// collection; a malformed blob is recovered as empty.
    #[must_use]
    pub fn list_accounts(&self) -> Vec<Account> {
        let Some(raw) = self.storage.get(USERS_STORAGE_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(accounts) => accounts,
            Err(e) => {
                warn!(error = %e, "malformed account blob; recovering as empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the whole persisted collection. Never a partial update.
    pub fn save_accounts(&self, accounts: &[Account]) {
        match serde_json::to_string(accounts) {
            Ok(json) => self.storage.set(USERS_STORAGE_KEY, &json),
            Err(e) => warn!(error = %e, "failed to serialize account blob; write skipped"),
        }
    }

    /// Case-insensitive linear scan for an account by email. First match
    /// wins.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<Account> {
        self.list_accounts()
            .into_iter()
            .find(|account| account.email.eq_ignore_ascii_case(email))
    }

    /// Seed the two demo accounts if the collection is empty. Idempotent:
    /// a non-empty collection is left exactly as it is, so calling this on
    /// every startup never duplicates or resets data.
    pub fn initialize_sample_accounts(&self) {
        if !self.list_accounts().is_empty() {
            return;
        }

        let seeded_at = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .unwrap_or_default();
        let samples = [
            Account {
                id: Uuid::from_u128(1),
                email: "tenant@example.com".into(),
                password: hash_password(SAMPLE_PASSWORD),
                full_name: "Alice Johnson".into(),
                phone_number: "+263 77 123 4567".into(),
                user_type: UserType::Tenant,
                is_verified: true,
                created_at: seeded_at,
            },
            Account {
                id: Uuid::from_u128(2),
                email: "landlord@example.com".into(),
                password: hash_password(SAMPLE_PASSWORD),
                full_name: "John Smith".into(),
                phone_number: "+263 77 987 6543".into(),
                user_type: UserType::Landlord,
                is_verified: true,
                created_at: seeded_at,
            },
        ];
        self.save_accounts(&samples);
        info!(count = samples.len(), "seeded sample accounts");
    }
}

#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;
