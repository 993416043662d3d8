//! Mock authentication service — signup, login, profile fetch.
//!
//! DESIGN
//! ======
//! Every operation sleeps a fixed interval before touching the stores to
//! imitate a network round-trip. Credential mutations are whole-blob
//! read-modify-writes, so they serialize through one in-process mutex held
//! across the await points; interleaved signups cannot clobber each other's
//! write.
//!
//! ERROR HANDLING
//! ==============
//! Login failure is deliberately undifferentiated: callers cannot tell an
//! unknown email from a wrong password, which keeps the error message
//! useless for account enumeration.

use std::time::Duration;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::account::{Account, Session, SignupData, User};
use crate::services::credentials::CredentialStore;
use crate::services::session::{self, SessionStore};

/// Simulated round-trip for signup and login.
const AUTH_LATENCY: Duration = Duration::from_millis(1000);
/// Simulated round-trip for profile fetch.
const PROFILE_LATENCY: Duration = Duration::from_millis(500);

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("User already exists with this email address")]
    DuplicateAccount,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Not authenticated")]
    NotAuthenticated,
}

/// SHA-256 hex digest of a password, as persisted in the credential store.
#[must_use]
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let bytes = hasher.finalize();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Orchestrates signup, login, and profile fetch over injected stores.
pub struct AuthService {
    credentials: CredentialStore,
    sessions: SessionStore,
    /// Serializes credential-store read-modify-writes across await points.
    write_lock: Mutex<()>,
}

impl AuthService {
    #[must_use]
    pub fn new(credentials: CredentialStore, sessions: SessionStore) -> Self {
        Self { credentials, sessions, write_lock: Mutex::new(()) }
    }

    /// Register a new account and return a fresh session.
    ///
    /// On success the credential store grows by exactly one account. The
    /// returned session is not persisted here; the façade decides whether
    /// and where to store it. Duplicate emails (case-insensitive) fail
    /// without any mutation.
    pub async fn signup(&self, data: SignupData) -> Result<Session, AuthError> {
        let _guard = self.write_lock.lock().await;
        tokio::time::sleep(AUTH_LATENCY).await;

        let mut accounts = self.credentials.list_accounts();
        if accounts.iter().any(|a| a.email.eq_ignore_ascii_case(&data.email)) {
            return Err(AuthError::DuplicateAccount);
        }

        let account = Account {
            id: Uuid::new_v4(),
            email: data.email,
            password: hash_password(&data.password),
            full_name: data.full_name,
            phone_number: data.phone_number,
            user_type: data.user_type,
            is_verified: true,
            created_at: Utc::now(),
        };
        let user = User::from(&account);
        accounts.push(account);
        self.credentials.save_accounts(&accounts);
        info!(email = %user.email, "account created");

        Ok(issue_session(user))
    }

    /// Authenticate against stored credentials and return a fresh session.
    /// Never mutates the credential store.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        tokio::time::sleep(AUTH_LATENCY).await;

        let digest = hash_password(password);
        let account = self
            .credentials
            .list_accounts()
            .into_iter()
            .find(|a| a.email.eq_ignore_ascii_case(email) && a.password == digest)
            .ok_or(AuthError::InvalidCredentials)?;

        info!(email = %account.email, "login succeeded");
        Ok(issue_session(User::from(&account)))
    }

    /// Fetch the current profile for a previously issued token.
    ///
    /// The token must match the persisted access token and a user snapshot
    /// must be present; anything else is `NotAuthenticated`.
    pub async fn get_profile(&self, token: &str) -> Result<User, AuthError> {
        tokio::time::sleep(PROFILE_LATENCY).await;

        let stored = self.sessions.auth_token().ok_or(AuthError::NotAuthenticated)?;
        if stored != token {
            return Err(AuthError::NotAuthenticated);
        }
        self.sessions.user().ok_or(AuthError::NotAuthenticated)
    }

    /// Write an updated snapshot back to the stored account, so credential
    /// records and session snapshots cannot drift apart. A snapshot whose
    /// account no longer exists is ignored.
    pub async fn sync_account(&self, user: &User) {
        let _guard = self.write_lock.lock().await;

        let mut accounts = self.credentials.list_accounts();
        let Some(account) = accounts.iter_mut().find(|a| a.id == user.id) else {
            return;
        };
        account.email = user.email.clone();
        account.full_name = user.full_name.clone();
        account.phone_number = user.phone_number.clone();
        self.credentials.save_accounts(&accounts);
    }
}

fn issue_session(user: User) -> Session {
    Session {
        token: session::generate_token(),
        refresh_token: session::generate_token(),
        user,
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
