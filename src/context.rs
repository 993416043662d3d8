//! Session context — the application-facing façade.
//!
//! DESIGN
//! ======
//! Restore is an explicit state machine rather than ad hoc flags: the stored
//! snapshot is painted optimistically (`Restoring`) while a profile fetch
//! confirms it, so callers never see a logged-out flash during the simulated
//! verification latency. Every state change funnels through
//! [`AuthState::apply`].
//!
//! ERROR HANDLING
//! ==============
//! Service failures are returned to the caller with their user-facing
//! display message; no partial login or signup state is ever committed on
//! failure.

use std::sync::Arc;

use tracing::info;

use crate::account::{Session, SignupData, User, UserUpdate};
use crate::services::auth::{AuthError, AuthService};
use crate::services::credentials::CredentialStore;
use crate::services::session::SessionStore;
use crate::storage::StorageBackend;

// =============================================================================
// STATE MACHINE
// =============================================================================

/// Authentication lifecycle of one client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthState {
    /// Startup; nothing known yet.
    Unknown,
    /// A stored session is painted optimistically while being verified.
    Restoring(User),
    Authenticated(User),
    Anonymous,
}

/// Events driving [`AuthState`] transitions.
#[derive(Clone, Debug)]
pub enum AuthEvent {
    RestoreStarted(User),
    RestoreConfirmed(User),
    RestoreFailed,
    LoggedIn(User),
    ProfileUpdated(User),
    LoggedOut,
}

impl AuthState {
    /// The single transition function. Event/state pairs that make no
    /// sense leave the state exactly as it was.
    #[must_use]
    pub fn apply(self, event: AuthEvent) -> Self {
        match (self, event) {
            (Self::Unknown, AuthEvent::RestoreStarted(user)) => Self::Restoring(user),
            (Self::Restoring(_), AuthEvent::RestoreConfirmed(user)) => Self::Authenticated(user),
            (Self::Unknown | Self::Restoring(_), AuthEvent::RestoreFailed) => Self::Anonymous,
            (_, AuthEvent::LoggedIn(user)) => Self::Authenticated(user),
            (Self::Authenticated(_), AuthEvent::ProfileUpdated(user)) => Self::Authenticated(user),
            (_, AuthEvent::LoggedOut) => Self::Anonymous,
            (state, _) => state,
        }
    }
}

// =============================================================================
// FAÇADE
// =============================================================================

/// Application-facing session façade over the auth service and stores.
pub struct SessionContext {
    credentials: CredentialStore,
    sessions: SessionStore,
    auth: AuthService,
    state: AuthState,
}

impl SessionContext {
    /// Build a context over the given storage backend. The context starts
    /// `Unknown`; call [`initialize`](Self::initialize) before use.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        let credentials = CredentialStore::new(Arc::clone(&storage));
        let sessions = SessionStore::new(storage);
        let auth = AuthService::new(credentials.clone(), sessions.clone());
        Self { credentials, sessions, auth, state: AuthState::Unknown }
    }

    /// Seed demo data and restore any persisted session.
    ///
    /// Two-phase restore: when both a token and a user snapshot are stored,
    /// the snapshot is applied optimistically and then confirmed with a
    /// profile fetch. On confirmation failure every session slot is cleared
    /// and the context settles `Anonymous`.
    pub async fn initialize(&mut self) {
        self.credentials.initialize_sample_accounts();

        let (Some(token), Some(user)) = (self.sessions.auth_token(), self.sessions.user()) else {
            self.transition(AuthEvent::RestoreFailed);
            return;
        };

        self.transition(AuthEvent::RestoreStarted(user));
        match self.auth.get_profile(&token).await {
            Ok(confirmed) => {
                self.sessions.set_user(&confirmed);
                self.transition(AuthEvent::RestoreConfirmed(confirmed));
            }
            Err(_) => {
                self.sessions.clear_auth();
                self.transition(AuthEvent::RestoreFailed);
            }
        }
    }

    /// Log in and persist the resulting session. On failure nothing
    /// changes; the error's display string is the user-facing message.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        let session = self.auth.login(email, password).await?;
        self.persist_session(&session);
        info!(email = %session.user.email, "session established");
        self.transition(AuthEvent::LoggedIn(session.user));
        Ok(())
    }

    /// Create an account and persist the resulting session. On failure
    /// nothing changes.
    pub async fn signup(&mut self, data: SignupData) -> Result<(), AuthError> {
        let session = self.auth.signup(data).await?;
        self.persist_session(&session);
        info!(email = %session.user.email, "session established");
        self.transition(AuthEvent::LoggedIn(session.user));
        Ok(())
    }

    /// Clear the persisted session and go anonymous, whether or not a
    /// session existed.
    pub fn logout(&mut self) {
        self.sessions.clear_auth();
        self.transition(AuthEvent::LoggedOut);
        info!("logged out");
    }

    /// Merge profile fields into the current user, re-persisting the
    /// session snapshot and writing the merge back to the stored account.
    /// No-op unless authenticated.
    pub async fn update_user(&mut self, update: UserUpdate) {
        let AuthState::Authenticated(user) = &self.state else {
            return;
        };

        let mut merged = user.clone();
        merged.apply_update(&update);
        self.auth.sync_account(&merged).await;
        self.sessions.set_user(&merged);
        self.transition(AuthEvent::ProfileUpdated(merged));
    }

    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Current user, including the optimistic snapshot while restoring.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Restoring(user) | AuthState::Authenticated(user) => Some(user),
            AuthState::Unknown | AuthState::Anonymous => None,
        }
    }

    /// Logged in from the caller's perspective: a current user AND a
    /// persisted access token.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some() && self.sessions.is_authenticated()
    }

    fn persist_session(&self, session: &Session) {
        self.sessions.set_auth_token(&session.token);
        self.sessions.set_refresh_token(&session.refresh_token);
        self.sessions.set_user(&session.user);
    }

    fn transition(&mut self, event: AuthEvent) {
        let state = std::mem::replace(&mut self.state, AuthState::Unknown);
        self.state = state.apply(event);
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
