//! Mock authentication and session core for the rentzw rental-marketplace
//! client.
//!
//! ARCHITECTURE
//! ============
//! There is no backend. The persistence boundary is [`storage::StorageBackend`],
//! an injected key-value abstraction standing in for browser local storage.
//! Service modules own credential and session persistence; application code
//! talks to the [`context::SessionContext`] façade.
//!
//! Control flow: caller → `SessionContext` operation → `AuthService` →
//! credential/session store read-modify-write → result or failure back up.
//! Every service operation sleeps a fixed interval to imitate the network
//! round-trip the real client would pay.

pub mod account;
pub mod context;
pub mod services;
pub mod storage;

pub use account::{Account, Session, SignupData, User, UserType, UserUpdate};
pub use context::{AuthEvent, AuthState, SessionContext};
pub use services::auth::{AuthError, AuthService};
pub use services::credentials::CredentialStore;
pub use services::session::SessionStore;
pub use storage::{MemoryStorage, StorageBackend};
