//! Domain services behind the session context façade.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation rules and persistence concerns so the
//! façade can stay focused on state transitions and surfacing failures.

pub mod auth;
pub mod credentials;
pub mod session;
pub mod validation;
