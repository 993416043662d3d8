//! Account and session data model.
//!
//! Field names serialize camelCase to stay shape-compatible with the JSON
//! the web client already persists (`fullName`, `userType`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role a registered account holds in the marketplace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Tenant,
    Landlord,
}

/// A registered account as persisted in the credential store.
///
/// `password` holds a SHA-256 hex digest, never the plaintext.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone_number: String,
    pub user_type: UserType,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Sanitized account snapshot: every [`Account`] field except the password.
///
/// This conversion is the only way snapshots are produced, so a credential
/// can never leak into session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    pub user_type: UserType,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for User {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            full_name: account.full_name.clone(),
            phone_number: account.phone_number.clone(),
            user_type: account.user_type,
            is_verified: account.is_verified,
            created_at: account.created_at,
        }
    }
}

impl User {
    /// Shallow-merge populated update fields, leaving `None` fields as-is.
    pub fn apply_update(&mut self, update: &UserUpdate) {
        if let Some(full_name) = &update.full_name {
            self.full_name = full_name.clone();
        }
        if let Some(phone_number) = &update.phone_number {
            self.phone_number = phone_number.clone();
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
    }
}

/// Fields collected by the signup form.
#[derive(Clone, Debug)]
pub struct SignupData {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub user_type: UserType,
}

/// A logged-in session: opaque tokens plus the sanitized user snapshot.
/// Tokens are random identifiers and carry no embedded claims.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Partial profile update submitted by the caller.
#[derive(Clone, Debug, Default)]
pub struct UserUpdate {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
