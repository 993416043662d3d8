use std::sync::Arc;

use super::*;
use crate::account::UserType;
use crate::storage::{MemoryStorage, StorageBackend};

fn service() -> (AuthService, CredentialStore, SessionStore) {
    let storage: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());
    let credentials = CredentialStore::new(Arc::clone(&storage));
    let sessions = SessionStore::new(storage);
    (AuthService::new(credentials.clone(), sessions.clone()), credentials, sessions)
}

fn signup_data(email: &str) -> SignupData {
    SignupData {
        full_name: "Test User".into(),
        email: email.into(),
        phone_number: "0771234567".into(),
        password: "Str0ng!pass".into(),
        user_type: UserType::Tenant,
    }
}

// =============================================================================
// hash_password
// =============================================================================

#[test]
fn hash_password_is_64_hex_chars() {
    let digest = hash_password("Str0ng!pass");
    assert_eq!(digest.len(), 64);
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn hash_password_is_deterministic() {
    assert_eq!(hash_password("same"), hash_password("same"));
    assert_ne!(hash_password("same"), hash_password("different"));
}

// =============================================================================
// signup
// =============================================================================

#[tokio::test(start_paused = true)]
async fn signup_grows_the_store_by_one() {
    let (auth, credentials, _) = service();
    let session = auth.signup(signup_data("new@example.com")).await.unwrap();

    let accounts = credentials.list_accounts();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].email, "new@example.com");
    assert_eq!(session.user.email, "new@example.com");
}

#[tokio::test(start_paused = true)]
async fn signup_stores_a_digest_not_the_plaintext() {
    let (auth, credentials, _) = service();
    auth.signup(signup_data("new@example.com")).await.unwrap();

    let account = &credentials.list_accounts()[0];
    assert_ne!(account.password, "Str0ng!pass");
    assert_eq!(account.password, hash_password("Str0ng!pass"));
    assert!(account.is_verified);
}

#[tokio::test(start_paused = true)]
async fn signup_session_user_has_no_password_field() {
    let (auth, _, _) = service();
    let session = auth.signup(signup_data("new@example.com")).await.unwrap();

    let json = serde_json::to_value(&session.user).unwrap();
    assert!(json.get("password").is_none());
}

#[tokio::test(start_paused = true)]
async fn duplicate_signup_fails_without_mutation() {
    let (auth, credentials, _) = service();
    auth.signup(signup_data("taken@example.com")).await.unwrap();

    let err = auth.signup(signup_data("taken@example.com")).await.unwrap_err();
    assert_eq!(err, AuthError::DuplicateAccount);
    assert_eq!(credentials.list_accounts().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn duplicate_check_is_case_insensitive() {
    let (auth, credentials, _) = service();
    auth.signup(signup_data("taken@example.com")).await.unwrap();

    let err = auth.signup(signup_data("TAKEN@Example.COM")).await.unwrap_err();
    assert_eq!(err, AuthError::DuplicateAccount);
    assert_eq!(credentials.list_accounts().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn duplicate_error_message_matches_the_ui_copy() {
    let (auth, _, _) = service();
    auth.signup(signup_data("taken@example.com")).await.unwrap();

    let err = auth.signup(signup_data("taken@example.com")).await.unwrap_err();
    assert_eq!(err.to_string(), "User already exists with this email address");
}

#[tokio::test(start_paused = true)]
async fn concurrent_signups_lose_neither_account() {
    let (auth, credentials, _) = service();

    // Interleave both calls on one task; the write lock must serialize the
    // read-modify-writes so the second cannot clobber the first.
    let (a, b) = tokio::join!(
        auth.signup(signup_data("first@example.com")),
        auth.signup(signup_data("second@example.com")),
    );
    assert!(a.is_ok());
    assert!(b.is_ok());

    let emails: Vec<String> = credentials
        .list_accounts()
        .into_iter()
        .map(|account| account.email)
        .collect();
    assert_eq!(emails.len(), 2);
    assert!(emails.contains(&"first@example.com".to_string()));
    assert!(emails.contains(&"second@example.com".to_string()));
}

#[tokio::test(start_paused = true)]
async fn signup_pays_the_simulated_latency() {
    let (auth, _, _) = service();
    let started = tokio::time::Instant::now();
    auth.signup(signup_data("new@example.com")).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(1000));
}

// =============================================================================
// login
// =============================================================================

#[tokio::test(start_paused = true)]
async fn signup_then_login_round_trips() {
    let (auth, _, _) = service();
    auth.signup(signup_data("new@example.com")).await.unwrap();

    let session = auth.login("new@example.com", "Str0ng!pass").await.unwrap();
    assert_eq!(session.user.email, "new@example.com");
    assert!(!session.token.is_empty());
    assert_ne!(session.token, session.refresh_token);
}

#[tokio::test(start_paused = true)]
async fn login_email_match_is_case_insensitive() {
    let (auth, _, _) = service();
    auth.signup(signup_data("new@example.com")).await.unwrap();

    assert!(auth.login("NEW@EXAMPLE.COM", "Str0ng!pass").await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn wrong_password_and_unknown_email_fail_identically() {
    let (auth, _, _) = service();
    auth.signup(signup_data("new@example.com")).await.unwrap();

    let wrong_password = auth.login("new@example.com", "Wr0ng!pass").await.unwrap_err();
    let unknown_email = auth.login("nobody@example.com", "Str0ng!pass").await.unwrap_err();
    assert_eq!(wrong_password, AuthError::InvalidCredentials);
    assert_eq!(unknown_email, AuthError::InvalidCredentials);
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    assert_eq!(wrong_password.to_string(), "Invalid email or password");
}

#[tokio::test(start_paused = true)]
async fn login_never_mutates_the_credential_store() {
    let (auth, credentials, _) = service();
    auth.signup(signup_data("new@example.com")).await.unwrap();
    let before = credentials.list_accounts();

    auth.login("new@example.com", "Str0ng!pass").await.unwrap();
    auth.login("new@example.com", "Wr0ng!pass").await.unwrap_err();

    assert_eq!(credentials.list_accounts(), before);
}

#[tokio::test(start_paused = true)]
async fn each_login_issues_fresh_tokens() {
    let (auth, _, _) = service();
    auth.signup(signup_data("new@example.com")).await.unwrap();

    let first = auth.login("new@example.com", "Str0ng!pass").await.unwrap();
    let second = auth.login("new@example.com", "Str0ng!pass").await.unwrap();
    assert_ne!(first.token, second.token);
    assert_ne!(first.refresh_token, second.refresh_token);
}

// =============================================================================
// get_profile
// =============================================================================

#[tokio::test(start_paused = true)]
async fn get_profile_returns_the_persisted_snapshot() {
    let (auth, _, sessions) = service();
    let session = auth.signup(signup_data("new@example.com")).await.unwrap();
    sessions.set_auth_token(&session.token);
    sessions.set_user(&session.user);

    let profile = auth.get_profile(&session.token).await.unwrap();
    assert_eq!(profile, session.user);
}

#[tokio::test(start_paused = true)]
async fn get_profile_without_a_session_fails() {
    let (auth, _, _) = service();
    let err = auth.get_profile("any-token").await.unwrap_err();
    assert_eq!(err, AuthError::NotAuthenticated);
}

#[tokio::test(start_paused = true)]
async fn get_profile_rejects_a_mismatched_token() {
    let (auth, _, sessions) = service();
    let session = auth.signup(signup_data("new@example.com")).await.unwrap();
    sessions.set_auth_token(&session.token);
    sessions.set_user(&session.user);

    let err = auth.get_profile("forged-token").await.unwrap_err();
    assert_eq!(err, AuthError::NotAuthenticated);
}

#[tokio::test(start_paused = true)]
async fn get_profile_after_clear_auth_fails() {
    let (auth, _, sessions) = service();
    let session = auth.signup(signup_data("new@example.com")).await.unwrap();
    sessions.set_auth_token(&session.token);
    sessions.set_user(&session.user);

    sessions.clear_auth();

    let err = auth.get_profile(&session.token).await.unwrap_err();
    assert_eq!(err, AuthError::NotAuthenticated);
}

// =============================================================================
// sync_account
// =============================================================================

#[tokio::test(start_paused = true)]
async fn sync_account_writes_the_snapshot_back() {
    let (auth, credentials, _) = service();
    let session = auth.signup(signup_data("new@example.com")).await.unwrap();

    let mut user = session.user;
    user.full_name = "Renamed".into();
    auth.sync_account(&user).await;

    let account = &credentials.list_accounts()[0];
    assert_eq!(account.full_name, "Renamed");
    // Credential itself is untouched by a profile sync.
    assert_eq!(account.password, hash_password("Str0ng!pass"));
}

#[tokio::test(start_paused = true)]
async fn sync_account_ignores_unknown_ids() {
    let (auth, credentials, _) = service();
    let session = auth.signup(signup_data("new@example.com")).await.unwrap();

    let mut user = session.user;
    user.id = Uuid::new_v4();
    user.full_name = "Ghost".into();
    auth.sync_account(&user).await;

    assert_eq!(credentials.list_accounts()[0].full_name, "Test User");
}
