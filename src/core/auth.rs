//! Login, auto-login, and logout.
//!
//! Credentials are stored and compared in cleartext, a known weakness
//! inherited from the historical data layout and deliberately not fixed
//! here. The comparison lives in exactly one function so a hashing
//! scheme can replace it without touching callers.

use crate::errors::{Error, Result};
use crate::models::{NotificationKind, SavedCredentials, User};
use crate::repository::Repository;
use tracing::{info, instrument, warn};

use super::notifications;

/// The single credential comparison point.
pub fn verify_credentials<'a>(users: &'a [User], username: &str, password: &str) -> Option<&'a User> {
    users
        .iter()
        .find(|u| u.username == username && u.password == password)
}

/// Attempts a login. On success the user becomes the session user, the
/// credential pair is persisted for auto-login, and an info notification
/// records the entry.
///
/// # Errors
///
/// Returns `Error::Auth` when the credentials match no account. Not
/// fatal; the caller shows a transient inline message. No lockout, no
/// backoff.
#[instrument(skip(repo, password))]
pub async fn login(repo: &mut Repository, username: &str, password: &str) -> Result<User> {
    let Some(user) = verify_credentials(repo.users(), username, password).cloned() else {
        warn!("Login rejected for '{}'.", username);
        return Err(Error::Auth(username.to_string()));
    };

    repo.set_saved_user(SavedCredentials {
        username: user.username.clone(),
        password: user.password.clone(),
    })
    .await;
    repo.set_current_user(user.clone());
    notifications::append(
        repo,
        format!("تم دخول المستخدم: {}", user.name),
        NotificationKind::Info,
    )
    .await;
    info!("User '{}' logged in.", user.username);
    Ok(user)
}

/// Restores the session from the persisted credential pair, if it still
/// matches an account. Silent on failure; a stale pair just means the
/// login screen is shown.
#[instrument(skip(repo))]
pub async fn auto_login(repo: &mut Repository) -> Option<User> {
    let saved = repo.saved_user()?.clone();
    let user = verify_credentials(repo.users(), &saved.username, &saved.password).cloned()?;
    repo.set_current_user(user.clone());
    info!("Auto-login as '{}'.", user.username);
    Some(user)
}

/// Ends the session and forgets the auto-login pair.
#[instrument(skip(repo))]
pub async fn logout(repo: &mut Repository) {
    repo.clear_current_user();
    repo.clear_saved_user().await;
    info!("Session ended.");
}
