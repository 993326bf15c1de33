//! Mock authentication.
//!
//! Two entry points, neither of which verifies anything: a student id and
//! password login that accepts any non-blank values, and a one-click
//! Google login that always signs in the same identity. Both set the user
//! and close the login modal.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument};
use uuid::Uuid;

use grado_core::{Email, User, UserId};

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::store::AppStore;

/// Domain used for generated student emails.
pub const CAMPUS_EMAIL_DOMAIN: &str = "gitam.edu";

/// Display name of the fixed Google identity.
pub const GOOGLE_USER_NAME: &str = "John Doe";

/// Local part of the fixed Google identity's email.
pub const GOOGLE_USER_LOCAL_PART: &str = "john.doe";

/// Build the user for a student credential login.
///
/// Blank checks ignore surrounding whitespace; the id is otherwise used
/// exactly as typed.
///
/// # Errors
///
/// Returns `AuthError::MissingFields` if either value is blank.
pub fn student_user(student_id: &str, password: &SecretString) -> Result<User, AuthError> {
    if student_id.trim().is_empty() || password.expose_secret().trim().is_empty() {
        return Err(AuthError::MissingFields);
    }

    Ok(User {
        id: fresh_user_id(),
        name: format!("Student {student_id}"),
        email: Email::on_domain(student_id, CAMPUS_EMAIL_DOMAIN),
        student_id: Some(student_id.to_owned()),
    })
}

/// Build the fixed Google identity.
#[must_use]
pub fn google_user() -> User {
    User {
        id: fresh_user_id(),
        name: GOOGLE_USER_NAME.to_owned(),
        email: Email::on_domain(GOOGLE_USER_LOCAL_PART, CAMPUS_EMAIL_DOMAIN),
        student_id: None,
    }
}

fn fresh_user_id() -> UserId {
    UserId::new(Uuid::new_v4().to_string())
}

/// Sign in with a student id and password.
///
/// # Errors
///
/// Returns `AuthError::MissingFields` if either value is blank; the store is
/// left unchanged.
#[instrument(skip(store, password))]
pub fn login_with_credentials(
    store: &mut AppStore,
    student_id: &str,
    password: &SecretString,
) -> Result<User, AuthError> {
    let user = student_user(student_id, password)?;
    info!(user_id = %user.id, "Student signed in");
    sign_in(store, user.clone());
    Ok(user)
}

/// Sign in with the fixed Google identity.
#[instrument(skip(store))]
pub fn login_with_google(store: &mut AppStore) -> User {
    let user = google_user();
    info!(user_id = %user.id, "Signed in via Google");
    sign_in(store, user.clone());
    user
}

/// Sign the current user out.
pub fn logout(store: &mut AppStore) {
    store.set_user(None);
    clear_sentry_user();
    info!("Signed out");
}

fn sign_in(store: &mut AppStore, user: User) {
    set_sentry_user(&user.id, Some(user.email.as_str()));
    store.set_user(Some(user));
    store.set_login_modal_open(false);
}
