//! `grado login`, `grado logout` and `grado whoami`

use std::io::Write;

use secrecy::SecretString;

use grado_storefront::AppStore;
use grado_storefront::services::auth;

use crate::error::CliError;

/// Sign in with a student id and password.
///
/// # Errors
///
/// Returns `AuthError::MissingFields` if either value is blank.
pub fn login_student(
    store: &mut AppStore,
    out: &mut impl Write,
    student_id: &str,
    password: &SecretString,
) -> Result<(), CliError> {
    let user = auth::login_with_credentials(store, student_id, password)?;
    writeln!(out, "Welcome, {}!", user.name)?;
    Ok(())
}

/// Sign in with the Google identity.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn login_google(store: &mut AppStore, out: &mut impl Write) -> Result<(), CliError> {
    let user = auth::login_with_google(store);
    writeln!(out, "Welcome, {}!", user.name)?;
    Ok(())
}

/// Sign out.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn logout(store: &mut AppStore, out: &mut impl Write) -> Result<(), CliError> {
    if store.user().is_none() {
        writeln!(out, "Not signed in")?;
        return Ok(());
    }
    auth::logout(store);
    writeln!(out, "Signed out")?;
    Ok(())
}

/// Show the signed-in user.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn whoami(store: &AppStore, out: &mut impl Write) -> Result<(), CliError> {
    let Some(user) = store.user() else {
        writeln!(out, "Not signed in")?;
        return Ok(());
    };
    writeln!(out, "{} <{}>", user.name, user.email)?;
    if let Some(student_id) = &user.student_id {
        writeln!(out, "Student ID: {student_id}")?;
    }
    Ok(())
}
