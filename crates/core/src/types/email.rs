//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An email address attached to a signed-in user.
///
/// Mock logins derive addresses from whatever student id was typed, so the
/// local part is taken as given and never validated.
///
/// ```
/// use grado_core::Email;
///
/// let email = Email::on_domain("21CSE042", "gitam.edu");
/// assert_eq!(email.as_str(), "21CSE042@gitam.edu");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Address `local@domain`.
    #[must_use]
    pub fn on_domain(local: &str, domain: &str) -> Self {
        Self(format!("{local}@{domain}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
