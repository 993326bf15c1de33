//! Signed-in user identity.

use serde::{Deserialize, Serialize};

use super::{Email, UserId};

/// The active user session.
///
/// Created by a mock login and cleared on logout. `student_id` is only set
/// for credential logins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
}
