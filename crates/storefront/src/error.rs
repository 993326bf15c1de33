//! Unified error handling with Sentry integration.
//!
//! Every fallible storefront operation has its own error enum; `AppError`
//! wraps them for callers that drive several flows, such as the CLI.
//! Validation failures carry the message shown to the customer. Internal
//! failures are captured to Sentry by [`AppError::report`].

use thiserror::Error;

use grado_core::MenuItemId;

use crate::config::ConfigError;
use crate::persistence::PersistenceError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::services::reviews::ReviewError;
use crate::store::CartError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Checkout validation failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Login validation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Review validation failed.
    #[error(transparent)]
    Review(#[from] ReviewError),

    /// Cart action not possible in the current state.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// No menu item with this id.
    #[error("No menu item with id {0}")]
    UnknownMenuItem(MenuItemId),

    /// Snapshot storage failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Whether the error comes from customer input rather than the system.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Persistence(_) | Self::Config(_))
    }

    /// Log the error, capturing internal failures to Sentry.
    pub fn report(&self) {
        if self.is_user_error() {
            tracing::warn!(error = %self, "Request rejected");
        } else {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Internal error"
            );
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful login to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a customer action.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("checkout", "Order placed", Some(&[("order_id", "GRD123456")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
