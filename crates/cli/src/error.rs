//! Errors surfaced by CLI commands.

use std::io;

use thiserror::Error;

use grado_storefront::AppError;
use grado_storefront::services::auth::AuthError;
use grado_storefront::services::checkout::CheckoutError;
use grado_storefront::services::reviews::ReviewError;
use grado_storefront::store::CartError;

/// Errors that end a command with a non-zero exit.
#[derive(Debug, Error)]
pub enum CliError {
    /// A storefront operation failed.
    #[error(transparent)]
    App(#[from] AppError),

    /// Writing to the terminal failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    /// Log the error, capturing internal failures to Sentry.
    pub fn report(&self) {
        match self {
            Self::App(e) => e.report(),
            Self::Output(e) => tracing::error!(error = %e, "Output error"),
        }
    }
}

macro_rules! from_app_error {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for CliError {
                fn from(e: $source) -> Self {
                    Self::App(AppError::from(e))
                }
            }
        )+
    };
}

from_app_error!(AuthError, CartError, CheckoutError, ReviewError);
