//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `GRADO_SNAPSHOT_PATH` - Snapshot file (default: `grado-app-storage.json`)
//! - `GRADO_TIMELINE_UNIT_MS` - Length of one delivery timeline unit (default: 1000)
//! - `GRADO_FEEDBACK_WINDOW_MS` - How long an added item stays highlighted (default: 1000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (default: development)
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0 to 1.0 (default: 1.0)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use crate::persistence::DEFAULT_SNAPSHOT_FILE;
use crate::store::DEFAULT_FEEDBACK_WINDOW;
use crate::tracking::DEFAULT_TIME_UNIT;

const DEFAULT_SENTRY_ENVIRONMENT: &str = "development";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Where the persisted snapshot lives
    pub snapshot_path: PathBuf,
    /// Length of one delivery timeline unit
    pub timeline_unit: Duration,
    /// How long `add_to_cart` feedback stays visible
    pub feedback_window: Duration,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry DSN; error tracking is disabled when unset
    pub dsn: Option<SecretString>,
    /// Environment tag attached to events
    pub environment: String,
    /// Share of error events sent
    pub sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            timeline_unit: DEFAULT_TIME_UNIT,
            feedback_window: DEFAULT_FEEDBACK_WINDOW,
            sentry: SentryConfig::default(),
        }
    }
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: DEFAULT_SENTRY_ENVIRONMENT.to_string(),
            sample_rate: 1.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let snapshot_path = env
            .optional("GRADO_SNAPSHOT_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_FILE), PathBuf::from);
        let timeline_unit = env.millis_or("GRADO_TIMELINE_UNIT_MS", DEFAULT_TIME_UNIT)?;
        let feedback_window = env.millis_or("GRADO_FEEDBACK_WINDOW_MS", DEFAULT_FEEDBACK_WINDOW)?;

        Ok(Self {
            snapshot_path,
            timeline_unit,
            feedback_window,
            sentry: SentryConfig::from_env(&env)?,
        })
    }
}

impl SentryConfig {
    fn from_env(env: &Env<'_>) -> Result<Self, ConfigError> {
        let sample_rate: f32 = env.parsed_or("SENTRY_SAMPLE_RATE", 1.0)?;
        if !(0.0..=1.0).contains(&sample_rate) {
            return Err(ConfigError::InvalidEnvVar(
                "SENTRY_SAMPLE_RATE".to_string(),
                format!("must be between 0.0 and 1.0 (got {sample_rate})"),
            ));
        }

        Ok(Self {
            dsn: env.optional("SENTRY_DSN").map(SecretString::from),
            environment: env
                .optional("SENTRY_ENVIRONMENT")
                .unwrap_or_else(|| DEFAULT_SENTRY_ENVIRONMENT.to_string()),
            sample_rate,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a>(&'a dyn Fn(&str) -> Option<String>);

impl Env<'_> {
    /// Get an optional variable; blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Parse a variable, or use a default when unset.
    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |value| {
            value
                .trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }

    /// Parse a whole number of milliseconds, or use a default when unset.
    fn millis_or(&self, key: &str, default: Duration) -> Result<Duration, ConfigError> {
        self.optional(key).map_or(Ok(default), |_| {
            let millis: u64 = self.parsed_or(key, 0)?;
            if millis == 0 {
                return Err(ConfigError::InvalidEnvVar(
                    key.to_string(),
                    "must be greater than zero".to_string(),
                ));
            }
            Ok(Duration::from_millis(millis))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.snapshot_path, PathBuf::from("grado-app-storage.json"));
        assert_eq!(config.timeline_unit, Duration::from_secs(1));
        assert_eq!(config.feedback_window, Duration::from_secs(1));
        assert!(config.sentry.dsn.is_none());
        assert_eq!(config.sentry.environment, "development");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("GRADO_SNAPSHOT_PATH", "/tmp/grado.json"),
            ("GRADO_TIMELINE_UNIT_MS", "50"),
            ("GRADO_FEEDBACK_WINDOW_MS", "250"),
            ("SENTRY_DSN", "https://key@sentry.example/1"),
            ("SENTRY_ENVIRONMENT", "production"),
            ("SENTRY_SAMPLE_RATE", "0.25"),
        ])
        .unwrap();

        assert_eq!(config.snapshot_path, PathBuf::from("/tmp/grado.json"));
        assert_eq!(config.timeline_unit, Duration::from_millis(50));
        assert_eq!(config.feedback_window, Duration::from_millis(250));
        assert_eq!(
            config.sentry.dsn.as_ref().map(|dsn| dsn.expose_secret()),
            Some("https://key@sentry.example/1")
        );
        assert_eq!(config.sentry.environment, "production");
        assert!((config.sentry.sample_rate - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = load(&[("SENTRY_DSN", ""), ("GRADO_TIMELINE_UNIT_MS", "  ")]).unwrap();
        assert!(config.sentry.dsn.is_none());
        assert_eq!(config.timeline_unit, DEFAULT_TIME_UNIT);
    }

    #[test]
    fn test_invalid_millis() {
        let err = load(&[("GRADO_TIMELINE_UNIT_MS", "soon")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnvVar(key, _) if key == "GRADO_TIMELINE_UNIT_MS"
        ));
    }

    #[test]
    fn test_zero_millis_rejected() {
        let err = load(&[("GRADO_FEEDBACK_WINDOW_MS", "0")]).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        let err = load(&[("SENTRY_SAMPLE_RATE", "1.5")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "SENTRY_SAMPLE_RATE"));
    }

    #[test]
    fn test_debug_redacts_dsn() {
        let config = load(&[("SENTRY_DSN", "https://supersecretkey@sentry.example/1")]).unwrap();
        let debug_output = format!("{config:?}");
        assert!(!debug_output.contains("supersecretkey"));
    }
}
