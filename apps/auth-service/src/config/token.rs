//! Secrets and lifetimes for access and refresh tokens.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use super::source::{ConfigSource, Lookup, ProcessEnv};
use crate::auth::TokenClass;
use crate::error::AppError;
use crate::logging::security;

pub const ACCESS_SECRET_KEY: &str = "JWT_ACCESS_SECRET";
pub const REFRESH_SECRET_KEY: &str = "JWT_REFRESH_SECRET";
pub const ACCESS_TTL_MINUTES_KEY: &str = "JWT_ACCESS_TTL_MINUTES";
pub const REFRESH_TTL_DAYS_KEY: &str = "JWT_REFRESH_TTL_DAYS";
pub const RUNTIME_ENV_KEY: &str = "APP_ENV";

pub const DEFAULT_ACCESS_SECRET: &str = "default-access-secret";
pub const DEFAULT_REFRESH_SECRET: &str = "default-refresh-secret";
pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 15;
pub const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Deployment context; decides whether development fallbacks are tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Dev,
    Prod,
}

impl RuntimeEnv {
    /// `prod` or `production` (any case) selects `Prod`; everything else is `Dev`.
    pub fn from_source<S: ConfigSource + ?Sized>(source: &S) -> Self {
        match source
            .get(RUNTIME_ENV_KEY)
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            Some("prod") | Some("production") => RuntimeEnv::Prod,
            _ => RuntimeEnv::Dev,
        }
    }

    pub fn from_env() -> Self {
        Self::from_source(&ProcessEnv)
    }
}

/// A configuration value that was recovered locally by substituting a default.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigDegraded {
    #[error("{key} is not set, using the development default secret")]
    DefaultSecret { key: &'static str },

    #[error("{key}={raw:?} is not a valid integer, defaulting to {default}")]
    UnparsableTtl {
        key: &'static str,
        raw: String,
        default: i64,
    },
}

/// Secrets and lifetimes for both token classes.
#[derive(Clone)]
pub struct TokenConfig {
    pub access_secret: Vec<u8>,
    pub refresh_secret: Vec<u8>,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub runtime_env: RuntimeEnv,
    /// Values that fell back to defaults while loading.
    pub degraded: Vec<ConfigDegraded>,
}

impl TokenConfig {
    pub fn new(
        access_secret: impl Into<Vec<u8>>,
        refresh_secret: impl Into<Vec<u8>>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl,
            refresh_ttl,
            runtime_env: RuntimeEnv::Dev,
            degraded: Vec::new(),
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_source(&ProcessEnv, RuntimeEnv::from_env())
    }

    /// Load from `source`.
    ///
    /// Fails when a secret is missing in `Prod`, when both classes share a
    /// secret, or when a configured TTL is zero or negative. Unparsable TTLs
    /// degrade to their defaults.
    pub fn from_source<S: ConfigSource + ?Sized>(
        source: &S,
        runtime_env: RuntimeEnv,
    ) -> Result<Self, AppError> {
        let mut degraded = Vec::new();

        let access_secret = load_secret(
            source,
            ACCESS_SECRET_KEY,
            DEFAULT_ACCESS_SECRET,
            TokenClass::Access,
            runtime_env,
            &mut degraded,
        )?;
        let refresh_secret = load_secret(
            source,
            REFRESH_SECRET_KEY,
            DEFAULT_REFRESH_SECRET,
            TokenClass::Refresh,
            runtime_env,
            &mut degraded,
        )?;

        if access_secret == refresh_secret {
            return Err(AppError::config(format!(
                "{ACCESS_SECRET_KEY} and {REFRESH_SECRET_KEY} must differ"
            )));
        }

        let access_ttl = load_ttl(
            source,
            ACCESS_TTL_MINUTES_KEY,
            DEFAULT_ACCESS_TTL_MINUTES,
            SECS_PER_MINUTE,
            &mut degraded,
        )?;
        let refresh_ttl = load_ttl(
            source,
            REFRESH_TTL_DAYS_KEY,
            DEFAULT_REFRESH_TTL_DAYS,
            SECS_PER_DAY,
            &mut degraded,
        )?;

        Ok(Self {
            access_secret,
            refresh_secret,
            access_ttl,
            refresh_ttl,
            runtime_env,
            degraded,
        })
    }

    pub fn secret(&self, class: TokenClass) -> &[u8] {
        match class {
            TokenClass::Access => &self.access_secret,
            TokenClass::Refresh => &self.refresh_secret,
        }
    }

    pub fn ttl(&self, class: TokenClass) -> Duration {
        match class {
            TokenClass::Access => self.access_ttl,
            TokenClass::Refresh => self.refresh_ttl,
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("access_secret", &"<redacted>")
            .field("refresh_secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("runtime_env", &self.runtime_env)
            .field("degraded", &self.degraded)
            .finish()
    }
}

fn load_secret<S: ConfigSource + ?Sized>(
    source: &S,
    key: &'static str,
    fallback: &str,
    class: TokenClass,
    runtime_env: RuntimeEnv,
    degraded: &mut Vec<ConfigDegraded>,
) -> Result<Vec<u8>, AppError> {
    match source.string_or(key, fallback) {
        Lookup::Configured(secret) => Ok(secret.into_bytes()),
        Lookup::Defaulted(_) if runtime_env == RuntimeEnv::Prod => Err(AppError::config(format!(
            "{key} must be set in production"
        ))),
        lookup => {
            security::default_secret_in_use(key, class);
            degraded.push(ConfigDegraded::DefaultSecret { key });
            Ok(lookup.into_value().into_bytes())
        }
    }
}

fn load_ttl<S: ConfigSource + ?Sized>(
    source: &S,
    key: &'static str,
    default: i64,
    unit_secs: u64,
    degraded: &mut Vec<ConfigDegraded>,
) -> Result<Duration, AppError> {
    let amount = match source.int_or(key, default) {
        Lookup::Configured(v) => v,
        Lookup::Defaulted(v) => {
            debug!(key, default = v, "TTL not set, using default");
            v
        }
        Lookup::Degraded { value, raw } => {
            let issue = ConfigDegraded::UnparsableTtl {
                key,
                raw,
                default: value,
            };
            warn!(event = "CONFIG_DEGRADED", key, "{issue}");
            degraded.push(issue);
            value
        }
    };

    if amount <= 0 {
        return Err(AppError::config(format!(
            "{key} must be a positive integer, got {amount}"
        )));
    }

    (amount as u64)
        .checked_mul(unit_secs)
        .map(Duration::from_secs)
        .ok_or_else(|| AppError::config(format!("{key} is too large: {amount}")))
}
