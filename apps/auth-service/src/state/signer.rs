//! Credential signer: per-class secrets and lifetimes, loaded once.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use once_cell::sync::OnceCell;

use crate::auth::TokenClass;
use crate::config::TokenConfig;
use crate::error::AppError;

const MIN_TTL: Duration = Duration::from_secs(1);

struct ClassKey {
    secret: Vec<u8>,
    ttl: Duration,
}

/// Holds the HMAC secret and TTL of each token class.
///
/// Immutable once built; share it behind an `Arc` and read it from any
/// number of threads.
pub struct Signer {
    access: ClassKey,
    refresh: ClassKey,
    algorithm: Algorithm,
}

impl Signer {
    /// Build a signer from loaded configuration.
    ///
    /// Secrets must be non-empty and distinct per class, and each TTL must be
    /// at least one second so that `exp > iat` holds at token resolution.
    pub fn new(config: &TokenConfig) -> Result<Self, AppError> {
        for class in TokenClass::ALL {
            if config.secret(class).is_empty() {
                return Err(AppError::config(format!("{class} secret must not be empty")));
            }
            if config.ttl(class) < MIN_TTL {
                return Err(AppError::config(format!(
                    "{class} TTL must be at least one second"
                )));
            }
        }
        if config.access_secret == config.refresh_secret {
            return Err(AppError::config(
                "access and refresh secrets must differ",
            ));
        }

        Ok(Self {
            access: ClassKey {
                secret: config.access_secret.clone(),
                ttl: config.access_ttl,
            },
            refresh: ClassKey {
                secret: config.refresh_secret.clone(),
                ttl: config.refresh_ttl,
            },
            algorithm: Algorithm::HS256,
        })
    }

    /// Load configuration from the process environment and build a signer.
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(&TokenConfig::from_env()?)
    }

    fn key(&self, class: TokenClass) -> &ClassKey {
        match class {
            TokenClass::Access => &self.access,
            TokenClass::Refresh => &self.refresh,
        }
    }

    /// HMAC secret for `class`. Only the token codec reads this.
    pub(crate) fn secret_for(&self, class: TokenClass) -> &[u8] {
        &self.key(class).secret
    }

    pub fn ttl_for(&self, class: TokenClass) -> Duration {
        self.key(class).ttl
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("access_ttl", &self.access.ttl)
            .field("refresh_ttl", &self.refresh.ttl)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// One-time initialization guard for a shared [`Signer`].
///
/// The loader runs at most once even when many threads race on first use;
/// every caller then receives the same `Arc`. A failed load is handed back
/// to the caller and not cached, so a later call may retry.
#[derive(Debug, Default)]
pub struct SignerCell {
    cell: OnceCell<Arc<Signer>>,
}

impl SignerCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get_or_init<F>(&self, load: F) -> Result<Arc<Signer>, AppError>
    where
        F: FnOnce() -> Result<TokenConfig, AppError>,
    {
        self.cell
            .get_or_try_init(|| {
                let config = load()?;
                Signer::new(&config).map(Arc::new)
            })
            .cloned()
    }

    /// Initialize from the process environment.
    pub fn get_or_init_from_env(&self) -> Result<Arc<Signer>, AppError> {
        self.get_or_init(TokenConfig::from_env)
    }

    pub fn get(&self) -> Option<Arc<Signer>> {
        self.cell.get().cloned()
    }
}
