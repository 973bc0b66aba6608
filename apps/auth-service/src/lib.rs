#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod state;

// Re-exports for public API
pub use auth::jwt::{
    issue, mint_access_token, mint_refresh_token, verify, verify_access_token,
    verify_refresh_token,
};
pub use auth::{Claims, Clock, FixedClock, SystemClock, TokenClass, TokenError};
pub use config::{ConfigSource, RuntimeEnv, TokenConfig};
pub use error::AppError;
pub use extractors::{AccessClaims, BearerToken};
pub use state::app_state::AppState;
pub use state::signer::{Signer, SignerCell};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    auth_test_support::logging::init();
}
