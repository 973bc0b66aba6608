use tracing::warn;

use crate::auth::TokenClass;

/// Log that a development fallback secret is signing tokens.
pub fn default_secret_in_use(key: &str, class: TokenClass) {
    warn!(
        event = "SECURITY_DEFAULT_SECRET",
        key,
        class = class.as_str(),
        "Using built-in development secret; set the variable before deploying"
    );
}

/// Log a presented token that failed verification.
pub fn token_rejected(class: TokenClass, reason: &str) {
    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        class = class.as_str(),
        reason,
        "Token rejected"
    );
}
