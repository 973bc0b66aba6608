use thiserror::Error;

/// Failures produced while minting or verifying a token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Well-signed token whose expiry has been reached.
    #[error("token expired at {expired_at}")]
    Expired { expired_at: i64 },

    /// Well-signed token whose `nbf` lies after the verification instant.
    #[error("token not valid before {not_before}")]
    NotYetValid { not_before: i64 },

    /// Signature does not match the secret of the requested class.
    #[error("token signature is invalid")]
    SignatureInvalid,

    /// Not a parseable token, or the claims are structurally unusable.
    #[error("token is malformed")]
    Malformed,

    #[error("token subject must not be empty")]
    EmptySubject,

    /// Encoding failed with a valid key; indicates a broken key or encoder.
    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("system clock is outside the representable token time range")]
    Clock,
}

impl TokenError {
    /// True for the outcomes a verifier can produce for a presented token.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            TokenError::Expired { .. }
                | TokenError::NotYetValid { .. }
                | TokenError::SignatureInvalid
                | TokenError::Malformed
        )
    }

    /// Stable short label, used in security log events.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Expired { .. } => "token_expired",
            TokenError::NotYetValid { .. } => "token_not_yet_valid",
            TokenError::SignatureInvalid => "invalid_signature",
            TokenError::Malformed => "invalid_token",
            TokenError::EmptySubject => "empty_subject",
            TokenError::Signing(_) => "signing_failed",
            TokenError::Clock => "clock_out_of_range",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::SignatureInvalid
            }
            _ => TokenError::Malformed,
        }
    }
}
