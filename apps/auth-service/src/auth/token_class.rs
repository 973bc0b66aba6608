use std::fmt;

/// The two classes of credentials minted by the signer.
///
/// The class is never written into the token payload; a token belongs to the
/// class whose secret verifies its signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    /// Short-lived credential presented on individual requests.
    Access,
    /// Long-lived credential only exchanged for a fresh access token.
    Refresh,
}

impl TokenClass {
    pub const ALL: [TokenClass; 2] = [TokenClass::Access, TokenClass::Refresh];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenClass::Access => "access",
            TokenClass::Refresh => "refresh",
        }
    }

    /// Refresh tokens carry minimal authority and never embed a role.
    pub fn carries_role(self) -> bool {
        matches!(self, TokenClass::Access)
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
