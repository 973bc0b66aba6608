use std::time::SystemTime;

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use super::claims::{unix_secs, Claims};
use super::error::TokenError;
use super::token_class::TokenClass;
use crate::state::signer::Signer;

/// Mint a HS256 JWT of `class` for `sub`, valid from `now` for the class TTL.
///
/// `role` is only embedded in access tokens; refresh tokens never carry one.
pub fn issue(
    class: TokenClass,
    sub: &str,
    role: Option<&str>,
    now: SystemTime,
    signer: &Signer,
) -> Result<String, TokenError> {
    let iat = unix_secs(now)?;
    let role = role.filter(|_| class.carries_role());
    let claims = Claims::new(sub, role, iat, signer.ttl_for(class))?;

    encode(
        &Header::new(signer.algorithm()),
        &claims,
        &EncodingKey::from_secret(signer.secret_for(class)),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify a token of `class` and return its claims.
///
/// The signature is checked first against the secret of `class` with the
/// algorithm pinned, then the claims structure, then expiry against `now`
/// with no leeway.
///
/// Errors:
/// - Signature mismatch (including a token of the other class) → `SignatureInvalid`
/// - Undecodable token or unusable claims → `Malformed`
/// - `now` before `nbf` → `NotYetValid`
/// - `now` at or past `exp` → `Expired`
pub fn verify(
    class: TokenClass,
    token: &str,
    now: SystemTime,
    signer: &Signer,
) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(signer.algorithm());
    // Time claims are checked below against the caller's clock.
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    // `iat`/`exp` presence is enforced when deserializing `Claims`.
    validation.set_required_spec_claims(&["sub"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(signer.secret_for(class)),
        &validation,
    )?
    .claims
    .normalized();

    claims.validate_window(unix_secs(now)?)?;
    Ok(claims)
}

pub fn mint_access_token(
    sub: &str,
    role: Option<&str>,
    now: SystemTime,
    signer: &Signer,
) -> Result<String, TokenError> {
    issue(TokenClass::Access, sub, role, now, signer)
}

pub fn mint_refresh_token(sub: &str, now: SystemTime, signer: &Signer) -> Result<String, TokenError> {
    issue(TokenClass::Refresh, sub, None, now, signer)
}

pub fn verify_access_token(token: &str, now: SystemTime, signer: &Signer) -> Result<Claims, TokenError> {
    verify(TokenClass::Access, token, now, signer)
}

pub fn verify_refresh_token(
    token: &str,
    now: SystemTime,
    signer: &Signer,
) -> Result<Claims, TokenError> {
    verify(TokenClass::Refresh, token, now, signer)
}
