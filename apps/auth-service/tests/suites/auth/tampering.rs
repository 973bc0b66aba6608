use std::time::SystemTime;

use auth_service::{issue, verify, TokenClass, TokenError};
use auth_test_support::tokens::{flip_signature_byte, header_json, payload_json, with_header, with_payload};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{json, Value};

use crate::common::{minutes, t0};
use crate::support::signer::{ACCESS_SECRET, REFRESH_SECRET};
use crate::support::test_signer;

fn sign_raw(claims: &Value, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[test]
fn test_flipped_signature_byte_rejected() {
    let signer = test_signer();
    let token = issue(TokenClass::Access, "user-42", Some("admin"), t0(), &signer).unwrap();

    for index in [0, 7, 16, 31] {
        let tampered = flip_signature_byte(&token, index);
        assert_ne!(tampered, token);
        assert_eq!(
            verify(TokenClass::Access, &tampered, t0(), &signer).unwrap_err(),
            TokenError::SignatureInvalid,
            "byte {index}"
        );
    }
}

#[test]
fn test_rewritten_payload_rejected() {
    let signer = test_signer();
    let token = issue(TokenClass::Access, "user-42", None, t0(), &signer).unwrap();

    let mut payload = payload_json(&token);
    payload["role"] = json!("admin");
    let escalated = with_payload(&token, &payload);

    assert_eq!(
        verify(TokenClass::Access, &escalated, t0(), &signer).unwrap_err(),
        TokenError::SignatureInvalid
    );
}

#[test]
fn test_extended_expiry_rejected() {
    let signer = test_signer();
    let token = issue(TokenClass::Access, "user-42", None, t0(), &signer).unwrap();

    let mut payload = payload_json(&token);
    payload["exp"] = json!(payload["exp"].as_i64().unwrap() + 3600);
    let extended = with_payload(&token, &payload);

    assert_eq!(
        verify(TokenClass::Access, &extended, t0() + minutes(30), &signer).unwrap_err(),
        TokenError::SignatureInvalid
    );
}

#[test]
fn test_algorithm_swap_rejected() {
    let signer = test_signer();
    let token = issue(TokenClass::Access, "user-42", None, t0(), &signer).unwrap();

    let mut header = header_json(&token);
    header["alg"] = json!("HS512");
    let swapped = with_header(&token, &header);
    assert_eq!(
        verify(TokenClass::Access, &swapped, t0(), &signer).unwrap_err(),
        TokenError::SignatureInvalid
    );

    header["alg"] = json!("none");
    let unsigned = with_header(&token, &header);
    let err = verify(TokenClass::Access, &unsigned, t0(), &signer).unwrap_err();
    assert!(err.is_verification_failure(), "got {err:?}");
}

#[test]
fn test_well_signed_but_incomplete_claims_are_malformed() {
    let signer = test_signer();
    let iat = 1_700_000_000_i64;

    let missing_exp = sign_raw(&json!({ "sub": "user-42", "iat": iat }), ACCESS_SECRET);
    let missing_sub = sign_raw(&json!({ "iat": iat, "exp": iat + 60 }), ACCESS_SECRET);
    let missing_iat = sign_raw(&json!({ "sub": "user-42", "exp": iat + 60 }), ACCESS_SECRET);
    let empty_sub = sign_raw(&json!({ "sub": "", "iat": iat, "exp": iat + 60 }), ACCESS_SECRET);
    let inverted = sign_raw(&json!({ "sub": "user-42", "iat": iat, "exp": iat }), ACCESS_SECRET);

    for token in [missing_exp, missing_sub, missing_iat, empty_sub, inverted] {
        assert_eq!(
            verify(TokenClass::Access, &token, t0(), &signer).unwrap_err(),
            TokenError::Malformed,
            "claims {}",
            payload_json(&token)
        );
    }
}

#[test]
fn test_standard_verifier_accepts_issued_tokens() {
    let signer = test_signer();
    let token = issue(TokenClass::Access, "user-42", Some("admin"), SystemTime::now(), &signer).unwrap();

    let data = decode::<Value>(
        &token,
        &DecodingKey::from_secret(ACCESS_SECRET.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .unwrap();
    assert_eq!(data.claims["sub"], "user-42");
    assert_eq!(data.claims["role"], "admin");
}

#[test]
fn test_standard_issuer_tokens_verify() {
    let signer = test_signer();
    let iat = 1_700_000_000_i64;
    let foreign = sign_raw(
        &json!({ "sub": "user-7", "iat": iat, "exp": iat + 600 }),
        REFRESH_SECRET,
    );

    let claims = verify(TokenClass::Refresh, &foreign, t0(), &signer).unwrap();
    assert_eq!(claims.subject(), "user-7");
    assert_eq!(claims.role(), None);

    let explicit_empty_role = sign_raw(
        &json!({ "sub": "user-7", "role": "", "iat": iat, "exp": iat + 600 }),
        ACCESS_SECRET,
    );
    let claims = verify(TokenClass::Access, &explicit_empty_role, t0(), &signer).unwrap();
    assert_eq!(claims.role(), None);
}

#[test]
fn test_standard_issuer_audience_is_ignored() {
    let signer = test_signer();
    let iat = 1_700_000_000_i64;
    let with_aud = sign_raw(
        &json!({ "sub": "user-7", "iat": iat, "exp": iat + 600, "aud": "api" }),
        ACCESS_SECRET,
    );

    let claims = verify(TokenClass::Access, &with_aud, t0(), &signer).unwrap();
    assert_eq!(claims.subject(), "user-7");

    let with_aud_list = sign_raw(
        &json!({ "sub": "user-7", "iat": iat, "exp": iat + 600, "aud": ["api", "web"] }),
        ACCESS_SECRET,
    );
    assert!(verify(TokenClass::Access, &with_aud_list, t0(), &signer).is_ok());
}

#[test]
fn test_standard_issuer_fractional_dates_verify() {
    let signer = test_signer();
    let fractional = sign_raw(
        &json!({ "sub": "user-7", "iat": 1_700_000_000.0, "exp": 1_700_000_600.5 }),
        ACCESS_SECRET,
    );

    let claims = verify(TokenClass::Access, &fractional, t0(), &signer).unwrap();
    assert_eq!(claims.iat, 1_700_000_000);
    assert_eq!(claims.exp, 1_700_000_600);

    // Floored expiry: the token is already expired within its last fractional second.
    assert!(matches!(
        verify(TokenClass::Access, &fractional, t0() + minutes(10), &signer),
        Err(TokenError::Expired { expired_at: 1_700_000_600 })
    ));
}

#[test]
fn test_not_before_in_the_future_rejected() {
    let signer = test_signer();
    let iat = 1_700_000_000_i64;
    let deferred = sign_raw(
        &json!({ "sub": "user-7", "iat": iat, "exp": iat + 600, "nbf": iat + 300 }),
        ACCESS_SECRET,
    );

    let err = verify(TokenClass::Access, &deferred, t0(), &signer).unwrap_err();
    assert_eq!(err, TokenError::NotYetValid { not_before: iat + 300 });
    assert!(err.is_verification_failure());

    let claims = verify(TokenClass::Access, &deferred, t0() + minutes(5), &signer).unwrap();
    assert_eq!(claims.nbf, Some(iat + 300));
}

#[test]
fn test_issued_tokens_carry_no_not_before() {
    let signer = test_signer();
    let token = issue(TokenClass::Access, "user-42", None, t0(), &signer).unwrap();

    assert!(payload_json(&token).get("nbf").is_none());
    assert_eq!(verify(TokenClass::Access, &token, t0(), &signer).unwrap().nbf, None);
}
