//! Helpers for looking inside and tampering with compact JWTs in tests.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;

/// Split a compact token into its header, payload and signature segments.
pub fn segments(token: &str) -> (&str, &str, &str) {
    let mut parts = token.splitn(3, '.');
    let header = parts.next().expect("token should have a header segment");
    let payload = parts.next().expect("token should have a payload segment");
    let signature = parts.next().expect("token should have a signature segment");
    (header, payload, signature)
}

/// Decode a base64url segment into JSON.
pub fn decode_segment(segment: &str) -> Value {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .expect("segment should be base64url");
    serde_json::from_slice(&bytes).expect("segment should be JSON")
}

/// JSON payload of `token`, without verifying anything.
pub fn payload_json(token: &str) -> Value {
    decode_segment(segments(token).1)
}

/// JSON header of `token`, without verifying anything.
pub fn header_json(token: &str) -> Value {
    decode_segment(segments(token).0)
}

/// Encode `value` as a base64url JSON segment.
pub fn encode_segment(value: &Value) -> String {
    URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).expect("value should serialize"))
}

/// Replace the payload of `token` while keeping its original signature.
pub fn with_payload(token: &str, payload: &Value) -> String {
    let (header, _, signature) = segments(token);
    format!("{header}.{}.{signature}", encode_segment(payload))
}

/// Replace the header of `token` while keeping payload and signature.
pub fn with_header(token: &str, header: &Value) -> String {
    let (_, payload, signature) = segments(token);
    format!("{}.{payload}.{signature}", encode_segment(header))
}

/// Flip one byte of the decoded signature and re-encode it.
pub fn flip_signature_byte(token: &str, index: usize) -> String {
    let (header, payload, signature) = segments(token);
    let mut bytes = URL_SAFE_NO_PAD
        .decode(signature)
        .expect("signature should be base64url");
    let i = index % bytes.len();
    bytes[i] ^= 0x01;
    format!("{header}.{payload}.{}", URL_SAFE_NO_PAD.encode(bytes))
}
