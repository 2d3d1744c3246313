// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT header and claim parsing for account validation.
//!
//! The account never sees a compact JWT. The custom signature carries the
//! header and payload as raw JSON strings, and the signed message is rebuilt
//! from those exact bytes. Nothing here re-serializes the JSON, so key order
//! and whitespace chosen by the issuer are preserved.

use base64ct::{Base64UrlUnpadded, Encoding};
use jsonwebtoken::Algorithm;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::ValidationError;

/// Rebuild the RS256 signing input: `base64url(header) + "." + base64url(payload)`.
pub fn signed_message(header_json: &str, payload_json: &str) -> String {
    let mut message = Base64UrlUnpadded::encode_string(header_json.as_bytes());
    message.push('.');
    message.push_str(&Base64UrlUnpadded::encode_string(payload_json.as_bytes()));
    message
}

/// The parts of a JWT header that validation depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtHeader {
    /// Key id selecting the provider signing key.
    pub key_id: String,
}

/// Header fields read from the raw JSON. `typ`, `x5t` and any other member
/// are ignored whatever their type.
#[derive(Deserialize)]
struct RawHeader {
    alg: Algorithm,
    #[serde(default)]
    kid: Option<String>,
}

/// Parse a JWT header, requiring `alg = RS256` and a non-empty `kid`.
pub fn parse_header(header_json: &str) -> Result<JwtHeader, ValidationError> {
    let header: RawHeader = serde_json::from_str(header_json)
        .map_err(|e| ValidationError::malformed(format!("invalid JWT header: {e}")))?;

    if header.alg != Algorithm::RS256 {
        return Err(ValidationError::malformed(format!(
            "unsupported JWT algorithm: {:?}",
            header.alg
        )));
    }

    match header.kid {
        Some(kid) if !kid.is_empty() => Ok(JwtHeader { key_id: kid }),
        _ => Err(ValidationError::malformed("JWT header has no kid")),
    }
}

/// Claims read from an identity provider's ID token.
///
/// Only `sub` is required. `iat` and `nonce` are carried into logs; the JWT
/// nonce is an issuer freshness hint and is never compared with the account
/// nonce. Both are read leniently: a value of an unexpected type becomes
/// `None` instead of failing the payload. Any other claim is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityClaims {
    /// Subject: the provider's stable user identifier.
    pub sub: String,

    /// Issued at timestamp
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub iat: Option<i64>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub nonce: Option<String>,

    /// Audience (string or array, depending on the issuer)
    #[serde(default)]
    pub aud: Option<Value>,
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Parse the JWT payload claims.
pub fn parse_claims(payload_json: &str) -> Result<IdentityClaims, ValidationError> {
    serde_json::from_str(payload_json)
        .map_err(|e| ValidationError::malformed(format!("invalid JWT payload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::rs256::verify_rs256;
    use crate::testutil::{
        modulus_of, FIXTURE_HEADER_JSON, FIXTURE_MESSAGE, FIXTURE_PAYLOAD_JSON,
        KID1_PRIVATE_KEY_PEM,
    };
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[test]
    fn signed_message_matches_fixture() {
        assert_eq!(
            signed_message(FIXTURE_HEADER_JSON, FIXTURE_PAYLOAD_JSON),
            FIXTURE_MESSAGE
        );
    }

    #[test]
    fn signed_message_is_unpadded() {
        // 1 and 2 byte inputs would need padding in standard base64.
        assert_eq!(signed_message("a", "ab"), "YQ.YWI");
        assert_eq!(signed_message("", ""), ".");
    }

    #[test]
    fn signed_message_preserves_raw_bytes() {
        let compact = signed_message(r#"{"alg":"RS256","kid":"k"}"#, "{}");
        let spaced = signed_message(r#"{ "alg": "RS256", "kid": "k" }"#, "{}");
        assert_ne!(compact, spaced);
    }

    #[test]
    fn parses_rs256_header() {
        let header = parse_header(FIXTURE_HEADER_JSON).unwrap();
        assert_eq!(header.key_id, "kid1");
    }

    #[test]
    fn rejects_other_algorithms() {
        let err = parse_header(r#"{"alg":"HS256","kid":"kid1"}"#).unwrap_err();
        assert_eq!(err.error_code(), "malformed_auth_payload");

        let err = parse_header(r#"{"alg":"none","kid":"kid1"}"#).unwrap_err();
        assert_eq!(err.error_code(), "malformed_auth_payload");
    }

    #[test]
    fn rejects_missing_or_empty_kid() {
        assert!(parse_header(r#"{"alg":"RS256","typ":"JWT"}"#).is_err());
        assert!(parse_header(r#"{"alg":"RS256","kid":""}"#).is_err());
    }

    #[test]
    fn header_ignores_unconsulted_members() {
        let header =
            parse_header(r#"{"alg":"RS256","kid":"kid1","typ":7,"x5t":["a"],"cty":null}"#).unwrap();
        assert_eq!(header.key_id, "kid1");
    }

    #[test]
    fn rejects_non_json_header() {
        assert!(parse_header("not json").is_err());
        assert!(parse_header("").is_err());
    }

    #[test]
    fn parses_claims() {
        let claims = parse_claims(FIXTURE_PAYLOAD_JSON).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.iat, Some(1516239022));
        assert_eq!(claims.nonce.as_deref(), Some("xf30B2uPOlNXxeOVq5cLW1QJj-8"));
    }

    #[test]
    fn claims_require_sub() {
        let err = parse_claims(r#"{"iat":1}"#).unwrap_err();
        assert_eq!(err.error_code(), "malformed_auth_payload");
    }

    #[test]
    fn unusual_optional_claims_do_not_fail_the_payload() {
        let claims = parse_claims(r#"{"sub":"alice","nonce":12345}"#).unwrap();
        assert_eq!(claims.nonce.as_deref(), Some("12345"));

        let claims = parse_claims(r#"{"sub":"alice","iat":1516239022.5}"#).unwrap();
        assert_eq!(claims.iat, Some(1516239022));

        let claims = parse_claims(r#"{"sub":"alice","iat":"1516239022"}"#).unwrap();
        assert_eq!(claims.iat, Some(1516239022));

        let claims = parse_claims(r#"{"sub":"alice","iat":{"at":1},"nonce":[1]}"#).unwrap();
        assert_eq!(claims.iat, None);
        assert_eq!(claims.nonce, None);
    }

    #[test]
    fn sub_must_be_a_string() {
        assert!(parse_claims(r#"{"sub":42}"#).is_err());
    }

    #[test]
    fn audience_may_be_an_array() {
        let claims = parse_claims(r#"{"sub":"a","aud":["x","y"]}"#).unwrap();
        assert!(claims.aud.unwrap().is_array());
    }

    #[derive(Serialize)]
    struct MintClaims<'a> {
        sub: &'a str,
        iat: i64,
    }

    #[test]
    fn token_minted_by_jsonwebtoken_verifies() {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some("kid1".to_string());
        let key = EncodingKey::from_rsa_pem(KID1_PRIVATE_KEY_PEM.as_bytes()).unwrap();
        let token = encode(&header, &MintClaims { sub: "bob", iat: 1 }, &key).unwrap();

        let mut parts = token.split('.');
        let header_b64 = parts.next().unwrap();
        let payload_b64 = parts.next().unwrap();
        let signature = Base64UrlUnpadded::decode_vec(parts.next().unwrap()).unwrap();

        let header_json =
            String::from_utf8(Base64UrlUnpadded::decode_vec(header_b64).unwrap()).unwrap();
        let payload_json =
            String::from_utf8(Base64UrlUnpadded::decode_vec(payload_b64).unwrap()).unwrap();

        let message = signed_message(&header_json, &payload_json);
        assert_eq!(message, format!("{header_b64}.{payload_b64}"));
        assert_eq!(parse_header(&header_json).unwrap().key_id, "kid1");
        assert_eq!(parse_claims(&payload_json).unwrap().sub, "bob");
        assert!(verify_rs256(
            &modulus_of(KID1_PRIVATE_KEY_PEM),
            message.as_bytes(),
            &signature
        ));
    }
}
