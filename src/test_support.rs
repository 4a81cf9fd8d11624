//! Fixture keys and token minting for unit tests.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;

use crate::services::auth::jwks::{RsaPublicKey, parse_key_set};

const SIGNING_KEY_PEM: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/rsa_private.pem"
));
const OTHER_KEY_PEM: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/other_rsa_private.pem"
));
const JWKS_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/jwks.json"
));

/// Key-set document whose first entry is the public half of `SIGNING_KEY_PEM`.
pub fn jwks_json() -> &'static str {
    JWKS_JSON
}

pub fn public_key() -> RsaPublicKey {
    parse_key_set(JWKS_JSON.as_bytes()).unwrap()
}

fn sign<T: Serialize>(alg: Algorithm, key: &EncodingKey, claims: &T) -> String {
    let mut header = Header::new(alg);
    header.typ = Some("JWT".to_string());
    jsonwebtoken::encode(&header, claims, key).unwrap()
}

/// Sign with the fixture RSA key (RS* or PS*).
pub fn sign_rs<T: Serialize>(alg: Algorithm, claims: &T) -> String {
    let key = EncodingKey::from_rsa_pem(SIGNING_KEY_PEM.as_bytes()).unwrap();
    sign(alg, &key, claims)
}

pub fn sign_with_other_key<T: Serialize>(claims: &T) -> String {
    let key = EncodingKey::from_rsa_pem(OTHER_KEY_PEM.as_bytes()).unwrap();
    sign(Algorithm::RS256, &key, claims)
}

pub fn sign_hs256<T: Serialize>(secret: &[u8], claims: &T) -> String {
    sign(Algorithm::HS256, &EncodingKey::from_secret(secret), claims)
}

/// Same token with the first signature byte flipped.
pub fn flip_signature_byte(token: &str) -> String {
    let (signing_input, signature) = token.rsplit_once('.').unwrap();
    let mut sig = URL_SAFE_NO_PAD.decode(signature).unwrap();
    sig[0] ^= 0x01;
    format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(sig))
}
