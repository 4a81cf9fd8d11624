//! JWKS (JSON Web Key Set) から RSA 公開鍵を取り出す
//!
//! Responsibility:
//! - key-set document を GET で取得する (retry なし、transport のデフォルト timeout のみ)
//! - 先頭の鍵だけを採用し、`n` / `e` を base64url (no padding) で decode する
//! - 起動時に一度だけ呼ばれる前提。失敗したらサーバーは起動しない
//!
//! `kid` による鍵の選択はしない。鍵ローテーションが必要になったら、
//! ここで `kid -> key` の map を作り、verifier 側で token header の `kid` を見る形に拡張する。

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum KeyLoadError {
    #[error("failed to fetch JWKS: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to unmarshal JWKS: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no keys found in JWKS")]
    NoKeys,

    #[error("failed to decode {field}: {source}")]
    Encoding {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("unusable RSA key: {0}")]
    InvalidKey(&'static str),
}

#[derive(Debug, Deserialize)]
struct KeySetDocument {
    // Entries are kept raw so that keys after the first one never affect parsing.
    keys: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RsaJwk {
    #[serde(default)]
    kid: Option<String>,
    n: String,
    e: String,
}

/// RSA public key taken from the first JWKS entry.
///
/// `modulus` is big-endian without leading zero bytes. `exponent` keeps the low
/// 64 bits of the decoded value.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    kid: Option<String>,
    modulus: Vec<u8>,
    exponent: u64,
}

impl std::fmt::Debug for RsaPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaPublicKey")
            .field("kid", &self.kid)
            .field("bits", &self.bits())
            .field("exponent", &self.exponent)
            .finish()
    }
}

impl RsaPublicKey {
    pub fn from_components(
        kid: Option<String>,
        modulus: &[u8],
        exponent: &[u8],
    ) -> Result<Self, KeyLoadError> {
        let modulus = strip_leading_zeros(modulus).to_vec();
        if modulus.is_empty() {
            return Err(KeyLoadError::InvalidKey("modulus is zero"));
        }

        let exponent = be_bytes_to_u64(exponent);
        if exponent == 0 {
            return Err(KeyLoadError::InvalidKey("exponent is zero"));
        }

        Ok(Self {
            kid,
            modulus,
            exponent,
        })
    }

    pub fn kid(&self) -> Option<&str> {
        self.kid.as_deref()
    }

    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    pub fn exponent(&self) -> u64 {
        self.exponent
    }

    /// Bit length of the modulus.
    pub fn bits(&self) -> usize {
        match self.modulus.first() {
            Some(first) => self.modulus.len() * 8 - first.leading_zeros() as usize,
            None => 0,
        }
    }

    pub fn decoding_key(&self) -> DecodingKey {
        let exponent = self.exponent.to_be_bytes();
        DecodingKey::from_rsa_raw_components(&self.modulus, strip_leading_zeros(&exponent))
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

// Big-endian unsigned integer, truncated to its low 64 bits.
fn be_bytes_to_u64(bytes: &[u8]) -> u64 {
    let tail = &bytes[bytes.len().saturating_sub(8)..];
    tail.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
}

fn decode_b64url(field: &'static str, value: &str) -> Result<Vec<u8>, KeyLoadError> {
    URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|source| KeyLoadError::Encoding { field, source })
}

/// Parse a key-set document body and build the public key from its first entry.
pub fn parse_key_set(body: &[u8]) -> Result<RsaPublicKey, KeyLoadError> {
    let document: KeySetDocument = serde_json::from_slice(body)?;

    let first = document.keys.into_iter().next().ok_or(KeyLoadError::NoKeys)?;
    let jwk: RsaJwk = serde_json::from_value(first)?;

    let modulus = decode_b64url("modulus", &jwk.n)?;
    let exponent = decode_b64url("exponent", &jwk.e)?;

    RsaPublicKey::from_components(jwk.kid, &modulus, &exponent)
}

/// HTTP client for the key-set endpoint.
#[derive(Clone)]
pub struct JwksClient {
    http: reqwest::Client,
    vault_token: Option<String>,
}

impl std::fmt::Debug for JwksClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the vault token
        f.debug_struct("JwksClient")
            .field("vault_token", &self.vault_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl JwksClient {
    /// `vault_token` is sent as `X-Vault-Token` when present.
    pub fn new(vault_token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            vault_token,
        }
    }

    pub async fn load_public_key(&self, url: &Url) -> Result<RsaPublicKey, KeyLoadError> {
        let mut request = self.http.get(url.clone());
        if let Some(token) = &self.vault_token {
            request = request.header("X-Vault-Token", token);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.bytes().await?;

        parse_key_set(&body)
    }
}
