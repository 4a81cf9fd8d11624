#![allow(dead_code)]

use std::net::SocketAddr;

use axum::{
    Router,
    http::{HeaderMap, StatusCode},
    routing::get,
};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use url::Url;

pub const JWKS_JSON: &str = include_str!("../fixtures/jwks.json");
const SIGNING_KEY_PEM: &str = include_str!("../fixtures/rsa_private.pem");

pub const JWKS_PATH: &str = "/v1/identity/oidc/.well-known/keys";

/// Serve `body` at `JWKS_PATH` on an ephemeral port.
///
/// When `required_vault_token` is set, requests without a matching
/// `X-Vault-Token` get a 403.
pub async fn serve_jwks(body: &'static str, required_vault_token: Option<&'static str>) -> Url {
    let app = Router::new().route(
        JWKS_PATH,
        get(move |headers: HeaderMap| async move {
            let presented = headers.get("x-vault-token").and_then(|v| v.to_str().ok());
            match required_vault_token {
                Some(expected) if presented != Some(expected) => (StatusCode::FORBIDDEN, ""),
                _ => (StatusCode::OK, body),
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    jwks_url(addr)
}

pub fn jwks_url(addr: SocketAddr) -> Url {
    Url::parse(&format!("http://{addr}{JWKS_PATH}")).unwrap()
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn sign_rs256<T: Serialize>(claims: &T) -> String {
    let key = EncodingKey::from_rsa_pem(SIGNING_KEY_PEM.as_bytes()).unwrap();
    jsonwebtoken::encode(&Header::new(Algorithm::RS256), claims, &key).unwrap()
}

pub fn sign_hs256<T: Serialize>(secret: &[u8], claims: &T) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}
