mod common;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hello_secure::services::auth::{JwksClient, KeyLoadError, TokenVerifier};
use serde_json::{Value, json};

#[tokio::test]
async fn loads_first_key_over_http() {
    let url = common::serve_jwks(common::JWKS_JSON, None).await;

    let key = JwksClient::new(None).load_public_key(&url).await.unwrap();

    let doc: Value = serde_json::from_str(common::JWKS_JSON).unwrap();
    let n = URL_SAFE_NO_PAD
        .decode(doc["keys"][0]["n"].as_str().unwrap())
        .unwrap();
    assert_eq!(key.modulus(), n.as_slice());
    assert_eq!(key.exponent(), 65537);
    assert_eq!(key.kid(), Some("test-key-1"));
}

#[tokio::test]
async fn loaded_key_verifies_tokens_signed_by_its_private_half() {
    let url = common::serve_jwks(common::JWKS_JSON, None).await;
    let key = JwksClient::new(None).load_public_key(&url).await.unwrap();
    let verifier = TokenVerifier::new(&key);

    let claims = json!({"sub": "alice", "email": "alice@example.com", "n": 7});
    let token = common::sign_rs256(&claims);

    let verified = verifier.verify(&token).unwrap();
    assert_eq!(serde_json::to_value(&verified).unwrap(), claims);
}

#[tokio::test]
async fn sends_vault_token_when_configured() {
    let url = common::serve_jwks(common::JWKS_JSON, Some("s.test-token")).await;

    let err = JwksClient::new(None).load_public_key(&url).await.unwrap_err();
    assert!(matches!(err, KeyLoadError::Fetch(_)), "{err:?}");

    let key = JwksClient::new(Some("s.test-token".to_string()))
        .load_public_key(&url)
        .await
        .unwrap();
    assert_eq!(key.kid(), Some("test-key-1"));
}

#[tokio::test]
async fn empty_key_set_fails() {
    let url = common::serve_jwks(r#"{"keys": []}"#, None).await;

    let err = JwksClient::new(None).load_public_key(&url).await.unwrap_err();
    assert!(matches!(err, KeyLoadError::NoKeys));
    assert_eq!(err.to_string(), "no keys found in JWKS");
}

#[tokio::test]
async fn non_json_body_fails_to_parse() {
    let url = common::serve_jwks("<html>vault is sealed</html>", None).await;

    let err = JwksClient::new(None).load_public_key(&url).await.unwrap_err();
    assert!(matches!(err, KeyLoadError::Parse(_)));
}

#[tokio::test]
async fn unreachable_endpoint_fails_to_fetch() {
    let url = common::jwks_url(common::closed_addr().await);

    let err = JwksClient::new(None).load_public_key(&url).await.unwrap_err();
    assert!(matches!(err, KeyLoadError::Fetch(_)));
}
