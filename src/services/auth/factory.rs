/// Factory: load the JWKS key named by `Config` and build the `TokenVerifier`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{JwksClient, KeyLoadError, TokenVerifier};

pub async fn build_token_verifier(config: &Config) -> Result<Arc<TokenVerifier>, KeyLoadError> {
    let client = JwksClient::new(config.vault_token.clone());
    let key = client.load_public_key(&config.jwks_url).await?;

    tracing::info!(
        kid = key.kid().unwrap_or("-"),
        bits = key.bits(),
        "loaded JWKS public key"
    );

    Ok(Arc::new(TokenVerifier::new(&key)))
}
