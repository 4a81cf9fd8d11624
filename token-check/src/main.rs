use std::process::ExitCode;

use clap::Parser;
use hello_secure::config::DEFAULT_JWKS_URL;
use hello_secure::services::auth::{ClaimSet, JwksClient, TokenVerifier, VerifyError};
use jsonwebtoken::Algorithm;
use url::Url;

/// Validate a JWT against the first key of a JWKS endpoint.
///
/// Checks, in order:
/// - RS256 signature against the first key in the key set (no `kid` matching)
/// - `exp` / `nbf` when present
/// - `iss` equals `--issuer` (`aud` is not validated)
/// - `custom_aud` claim equals `--custom-aud`
#[derive(Parser, Debug)]
#[command(name = "token-check", version, about)]
struct Args {
    /// The JWT to validate
    token: String,

    /// Key-set URL
    #[arg(long, env = "JWKS_URL", default_value = DEFAULT_JWKS_URL)]
    jwks_url: Url,

    /// Sent as X-Vault-Token when fetching the key set
    #[arg(long, env = "VAULT_TOKEN", hide_env_values = true)]
    vault_token: Option<String>,

    /// Expected `iss` claim
    #[arg(long, default_value = "http://127.0.0.1:8200/v1/identity/oidc")]
    issuer: String,

    /// Expected value of the `custom_aud` claim
    #[arg(long, default_value = "my-service")]
    custom_aud: String,
}

#[derive(Debug)]
enum CheckError {
    Verify(VerifyError),
    CustomAudience(String),
}

fn check(verifier: &TokenVerifier, token: &str, custom_aud: &str) -> Result<ClaimSet, CheckError> {
    let claims = verifier.verify(token).map_err(CheckError::Verify)?;

    if claims.get_str("custom_aud") != Some(custom_aud) {
        return Err(CheckError::CustomAudience(custom_aud.to_string()));
    }

    Ok(claims)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let key = JwksClient::new(args.vault_token)
        .load_public_key(&args.jwks_url)
        .await?;

    let verifier = TokenVerifier::new(&key)
        .with_algorithms(&[Algorithm::RS256])
        .with_issuer(&args.issuer);

    match check(&verifier, &args.token, &args.custom_aud) {
        Ok(claims) => {
            println!("Token is valid!");
            println!("Claims: {}", serde_json::to_string_pretty(&claims)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(CheckError::Verify(VerifyError::Expired)) => {
            println!("Token has expired!");
            Ok(ExitCode::FAILURE)
        }
        Err(CheckError::Verify(err)) => {
            println!("Invalid token: {err}");
            Ok(ExitCode::FAILURE)
        }
        Err(CheckError::CustomAudience(expected)) => {
            println!("Invalid token: custom_aud does not match '{expected}'");
            Ok(ExitCode::FAILURE)
        }
    }
}
