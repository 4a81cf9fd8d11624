/*
 * Responsibility
 * - Config読み込み → JWKS 公開鍵のロード → Router 組み立て
 * - Middleware の適用 (request-id / trace / panic recovery / bearer auth)
 * - 鍵のロードに失敗したら port を bind せずに終了する
 * - axum::serve() で起動
 */
use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppEnv, Config};
use crate::services::auth::{KeyLoadError, build_token_verifier};
use crate::state::AppState;
use crate::{api, middleware};

fn default_log_filter(app_env: AppEnv) -> &'static str {
    if app_env.is_production() {
        "info,tower_http=info"
    } else {
        "info,hello_secure=debug,tower_http=debug"
    }
}

fn init_tracing(app_env: AppEnv) {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,hello_secure=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_log_filter(app_env)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    // .env must be loaded before APP_ENV / RUST_LOG are read for the subscriber.
    let config = Config::from_env();
    let app_env = match &config {
        Ok(config) => config.app_env,
        Err(_) => AppEnv::from_env(),
    };
    init_tracing(app_env);

    let config = config.inspect_err(|err| {
        tracing::error!(error = %err, "failed to load configuration");
    })?;

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    // Fail fast: no retry, no degraded mode.
    let state = build_state(&config).await.inspect_err(|err| {
        tracing::error!(error = %err, jwks_url = %config.jwks_url, "failed to load JWKS");
    })?;

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load the public key and build the shared state. Must complete before the listener is bound.
pub async fn build_state(config: &Config) -> Result<AppState, KeyLoadError> {
    let verifier = build_token_verifier(config).await?;

    Ok(AppState::new(verifier))
}

pub fn build_router(state: AppState) -> Router {
    let router = api::routes(state.clone()).with_state(state);

    middleware::http::apply(router)
}
