/*
 * Responsibility
 * - URL 構造を定義 (GET /, GET /secure)
 * - Bearer が必要な handler (GET /secure) にだけ route_layer で認証を掛ける
 * - axum の get() は HEAD も同じ handler で受ける
 */
use axum::{Router, routing::get};

use crate::api::handlers::{hello::hello, secure::secure};
use crate::middleware::bearer_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(hello))
        .route("/secure", bearer_auth::apply(get(secure), state))
}
