//! Bearer トークンの検証 (ヘッダ抽出 → 検証 → 拒否) → AuthCtx を extensions に入れる
//!
//! - 失敗理由は warn ログにだけ出し、クライアントには 401 + 固定メッセージを返す
//!   (`missing Authorization header` / `missing token` / `invalid token`)
//! - 鍵は AppState の TokenVerifier が持っている (起動時に一度だけロード済み)

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// 保護したい handler (method router) だけに認証を掛ける。
///
/// MethodRouter の `route_layer` は登録済みメソッドだけを包むので、
/// 未登録メソッドは認証より先に 405 になる。
pub fn apply(route: MethodRouter<AppState>, state: AppState) -> MethodRouter<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    route.route_layer(middleware::from_fn_with_state(state, bearer_auth_middleware))
}

async fn bearer_auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // 非 ASCII など読めない値はヘッダ無しと同じ扱い
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let claims = match state.verifier.verify_authorization(authorization) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = %err, "bearer authentication failed");
            return Err(err.into());
        }
    };

    tracing::debug!(sub = claims.subject().unwrap_or("-"), "bearer authentication succeeded");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(claims));

    Ok(next.run(req).await)
}
