/*
 * Responsibility
 * - GET /secure (bearer_auth middleware の後ろ)
 * - 検証済み claims をそのまま返す
 */
use axum::Json;

use crate::api::dto::secure::SecureResponse;
use crate::api::extractors::AuthCtxExtractor;

pub async fn secure(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<SecureResponse> {
    let user = ctx.subject().map(str::to_string);

    Json(SecureResponse {
        message: "Secure endpoint accessed",
        user,
        claims: ctx.claims,
    })
}
