/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - 起動時にロードした公開鍵から作った TokenVerifier を持つ (以降は read-only)
 * - Clone 前提で持つ (内部は Arc)
 */
use std::sync::Arc;

use crate::services::auth::TokenVerifier;

#[derive(Clone, Debug)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self { verifier }
    }
}
