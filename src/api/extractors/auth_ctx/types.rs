/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 */

use crate::services::auth::ClaimSet;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `claims` は署名検証済みの payload 全体
/// - `subject()` は `sub` claim (無い・文字列でない場合は None)
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub claims: ClaimSet,
}

impl AuthCtx {
    pub fn new(claims: ClaimSet) -> Self {
        Self { claims }
    }

    pub fn subject(&self) -> Option<&str> {
        self.claims.subject()
    }
}
