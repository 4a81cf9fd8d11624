/*
 * Responsibility
 * - middleware の公開インターフェース
 */
pub mod bearer_auth;
pub mod http;
