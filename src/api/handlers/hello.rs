/*
 * Responsibility
 * - GET / (公開エンドポイント、認証なし)
 */

pub async fn hello() -> &'static str {
    "Hello, World!"
}
