use serde::Serialize;

use crate::services::auth::ClaimSet;

#[derive(Debug, Serialize)]
pub struct SecureResponse {
    pub message: &'static str,
    // `sub` claim; null when absent or not a string
    pub user: Option<String>,
    pub claims: ClaimSet,
}
