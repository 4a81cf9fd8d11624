pub mod access_jwt;
pub mod claims;
pub mod factory;
pub mod jwks;

pub use access_jwt::{TokenVerifier, VerifyError};
pub use claims::ClaimSet;
pub use factory::build_token_verifier;
pub use jwks::{JwksClient, KeyLoadError, RsaPublicKey};
