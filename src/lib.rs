//! Minimal HTTP service with a public endpoint and a JWT-protected endpoint.
//!
//! Bearer tokens are verified against the RSA key published by a JWKS endpoint,
//! loaded once at startup.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

#[cfg(test)]
mod test_support;
