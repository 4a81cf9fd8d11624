pub mod hello;
pub mod secure;
