use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Verified JWT payload, keyed by claim name.
///
/// Request-scoped: built by the verifier and dropped with the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// String-valued claim. `None` when absent or not a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// The standard `sub` claim.
    pub fn subject(&self) -> Option<&str> {
        self.get_str("sub")
    }
}
