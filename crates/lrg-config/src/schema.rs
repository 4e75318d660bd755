//! Attestation schema registered by `lrg register-schema`.

use serde::{Deserialize, Serialize};

fn default_definition() -> String {
    String::from("string name, string email, string phone")
}

fn default_resolver() -> String {
    String::from("0x0000000000000000000000000000000000000000")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SchemaConfig {
    #[serde(default = "default_definition")]
    pub definition: String,

    /// Resolver contract; the zero address registers without one.
    #[serde(default = "default_resolver")]
    pub resolver: String,

    #[serde(default)]
    pub revocable: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            definition: default_definition(),
            resolver: default_resolver(),
            revocable: false,
        }
    }
}
