//! Update server registration settings

use serde::{Deserialize, Serialize};

/// How update server addresses are discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Domain suffix of update server entries in the hosts file
    pub domain: String,
    /// Command reporting a freshly issued update server when the hosts
    /// file has no entry. Unset means no fallback source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_command: Option<String>,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            domain: "susecloud.net".to_string(),
            fallback_command: None,
        }
    }
}
