//! Placeholder values written over credential identities

use serde::{Deserialize, Serialize};

/// Token replaced by the upper-cased credential type in `credential_name`
pub const TYPE_TOKEN: &str = "{TYPE}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholders {
    #[serde(default = "default_credential_id")]
    pub credential_id: String,

    /// Name template, `{TYPE}` expands to the credential type in upper case
    #[serde(default = "default_credential_name")]
    pub credential_name: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            credential_id: default_credential_id(),
            credential_name: default_credential_name(),
        }
    }
}

fn default_credential_id() -> String {
    "YOUR_CREDENTIAL_ID_HERE".to_string()
}

fn default_credential_name() -> String {
    format!("YOUR_{}_CREDENTIAL", TYPE_TOKEN)
}

impl Placeholders {
    /// Render the display name written for a credential of `credential_type`
    pub fn name_for(&self, credential_type: &str) -> String {
        self.credential_name
            .replace(TYPE_TOKEN, &credential_type.to_uppercase())
    }
}
