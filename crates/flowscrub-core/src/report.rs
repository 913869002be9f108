//! Records produced by sanitize and scan passes

use serde::{Deserialize, Serialize};

/// One credential entry whose identity was overwritten
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRedaction {
    pub node_index: usize,
    pub node_name: Option<String>,
    pub credential_type: String,
}

/// One credential entry that still carries a real identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialFinding {
    pub node_index: usize,
    pub node_name: Option<String>,
    pub credential_type: String,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizeReport {
    pub redactions: Vec<CredentialRedaction>,

    /// `settings` keys outside the allow-list (reported, never removed)
    pub unreviewed_settings: Vec<String>,
}

impl SanitizeReport {
    pub fn redaction_count(&self) -> usize {
        self.redactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.redactions.is_empty() && self.unreviewed_settings.is_empty()
    }
}
