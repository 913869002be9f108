//! Credential sanitizer for exported workflow documents
//!
//! Only the shallow shape `nodes[*].credentials.<type>.{id,name}` is touched.
//! Everything else in the document passes through untouched, including
//! `settings`, whose keys are only compared against the allow-list.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result, kind_of};
use crate::placeholder::Placeholders;
use crate::report::{CredentialFinding, CredentialRedaction, SanitizeReport};

/// Settings keys considered safe to commit
pub const DEFAULT_SETTINGS_ALLOWLIST: &[&str] = &["executionTimeout", "timezone"];

#[derive(Debug, Clone)]
pub struct Sanitizer {
    placeholders: Placeholders,
    settings_allowlist: Vec<String>,
}

impl Sanitizer {
    pub fn new(placeholders: Placeholders, settings_allowlist: Vec<String>) -> Self {
        Self {
            placeholders,
            settings_allowlist,
        }
    }

    /// Overwrite credential identities in place.
    ///
    /// A credential entry is rewritten only when it is an object that already
    /// has an `id`. Its `id` becomes the placeholder id and its `name` (added
    /// if missing) becomes the rendered name template. Non-object documents
    /// are left alone.
    pub fn sanitize(&self, document: &mut Value) -> Result<SanitizeReport> {
        let mut report = SanitizeReport::default();

        let Value::Object(doc) = document else {
            return Ok(report);
        };

        if let Some(nodes) = doc.get_mut("nodes") {
            let nodes = match nodes {
                Value::Array(nodes) => nodes,
                other => return Err(Error::NodesNotArray(kind_of(other))),
            };

            for (index, node) in nodes.iter_mut().enumerate() {
                let node = match node {
                    Value::Object(node) => node,
                    other => {
                        return Err(Error::NodeNotObject {
                            index,
                            found: kind_of(other),
                        });
                    }
                };
                let node_name = node_name(node);

                let Some(Value::Object(credentials)) = node.get_mut("credentials") else {
                    continue;
                };

                for (credential_type, info) in credentials.iter_mut() {
                    let Value::Object(info) = info else {
                        continue;
                    };
                    if !info.contains_key("id") {
                        continue;
                    }

                    info.insert(
                        "id".to_string(),
                        Value::String(self.placeholders.credential_id.clone()),
                    );
                    info.insert(
                        "name".to_string(),
                        Value::String(self.placeholders.name_for(credential_type)),
                    );

                    debug!(
                        node = index,
                        credential_type = %credential_type,
                        "credential identity replaced"
                    );
                    report.redactions.push(CredentialRedaction {
                        node_index: index,
                        node_name: node_name.clone(),
                        credential_type: credential_type.clone(),
                    });
                }
            }
        }

        // Report only: nothing under `settings` is removed or rewritten.
        if let Some(settings) = doc.get("settings") {
            let settings = match settings {
                Value::Object(settings) => settings,
                other => return Err(Error::SettingsNotObject(kind_of(other))),
            };

            for key in settings.keys() {
                if self.is_allowed_setting(key) {
                    continue;
                }
                debug!(setting = %key, "setting outside allow-list left in place");
                report.unreviewed_settings.push(key.clone());
            }
        }

        Ok(report)
    }

    /// Parse `json` and sanitize it
    pub fn sanitize_str(&self, json: &str) -> Result<(Value, SanitizeReport)> {
        let mut document: Value = serde_json::from_str(json)?;
        let report = self.sanitize(&mut document)?;
        Ok((document, report))
    }

    /// Find credential entries that `sanitize` would still rewrite.
    ///
    /// Walks the same shape as [`Sanitizer::sanitize`] and fails on the same
    /// malformed shapes. An already sanitized document yields no findings.
    pub fn scan(&self, document: &Value) -> Result<Vec<CredentialFinding>> {
        let mut findings = Vec::new();

        let Some(nodes) = document.get("nodes") else {
            return Ok(findings);
        };
        let nodes = match nodes {
            Value::Array(nodes) => nodes,
            other => return Err(Error::NodesNotArray(kind_of(other))),
        };

        for (index, node) in nodes.iter().enumerate() {
            let node = match node {
                Value::Object(node) => node,
                other => {
                    return Err(Error::NodeNotObject {
                        index,
                        found: kind_of(other),
                    });
                }
            };

            let Some(Value::Object(credentials)) = node.get("credentials") else {
                continue;
            };

            for (credential_type, info) in credentials {
                let Value::Object(info) = info else {
                    continue;
                };
                let Some(id) = info.get("id") else {
                    continue;
                };

                let expected_name = self.placeholders.name_for(credential_type);
                let id_clean = id.as_str() == Some(self.placeholders.credential_id.as_str());
                let name_clean =
                    info.get("name").and_then(Value::as_str) == Some(expected_name.as_str());
                if id_clean && name_clean {
                    continue;
                }

                findings.push(CredentialFinding {
                    node_index: index,
                    node_name: node_name(node),
                    credential_type: credential_type.clone(),
                    id: match id {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    },
                });
            }
        }

        if let Some(settings) = document.get("settings")
            && !settings.is_object()
        {
            return Err(Error::SettingsNotObject(kind_of(settings)));
        }

        Ok(findings)
    }

    fn is_allowed_setting(&self, key: &str) -> bool {
        self.settings_allowlist.iter().any(|allowed| allowed == key)
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(
            Placeholders::default(),
            DEFAULT_SETTINGS_ALLOWLIST
                .iter()
                .map(|key| key.to_string())
                .collect(),
        )
    }
}

fn node_name(node: &Map<String, Value>) -> Option<String> {
    node.get("name").and_then(Value::as_str).map(str::to_string)
}
