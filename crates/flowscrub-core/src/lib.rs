//! Core logic for flowscrub
//!
//! This crate contains:
//! - Placeholder rendering for credential identities
//! - The sanitizer (in-place rewrite of credential `id`/`name` pairs)
//! - The credential scanner used by `flowscrub check`

pub mod error;
pub mod placeholder;
pub mod report;
pub mod sanitizer;

pub use error::{Error, Result};
pub use placeholder::Placeholders;
pub use report::{CredentialFinding, CredentialRedaction, SanitizeReport};
pub use sanitizer::{DEFAULT_SETTINGS_ALLOWLIST, Sanitizer};
