//! Ledger limits.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Limits applied to every append.
///
/// Both limits are unset by default, in which case appends never fail for
/// well-formed input.
///
/// ```toml
/// max_entries_per_account = 1000
/// max_content_bytes = 4096
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Maximum length of one account's sequence.
    pub max_entries_per_account: Option<usize>,
    /// Maximum size of one string, in UTF-8 bytes.
    pub max_content_bytes: Option<usize>,
}

impl LedgerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
