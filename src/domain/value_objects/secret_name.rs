//! Secret Name Value Object
//!
//! Organization secret names follow the platform's naming rules: only
//! alphanumerics and underscores, no leading digit, no reserved `GITHUB_`
//! prefix. Names are case-insensitive on the platform and listed uppercase.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{GosmError, GosmResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SecretName(String);

impl SecretName {
    /// Prefix reserved by the platform
    pub const RESERVED_PREFIX: &'static str = "GITHUB_";

    /// Validate a secret name. Surrounding whitespace is ignored.
    pub fn new(raw: &str) -> GosmResult<Self> {
        let name = raw.trim();
        let invalid = |reason: &str| GosmError::InvalidSecretName {
            name: raw.to_string(),
            reason: reason.to_string(),
        };

        let first = name.chars().next().ok_or_else(|| invalid("name is empty"))?;
        if first.is_ascii_digit() {
            return Err(invalid("name must not start with a digit"));
        }
        if let Some(bad) = name.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(invalid(&format!(
                "character '{}' is not allowed, use letters, digits and underscores",
                bad
            )));
        }
        if name.to_ascii_uppercase().starts_with(Self::RESERVED_PREFIX) {
            return Err(invalid("the GITHUB_ prefix is reserved"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SecretName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SecretName {
    type Err = GosmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SecretName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
