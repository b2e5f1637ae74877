use crate::error::{ConsoleError, ConsoleResult};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Key identifying a pluggable platform module, e.g. `people` or `ats_core`.
///
/// Never blank: empty and whitespace-only ids are rejected. A valid id is
/// kept verbatim, surrounding whitespace included; callers that accept
/// display names should run them through the registry's name normalization
/// first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(raw: impl Into<String>) -> ConsoleResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ConsoleError::InvalidModuleId(raw));
        }
        Ok(Self(raw))
    }

    /// Lenient constructor for untrusted input: `None` for blank strings.
    pub fn parse_opt(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|s| Self::new(s).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ModuleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ModuleId {
    type Error = ConsoleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ModuleId {
    type Error = ConsoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModuleId> for String {
    fn from(id: ModuleId) -> Self {
        id.0
    }
}
