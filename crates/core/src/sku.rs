//! Stock-keeping unit identifier.

use core::borrow::Borrow;
use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Identifier of a stock-keeping unit (product variant).
///
/// Any string is accepted; unknown or malformed codes simply never match a
/// persisted record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkuCode(String);

impl SkuCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl ValueObject for SkuCode {}

impl core::fmt::Display for SkuCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SkuCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for SkuCode {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

impl AsRef<str> for SkuCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SkuCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}
