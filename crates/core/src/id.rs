//! Strongly-typed codes used across the domain.
//!
//! SKU and warehouse codes arrive as free text from ERP exports. They are
//! compared verbatim; canonicalisation (aliases, trimming) happens upstream.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Stock-keeping unit code (e.g. `EXI-009231`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

/// Warehouse code, used both for stock locations and consumption destinations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarehouseCode(String);

macro_rules! impl_code_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Wrap a code without validation.
            ///
            /// Table rows use this path: a blank code simply never matches a filter.
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

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $t {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            /// Parse user-supplied input (CLI flags); trims and rejects blanks.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_code(format!("{} cannot be blank", $name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }
    };
}

impl_code_newtype!(Sku, "Sku");
impl_code_newtype!(WarehouseCode, "WarehouseCode");
