//! Strongly-typed identifiers used across the domain.
//!
//! Site records (projects, products, tools, issues, invoices) carry short
//! human-facing business codes such as `PRJ-001`. Codes are assigned
//! sequentially from the size of the owning collection. Movements, which are
//! never shown to users by id, use time-ordered UUIDs.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Format a sequential business code: `PREFIX-NNN` (zero-padded to at least
/// three digits, wider numbers are kept as-is).
pub fn sequential_code(prefix: &str, n: usize) -> String {
    format!("{prefix}-{n:03}")
}

/// Declare a business-code identifier newtype (`PRJ-001`, `PRD-042`, ...).
///
/// The generated type is `serde(transparent)`, displays as the raw code and
/// parses from any non-blank string starting with `PREFIX-`.
#[macro_export]
macro_rules! business_code {
    ($(#[$meta:meta])* $t:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $t(String);

        impl $t {
            pub const PREFIX: &'static str = $prefix;

            /// Code for the `n`-th record of a collection (`PREFIX-00n`).
            pub fn sequential(n: usize) -> Self {
                Self($crate::id::sequential_code($prefix, n))
            }

            /// Code scoped by an extra segment, e.g. a year: `PREFIX-2025-00n`.
            pub fn scoped(scope: impl core::fmt::Display, n: usize) -> Self {
                Self($crate::id::sequential_code(&format!("{}-{}", $prefix, scope), n))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl core::str::FromStr for $t {
            type Err = $crate::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let code = s.trim();
                let valid = code
                    .strip_prefix($prefix)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .is_some_and(|rest| !rest.is_empty());
                if !valid {
                    return Err($crate::DomainError::invalid_id(format!(
                        "{}: expected `{}-<n>`, got {:?}",
                        stringify!($t),
                        $prefix,
                        s
                    )));
                }
                Ok(Self(code.to_string()))
            }
        }
    };
}

business_code!(
    /// Identifier of a construction project (`PRJ-001`).
    ProjectId,
    "PRJ"
);

/// Identifier of a stock movement record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementId(Uuid);

macro_rules! impl_uuid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create a new identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $t {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(uuid))
            }
        }
    };
}

impl_uuid_newtype!(MovementId, "MovementId");
