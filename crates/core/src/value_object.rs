//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" a
/// value object, create a new one with the new values.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// A non-negative whole number of units (stock quantities, thresholds,
/// movement sizes, invoice line counts).
///
/// Raw user input goes through [`FromStr`], which classifies bad input
/// instead of coercing it: blank, non-numeric and negative strings are all
/// rejected with [`DomainError::Validation`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Strictly positive quantity (movement sizes, line counts).
    pub fn positive(value: u64) -> DomainResult<Self> {
        if value == 0 {
            return Err(DomainError::validation("quantity must be greater than zero"));
        }
        Ok(Self(value))
    }

    /// Parse user input and additionally require a value greater than zero.
    pub fn parse_positive(raw: &str) -> DomainResult<Self> {
        let q: Quantity = raw.parse()?;
        Self::positive(q.0)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl ValueObject for Quantity {}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for Quantity {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for Quantity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(DomainError::validation("quantity is required"));
        }
        if let Ok(v) = raw.parse::<u64>() {
            return Ok(Self(v));
        }
        if raw.parse::<i128>().is_ok_and(|v| v < 0) {
            return Err(DomainError::validation(format!(
                "quantity cannot be negative, got {raw}"
            )));
        }
        Err(DomainError::validation(format!(
            "quantity must be a whole number, got {raw:?}"
        )))
    }
}

/// Deserialize a raw form field that a JSON client may send as either a
/// string or a number. The value is kept as text so that [`Quantity`]'s
/// parser still classifies it (`-5` is negative, `1.5` is not whole).
///
/// Use with `#[serde(deserialize_with = "siteerp_core::value_object::string_or_number")]`.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Unsigned(n) => n.to_string(),
        Raw::Signed(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}

/// Opaque pointer to attached evidence (photo data URI, document URL).
///
/// Stored verbatim; the domain never looks inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceRef(String);

impl EvidenceRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Treat a blank upload field as "no evidence attached".
    pub fn from_optional(reference: Option<String>) -> Option<Self> {
        reference.filter(|r| !r.trim().is_empty()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for EvidenceRef {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_padded_numbers() {
        assert_eq!("12".parse::<Quantity>().unwrap(), Quantity::new(12));
        assert_eq!("  7 ".parse::<Quantity>().unwrap(), Quantity::new(7));
        assert_eq!("0".parse::<Quantity>().unwrap(), Quantity::ZERO);
    }

    #[test]
    fn rejects_non_numeric_instead_of_coercing() {
        for raw in ["", "   ", "abc", "1.5", "12kg", "NaN"] {
            let err = raw.parse::<Quantity>().unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{raw:?} -> {err:?}");
        }
    }

    #[test]
    fn rejects_negative_with_a_specific_message() {
        let err = "-5".parse::<Quantity>().unwrap_err();
        assert_eq!(err, DomainError::validation("quantity cannot be negative, got -5"));
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(Quantity::parse_positive("0").is_err());
        assert_eq!(Quantity::parse_positive("3").unwrap().get(), 3);
        assert!(Quantity::positive(0).is_err());
    }

    #[test]
    fn blank_evidence_is_dropped() {
        assert_eq!(EvidenceRef::from_optional(Some("  ".into())), None);
        assert_eq!(EvidenceRef::from_optional(None), None);
        let ev = EvidenceRef::from_optional(Some("data:image/png;base64,AAAA".into())).unwrap();
        assert_eq!(ev.as_str(), "data:image/png;base64,AAAA");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_u64_parses_back_to_itself(v in any::<u64>()) {
                prop_assert_eq!(v.to_string().parse::<Quantity>().unwrap().get(), v);
            }

            #[test]
            fn every_negative_is_rejected(v in i64::MIN..0i64) {
                prop_assert!(v.to_string().parse::<Quantity>().is_err());
            }
        }
    }
}
