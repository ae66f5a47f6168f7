//! # Values
//!
//! Raw values are what the user typed or selected. Typed values are what the
//! validator produced from them and what the domain accessors exchange.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A single unvalidated input, as held by the [`ViewState`](crate::view::ViewState).
///
/// Numeric and text fields hold `Text`; boolean and enumerated fields hold the
/// selected `Index`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Index(usize),
    Text(String),
}

impl RawValue {
    pub fn text(value: impl Into<String>) -> Self {
        RawValue::Text(value.into())
    }

    pub fn index(index: usize) -> Self {
        RawValue::Index(index)
    }

    /// The empty text input.
    pub fn empty() -> Self {
        RawValue::Text(String::new())
    }

    /// The input as text. Indices render as their decimal form.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            RawValue::Text(text) => Cow::Borrowed(text.as_str()),
            RawValue::Index(index) => Cow::Owned(index.to_string()),
        }
    }

    /// The input as a view index, if it is one or if its text is one.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            RawValue::Index(index) => Some(*index),
            RawValue::Text(text) => text.trim().parse().ok(),
        }
    }

    /// True for text that is empty once trimmed. Indices are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Text(text) => text.trim().is_empty(),
            RawValue::Index(_) => false,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Index(index) => write!(f, "#{index}"),
            RawValue::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// The domain side of an enumerated choice: either an integer code or a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Code(i64),
    Name(String),
}

impl EnumValue {
    pub fn name(name: impl Into<String>) -> Self {
        EnumValue::Name(name.into())
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::Code(code) => write!(f, "{code}"),
            EnumValue::Name(name) => f.write_str(name),
        }
    }
}

/// A parsed field value.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum TypedValue {
    /// An optional field left empty.
    #[default]
    Absent,
    Integer(i64),
    Real(f64),
    Boolean(bool),
    Choice(EnumValue),
    Text(String),
}

impl TypedValue {
    /// Numeric view used by cross-field constraints.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TypedValue::Integer(value) => Some(*value as f64),
            TypedValue::Real(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, TypedValue::Absent)
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            TypedValue::Absent => "absent",
            TypedValue::Integer(_) => "integer",
            TypedValue::Real(_) => "real",
            TypedValue::Boolean(_) => "boolean",
            TypedValue::Choice(_) => "choice",
            TypedValue::Text(_) => "text",
        }
    }

    /// Equality that tolerates `tolerance` between reals.
    pub fn approx_eq(&self, other: &TypedValue, tolerance: f64) -> bool {
        match (self, other) {
            (TypedValue::Real(a), TypedValue::Real(b)) => (a - b).abs() <= tolerance,
            _ => self == other,
        }
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        TypedValue::Boolean(value)
    }
}

impl From<EnumValue> for TypedValue {
    fn from(value: EnumValue) -> Self {
        TypedValue::Choice(value)
    }
}

/// Conversion between a domain type and the [`EnumValue`] stored in a codec.
pub trait ChoiceValue: Sized {
    fn to_enum_value(&self) -> EnumValue;

    /// Returns `None` when `value` is not a member of this type.
    fn from_enum_value(value: &EnumValue) -> Option<Self>;
}

impl ChoiceValue for i32 {
    fn to_enum_value(&self) -> EnumValue {
        EnumValue::Code(i64::from(*self))
    }

    fn from_enum_value(value: &EnumValue) -> Option<Self> {
        match value {
            EnumValue::Code(code) => i32::try_from(*code).ok(),
            EnumValue::Name(_) => None,
        }
    }
}

impl ChoiceValue for i64 {
    fn to_enum_value(&self) -> EnumValue {
        EnumValue::Code(*self)
    }

    fn from_enum_value(value: &EnumValue) -> Option<Self> {
        match value {
            EnumValue::Code(code) => Some(*code),
            EnumValue::Name(_) => None,
        }
    }
}

impl ChoiceValue for String {
    fn to_enum_value(&self) -> EnumValue {
        EnumValue::Name(self.clone())
    }

    fn from_enum_value(value: &EnumValue) -> Option<Self> {
        match value {
            EnumValue::Name(name) => Some(name.clone()),
            EnumValue::Code(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_index_from_text() {
        assert_eq!(RawValue::text(" 2 ").as_index(), Some(2));
        assert_eq!(RawValue::text("two").as_index(), None);
        assert_eq!(RawValue::index(3).as_text(), "3");
    }

    #[test]
    fn test_raw_value_untagged_json() {
        let index: RawValue = serde_json::from_str("1").unwrap();
        let text: RawValue = serde_json::from_str("\"1.5\"").unwrap();
        assert_eq!(index, RawValue::Index(1));
        assert_eq!(text, RawValue::text("1.5"));
    }

    #[test]
    fn test_approx_eq_only_relaxes_reals() {
        assert!(TypedValue::Real(1.0).approx_eq(&TypedValue::Real(1.0 + 1e-15), 1e-13));
        assert!(!TypedValue::Real(1.0).approx_eq(&TypedValue::Real(1.1), 1e-13));
        assert!(!TypedValue::Integer(1).approx_eq(&TypedValue::Integer(2), 10.0));
    }

    #[test]
    fn test_i32_choice_rejects_names() {
        assert_eq!(i32::from_enum_value(&EnumValue::Code(8)), Some(8));
        assert_eq!(i32::from_enum_value(&EnumValue::name("8")), None);
        assert_eq!(i32::from_enum_value(&EnumValue::Code(i64::MAX)), None);
    }
}
