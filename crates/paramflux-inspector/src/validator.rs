//! # Field validation
//!
//! Turns one raw input into a [`TypedValue`] according to its descriptor.
//! Pure: no logging, no state.

use crate::codec::EnumCodec;
use crate::field::{FieldDescriptor, FieldKind};
use crate::value::{RawValue, TypedValue};
use serde::Serialize;
use std::num::IntErrorKind;

/// Why a field failed to validate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldErrorKind {
    Required,
    NotAnInteger,
    NotANumber,
    Negative,
    OutOfRange,
    UnknownMapping,
    /// The value validated but the domain refused it.
    Rejected,
}

/// A single field's failure, attributable to exactly one field id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(descriptor: &FieldDescriptor, kind: FieldErrorKind, message: String) -> Self {
        Self {
            field: descriptor.id.clone(),
            kind,
            message,
        }
    }
}

/// Validates `raw` against `descriptor`.
///
/// A missing raw value is treated as empty input. `codec` is only consulted
/// for [`FieldKind::Enum`].
pub fn validate(
    raw: Option<&RawValue>,
    descriptor: &FieldDescriptor,
    codec: Option<&EnumCodec>,
) -> Result<TypedValue, FieldError> {
    let blank = raw.map_or(true, RawValue::is_blank);
    if blank {
        return if descriptor.required {
            Err(FieldError::new(
                descriptor,
                FieldErrorKind::Required,
                format!("{} is required", descriptor.label),
            ))
        } else {
            Ok(TypedValue::Absent)
        };
    }
    let Some(raw) = raw else {
        return Ok(TypedValue::Absent);
    };

    match descriptor.kind {
        FieldKind::Integer | FieldKind::OptionalInteger => parse_integer(raw, descriptor),
        FieldKind::Real | FieldKind::OptionalReal => parse_real(raw, descriptor),
        FieldKind::BooleanChoice => match raw.as_index() {
            Some(0) => Ok(TypedValue::Boolean(true)),
            Some(1) => Ok(TypedValue::Boolean(false)),
            _ => Err(unknown_option(descriptor, raw)),
        },
        FieldKind::Enum => {
            let index = raw.as_index().ok_or_else(|| unknown_option(descriptor, raw))?;
            let codec = codec.ok_or_else(|| unknown_option(descriptor, raw))?;
            codec
                .decode(index)
                .map(|value| TypedValue::Choice(value.clone()))
                .map_err(|err| {
                    FieldError::new(
                        descriptor,
                        FieldErrorKind::UnknownMapping,
                        format!("{}: {err}", descriptor.label),
                    )
                })
        }
        FieldKind::Text => Ok(TypedValue::Text(raw.as_text().trim().to_string())),
    }
}

fn parse_integer(raw: &RawValue, descriptor: &FieldDescriptor) -> Result<TypedValue, FieldError> {
    let text = raw.as_text();
    let value = match text.trim().parse::<i64>() {
        Ok(value) => value,
        Err(err) if matches!(err.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return Err(out_of_range(descriptor));
        }
        Err(_) => {
            return Err(FieldError::new(
                descriptor,
                FieldErrorKind::NotAnInteger,
                format!("{} must be an integer", descriptor.label),
            ));
        }
    };

    if value < 0 && !descriptor.allow_negative {
        return Err(negative(descriptor));
    }
    if let Some((min, max)) = descriptor.integer_bounds {
        if value < min || value > max {
            return Err(out_of_range(descriptor));
        }
    }
    Ok(TypedValue::Integer(value))
}

fn parse_real(raw: &RawValue, descriptor: &FieldDescriptor) -> Result<TypedValue, FieldError> {
    let text = raw.as_text();
    let value = text
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            FieldError::new(
                descriptor,
                FieldErrorKind::NotANumber,
                format!("{} must be a number", descriptor.label),
            )
        })?;

    if value < 0.0 && !descriptor.allow_negative {
        return Err(negative(descriptor));
    }
    Ok(TypedValue::Real(value))
}

fn negative(descriptor: &FieldDescriptor) -> FieldError {
    FieldError::new(
        descriptor,
        FieldErrorKind::Negative,
        format!("{} must not be negative", descriptor.label),
    )
}

fn out_of_range(descriptor: &FieldDescriptor) -> FieldError {
    let message = match descriptor.integer_bounds {
        Some((min, max)) => format!("{} must be between {min} and {max}", descriptor.label),
        None => format!("{} is out of range", descriptor.label),
    };
    FieldError::new(descriptor, FieldErrorKind::OutOfRange, message)
}

fn unknown_option(descriptor: &FieldDescriptor, raw: &RawValue) -> FieldError {
    FieldError::new(
        descriptor,
        FieldErrorKind::UnknownMapping,
        format!("{} has no option {raw}", descriptor.label),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::EnumValue;

    fn min_peaks() -> FieldDescriptor {
        FieldDescriptor::integer("min_peaks", "Minimum Number of Peaks")
    }

    #[test]
    fn test_integer_parses() {
        let result = validate(Some(&RawValue::text("10")), &min_peaks(), None);
        assert_eq!(result, Ok(TypedValue::Integer(10)));
    }

    #[test]
    fn test_integer_is_trimmed() {
        let result = validate(Some(&RawValue::text("  7 ")), &min_peaks(), None);
        assert_eq!(result, Ok(TypedValue::Integer(7)));
    }

    #[test]
    fn test_required_empty() {
        let err = validate(Some(&RawValue::text("")), &min_peaks(), None).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::Required);
        assert_eq!(err.message, "Minimum Number of Peaks is required");
    }

    #[test]
    fn test_missing_raw_is_empty() {
        let err = validate(None, &min_peaks(), None).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::Required);

        let optional = FieldDescriptor::optional_integer("charge", "Max Charge");
        assert_eq!(validate(None, &optional, None), Ok(TypedValue::Absent));
    }

    #[test]
    fn test_integer_rejects_decimals() {
        let err = validate(Some(&RawValue::text("10.5")), &min_peaks(), None).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::NotAnInteger);
        assert_eq!(err.message, "Minimum Number of Peaks must be an integer");

        let err = validate(Some(&RawValue::text("10.0")), &min_peaks(), None).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::NotAnInteger);
    }

    #[test]
    fn test_integer_overflow_is_out_of_range() {
        let raw = RawValue::text("99999999999999999999");
        let err = validate(Some(&raw), &min_peaks(), None).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::OutOfRange);
    }

    #[test]
    fn test_integer_bounds() {
        let mut field = min_peaks();
        field.integer_bounds = Some((0, 255));
        let err = validate(Some(&RawValue::text("256")), &field, None).unwrap_err();
        assert_eq!(err.message, "Minimum Number of Peaks must be between 0 and 255");
    }

    #[test]
    fn test_negative_values() {
        let err = validate(Some(&RawValue::text("-1")), &min_peaks(), None).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::Negative);

        let signed = min_peaks().allow_negative();
        assert_eq!(
            validate(Some(&RawValue::text("-1")), &signed, None),
            Ok(TypedValue::Integer(-1))
        );
    }

    #[test]
    fn test_real_rejects_non_finite() {
        let field = FieldDescriptor::real("tolerance", "Tolerance");
        for raw in ["NaN", "inf", "-infinity", "abc"] {
            let err = validate(Some(&RawValue::text(raw)), &field, None).unwrap_err();
            assert_eq!(err.kind, FieldErrorKind::NotANumber, "input {raw}");
            assert_eq!(err.message, "Tolerance must be a number");
        }
        assert_eq!(
            validate(Some(&RawValue::text("1446.94")), &field, None),
            Ok(TypedValue::Real(1446.94))
        );
    }

    #[test]
    fn test_boolean_convention() {
        let field = FieldDescriptor::boolean("refine", "Refinement");
        assert_eq!(
            validate(Some(&RawValue::index(0)), &field, None),
            Ok(TypedValue::Boolean(true))
        );
        assert_eq!(
            validate(Some(&RawValue::index(1)), &field, None),
            Ok(TypedValue::Boolean(false))
        );
        let err = validate(Some(&RawValue::index(2)), &field, None).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::UnknownMapping);
    }

    #[test]
    fn test_enum_decodes_through_codec() {
        let codec = EnumCodec::codes(&[(2, "Full"), (1, "Semi"), (8, "C"), (9, "N")]).unwrap();
        let field = FieldDescriptor::choice("enzyme_type", "Enzyme Type");
        assert_eq!(
            validate(Some(&RawValue::index(2)), &field, Some(&codec)),
            Ok(TypedValue::Choice(EnumValue::Code(8)))
        );
        let err = validate(Some(&RawValue::index(4)), &field, Some(&codec)).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::UnknownMapping);
    }

    #[test]
    fn test_optional_text() {
        let field = FieldDescriptor::text("skyline", "Skyline Path").optional();
        assert_eq!(validate(Some(&RawValue::text("  ")), &field, None), Ok(TypedValue::Absent));
        assert_eq!(
            validate(Some(&RawValue::text(" /opt/skyline ")), &field, None),
            Ok(TypedValue::Text("/opt/skyline".into()))
        );
    }
}
