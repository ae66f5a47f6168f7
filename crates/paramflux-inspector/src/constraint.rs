use crate::value::TypedValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const ORDERED_PAIR_MESSAGE: &str =
    "The lower range value has to be smaller than the upper range value.";

/// A relationship between already-validated numeric fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CrossFieldConstraint {
    /// Fails iff `low > high`.
    OrderedPair { id: String, low: String, high: String },
    /// Fails iff `field > ceiling`.
    NumericCeiling {
        id: String,
        field: String,
        ceiling: f64,
    },
}

/// A violated constraint, naming every field it involves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintError {
    pub constraint: String,
    pub fields: Vec<String>,
    pub message: String,
}

impl CrossFieldConstraint {
    pub fn ordered_pair(id: impl Into<String>, low: impl Into<String>, high: impl Into<String>) -> Self {
        CrossFieldConstraint::OrderedPair {
            id: id.into(),
            low: low.into(),
            high: high.into(),
        }
    }

    pub fn numeric_ceiling(id: impl Into<String>, field: impl Into<String>, ceiling: f64) -> Self {
        CrossFieldConstraint::NumericCeiling {
            id: id.into(),
            field: field.into(),
            ceiling,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CrossFieldConstraint::OrderedPair { id, .. } => id,
            CrossFieldConstraint::NumericCeiling { id, .. } => id,
        }
    }

    pub fn fields(&self) -> Vec<&str> {
        match self {
            CrossFieldConstraint::OrderedPair { low, high, .. } => vec![low.as_str(), high.as_str()],
            CrossFieldConstraint::NumericCeiling { field, .. } => vec![field.as_str()],
        }
    }

    /// Checks the constraint against parsed values.
    ///
    /// Returns `Ok` without checking when a referenced field is missing from
    /// `values` or is not numeric: a field that failed on its own never
    /// produces a second, constraint-level error.
    pub fn check(
        &self,
        values: &IndexMap<String, TypedValue>,
        label_of: impl Fn(&str) -> String,
    ) -> Result<(), ConstraintError> {
        let number = |id: &str| values.get(id).and_then(TypedValue::as_f64);

        match self {
            CrossFieldConstraint::OrderedPair { id, low, high } => {
                let inverted = match (values.get(low), values.get(high)) {
                    (Some(TypedValue::Integer(lower)), Some(TypedValue::Integer(upper))) => lower > upper,
                    _ => match (number(low), number(high)) {
                        (Some(lower), Some(upper)) => lower > upper,
                        _ => return Ok(()),
                    },
                };
                if inverted {
                    return Err(ConstraintError {
                        constraint: id.clone(),
                        fields: vec![low.clone(), high.clone()],
                        message: ORDERED_PAIR_MESSAGE.to_string(),
                    });
                }
                Ok(())
            }
            CrossFieldConstraint::NumericCeiling { id, field, ceiling } => {
                let Some(value) = number(field) else {
                    return Ok(());
                };
                if value > *ceiling {
                    return Err(ConstraintError {
                        constraint: id.clone(),
                        fields: vec![field.clone()],
                        message: format!(
                            "{} must be in the range (0.0-{ceiling:.1})",
                            label_of(field)
                        ),
                    });
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, TypedValue)]) -> IndexMap<String, TypedValue> {
        pairs
            .iter()
            .map(|(id, value)| (id.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_ordered_pair_reports_both_fields() {
        let constraint = CrossFieldConstraint::ordered_pair("clear_mz_range", "low", "high");
        let parsed = values(&[("low", TypedValue::Real(5.0)), ("high", TypedValue::Real(1.0))]);

        let err = constraint.check(&parsed, |id| id.to_string()).unwrap_err();
        assert_eq!(err.constraint, "clear_mz_range");
        assert_eq!(err.fields, vec!["low".to_string(), "high".to_string()]);
        assert_eq!(err.message, ORDERED_PAIR_MESSAGE);
    }

    #[test]
    fn test_ordered_pair_accepts_equal_bounds() {
        let constraint = CrossFieldConstraint::ordered_pair("range", "low", "high");
        let parsed = values(&[("low", TypedValue::Integer(8)), ("high", TypedValue::Integer(8))]);
        assert!(constraint.check(&parsed, |id| id.to_string()).is_ok());
    }

    #[test]
    fn test_ordered_pair_compares_integers_exactly() {
        let constraint = CrossFieldConstraint::ordered_pair("range", "low", "high");
        // Both round to the same f64
        let parsed = values(&[
            ("low", TypedValue::Integer(i64::MAX)),
            ("high", TypedValue::Integer(i64::MAX - 1)),
        ]);
        assert!(constraint.check(&parsed, |id| id.to_string()).is_err());

        let mixed = values(&[("low", TypedValue::Integer(8)), ("high", TypedValue::Real(7.5))]);
        assert!(constraint.check(&mixed, |id| id.to_string()).is_err());
    }

    #[test]
    fn test_skips_missing_or_absent() {
        let constraint = CrossFieldConstraint::ordered_pair("range", "low", "high");
        let only_low = values(&[("low", TypedValue::Real(5.0))]);
        assert!(constraint.check(&only_low, |id| id.to_string()).is_ok());

        let absent = values(&[("low", TypedValue::Real(5.0)), ("high", TypedValue::Absent)]);
        assert!(constraint.check(&absent, |id| id.to_string()).is_ok());
    }

    #[test]
    fn test_numeric_ceiling() {
        let constraint = CrossFieldConstraint::numeric_ceiling("complexity", "ptm", 12.0);
        let ok = values(&[("ptm", TypedValue::Real(12.0))]);
        assert!(constraint.check(&ok, |_| "PTM Complexity".to_string()).is_ok());

        let too_high = values(&[("ptm", TypedValue::Real(12.5))]);
        let err = constraint.check(&too_high, |_| "PTM Complexity".to_string()).unwrap_err();
        assert_eq!(err.message, "PTM Complexity must be in the range (0.0-12.0)");
    }
}
