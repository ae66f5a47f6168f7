use crate::constraint::ConstraintError;
use crate::validator::FieldError;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Outcome of one validation pass. Always rebuilt from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Per-field failures, in schema order.
    pub field_errors: IndexMap<String, FieldError>,
    /// Constraint failures, in declaration order.
    pub cross_field_errors: Vec<ConstraintError>,
    /// True iff both collections are empty.
    pub overall_valid: bool,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            field_errors: IndexMap::new(),
            cross_field_errors: Vec::new(),
            overall_valid: true,
        }
    }
}

impl ValidationReport {
    pub fn push_field_error(&mut self, error: FieldError) {
        self.field_errors.insert(error.field.clone(), error);
        self.overall_valid = false;
    }

    pub fn push_constraint_error(&mut self, error: ConstraintError) {
        self.cross_field_errors.push(error);
        self.overall_valid = false;
    }

    pub fn is_valid(&self) -> bool {
        self.overall_valid
    }

    /// The error message for `field`, if it failed.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(|error| error.message.as_str())
    }

    /// Every field id named by a failed constraint or field check.
    pub fn flagged_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.field_errors.keys().map(String::as_str).collect();
        for error in &self.cross_field_errors {
            for field in &error.fields {
                if !fields.contains(&field.as_str()) {
                    fields.push(field.as_str());
                }
            }
        }
        fields
    }

    /// All messages, field errors first.
    pub fn messages(&self) -> Vec<String> {
        self.field_errors
            .values()
            .map(|error| error.message.clone())
            .chain(self.cross_field_errors.iter().map(|error| error.message.clone()))
            .collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.overall_valid {
            return f.write_str("no errors");
        }
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationReport {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::FieldErrorKind;

    #[test]
    fn test_validity_tracks_errors() {
        let mut report = ValidationReport::default();
        assert!(report.is_valid());
        assert_eq!(report.to_string(), "no errors");

        report.push_field_error(FieldError {
            field: "min_peaks".into(),
            kind: FieldErrorKind::Required,
            message: "Minimum Number of Peaks is required".into(),
        });
        report.push_constraint_error(ConstraintError {
            constraint: "clear_mz_range".into(),
            fields: vec!["lower_clear_mz".into(), "upper_clear_mz".into()],
            message: "bad range".into(),
        });

        assert!(!report.is_valid());
        assert_eq!(report.error_for("min_peaks"), Some("Minimum Number of Peaks is required"));
        assert_eq!(
            report.flagged_fields(),
            vec!["min_peaks", "lower_clear_mz", "upper_clear_mz"]
        );
        assert_eq!(report.to_string(), "Minimum Number of Peaks is required; bad range");
    }
}
