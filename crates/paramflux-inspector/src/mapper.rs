//! # Mapping
//!
//! [`ParameterMapper`] converts a domain object into a [`ViewState`] and an
//! edited view back into a new domain object.

use crate::enablement;
use crate::engine::parse_pass;
use crate::error::SchemaError;
use crate::field::FieldKind;
use crate::report::ValidationReport;
use crate::schema::{FieldEntry, ParameterSchema};
use crate::validator::{FieldError, FieldErrorKind};
use crate::value::{RawValue, TypedValue};
use crate::view::ViewState;

/// Canonical text of a real: shortest round-trip form, ".0" kept on integral values.
pub fn format_real(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Renders the domain value of one field as a raw view value.
pub(crate) fn render_field<D>(entry: &FieldEntry<D>, domain: &D) -> Result<RawValue, SchemaError> {
    let descriptor = &entry.descriptor;
    let value = entry.accessor.get(domain);
    let unrepresentable = |detail: String| SchemaError::UnrepresentableValue {
        field: descriptor.id.clone(),
        detail,
    };

    match (descriptor.kind, value) {
        (_, TypedValue::Absent) if !descriptor.required => Ok(RawValue::empty()),
        (_, TypedValue::Absent) => Err(unrepresentable("required field has no value".to_string())),
        (FieldKind::Integer | FieldKind::OptionalInteger, TypedValue::Integer(value)) => {
            Ok(RawValue::Text(value.to_string()))
        }
        (FieldKind::Real | FieldKind::OptionalReal, TypedValue::Real(value)) => {
            Ok(RawValue::Text(format_real(value)))
        }
        (FieldKind::BooleanChoice, TypedValue::Boolean(value)) => {
            Ok(RawValue::Index(if value { 0 } else { 1 }))
        }
        (FieldKind::Enum, TypedValue::Choice(choice)) => {
            let codec = entry
                .codec
                .as_ref()
                .ok_or_else(|| SchemaError::MissingCodec(descriptor.id.clone()))?;
            codec
                .encode(&choice)
                .map(RawValue::Index)
                .map_err(|err| unrepresentable(err.to_string()))
        }
        (FieldKind::Text, TypedValue::Text(text)) => Ok(RawValue::Text(text)),
        (kind, other) => Err(unrepresentable(format!(
            "{} value for a {kind:?} field",
            other.type_name()
        ))),
    }
}

/// Bidirectional transform between domain objects and view state.
pub struct ParameterMapper;

impl ParameterMapper {
    /// Renders every field of `domain`.
    pub fn to_view<D>(domain: &D, schema: &ParameterSchema<D>) -> Result<ViewState, SchemaError> {
        schema
            .entries()
            .map(|entry| Ok((entry.descriptor.id.clone(), render_field(entry, domain)?)))
            .collect()
    }

    /// Builds a new domain object from `view`, starting from `D::default()`.
    ///
    /// Every field is validated, disabled ones included. Its errors match
    /// [`ValidationEngine::run`](crate::engine::ValidationEngine::run) except
    /// for `Rejected`, which only a refusing domain setter produces.
    #[tracing::instrument(skip_all, fields(tool = schema.tool()))]
    pub fn from_view<D: Default>(view: &ViewState, schema: &ParameterSchema<D>) -> Result<D, ValidationReport> {
        Self::apply(view, schema, D::default())
    }

    /// Like [`from_view`](Self::from_view), but writes onto a copy of `base`,
    /// so members outside the schema keep their value.
    #[tracing::instrument(skip_all, fields(tool = schema.tool()))]
    pub fn from_view_over<D: Clone>(
        view: &ViewState,
        schema: &ParameterSchema<D>,
        base: &D,
    ) -> Result<D, ValidationReport> {
        Self::apply(view, schema, base.clone())
    }

    fn apply<D>(view: &ViewState, schema: &ParameterSchema<D>, mut target: D) -> Result<D, ValidationReport> {
        let enablement = enablement::evaluate(schema, view, true);
        let pass = parse_pass(schema, view, &enablement);
        let mut report = pass.report;
        if !report.is_valid() {
            return Err(report);
        }

        for (id, value) in &pass.parsed {
            let Some(entry) = schema.entry(id) else {
                continue;
            };
            if let Err(err) = entry.accessor.set(&mut target, value) {
                tracing::error!(field = %id, error = %err, "Domain setter rejected a validated value");
                report.push_field_error(FieldError::new(
                    &entry.descriptor,
                    FieldErrorKind::Rejected,
                    format!("{} could not be applied: {err}", entry.descriptor.label),
                ));
            }
        }

        if report.is_valid() { Ok(target) } else { Err(report) }
    }

    /// Ids of the fields whose domain values differ between `a` and `b`.
    /// Reals within `tolerance` of each other count as equal.
    pub fn differences<D>(a: &D, b: &D, schema: &ParameterSchema<D>, tolerance: f64) -> Vec<String> {
        schema
            .entries()
            .filter(|entry| !entry.accessor.get(a).approx_eq(&entry.accessor.get(b), tolerance))
            .map(|entry| entry.descriptor.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::EnumCodec;
    use crate::constraint::CrossFieldConstraint;
    use crate::field::FieldDescriptor;

    #[derive(Debug, Clone, PartialEq)]
    struct Clearing {
        low: f64,
        high: f64,
        peaks: i32,
        enzyme: i32,
        charge: Option<u32>,
    }

    impl Default for Clearing {
        fn default() -> Self {
            Self {
                low: 0.0,
                high: 0.0,
                peaks: 10,
                enzyme: 2,
                charge: None,
            }
        }
    }

    fn schema() -> ParameterSchema<Clearing> {
        ParameterSchema::<Clearing>::builder("Clearing")
            .real(FieldDescriptor::real("low", "Lower"), |c| c.low, |c, v| c.low = v)
            .real(FieldDescriptor::real("high", "Upper"), |c| c.high, |c, v| c.high = v)
            .integer(FieldDescriptor::integer("peaks", "Peaks"), |c| c.peaks, |c, v| c.peaks = v)
            .choice(
                FieldDescriptor::choice("enzyme", "Enzyme"),
                EnumCodec::codes(&[(2, "Full"), (1, "Semi"), (8, "C"), (9, "N")]).unwrap(),
                |c| c.enzyme,
                |c, v| c.enzyme = v,
            )
            .optional_integer(
                FieldDescriptor::optional_integer("charge", "Charge"),
                |c| c.charge,
                |c, v| c.charge = v,
            )
            .constraint(CrossFieldConstraint::ordered_pair("clear", "low", "high"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(600.0), "600.0");
        assert_eq!(format_real(0.0005), "0.0005");
        assert_eq!(format_real(1446.94), "1446.94");
        assert_eq!(format_real(-1.5), "-1.5");
    }

    #[test]
    fn test_to_view_encodes_codes() {
        let view = ParameterMapper::to_view(&Clearing::default(), &schema()).unwrap();
        assert_eq!(view.get("low"), Some(&RawValue::text("0.0")));
        assert_eq!(view.get("peaks"), Some(&RawValue::text("10")));
        assert_eq!(view.get("enzyme"), Some(&RawValue::index(0)));
        assert_eq!(view.get("charge"), Some(&RawValue::empty()));
    }

    #[test]
    fn test_from_view_decodes_codes() {
        let schema = schema();
        let mut view = ParameterMapper::to_view(&Clearing::default(), &schema).unwrap();
        view.set_index("enzyme", 2);
        view.set_text("charge", "4");

        let result = ParameterMapper::from_view(&view, &schema).unwrap();
        assert_eq!(result.enzyme, 8);
        assert_eq!(result.charge, Some(4));
    }

    #[test]
    fn test_from_view_collects_every_error() {
        let schema = schema();
        let mut view = ParameterMapper::to_view(&Clearing::default(), &schema).unwrap();
        view.set_text("peaks", "");
        view.set_text("low", "5.0");
        view.set_text("high", "1.0");
        view.set_text("charge", "x");

        let report = ParameterMapper::from_view(&view, &schema).unwrap_err();
        assert_eq!(report.field_errors.len(), 2);
        assert_eq!(report.error_for("peaks"), Some("Peaks is required"));
        assert_eq!(report.error_for("charge"), Some("Charge must be an integer"));
        assert_eq!(report.cross_field_errors.len(), 1);
    }

    #[test]
    fn test_rejected_setter_becomes_field_error() {
        let schema = ParameterSchema::<Clearing>::builder("Clearing")
            .field(
                FieldDescriptor::integer("peaks", "Peaks"),
                None,
                crate::schema::Accessor::new(
                    crate::schema::ValueShape::Integer,
                    false,
                    |c: &Clearing| TypedValue::Integer(i64::from(c.peaks)),
                    |c: &mut Clearing, value: &TypedValue| match value {
                        TypedValue::Integer(v) if *v <= 1000 => {
                            c.peaks = *v as i32;
                            Ok(())
                        }
                        TypedValue::Integer(v) => Err(crate::error::AccessError::OutOfRange(*v)),
                        _ => Err(crate::error::AccessError::MissingValue),
                    },
                ),
            )
            .build()
            .unwrap();

        let mut view = ViewState::new();
        view.set_text("peaks", "5000");
        let report = ParameterMapper::from_view(&view, &schema).unwrap_err();
        assert_eq!(
            report.field_errors["peaks"].kind,
            FieldErrorKind::Rejected
        );

        // Setters are not consulted without a domain object
        assert!(crate::engine::ValidationEngine::run(&view, &schema, true).is_valid());
    }

    #[test]
    fn test_differences_with_tolerance() {
        let schema = schema();
        let a = Clearing::default();
        let mut b = a.clone();
        b.low = 1e-14;
        assert!(ParameterMapper::differences(&a, &b, &schema, 1e-13).is_empty());

        b.peaks = 11;
        assert_eq!(ParameterMapper::differences(&a, &b, &schema, 1e-13), vec!["peaks".to_string()]);
    }
}
