//! # Validation engine
//!
//! One pipeline, two callers: [`ValidationEngine`] runs it to drive
//! confirmation feedback, [`ParameterMapper`](crate::mapper::ParameterMapper)
//! runs it before building a domain object. Both see the same errors for the
//! same view.

use crate::enablement::{self, EnablementState};
use crate::report::ValidationReport;
use crate::schema::ParameterSchema;
use crate::validator::validate;
use crate::value::TypedValue;
use crate::view::ViewState;
use indexmap::IndexMap;
use serde::Serialize;

/// Result of parsing every field and checking every constraint.
pub(crate) struct ParsePass {
    /// Parsed value of every field that validated, disabled fields included.
    pub parsed: IndexMap<String, TypedValue>,
    pub report: ValidationReport,
}

/// Validates every field through its effective raw value: the forced value
/// while a rule forces one, the view value otherwise. Constraints only see
/// fields that are enabled by their rules.
pub(crate) fn parse_pass<D>(
    schema: &ParameterSchema<D>,
    view: &ViewState,
    enablement: &EnablementState,
) -> ParsePass {
    let mut checked = IndexMap::new();
    let mut parsed = IndexMap::new();
    let mut report = ValidationReport::default();

    for entry in schema.entries() {
        let id = &entry.descriptor.id;
        let raw = enablement.forced_value(id).or_else(|| view.get(id));
        match validate(raw, &entry.descriptor, entry.codec.as_ref()) {
            Ok(value) => {
                if enablement.is_conditionally_enabled(id) {
                    checked.insert(id.clone(), value.clone());
                }
                parsed.insert(id.clone(), value);
            }
            Err(err) => report.push_field_error(err),
        }
    }

    for constraint in schema.constraints() {
        if let Err(err) = constraint.check(&checked, |id| schema.label(id).to_string()) {
            report.push_constraint_error(err);
        }
    }

    tracing::debug!(
        field_errors = report.field_errors.len(),
        cross_field_errors = report.cross_field_errors.len(),
        "Validation pass complete"
    );

    ParsePass { parsed, report }
}

/// Enablement and report for one view, computed together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub enablement: EnablementState,
    pub report: ValidationReport,
}

/// Read-only counterpart to [`ParameterMapper::from_view`](crate::mapper::ParameterMapper::from_view).
pub struct ValidationEngine;

impl ValidationEngine {
    /// Validates `view` without building a domain object.
    ///
    /// `editable` does not change the errors. A read-only view is reported
    /// exactly as an editable one would be.
    ///
    /// Domain setters are not called here. A custom setter that refuses a
    /// validated value only shows up as a `Rejected` error from
    /// [`ParameterMapper::from_view`](crate::mapper::ParameterMapper::from_view).
    pub fn run<D>(view: &ViewState, schema: &ParameterSchema<D>, editable: bool) -> ValidationReport {
        Self::evaluate(view, schema, editable).report
    }

    #[tracing::instrument(skip_all, fields(tool = schema.tool(), editable = editable))]
    pub fn evaluate<D>(view: &ViewState, schema: &ParameterSchema<D>, editable: bool) -> Evaluation {
        let enablement = enablement::evaluate(schema, view, editable);
        let report = parse_pass(schema, view, &enablement).report;
        Evaluation { enablement, report }
    }
}
