//! # Edit sessions
//!
//! An [`EditSession`] owns the view of one open parameter dialog: it is
//! created from a domain object, mutated one field at a time, and ends in
//! either [`confirm`](EditSession::confirm) or [`cancel`](EditSession::cancel).

use crate::config::EditorConfig;
use crate::enablement::{self, EnablementState};
use crate::engine::{Evaluation, ValidationEngine};
use crate::error::SessionError;
use crate::mapper::ParameterMapper;
use crate::report::ValidationReport;
use crate::schema::ParameterSchema;
use crate::value::RawValue;
use crate::view::ViewState;

/// The state of one editing session over a domain object `D`.
#[derive(Debug)]
pub struct EditSession<'s, D> {
    schema: &'s ParameterSchema<D>,
    config: EditorConfig,
    baseline: D,
    view: ViewState,
    enablement: EnablementState,
    report: ValidationReport,
}

impl<'s, D: Clone> EditSession<'s, D> {
    /// Opens a session showing `domain`.
    pub fn open(schema: &'s ParameterSchema<D>, domain: D, config: EditorConfig) -> Result<Self, SessionError> {
        let view = ParameterMapper::to_view(&domain, schema)?;
        let Evaluation { enablement, report } = ValidationEngine::evaluate(&view, schema, config.editable);

        tracing::info!(
            tool = schema.tool(),
            editable = config.editable,
            fields = view.len(),
            "Opened edit session"
        );

        Ok(Self {
            schema,
            config,
            baseline: domain,
            view,
            enablement,
            report,
        })
    }

    /// Sets one raw value and recomputes the derived state.
    pub fn update_value(&mut self, field_id: &str, value: RawValue) -> Result<(), SessionError> {
        if !self.schema.contains(field_id) {
            tracing::warn!(field = field_id, "Edit of unknown field rejected");
            return Err(SessionError::UnknownField(field_id.to_string()));
        }
        if !self.config.editable {
            tracing::warn!(field = field_id, "Edit rejected in read-only session");
            return Err(SessionError::ReadOnly);
        }
        if !self.enablement.is_enabled(field_id) {
            tracing::warn!(field = field_id, "Edit of disabled field rejected");
            return Err(SessionError::FieldDisabled(field_id.to_string()));
        }

        self.view.set(field_id, value);
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        if self.config.validate_on_edit {
            let Evaluation { enablement, report } =
                ValidationEngine::evaluate(&self.view, self.schema, self.config.editable);
            self.enablement = enablement;
            self.report = report;
        } else {
            self.enablement = enablement::evaluate(self.schema, &self.view, self.config.editable);
        }
    }

    /// Recomputes the report regardless of `validate_on_edit`.
    pub fn revalidate(&mut self) -> &ValidationReport {
        let Evaluation { enablement, report } =
            ValidationEngine::evaluate(&self.view, self.schema, self.config.editable);
        self.enablement = enablement;
        self.report = report;
        &self.report
    }

    /// Discards every edit and shows the baseline again.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.view = ParameterMapper::to_view(&self.baseline, self.schema)?;
        self.revalidate();
        Ok(())
    }

    pub fn schema(&self) -> &ParameterSchema<D> {
        self.schema
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn baseline(&self) -> &D {
        &self.baseline
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn enablement(&self) -> &EnablementState {
        &self.enablement
    }

    /// The report from the last validation pass.
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }

    /// Whether the confirm action should be offered.
    pub fn can_confirm(&self) -> bool {
        self.config.editable && self.report.is_valid()
    }

    /// True when the current view maps to something other than the baseline.
    /// A view that does not validate counts as changed.
    pub fn has_changes(&self) -> bool {
        match ParameterMapper::from_view_over(&self.view, self.schema, &self.baseline) {
            Ok(edited) => !ParameterMapper::differences(
                &self.baseline,
                &edited,
                self.schema,
                self.config.real_tolerance,
            )
            .is_empty(),
            Err(_) => true,
        }
    }

    /// Builds the confirmed domain object.
    pub fn confirm(&self) -> Result<D, SessionError> {
        if !self.config.editable {
            return Err(SessionError::ReadOnly);
        }
        let confirmed = ParameterMapper::from_view_over(&self.view, self.schema, &self.baseline)
            .map_err(SessionError::Invalid)?;
        tracing::info!(tool = self.schema.tool(), "Confirmed parameters");
        Ok(confirmed)
    }

    /// Ends the session without producing a domain object.
    pub fn cancel(self) {
        tracing::info!(tool = self.schema.tool(), "Discarded edit session");
    }
}
