//! # Enablement
//!
//! Which fields are editable is derived data: it is recomputed from the
//! current [`ViewState`] every time, never stored on its own.
//!
//! Two things can disable a field:
//! - the global `editable` flag, which disables every field;
//! - an [`EnablementRule`], whose trigger field's value decides whether its
//!   dependents are enabled.
//!
//! Rules run in declaration order and only ever disable, so a field turned
//! off by one rule cannot be turned back on by a later one.

use crate::schema::ParameterSchema;
use crate::validator::validate;
use crate::value::{RawValue, TypedValue};
use crate::view::ViewState;
use indexmap::IndexMap;
use serde::Serialize;

/// When a rule's dependents are enabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Condition {
    Equals(TypedValue),
    NotEquals(TypedValue),
}

/// Enables `dependents` only while `trigger` satisfies `condition`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnablementRule {
    pub trigger: String,
    pub condition: Condition,
    pub dependents: Vec<String>,
    /// Value the dependents take while disabled by this rule.
    pub forced: Option<RawValue>,
}

impl EnablementRule {
    pub fn enabled_when(trigger: impl Into<String>, value: TypedValue) -> Self {
        Self {
            trigger: trigger.into(),
            condition: Condition::Equals(value),
            dependents: Vec::new(),
            forced: None,
        }
    }

    pub fn enabled_unless(trigger: impl Into<String>, value: TypedValue) -> Self {
        Self {
            trigger: trigger.into(),
            condition: Condition::NotEquals(value),
            dependents: Vec::new(),
            forced: None,
        }
    }

    pub fn dependents(mut self, ids: &[&str]) -> Self {
        self.dependents.extend(ids.iter().map(|id| id.to_string()));
        self
    }

    pub fn forcing(mut self, value: RawValue) -> Self {
        self.forced = Some(value);
        self
    }

    pub fn is_satisfied(&self, value: &TypedValue) -> bool {
        match &self.condition {
            Condition::Equals(expected) => value == expected,
            Condition::NotEquals(expected) => value != expected,
        }
    }
}

/// Per-field enabled flags plus any values forced onto disabled fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnablementState {
    /// Effective state: false when read-only or disabled by a rule.
    pub enabled: IndexMap<String, bool>,
    pub forced: IndexMap<String, RawValue>,
    #[serde(skip)]
    disabled_by_rule: Vec<String>,
}

impl EnablementState {
    pub fn is_enabled(&self, id: &str) -> bool {
        self.enabled.get(id).copied().unwrap_or(false)
    }

    /// True when no rule disables `id`, whatever the global flag says.
    pub fn is_conditionally_enabled(&self, id: &str) -> bool {
        !self.disabled_by_rule.iter().any(|disabled| disabled == id)
    }

    pub fn forced_value(&self, id: &str) -> Option<&RawValue> {
        self.forced.get(id)
    }

    pub fn all_disabled(&self) -> bool {
        self.enabled.values().all(|enabled| !enabled)
    }

    pub fn disabled(&self) -> impl Iterator<Item = &str> {
        self.enabled
            .iter()
            .filter(|(_, enabled)| !**enabled)
            .map(|(id, _)| id.as_str())
    }
}

/// Computes the enablement of every field in `schema` for `view`.
///
/// A rule whose trigger is absent or does not parse leaves its dependents
/// alone. A trigger that an earlier rule forced is read through its forced
/// value.
pub fn evaluate<D>(schema: &ParameterSchema<D>, view: &ViewState, editable: bool) -> EnablementState {
    let mut state = EnablementState {
        enabled: schema.field_ids().map(|id| (id.to_string(), editable)).collect(),
        ..EnablementState::default()
    };

    for rule in schema.rules() {
        let Some(entry) = schema.entry(&rule.trigger) else {
            continue;
        };
        let raw = state.forced.get(&rule.trigger).or_else(|| view.get(&rule.trigger));
        let value = match validate(raw, &entry.descriptor, entry.codec.as_ref()) {
            Ok(value) if !value.is_absent() => value,
            _ => {
                tracing::debug!(trigger = %rule.trigger, "Skipping rule with unusable trigger value");
                continue;
            }
        };
        if rule.is_satisfied(&value) {
            continue;
        }

        for dependent in &rule.dependents {
            if let Some(enabled) = state.enabled.get_mut(dependent) {
                *enabled = false;
            }
            if !state.disabled_by_rule.contains(dependent) {
                state.disabled_by_rule.push(dependent.clone());
            }
            if let Some(forced) = &rule.forced {
                state
                    .forced
                    .entry(dependent.clone())
                    .or_insert_with(|| forced.clone());
            }
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldDescriptor;

    #[derive(Debug, Default)]
    struct Toggles {
        refine: bool,
        semi: bool,
        point_mutations: bool,
    }

    fn schema() -> ParameterSchema<Toggles> {
        ParameterSchema::<Toggles>::builder("Toggles")
            .boolean(FieldDescriptor::boolean("refine", "Refinement"), |t| t.refine, |t, v| t.refine = v)
            .boolean(FieldDescriptor::boolean("semi", "Semi"), |t| t.semi, |t, v| t.semi = v)
            .boolean(
                FieldDescriptor::boolean("point_mutations", "Point Mutations"),
                |t| t.point_mutations,
                |t, v| t.point_mutations = v,
            )
            .rule(
                EnablementRule::enabled_when("refine", TypedValue::Boolean(true))
                    .dependents(&["semi", "point_mutations"]),
            )
            .rule(
                EnablementRule::enabled_when("semi", TypedValue::Boolean(true))
                    .dependents(&["point_mutations"])
                    .forcing(RawValue::index(1)),
            )
            .build()
            .unwrap()
    }

    fn view(refine: usize, semi: usize) -> ViewState {
        let mut view = ViewState::new();
        view.set_index("refine", refine);
        view.set_index("semi", semi);
        view.set_index("point_mutations", 0);
        view
    }

    #[test]
    fn test_rule_disables_dependents() {
        let state = evaluate(&schema(), &view(1, 0), true);
        assert!(state.is_enabled("refine"));
        assert!(!state.is_enabled("semi"));
        assert!(!state.is_enabled("point_mutations"));
        assert!(!state.is_conditionally_enabled("semi"));
    }

    #[test]
    fn test_later_rule_cannot_reenable() {
        let state = evaluate(&schema(), &view(1, 0), true);
        // "semi" is Yes, but the first rule already turned point mutations off.
        assert!(!state.is_enabled("point_mutations"));
    }

    #[test]
    fn test_forced_value_recorded_without_touching_view() {
        let view = view(0, 1);
        let state = evaluate(&schema(), &view, true);
        assert!(state.is_enabled("semi"));
        assert!(!state.is_enabled("point_mutations"));
        assert_eq!(state.forced_value("point_mutations"), Some(&RawValue::index(1)));
        assert_eq!(view.get("point_mutations"), Some(&RawValue::index(0)));
    }

    #[test]
    fn test_read_only_disables_everything() {
        let state = evaluate(&schema(), &view(0, 0), false);
        assert!(state.all_disabled());
        assert!(state.is_conditionally_enabled("semi"));
    }

    #[test]
    fn test_unparsable_trigger_is_skipped() {
        let mut view = view(0, 0);
        view.set_index("refine", 7);
        let state = evaluate(&schema(), &view, true);
        assert!(state.is_enabled("semi"));
    }
}
