//! # Parameter schemas
//!
//! A [`ParameterSchema`] is the ordered list of fields for one search engine,
//! together with the codecs, cross-field constraints and enablement rules
//! that apply to them. Each field carries an [`Accessor`] reading and writing
//! the matching member of the domain object `D`.
//!
//! Schemas are assembled with [`SchemaBuilder`] and checked once, in
//! [`SchemaBuilder::build`]. Everything that can be wrong with a schema is
//! reported there as a [`SchemaError`].

use crate::codec::EnumCodec;
use crate::constraint::CrossFieldConstraint;
use crate::enablement::EnablementRule;
use crate::error::{AccessError, SchemaError};
use crate::field::{FieldDescriptor, FieldKind};
use crate::mapper::render_field;
use crate::validator::validate;
use crate::value::{ChoiceValue, TypedValue};
use indexmap::IndexMap;
use num_traits::Bounded;
use std::fmt;

/// The kind of typed value an accessor exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Integer,
    Real,
    Boolean,
    Choice,
    Text,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueShape::Integer => "integer",
            ValueShape::Real => "real",
            ValueShape::Boolean => "boolean",
            ValueShape::Choice => "choice",
            ValueShape::Text => "text",
        };
        f.write_str(name)
    }
}

type Getter<D> = Box<dyn Fn(&D) -> TypedValue + Send + Sync>;
type Setter<D> = Box<dyn Fn(&mut D, &TypedValue) -> Result<(), AccessError> + Send + Sync>;

/// Get/set pair for one domain member.
pub struct Accessor<D> {
    shape: ValueShape,
    optional: bool,
    integer_bounds: Option<(i64, i64)>,
    get: Getter<D>,
    set: Setter<D>,
}

fn mismatch(expected: &'static str, found: &TypedValue) -> AccessError {
    AccessError::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}

impl<D: 'static> Accessor<D> {
    /// An accessor over raw typed values. `optional` accessors may produce and
    /// accept [`TypedValue::Absent`].
    pub fn new(
        shape: ValueShape,
        optional: bool,
        get: impl Fn(&D) -> TypedValue + Send + Sync + 'static,
        set: impl Fn(&mut D, &TypedValue) -> Result<(), AccessError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            shape,
            optional,
            integer_bounds: None,
            get: Box::new(get),
            set: Box::new(set),
        }
    }

    /// An integer member. The valid range is taken from `T`.
    pub fn integer<T>(
        get: impl Fn(&D) -> T + Send + Sync + 'static,
        set: impl Fn(&mut D, T) + Send + Sync + 'static,
    ) -> Self
    where
        T: TryFrom<i64> + Into<i64> + Bounded + 'static,
    {
        let mut accessor = Self::new(
            ValueShape::Integer,
            false,
            move |d| TypedValue::Integer(get(d).into()),
            move |d, value| match value {
                TypedValue::Integer(raw) => {
                    let value = T::try_from(*raw).map_err(|_| AccessError::OutOfRange(*raw))?;
                    set(d, value);
                    Ok(())
                }
                other => Err(mismatch("integer", other)),
            },
        );
        accessor.integer_bounds = Some((T::min_value().into(), T::max_value().into()));
        accessor
    }

    pub fn optional_integer<T>(
        get: impl Fn(&D) -> Option<T> + Send + Sync + 'static,
        set: impl Fn(&mut D, Option<T>) + Send + Sync + 'static,
    ) -> Self
    where
        T: TryFrom<i64> + Into<i64> + Bounded + 'static,
    {
        let mut accessor = Self::new(
            ValueShape::Integer,
            true,
            move |d| get(d).map_or(TypedValue::Absent, |value| TypedValue::Integer(value.into())),
            move |d, value| match value {
                TypedValue::Absent => {
                    set(d, None);
                    Ok(())
                }
                TypedValue::Integer(raw) => {
                    let value = T::try_from(*raw).map_err(|_| AccessError::OutOfRange(*raw))?;
                    set(d, Some(value));
                    Ok(())
                }
                other => Err(mismatch("integer", other)),
            },
        );
        accessor.integer_bounds = Some((T::min_value().into(), T::max_value().into()));
        accessor
    }

    pub fn real(
        get: impl Fn(&D) -> f64 + Send + Sync + 'static,
        set: impl Fn(&mut D, f64) + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            ValueShape::Real,
            false,
            move |d| TypedValue::Real(get(d)),
            move |d, value| match value {
                TypedValue::Real(value) => {
                    set(d, *value);
                    Ok(())
                }
                other => Err(mismatch("real", other)),
            },
        )
    }

    pub fn optional_real(
        get: impl Fn(&D) -> Option<f64> + Send + Sync + 'static,
        set: impl Fn(&mut D, Option<f64>) + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            ValueShape::Real,
            true,
            move |d| get(d).map_or(TypedValue::Absent, TypedValue::Real),
            move |d, value| match value {
                TypedValue::Absent => {
                    set(d, None);
                    Ok(())
                }
                TypedValue::Real(value) => {
                    set(d, Some(*value));
                    Ok(())
                }
                other => Err(mismatch("real", other)),
            },
        )
    }

    pub fn boolean(
        get: impl Fn(&D) -> bool + Send + Sync + 'static,
        set: impl Fn(&mut D, bool) + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            ValueShape::Boolean,
            false,
            move |d| TypedValue::Boolean(get(d)),
            move |d, value| match value {
                TypedValue::Boolean(value) => {
                    set(d, *value);
                    Ok(())
                }
                other => Err(mismatch("boolean", other)),
            },
        )
    }

    pub fn choice<T: ChoiceValue + 'static>(
        get: impl Fn(&D) -> T + Send + Sync + 'static,
        set: impl Fn(&mut D, T) + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            ValueShape::Choice,
            false,
            move |d| TypedValue::Choice(get(d).to_enum_value()),
            move |d, value| match value {
                TypedValue::Choice(choice) => {
                    let value = T::from_enum_value(choice)
                        .ok_or_else(|| AccessError::UnknownChoice(choice.clone()))?;
                    set(d, value);
                    Ok(())
                }
                other => Err(mismatch("choice", other)),
            },
        )
    }

    pub fn text(
        get: impl Fn(&D) -> String + Send + Sync + 'static,
        set: impl Fn(&mut D, String) + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            ValueShape::Text,
            false,
            move |d| TypedValue::Text(get(d)),
            move |d, value| match value {
                TypedValue::Text(text) => {
                    set(d, text.clone());
                    Ok(())
                }
                TypedValue::Absent => Err(AccessError::MissingValue),
                other => Err(mismatch("text", other)),
            },
        )
    }

    pub fn optional_text(
        get: impl Fn(&D) -> Option<String> + Send + Sync + 'static,
        set: impl Fn(&mut D, Option<String>) + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            ValueShape::Text,
            true,
            move |d| get(d).map_or(TypedValue::Absent, TypedValue::Text),
            move |d, value| match value {
                TypedValue::Absent => {
                    set(d, None);
                    Ok(())
                }
                TypedValue::Text(text) => {
                    set(d, Some(text.clone()));
                    Ok(())
                }
                other => Err(mismatch("text", other)),
            },
        )
    }
}

impl<D> Accessor<D> {
    pub fn get(&self, domain: &D) -> TypedValue {
        (self.get)(domain)
    }

    pub fn set(&self, domain: &mut D, value: &TypedValue) -> Result<(), AccessError> {
        (self.set)(domain, value)
    }

    pub fn shape(&self) -> ValueShape {
        self.shape
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Whether this accessor can back a field of `kind` with the given requiredness.
    fn fits(&self, kind: FieldKind, required: bool) -> bool {
        match kind {
            FieldKind::Integer => self.shape == ValueShape::Integer && !self.optional,
            FieldKind::OptionalInteger => self.shape == ValueShape::Integer && self.optional,
            FieldKind::Real => self.shape == ValueShape::Real && !self.optional,
            FieldKind::OptionalReal => self.shape == ValueShape::Real && self.optional,
            FieldKind::BooleanChoice => self.shape == ValueShape::Boolean && !self.optional,
            FieldKind::Enum => self.shape == ValueShape::Choice && !self.optional,
            FieldKind::Text => self.shape == ValueShape::Text && (self.optional || required),
        }
    }
}

impl<D> fmt::Debug for Accessor<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("shape", &self.shape)
            .field("optional", &self.optional)
            .field("integer_bounds", &self.integer_bounds)
            .finish_non_exhaustive()
    }
}

/// One field of a schema.
#[derive(Debug)]
pub struct FieldEntry<D> {
    pub descriptor: FieldDescriptor,
    pub codec: Option<EnumCodec>,
    pub accessor: Accessor<D>,
}

/// The fields, constraints and rules for one tool.
#[derive(Debug)]
pub struct ParameterSchema<D> {
    tool: String,
    help_url: Option<String>,
    fields: IndexMap<String, FieldEntry<D>>,
    constraints: Vec<CrossFieldConstraint>,
    rules: Vec<EnablementRule>,
}

impl<D> ParameterSchema<D> {
    pub fn builder(tool: impl Into<String>) -> SchemaBuilder<D> {
        SchemaBuilder::new(tool)
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn help_url(&self) -> Option<&str> {
        self.help_url.as_deref()
    }

    pub fn entries(&self) -> impl Iterator<Item = &FieldEntry<D>> {
        self.fields.values()
    }

    pub fn entry(&self, id: &str) -> Option<&FieldEntry<D>> {
        self.fields.get(id)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values().map(|entry| &entry.descriptor)
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn descriptor(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.get(id).map(|entry| &entry.descriptor)
    }

    pub fn codec(&self, id: &str) -> Option<&EnumCodec> {
        self.fields.get(id).and_then(|entry| entry.codec.as_ref())
    }

    /// The display label of `id`, or `id` itself when unknown.
    pub fn label<'a>(&'a self, id: &'a str) -> &'a str {
        self.descriptor(id).map_or(id, |descriptor| descriptor.label.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn constraints(&self) -> &[CrossFieldConstraint] {
        &self.constraints
    }

    pub fn rules(&self) -> &[EnablementRule] {
        &self.rules
    }
}

/// Collects fields, constraints and rules, then checks them in [`build`](Self::build).
pub struct SchemaBuilder<D> {
    tool: String,
    help_url: Option<String>,
    entries: Vec<FieldEntry<D>>,
    constraints: Vec<CrossFieldConstraint>,
    rules: Vec<EnablementRule>,
}

impl<D> SchemaBuilder<D> {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            help_url: None,
            entries: Vec::new(),
            constraints: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn help_url(mut self, url: impl Into<String>) -> Self {
        self.help_url = Some(url.into());
        self
    }

    /// Adds a field with an explicit accessor and optional codec.
    pub fn field(mut self, descriptor: FieldDescriptor, codec: Option<EnumCodec>, accessor: Accessor<D>) -> Self {
        self.entries.push(FieldEntry {
            descriptor,
            codec,
            accessor,
        });
        self
    }

    pub fn constraint(mut self, constraint: CrossFieldConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn rule(mut self, rule: EnablementRule) -> Self {
        self.rules.push(rule);
        self
    }
}

impl<D: 'static> SchemaBuilder<D> {
    pub fn integer<T>(
        self,
        descriptor: FieldDescriptor,
        get: impl Fn(&D) -> T + Send + Sync + 'static,
        set: impl Fn(&mut D, T) + Send + Sync + 'static,
    ) -> Self
    where
        T: TryFrom<i64> + Into<i64> + Bounded + 'static,
    {
        self.field(descriptor, None, Accessor::integer(get, set))
    }

    pub fn optional_integer<T>(
        self,
        descriptor: FieldDescriptor,
        get: impl Fn(&D) -> Option<T> + Send + Sync + 'static,
        set: impl Fn(&mut D, Option<T>) + Send + Sync + 'static,
    ) -> Self
    where
        T: TryFrom<i64> + Into<i64> + Bounded + 'static,
    {
        self.field(descriptor, None, Accessor::optional_integer(get, set))
    }

    pub fn real(
        self,
        descriptor: FieldDescriptor,
        get: impl Fn(&D) -> f64 + Send + Sync + 'static,
        set: impl Fn(&mut D, f64) + Send + Sync + 'static,
    ) -> Self {
        self.field(descriptor, None, Accessor::real(get, set))
    }

    pub fn optional_real(
        self,
        descriptor: FieldDescriptor,
        get: impl Fn(&D) -> Option<f64> + Send + Sync + 'static,
        set: impl Fn(&mut D, Option<f64>) + Send + Sync + 'static,
    ) -> Self {
        self.field(descriptor, None, Accessor::optional_real(get, set))
    }

    pub fn boolean(
        self,
        descriptor: FieldDescriptor,
        get: impl Fn(&D) -> bool + Send + Sync + 'static,
        set: impl Fn(&mut D, bool) + Send + Sync + 'static,
    ) -> Self {
        self.field(descriptor, None, Accessor::boolean(get, set))
    }

    pub fn choice<T: ChoiceValue + 'static>(
        self,
        descriptor: FieldDescriptor,
        codec: EnumCodec,
        get: impl Fn(&D) -> T + Send + Sync + 'static,
        set: impl Fn(&mut D, T) + Send + Sync + 'static,
    ) -> Self {
        self.field(descriptor, Some(codec), Accessor::choice(get, set))
    }

    pub fn text(
        self,
        descriptor: FieldDescriptor,
        get: impl Fn(&D) -> String + Send + Sync + 'static,
        set: impl Fn(&mut D, String) + Send + Sync + 'static,
    ) -> Self {
        self.field(descriptor, None, Accessor::text(get, set))
    }

    pub fn optional_text(
        self,
        descriptor: FieldDescriptor,
        get: impl Fn(&D) -> Option<String> + Send + Sync + 'static,
        set: impl Fn(&mut D, Option<String>) + Send + Sync + 'static,
    ) -> Self {
        self.field(descriptor, None, Accessor::optional_text(get, set))
    }
}

impl<D: Default + 'static> SchemaBuilder<D> {
    /// Checks the schema and freezes it.
    pub fn build(self) -> Result<ParameterSchema<D>, SchemaError> {
        let mut fields: IndexMap<String, FieldEntry<D>> = IndexMap::with_capacity(self.entries.len());
        for mut entry in self.entries {
            check_entry(&mut entry)?;
            let id = entry.descriptor.id.clone();
            if fields.contains_key(&id) {
                return Err(SchemaError::DuplicateField(id));
            }
            fields.insert(id, entry);
        }

        for constraint in &self.constraints {
            let context = format!("constraint `{}`", constraint.id());
            for field in constraint.fields() {
                let entry = fields.get(field).ok_or_else(|| SchemaError::UnknownField {
                    context: context.clone(),
                    field: field.to_string(),
                })?;
                if !entry.descriptor.kind.is_numeric() {
                    return Err(SchemaError::NonNumericField {
                        context: context.clone(),
                        field: field.to_string(),
                    });
                }
            }
        }

        for rule in &self.rules {
            let context = format!("rule on `{}`", rule.trigger);
            if !fields.contains_key(&rule.trigger) {
                return Err(SchemaError::UnknownField {
                    context,
                    field: rule.trigger.clone(),
                });
            }
            for dependent in &rule.dependents {
                let entry = fields.get(dependent).ok_or_else(|| SchemaError::UnknownField {
                    context: context.clone(),
                    field: dependent.clone(),
                })?;
                if let Some(forced) = &rule.forced {
                    validate(Some(forced), &entry.descriptor, entry.codec.as_ref()).map_err(|err| {
                        SchemaError::UnrepresentableValue {
                            field: dependent.clone(),
                            detail: format!("forced value rejected: {}", err.message),
                        }
                    })?;
                }
            }
        }

        check_setters_are_independent(&fields)?;

        tracing::debug!(
            tool = %self.tool,
            fields = fields.len(),
            constraints = self.constraints.len(),
            rules = self.rules.len(),
            "Built parameter schema"
        );

        Ok(ParameterSchema {
            tool: self.tool,
            help_url: self.help_url,
            fields,
            constraints: self.constraints,
            rules: self.rules,
        })
    }
}

fn check_entry<D: Default>(entry: &mut FieldEntry<D>) -> Result<(), SchemaError> {
    let descriptor = &mut entry.descriptor;
    let id = descriptor.id.clone();

    if descriptor.kind.is_optional() && descriptor.required {
        return Err(SchemaError::OptionalFieldRequired(id));
    }
    match (descriptor.kind, &entry.codec) {
        (FieldKind::Enum, None) => return Err(SchemaError::MissingCodec(id)),
        (kind, Some(_)) if kind != FieldKind::Enum => return Err(SchemaError::UnexpectedCodec(id)),
        _ => {}
    }
    if !entry.accessor.fits(descriptor.kind, descriptor.required) {
        return Err(SchemaError::AccessorMismatch {
            field: id,
            kind: descriptor.kind,
            shape: entry.accessor.shape,
        });
    }
    if descriptor.kind.is_integer() {
        descriptor.integer_bounds = entry.accessor.integer_bounds;
    }

    if let Some(codec) = &entry.codec {
        for position in codec.positions() {
            let mut probe = D::default();
            entry
                .accessor
                .set(&mut probe, &TypedValue::Choice(position.value.clone()))
                .map_err(|_| SchemaError::CodecValueRejected {
                    field: id.clone(),
                    value: position.value.clone(),
                })?;
        }
    }

    render_field(entry, &D::default())?;
    Ok(())
}

/// A value different from `current` that the field can hold, if there is one.
fn probe_value<D>(entry: &FieldEntry<D>, current: &TypedValue) -> Option<TypedValue> {
    let bounds = entry.accessor.integer_bounds.unwrap_or((i64::MIN, i64::MAX));
    match (entry.accessor.shape, current) {
        (ValueShape::Integer, TypedValue::Integer(value)) => {
            let next = if *value < bounds.1 { value + 1 } else { value - 1 };
            Some(TypedValue::Integer(next))
        }
        (ValueShape::Integer, _) => Some(TypedValue::Integer(bounds.0.max(0).min(bounds.1))),
        (ValueShape::Real, TypedValue::Real(value)) => Some(TypedValue::Real(value + 1.0)),
        (ValueShape::Real, _) => Some(TypedValue::Real(1.0)),
        (ValueShape::Boolean, TypedValue::Boolean(value)) => Some(TypedValue::Boolean(!value)),
        (ValueShape::Boolean, _) => Some(TypedValue::Boolean(true)),
        (ValueShape::Choice, current) => entry.codec.as_ref().and_then(|codec| {
            codec
                .positions()
                .iter()
                .map(|position| TypedValue::Choice(position.value.clone()))
                .find(|candidate| candidate != current)
        }),
        (ValueShape::Text, TypedValue::Text(text)) => Some(TypedValue::Text(format!("{text}~"))),
        (ValueShape::Text, _) => Some(TypedValue::Text("probe".to_string())),
    }
}

/// Writes a fresh value through every setter and checks that only its own
/// getter observes the change.
fn check_setters_are_independent<D: Default>(
    fields: &IndexMap<String, FieldEntry<D>>,
) -> Result<(), SchemaError> {
    let baseline = D::default();
    let before: Vec<TypedValue> = fields.values().map(|entry| entry.accessor.get(&baseline)).collect();

    for (position, (id, entry)) in fields.iter().enumerate() {
        let Some(probe) = probe_value(entry, &before[position]) else {
            continue;
        };
        let mut target = D::default();
        entry
            .accessor
            .set(&mut target, &probe)
            .map_err(|_| SchemaError::AccessorNotRoundTrip(id.clone()))?;
        if entry.accessor.get(&target) != probe {
            return Err(SchemaError::AccessorNotRoundTrip(id.clone()));
        }
        for (other_position, (other_id, other)) in fields.iter().enumerate() {
            if other_position != position && other.accessor.get(&target) != before[other_position] {
                return Err(SchemaError::AliasedSetter {
                    field: id.clone(),
                    other: other_id.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::EnumValue;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Sample {
        peaks: u32,
        low: f64,
        high: f64,
        increment: f64,
        enzyme: i32,
        label: Option<String>,
    }

    fn enzyme_codec() -> EnumCodec {
        EnumCodec::codes(&[(0, "None"), (2, "Full"), (1, "Semi")]).unwrap()
    }

    fn sample_builder() -> SchemaBuilder<Sample> {
        ParameterSchema::<Sample>::builder("Sample")
            .integer(FieldDescriptor::integer("peaks", "Peaks"), |s| s.peaks, |s, v| s.peaks = v)
            .real(FieldDescriptor::real("low", "Low"), |s| s.low, |s, v| s.low = v)
            .real(FieldDescriptor::real("high", "High"), |s| s.high, |s, v| s.high = v)
            .choice(
                FieldDescriptor::choice("enzyme", "Enzyme"),
                enzyme_codec(),
                |s| s.enzyme,
                |s, v| s.enzyme = v,
            )
            .optional_text(
                FieldDescriptor::text("label", "Label").optional(),
                |s| s.label.clone(),
                |s, v| s.label = v,
            )
    }

    #[test]
    fn test_build_valid_schema() {
        let schema = sample_builder()
            .constraint(CrossFieldConstraint::ordered_pair("range", "low", "high"))
            .build()
            .unwrap();
        assert_eq!(schema.tool(), "Sample");
        assert_eq!(schema.len(), 5);
        assert_eq!(
            schema.field_ids().collect::<Vec<_>>(),
            vec!["peaks", "low", "high", "enzyme", "label"]
        );
        assert_eq!(
            schema.descriptor("peaks").unwrap().integer_bounds,
            Some((0, i64::from(u32::MAX)))
        );
        assert_eq!(schema.label("low"), "Low");
        assert_eq!(schema.label("nope"), "nope");
    }

    #[test]
    fn test_duplicate_field() {
        let result = sample_builder()
            .real(FieldDescriptor::real("low", "Low again"), |s| s.increment, |s, v| s.increment = v)
            .build();
        assert_eq!(result.unwrap_err(), SchemaError::DuplicateField("low".into()));
    }

    #[test]
    fn test_enum_without_codec() {
        let result = ParameterSchema::<Sample>::builder("Sample")
            .field(
                FieldDescriptor::choice("enzyme", "Enzyme"),
                None,
                Accessor::choice(|s: &Sample| s.enzyme, |s: &mut Sample, v| s.enzyme = v),
            )
            .build();
        assert_eq!(result.unwrap_err(), SchemaError::MissingCodec("enzyme".into()));
    }

    #[test]
    fn test_codec_on_numeric_field() {
        let result = ParameterSchema::<Sample>::builder("Sample")
            .field(
                FieldDescriptor::real("low", "Low"),
                Some(enzyme_codec()),
                Accessor::real(|s: &Sample| s.low, |s: &mut Sample, v| s.low = v),
            )
            .build();
        assert_eq!(result.unwrap_err(), SchemaError::UnexpectedCodec("low".into()));
    }

    #[test]
    fn test_required_optional_kind() {
        let result = ParameterSchema::<Sample>::builder("Sample")
            .optional_real(
                FieldDescriptor::optional_real("low", "Low").required(),
                |s| Some(s.low),
                |s, v| s.low = v.unwrap_or_default(),
            )
            .build();
        assert_eq!(result.unwrap_err(), SchemaError::OptionalFieldRequired("low".into()));
    }

    #[test]
    fn test_accessor_mismatch() {
        let result = ParameterSchema::<Sample>::builder("Sample")
            .real(FieldDescriptor::integer("low", "Low"), |s| s.low, |s, v| s.low = v)
            .build();
        assert!(matches!(result, Err(SchemaError::AccessorMismatch { .. })));
    }

    #[test]
    fn test_default_not_in_codec() {
        let result = ParameterSchema::<Sample>::builder("Sample")
            .choice(
                FieldDescriptor::choice("enzyme", "Enzyme"),
                EnumCodec::codes(&[(2, "Full"), (1, "Semi")]).unwrap(),
                |s| s.enzyme,
                |s, v| s.enzyme = v,
            )
            .build();
        assert!(matches!(result, Err(SchemaError::UnrepresentableValue { .. })));
    }

    #[test]
    fn test_codec_value_rejected_by_setter() {
        let result = ParameterSchema::<Sample>::builder("Sample")
            .choice(
                FieldDescriptor::choice("enzyme", "Enzyme"),
                EnumCodec::new([
                    (0, EnumValue::Code(0), "None"),
                    (1, EnumValue::name("Full"), "Full"),
                ])
                .unwrap(),
                |s| s.enzyme,
                |s, v| s.enzyme = v,
            )
            .build();
        assert_eq!(
            result.unwrap_err(),
            SchemaError::CodecValueRejected {
                field: "enzyme".into(),
                value: EnumValue::name("Full"),
            }
        );
    }

    #[test]
    fn test_constraint_on_unknown_field() {
        let result = sample_builder()
            .constraint(CrossFieldConstraint::ordered_pair("range", "low", "upper"))
            .build();
        assert!(matches!(result, Err(SchemaError::UnknownField { field, .. }) if field == "upper"));
    }

    #[test]
    fn test_constraint_on_text_field() {
        let result = sample_builder()
            .constraint(CrossFieldConstraint::numeric_ceiling("max", "label", 1.0))
            .build();
        assert!(matches!(result, Err(SchemaError::NonNumericField { .. })));
    }

    #[test]
    fn test_rule_on_unknown_dependent() {
        let result = sample_builder()
            .rule(EnablementRule::enabled_when("peaks", TypedValue::Integer(1)).dependents(&["missing"]))
            .build();
        assert!(matches!(result, Err(SchemaError::UnknownField { field, .. }) if field == "missing"));
    }

    #[test]
    fn test_aliased_setter_is_rejected() {
        let result = ParameterSchema::<Sample>::builder("Sample")
            .real(FieldDescriptor::real("low", "Low"), |s| s.low, |s, v| s.low = v)
            .real(
                FieldDescriptor::real("increment", "Increment"),
                |s| s.increment,
                |s, v| {
                    s.increment = v;
                    s.low = v;
                },
            )
            .build();
        assert_eq!(
            result.unwrap_err(),
            SchemaError::AliasedSetter {
                field: "increment".into(),
                other: "low".into(),
            }
        );
    }

    #[test]
    fn test_setter_writing_wrong_member() {
        let result = ParameterSchema::<Sample>::builder("Sample")
            .integer(FieldDescriptor::integer("peaks", "Peaks"), |s| s.peaks, |s, v| s.increment = f64::from(v))
            .build();
        assert_eq!(result.unwrap_err(), SchemaError::AccessorNotRoundTrip("peaks".into()));
    }
}
