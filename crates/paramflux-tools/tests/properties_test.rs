//! Mapping properties over randomly edited views of every tool schema.

use paramflux_inspector::{FieldKind, ParameterMapper, ParameterSchema, RawValue, ViewState};
use paramflux_tools::{comet, metamorpheus, omssa, sage, xtandem};
use proptest::prelude::*;
use proptest::sample::Index;
use std::fmt::Debug;

/// One edit: a field picked by position, a combo position and a text.
type Edit = (Index, usize, &'static str);

/// Mostly parseable inputs, with a few that every numeric field refuses.
fn text_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "0", "1", "2", "5", "8", "12", "30", "0.5", "0.01", "100.0", "2500", "1e3", "", " 7 ", "-3",
        "abc",
    ])
}

fn edits_strategy() -> impl Strategy<Value = Vec<Edit>> {
    prop::collection::vec((any::<Index>(), 0usize..4, text_strategy()), 0..10)
}

/// The default view of `schema` with `edits` applied.
fn edited_view<D: Default>(schema: &ParameterSchema<D>, edits: &[Edit]) -> ViewState {
    let mut view = ParameterMapper::to_view(&D::default(), schema).unwrap();
    for (field, position, text) in edits {
        let Some(entry) = schema.entries().nth(field.index(schema.len())) else {
            continue;
        };
        let raw = match entry.descriptor.kind {
            FieldKind::BooleanChoice | FieldKind::Enum => RawValue::index(*position),
            _ => RawValue::text(*text),
        };
        view.set(entry.descriptor.id.clone(), raw);
    }
    view
}

/// Any object produced by a successful mapping survives another trip
/// through the view unchanged.
fn check_round_trip<D>(schema: &ParameterSchema<D>, edits: &[Edit]) -> Result<(), TestCaseError>
where
    D: Default + PartialEq + Debug,
{
    let view = edited_view(schema, edits);
    let Ok(mapped) = ParameterMapper::from_view(&view, schema) else {
        return Ok(());
    };
    let rendered = ParameterMapper::to_view(&mapped, schema).unwrap();
    let again = ParameterMapper::from_view(&rendered, schema);
    prop_assert_eq!(again, Ok(mapped));
    Ok(())
}

/// Mapping an unchanged view twice gives equal objects or equal reports.
fn check_idempotent<D>(schema: &ParameterSchema<D>, edits: &[Edit]) -> Result<(), TestCaseError>
where
    D: Default + PartialEq + Debug,
{
    let view = edited_view(schema, edits);
    let first = ParameterMapper::from_view(&view, schema);
    let second = ParameterMapper::from_view(&view, schema);
    prop_assert_eq!(first, second);
    Ok(())
}

proptest! {
    #[test]
    fn test_comet_mapping(edits in edits_strategy()) {
        let schema = comet::schema().unwrap();
        check_round_trip(&schema, &edits)?;
        check_idempotent(&schema, &edits)?;
    }

    #[test]
    fn test_metamorpheus_mapping(edits in edits_strategy()) {
        let schema = metamorpheus::schema().unwrap();
        check_round_trip(&schema, &edits)?;
        check_idempotent(&schema, &edits)?;
    }

    #[test]
    fn test_omssa_mapping(edits in edits_strategy()) {
        let schema = omssa::schema().unwrap();
        check_round_trip(&schema, &edits)?;
        check_idempotent(&schema, &edits)?;
    }

    #[test]
    fn test_sage_mapping(edits in edits_strategy()) {
        let schema = sage::schema().unwrap();
        check_round_trip(&schema, &edits)?;
        check_idempotent(&schema, &edits)?;
    }

    #[test]
    fn test_xtandem_mapping(edits in edits_strategy()) {
        let schema = xtandem::schema().unwrap();
        check_round_trip(&schema, &edits)?;
        check_idempotent(&schema, &edits)?;
    }
}
