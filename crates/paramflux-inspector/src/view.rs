use crate::value::RawValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Exactly what the user has typed or selected, keyed by field id.
///
/// Serializes as a flat JSON object in schema order, e.g.
/// `{"min_peaks": "10", "enzyme_type": 0}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewState {
    values: IndexMap<String, RawValue>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&RawValue> {
        self.values.get(id)
    }

    /// Sets a raw value, returning the previous one.
    pub fn set(&mut self, id: impl Into<String>, value: RawValue) -> Option<RawValue> {
        self.values.insert(id.into(), value)
    }

    pub fn set_text(&mut self, id: impl Into<String>, text: impl Into<String>) -> Option<RawValue> {
        self.set(id, RawValue::text(text))
    }

    pub fn set_index(&mut self, id: impl Into<String>, index: usize) -> Option<RawValue> {
        self.set(id, RawValue::index(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.values.iter().map(|(id, value)| (id.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, RawValue)> for ViewState {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
