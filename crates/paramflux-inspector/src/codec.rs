//! # Enum codecs
//!
//! A codec is the table between a combo box position and the domain value it
//! stands for. The two orderings are independent: Comet's enzyme type shows
//! codes `2, 1, 8, 9` at positions `0..4`.

use crate::error::{SchemaError, UnknownMapping};
use crate::value::EnumValue;
use serde::Serialize;
use std::collections::HashSet;

/// One row of a codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodecPosition {
    pub index: usize,
    pub value: EnumValue,
    pub label: String,
}

/// Bijective view-index to domain-value table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumCodec {
    positions: Vec<CodecPosition>,
}

impl EnumCodec {
    /// Builds a codec from explicit rows, rejecting duplicate indices or values.
    pub fn new<L: Into<String>>(
        positions: impl IntoIterator<Item = (usize, EnumValue, L)>,
    ) -> Result<Self, SchemaError> {
        let mut rows: Vec<CodecPosition> = positions
            .into_iter()
            .map(|(index, value, label)| CodecPosition {
                index,
                value,
                label: label.into(),
            })
            .collect();

        if rows.is_empty() {
            return Err(SchemaError::EmptyCodec);
        }

        let mut indices = HashSet::new();
        let mut values = HashSet::new();
        for row in &rows {
            if !indices.insert(row.index) {
                return Err(SchemaError::NotBijective(format!(
                    "view index {} appears twice",
                    row.index
                )));
            }
            if !values.insert(&row.value) {
                return Err(SchemaError::NotBijective(format!(
                    "domain value {} appears twice",
                    row.value
                )));
            }
        }

        rows.sort_by_key(|row| row.index);
        Ok(Self { positions: rows })
    }

    /// Integer codes listed in view order: `codes[i]` is shown at position `i`.
    pub fn codes(codes: &[(i64, &str)]) -> Result<Self, SchemaError> {
        Self::new(
            codes
                .iter()
                .enumerate()
                .map(|(index, (code, label))| (index, EnumValue::Code(*code), *label)),
        )
    }

    /// Codes equal to their position.
    pub fn identity(labels: &[&str]) -> Result<Self, SchemaError> {
        Self::new(
            labels
                .iter()
                .enumerate()
                .map(|(index, label)| (index, EnumValue::Code(index as i64), *label)),
        )
    }

    /// Named values listed in view order, each its own label.
    pub fn names(names: &[&str]) -> Result<Self, SchemaError> {
        Self::new(
            names
                .iter()
                .enumerate()
                .map(|(index, name)| (index, EnumValue::name(*name), *name)),
        )
    }

    pub fn decode(&self, index: usize) -> Result<&EnumValue, UnknownMapping> {
        self.positions
            .iter()
            .find(|row| row.index == index)
            .map(|row| &row.value)
            .ok_or_else(|| UnknownMapping(format!("no option at position {index}")))
    }

    pub fn encode(&self, value: &EnumValue) -> Result<usize, UnknownMapping> {
        self.positions
            .iter()
            .find(|row| &row.value == value)
            .map(|row| row.index)
            .ok_or_else(|| UnknownMapping(format!("no option for value {value}")))
    }

    pub fn positions(&self) -> &[CodecPosition] {
        &self.positions
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.positions.iter().map(|row| row.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_identity_codes() {
        let codec = EnumCodec::codes(&[(2, "Full"), (1, "Semi"), (8, "C-term"), (9, "N-term")]).unwrap();
        assert_eq!(codec.decode(2).unwrap(), &EnumValue::Code(8));
        assert_eq!(codec.encode(&EnumValue::Code(8)).unwrap(), 2);
        assert_eq!(codec.encode(&EnumValue::Code(2)).unwrap(), 0);
    }

    #[test]
    fn test_unknown_mapping_both_directions() {
        let codec = EnumCodec::names(&["OMX", "CSV", "pepXML"]).unwrap();
        assert!(codec.decode(3).is_err());
        assert!(codec.encode(&EnumValue::name("XML")).is_err());
        assert!(codec.encode(&EnumValue::Code(0)).is_err());
    }

    #[test]
    fn test_rejects_duplicate_values() {
        let result = EnumCodec::codes(&[(1, "a"), (1, "b")]);
        assert!(matches!(result, Err(SchemaError::NotBijective(_))));
    }

    #[test]
    fn test_rejects_duplicate_indices() {
        let result = EnumCodec::new([
            (0, EnumValue::Code(1), "a"),
            (0, EnumValue::Code(2), "b"),
        ]);
        assert!(matches!(result, Err(SchemaError::NotBijective(_))));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(EnumCodec::names(&[]), Err(SchemaError::EmptyCodec));
    }

    #[test]
    fn test_positions_sorted_by_index() {
        let codec = EnumCodec::new([
            (1, EnumValue::Code(10), "ten"),
            (0, EnumValue::Code(20), "twenty"),
        ])
        .unwrap();
        let labels: Vec<&str> = codec.labels().collect();
        assert_eq!(labels, vec!["twenty", "ten"]);
    }
}
