use serde::{Deserialize, Serialize};

/// The domain kind of an editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Integer,
    Real,
    OptionalInteger,
    OptionalReal,
    /// Yes/No combo. View index 0 is `true`, index 1 is `false`.
    BooleanChoice,
    /// Combo backed by an [`EnumCodec`](crate::codec::EnumCodec).
    Enum,
    /// Free text, trimmed.
    Text,
}

impl FieldKind {
    pub fn is_optional(self) -> bool {
        matches!(self, FieldKind::OptionalInteger | FieldKind::OptionalReal)
    }

    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            FieldKind::Integer | FieldKind::Real | FieldKind::OptionalInteger | FieldKind::OptionalReal
        )
    }

    pub fn is_integer(self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::OptionalInteger)
    }

    /// Kinds whose raw value is a view index rather than text.
    pub fn is_choice(self) -> bool {
        matches!(self, FieldKind::BooleanChoice | FieldKind::Enum)
    }
}

/// Static metadata for one editable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Unique within a schema.
    pub id: String,
    pub kind: FieldKind,
    /// When false, an empty input maps to an absent value.
    pub required: bool,
    /// Display name used in error messages.
    pub label: String,
    /// Numeric fields reject negative values unless this is set.
    pub allow_negative: bool,
    /// Inclusive integer range, taken from the domain type when the schema is built.
    pub integer_bounds: Option<(i64, i64)>,
    /// Contextual help link. Never dereferenced by the engine.
    pub help_url: Option<String>,
}

impl FieldDescriptor {
    /// A descriptor that is required unless `kind` is optional.
    pub fn new(id: impl Into<String>, kind: FieldKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            required: !kind.is_optional(),
            label: label.into(),
            allow_negative: false,
            integer_bounds: None,
            help_url: None,
        }
    }

    pub fn integer(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Integer, label)
    }

    pub fn real(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Real, label)
    }

    pub fn optional_integer(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::OptionalInteger, label)
    }

    pub fn optional_real(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::OptionalReal, label)
    }

    pub fn boolean(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::BooleanChoice, label)
    }

    pub fn choice(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Enum, label)
    }

    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, FieldKind::Text, label)
    }

    /// Lets an empty input through as absent.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn allow_negative(mut self) -> Self {
        self.allow_negative = true;
        self
    }

    pub fn with_help(mut self, url: impl Into<String>) -> Self {
        self.help_url = Some(url.into());
        self
    }
}
