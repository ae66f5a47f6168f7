use crate::field::FieldKind;
use crate::report::ValidationReport;
use crate::schema::ValueShape;
use crate::value::EnumValue;
use thiserror::Error;

/// A programming error in a schema definition. Raised when the schema is
/// built, never while validating user input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),

    #[error("enumerated field `{0}` has no codec")]
    MissingCodec(String),

    #[error("field `{0}` has a codec but is not enumerated")]
    UnexpectedCodec(String),

    #[error("optional field `{0}` cannot be required")]
    OptionalFieldRequired(String),

    #[error("field `{field}` of kind {kind:?} cannot use a {shape} accessor")]
    AccessorMismatch {
        field: String,
        kind: FieldKind,
        shape: ValueShape,
    },

    #[error("codec is not a bijection: {0}")]
    NotBijective(String),

    #[error("codec has no positions")]
    EmptyCodec,

    #[error("field `{field}` cannot store codec value {value}")]
    CodecValueRejected { field: String, value: EnumValue },

    #[error("field `{field}` holds a value the view cannot show: {detail}")]
    UnrepresentableValue { field: String, detail: String },

    #[error("{context} references unknown field `{field}`")]
    UnknownField { context: String, field: String },

    #[error("{context} references non-numeric field `{field}`")]
    NonNumericField { context: String, field: String },

    #[error("setter of `{0}` does not round-trip through its getter")]
    AccessorNotRoundTrip(String),

    #[error("setter of `{field}` also writes `{other}`")]
    AliasedSetter { field: String, other: String },
}

/// A domain setter refused a typed value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccessError {
    #[error("expected a {expected} value, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("{0} does not fit the domain type")]
    OutOfRange(i64),

    #[error("{0} is not a known choice")]
    UnknownChoice(EnumValue),

    #[error("a value is required")]
    MissingValue,
}

/// A codec lookup with no matching position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mapping: {0}")]
pub struct UnknownMapping(pub String);

/// Misuse of an [`EditSession`](crate::session::EditSession), or a
/// confirmation that did not validate.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("the parameters are read-only")]
    ReadOnly,

    #[error("field `{0}` is currently disabled")]
    FieldDisabled(String),

    #[error("the parameters are invalid: {0}")]
    Invalid(ValidationReport),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}
