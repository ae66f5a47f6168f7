//! # ParamFlux Inspector
//!
//! Headless logic behind a parameter dialog. It validates what the user
//! typed and maps it to and from the tool's parameter object.
//!
//! ## Core Architecture
//! - **Fields (`src/field.rs`)**: Static metadata for one editable field.
//! - **Codecs (`src/codec.rs`)**: Bijective view-index to domain-value tables.
//! - **Validator (`src/validator.rs`)**: Parses one raw input into a typed value.
//! - **Constraints (`src/constraint.rs`)**: Checks between already-parsed fields.
//! - **Enablement (`src/enablement.rs`)**: Which fields are editable right now.
//! - **Schema (`src/schema.rs`)**: The checked collection of all of the above for one tool.
//! - **Mapper (`src/mapper.rs`)**: Domain object to view state and back.
//! - **Engine (`src/engine.rs`)**: The shared parse-then-constrain pipeline.
//! - **Session (`src/session.rs`)**: Drives one open dialog from first edit to confirm.

pub mod codec;
pub mod config;
pub mod constraint;
pub mod enablement;
pub mod engine;
pub mod error;
pub mod field;
pub mod mapper;
pub mod report;
pub mod schema;
pub mod session;
pub mod validator;
pub mod value;
pub mod view;

// Re-exports for convenience
pub use codec::EnumCodec;
pub use config::EditorConfig;
pub use constraint::{ConstraintError, CrossFieldConstraint};
pub use enablement::{EnablementRule, EnablementState};
pub use engine::{Evaluation, ValidationEngine};
pub use error::{AccessError, SchemaError, SessionError};
pub use field::{FieldDescriptor, FieldKind};
pub use mapper::ParameterMapper;
pub use report::ValidationReport;
pub use schema::{Accessor, ParameterSchema, SchemaBuilder, ValueShape};
pub use session::EditSession;
pub use validator::{FieldError, FieldErrorKind, validate};
pub use value::{ChoiceValue, EnumValue, RawValue, TypedValue};
pub use view::ViewState;
