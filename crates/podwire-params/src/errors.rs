//! Error types for option schemas and parameter encoding.

use thiserror::Error;

use crate::value::ValueKind;

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, ParamsError>;

/// Errors raised while describing or encoding an option struct.
///
/// None of these are transient. Structural errors (`UnsupportedFieldKind`,
/// `DuplicateField`) persist until the type definition changes, and the
/// registry caches them alongside successful schemas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// A field has no encoding rule, or an internal-only field was queried.
    #[error("{type_name}: field `{field}` has unsupported kind `{kind}`")]
    UnsupportedFieldKind {
        /// Option struct type
        type_name: &'static str,
        /// Offending field
        field: String,
        /// Description of the field's kind
        kind: String,
    },

    /// The type declares no field with this name.
    #[error("{type_name}: no field named `{field}`")]
    InvalidFieldName {
        /// Option struct type
        type_name: &'static str,
        /// Name that was looked up
        field: String,
    },

    /// Two fields share a name or a wire key.
    #[error("{type_name}: `{field}` is declared more than once")]
    DuplicateField {
        /// Option struct type
        type_name: &'static str,
        /// Repeated field name or wire key
        field: String,
    },

    /// The registry index holds a slot built for a different type.
    #[error("{type_name}: registry slot holds a different type")]
    SlotMismatch {
        /// Option struct type
        type_name: &'static str,
    },

    /// A present field's value could not be converted to wire text.
    #[error("cannot encode field `{field}` of kind `{kind}`: {reason}")]
    Encoding {
        /// Offending field
        field: &'static str,
        /// Declared kind of the field
        kind: ValueKind,
        /// What went wrong
        reason: String,
    },
}
