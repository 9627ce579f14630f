//! Value kinds and the conversion from Rust field types to wire values.

use std::{fmt, sync::mpsc};

/// Wire-level kind of a declared field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `true` / `false`
    Bool,
    /// Signed integer
    Int,
    /// Unsigned integer
    Uint,
    /// 64-bit float
    Float,
    /// UTF-8 text
    String,
    /// Wrapper that models "unset" explicitly
    Optional(Box<ValueKind>),
    /// Sequence of scalars
    Sequence(Box<ValueKind>),
    /// Sub-structure serialized as a single JSON value
    Nested,
    /// A type with no encoding rule (function values, channels, ...)
    Opaque(&'static str),
}

impl ValueKind {
    /// Whether this kind encodes to a single scalar text.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Bool | Self::Int | Self::Uint | Self::Float | Self::String)
    }

    /// Describe the part of this kind that has no encoding rule, if any.
    ///
    /// Optional wrappers may hold anything encodable except another wrapper.
    /// Sequences hold scalars only.
    pub fn unsupported(&self) -> Option<String> {
        match self {
            Self::Opaque(kind) => Some((*kind).to_string()),
            Self::Optional(inner) if matches!(**inner, Self::Optional(_)) => Some(self.to_string()),
            Self::Optional(inner) => inner.unsupported(),
            Self::Sequence(inner) if !inner.is_scalar() => Some(self.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("boolean"),
            Self::Int => f.write_str("integer"),
            Self::Uint => f.write_str("unsigned integer"),
            Self::Float => f.write_str("float"),
            Self::String => f.write_str("string"),
            Self::Optional(inner) => write!(f, "optional<{inner}>"),
            Self::Sequence(inner) => write!(f, "sequence<{inner}>"),
            Self::Nested => f.write_str("nested struct"),
            Self::Opaque(kind) => f.write_str(kind),
        }
    }
}

/// Current value of a field, borrowed from the instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    Uint(u64),
    /// Float
    Float(f64),
    /// Text
    Str(&'a str),
    /// Optional wrapper holding nothing
    Unset,
    /// Sequence elements, in order
    Sequence(Vec<Value<'a>>),
    /// JSON text of a nested value, or the serializer's complaint
    Nested(Result<String, String>),
}

/// Field types that can be declared with [`crate::Fields::field`].
///
/// Implemented for the scalar types, `String`, `Option<T>` and `Vec<T>`.
/// Types with no wire form implement it with an [`ValueKind::Opaque`] kind so
/// that declaring them for the wire is rejected when the schema is built.
pub trait WireValue {
    /// Kind recorded in the field descriptor.
    fn value_kind() -> ValueKind
    where
        Self: Sized;

    /// Borrow the current value.
    fn to_value(&self) -> Value<'_>;

    /// Whether a wrapper holds a value. Everything else always does.
    fn is_set(&self) -> bool {
        true
    }
}

impl WireValue for bool {
    fn value_kind() -> ValueKind {
        ValueKind::Bool
    }

    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

macro_rules! wire_int {
    ($kind:ident, $variant:ident, $wide:ty: $($ty:ty),+) => {$(
        impl WireValue for $ty {
            fn value_kind() -> ValueKind {
                ValueKind::$kind
            }

            fn to_value(&self) -> Value<'_> {
                Value::$variant(<$wide>::from(*self))
            }
        }
    )+};
}

wire_int!(Int, Int, i64: i8, i16, i32, i64);
wire_int!(Uint, Uint, u64: u8, u16, u32, u64);

impl WireValue for isize {
    fn value_kind() -> ValueKind {
        ValueKind::Int
    }

    fn to_value(&self) -> Value<'_> {
        Value::Int(*self as i64)
    }
}

impl WireValue for usize {
    fn value_kind() -> ValueKind {
        ValueKind::Uint
    }

    fn to_value(&self) -> Value<'_> {
        Value::Uint(*self as u64)
    }
}

impl WireValue for f64 {
    fn value_kind() -> ValueKind {
        ValueKind::Float
    }

    fn to_value(&self) -> Value<'_> {
        Value::Float(*self)
    }
}

impl WireValue for String {
    fn value_kind() -> ValueKind {
        ValueKind::String
    }

    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl<T: WireValue> WireValue for Option<T> {
    fn value_kind() -> ValueKind {
        ValueKind::Optional(Box::new(T::value_kind()))
    }

    fn to_value(&self) -> Value<'_> {
        self.as_ref().map_or(Value::Unset, WireValue::to_value)
    }

    fn is_set(&self) -> bool {
        self.is_some()
    }
}

impl<T: WireValue> WireValue for Vec<T> {
    fn value_kind() -> ValueKind {
        ValueKind::Sequence(Box::new(T::value_kind()))
    }

    fn to_value(&self) -> Value<'_> {
        Value::Sequence(self.iter().map(WireValue::to_value).collect())
    }
}

impl<T> WireValue for mpsc::Sender<T> {
    fn value_kind() -> ValueKind {
        ValueKind::Opaque("channel")
    }

    fn to_value(&self) -> Value<'_> {
        Value::Unset
    }
}

impl WireValue for Box<dyn Fn() + Send + Sync> {
    fn value_kind() -> ValueKind {
        ValueKind::Opaque("function")
    }

    fn to_value(&self) -> Value<'_> {
        Value::Unset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_kind_wraps_inner() {
        assert_eq!(
            <Option<i64>>::value_kind(),
            ValueKind::Optional(Box::new(ValueKind::Int))
        );
        assert_eq!(<Option<u32>>::value_kind().to_string(), "optional<unsigned integer>");
    }

    #[test]
    fn unset_wrapper_has_no_value() {
        assert_eq!(None::<i64>.to_value(), Value::Unset);
        assert_eq!(Some(0_i64).to_value(), Value::Int(0));
    }

    #[test]
    fn scalar_sequences_are_supported() {
        assert_eq!(<Vec<String>>::value_kind().unsupported(), None);
        assert_eq!(<Option<Vec<u16>>>::value_kind().unsupported(), None);
    }

    #[test]
    fn nested_sequences_are_unsupported() {
        let kind = <Vec<Vec<String>>>::value_kind();
        assert_eq!(kind.unsupported().as_deref(), Some("sequence<sequence<string>>"));
    }

    #[test]
    fn double_wrapper_is_unsupported() {
        assert!(<Option<Option<bool>>>::value_kind().unsupported().is_some());
    }

    #[test]
    fn opaque_kinds_name_themselves() {
        assert_eq!(<mpsc::Sender<u8>>::value_kind().unsupported().as_deref(), Some("channel"));
        assert_eq!(
            <Option<Box<dyn Fn() + Send + Sync>>>::value_kind().unsupported().as_deref(),
            Some("function")
        );
    }
}
