//! Parameter encoder.
//!
//! One linear pass over the schema. Absent fields are skipped entirely, which
//! is what leaves server-side defaults alone. Present fields are converted by
//! kind:
//!
//! | kind | wire text |
//! |---|---|
//! | boolean | `true` / `false` |
//! | integer, float | canonical decimal |
//! | string | raw text (escaped when rendered as a query string) |
//! | optional | the wrapped value, even when it is zero |
//! | sequence | repeated entries or one JSON array, per field |
//! | nested | JSON |
//!
//! Any conversion failure aborts the whole encode: a request with some of its
//! parameters missing must never be sent.

use serde_json::{Number, Value as Json};
use tracing::trace;

use crate::{
    OptionStruct,
    descriptor::{FieldDescriptor, SequenceEncoding},
    errors::{ParamsError, Result},
    params::ParameterSet,
    registry::Registry,
    schema::{Schema, is_present},
    value::Value,
};

/// Encodes option structs against a registry.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'r> {
    registry: &'r Registry,
}

impl<'r> Encoder<'r> {
    /// Encoder backed by `registry`.
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Encode the present fields of `instance`.
    ///
    /// # Errors
    ///
    /// - Schema build errors for `T`
    /// - `InvalidFieldName` if the presence log names a field the type does
    ///   not declare
    /// - `Encoding` if a present value has no wire text
    pub fn encode<T: OptionStruct>(&self, instance: &T) -> Result<ParameterSet> {
        let schema = self.registry.describe::<T>()?;
        encode_with(&schema, instance)
    }
}

/// Encode `instance` with an already described schema.
pub fn encode_with<T: OptionStruct>(schema: &Schema<T>, instance: &T) -> Result<ParameterSet> {
    for name in instance.presence().iter() {
        schema.field(name)?;
    }

    let mut params = ParameterSet::new();
    for (descriptor, accessor) in schema.entries() {
        if !is_present(descriptor, accessor, instance) {
            continue;
        }
        encode_field(descriptor, accessor.read(instance), &mut params)?;
    }

    trace!(type_name = schema.type_name(), keys = params.len(), "encoded option struct");
    Ok(params)
}

fn encode_field(
    descriptor: &FieldDescriptor,
    value: Value<'_>,
    params: &mut ParameterSet,
) -> Result<()> {
    match value {
        Value::Sequence(items) => {
            if descriptor.sequence() == SequenceEncoding::Repeated && !items.is_empty() {
                for item in items {
                    params.append(descriptor.key(), scalar_text(descriptor, item)?);
                }
            } else {
                params.append(descriptor.key(), bracketed(descriptor, items)?);
            }
        },
        Value::Nested(json) => {
            let text = json.map_err(|reason| encoding_error(descriptor, reason))?;
            params.append(descriptor.key(), text);
        },
        scalar => params.append(descriptor.key(), scalar_text(descriptor, scalar)?),
    }
    Ok(())
}

fn scalar_text(descriptor: &FieldDescriptor, value: Value<'_>) -> Result<String> {
    match value {
        Value::Bool(b) => Ok(b.to_string()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Uint(u) => Ok(u.to_string()),
        Value::Float(f) if f.is_finite() => Ok(f.to_string()),
        Value::Float(f) => Err(encoding_error(descriptor, format!("{f} has no decimal form"))),
        Value::Str(s) => Ok(s.to_string()),
        Value::Unset => Err(encoding_error(descriptor, "value is unset".to_string())),
        Value::Sequence(_) | Value::Nested(_) => {
            Err(encoding_error(descriptor, "expected a scalar value".to_string()))
        },
    }
}

fn bracketed(descriptor: &FieldDescriptor, items: Vec<Value<'_>>) -> Result<String> {
    let elements = items
        .into_iter()
        .map(|item| scalar_json(descriptor, item))
        .collect::<Result<Vec<_>>>()?;
    serde_json::to_string(&Json::Array(elements))
        .map_err(|err| encoding_error(descriptor, err.to_string()))
}

fn scalar_json(descriptor: &FieldDescriptor, value: Value<'_>) -> Result<Json> {
    match value {
        Value::Bool(b) => Ok(Json::Bool(b)),
        Value::Int(i) => Ok(Json::from(i)),
        Value::Uint(u) => Ok(Json::from(u)),
        Value::Float(f) => Number::from_f64(f)
            .map(Json::Number)
            .ok_or_else(|| encoding_error(descriptor, format!("{f} has no decimal form"))),
        Value::Str(s) => Ok(Json::String(s.to_string())),
        Value::Unset | Value::Sequence(_) | Value::Nested(_) => {
            Err(encoding_error(descriptor, "expected a scalar element".to_string()))
        },
    }
}

fn encoding_error(descriptor: &FieldDescriptor, reason: String) -> ParamsError {
    ParamsError::Encoding { field: descriptor.name(), kind: descriptor.kind().clone(), reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    fn descriptor(kind: ValueKind, sequence: SequenceEncoding) -> FieldDescriptor {
        FieldDescriptor::new("field", "field".into(), kind, sequence)
    }

    fn encode_one(descriptor: &FieldDescriptor, value: Value<'_>) -> Result<ParameterSet> {
        let mut params = ParameterSet::new();
        encode_field(descriptor, value, &mut params)?;
        Ok(params)
    }

    #[test]
    fn scalars_use_canonical_text() {
        let field = descriptor(ValueKind::Float, SequenceEncoding::default());
        assert_eq!(scalar_text(&field, Value::Float(1.0)).unwrap(), "1");
        assert_eq!(scalar_text(&field, Value::Float(0.25)).unwrap(), "0.25");
        assert_eq!(scalar_text(&field, Value::Int(-3)).unwrap(), "-3");
        assert_eq!(scalar_text(&field, Value::Uint(u64::MAX)).unwrap(), "18446744073709551615");
        assert_eq!(scalar_text(&field, Value::Bool(false)).unwrap(), "false");
    }

    #[test]
    fn non_finite_float_is_an_encoding_error() {
        let field = descriptor(ValueKind::Float, SequenceEncoding::default());
        let err = scalar_text(&field, Value::Float(f64::NAN)).unwrap_err();
        assert!(matches!(err, ParamsError::Encoding { field: "field", kind: ValueKind::Float, .. }));
    }

    #[test]
    fn bracketed_sequence_is_one_json_value() {
        let field = descriptor(
            ValueKind::Sequence(Box::new(ValueKind::String)),
            SequenceEncoding::Bracketed,
        );
        let params =
            encode_one(&field, Value::Sequence(vec![Value::Str("a"), Value::Str("b")])).unwrap();
        assert_eq!(params.get_all("field"), [r#"["a","b"]"#]);
    }

    #[test]
    fn repeated_sequence_is_one_entry_per_element() {
        let field = descriptor(
            ValueKind::Sequence(Box::new(ValueKind::Int)),
            SequenceEncoding::Repeated,
        );
        let params = encode_one(&field, Value::Sequence(vec![Value::Int(1), Value::Int(2)])).unwrap();
        assert_eq!(params.get_all("field"), ["1", "2"]);
    }

    #[test]
    fn empty_sequence_is_brackets_in_either_mode() {
        for mode in [SequenceEncoding::Repeated, SequenceEncoding::Bracketed] {
            let field = descriptor(ValueKind::Sequence(Box::new(ValueKind::String)), mode);
            let params = encode_one(&field, Value::Sequence(Vec::new())).unwrap();
            assert_eq!(params.get_all("field"), ["[]"]);
        }
    }

    #[test]
    fn malformed_nested_value_is_an_encoding_error() {
        let field = descriptor(ValueKind::Nested, SequenceEncoding::default());
        let err = encode_one(&field, Value::Nested(Err("key must be a string".into()))).unwrap_err();
        assert!(matches!(err, ParamsError::Encoding { kind: ValueKind::Nested, .. }));
    }
}
