//! Declarative field builder.
//!
//! Option structs list their wire fields in [`crate::OptionStruct::declare`]:
//!
//! ```
//! # use podwire_params::{Fields, OptionStruct, Presence};
//! # use std::collections::BTreeMap;
//! # #[derive(Default)]
//! # struct TopOptions {
//! #     descriptors: Vec<String>,
//! #     labels: BTreeMap<String, String>,
//! #     changed: Presence,
//! # }
//! impl OptionStruct for TopOptions {
//!     fn declare(fields: &mut Fields<Self>) {
//!         fields.field("descriptors", |o| &o.descriptors).key("ps_args").repeated();
//!         fields.nested("labels", |o| &o.labels);
//!     }
//!
//!     fn presence(&self) -> &Presence {
//!         &self.changed
//!     }
//! }
//! ```
//!
//! Validation happens when the registry turns the declarations into a
//! [`Schema`].

use std::collections::HashSet;

use serde::Serialize;

use crate::{
    descriptor::{FieldDescriptor, SequenceEncoding, wire_key},
    errors::{ParamsError, Result},
    schema::{Accessor, Schema},
    value::{Value, ValueKind, WireValue},
};

/// Wire field declarations for one option struct type.
pub struct Fields<T> {
    type_name: &'static str,
    declared: Vec<FieldDecl<T>>,
    internal: Vec<(&'static str, &'static str)>,
}

/// One pending field declaration.
///
/// Returned by the [`Fields`] methods so annotations can be chained.
pub struct FieldDecl<T> {
    name: &'static str,
    key: Option<String>,
    kind: ValueKind,
    sequence: SequenceEncoding,
    accessor: Accessor<T>,
}

impl<T> FieldDecl<T> {
    /// Override the wire key derived from the field name.
    pub fn key(&mut self, key: impl Into<String>) -> &mut Self {
        self.key = Some(key.into());
        self
    }

    /// Encode a sequence as one entry per element.
    pub fn repeated(&mut self) -> &mut Self {
        self.sequence = SequenceEncoding::Repeated;
        self
    }

    /// Encode a sequence as a single JSON array (the default).
    pub fn bracketed(&mut self) -> &mut Self {
        self.sequence = SequenceEncoding::Bracketed;
        self
    }
}

// Pins the higher-ranked signatures so closures built in generic code infer them.
fn accessor<T, R, S>(read: R, is_set: S) -> Accessor<T>
where
    R: for<'a> Fn(&'a T) -> Value<'a> + Send + Sync + 'static,
    S: Fn(&T) -> bool + Send + Sync + 'static,
{
    Accessor::new(Box::new(read), Box::new(is_set))
}

fn to_json<N: Serialize>(nested: &N) -> std::result::Result<String, String> {
    serde_json::to_string(nested).map_err(|err| err.to_string())
}

impl<T: 'static> Fields<T> {
    pub(crate) fn new(type_name: &'static str) -> Self {
        Self { type_name, declared: Vec::new(), internal: Vec::new() }
    }

    /// Declare a scalar, `String`, `Option<T>` or `Vec<T>` field.
    pub fn field<V: WireValue + 'static>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> &V,
    ) -> &mut FieldDecl<T> {
        self.push(
            name,
            V::value_kind(),
            accessor(
                move |instance| get(instance).to_value(),
                move |instance| get(instance).is_set(),
            ),
        )
    }

    /// Declare a sub-structure sent as one JSON value.
    pub fn nested<N: Serialize + 'static>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> &N,
    ) -> &mut FieldDecl<T> {
        self.push(
            name,
            ValueKind::Nested,
            accessor(move |instance| Value::Nested(to_json(get(instance))), |_| true),
        )
    }

    /// Declare an optional sub-structure sent as one JSON value when set.
    pub fn nested_optional<N: Serialize + 'static>(
        &mut self,
        name: &'static str,
        get: fn(&T) -> &Option<N>,
    ) -> &mut FieldDecl<T> {
        self.push(
            name,
            ValueKind::Optional(Box::new(ValueKind::Nested)),
            accessor(
                move |instance| {
                    get(instance).as_ref().map_or(Value::Unset, |nested| Value::Nested(to_json(nested)))
                },
                move |instance| get(instance).is_some(),
            ),
        )
    }

    /// Record a field that never goes on the wire.
    ///
    /// `kind` describes why (e.g. `"function"`, `"channel"`). The field gets no
    /// descriptor, and presence queries for it fail with
    /// `UnsupportedFieldKind`.
    pub fn internal(&mut self, name: &'static str, kind: &'static str) -> &mut Self {
        self.internal.push((name, kind));
        self
    }

    fn push(&mut self, name: &'static str, kind: ValueKind, accessor: Accessor<T>) -> &mut FieldDecl<T> {
        let index = self.declared.len();
        self.declared.push(FieldDecl {
            name,
            key: None,
            kind,
            sequence: SequenceEncoding::default(),
            accessor,
        });
        &mut self.declared[index]
    }

    /// Validate the declarations and freeze them into a schema.
    pub(crate) fn finish(self) -> Result<Schema<T>> {
        let type_name = self.type_name;
        let mut names = HashSet::new();
        let mut keys = HashSet::new();
        let mut descriptors = Vec::with_capacity(self.declared.len());
        let mut accessors = Vec::with_capacity(self.declared.len());

        for (name, _) in &self.internal {
            if !names.insert(*name) {
                return Err(ParamsError::DuplicateField { type_name, field: (*name).to_string() });
            }
        }

        for decl in self.declared {
            if let Some(kind) = decl.kind.unsupported() {
                return Err(ParamsError::UnsupportedFieldKind {
                    type_name,
                    field: decl.name.to_string(),
                    kind,
                });
            }
            if !names.insert(decl.name) {
                return Err(ParamsError::DuplicateField { type_name, field: decl.name.to_string() });
            }

            let key = decl.key.unwrap_or_else(|| wire_key(decl.name));
            if !keys.insert(key.clone()) {
                return Err(ParamsError::DuplicateField { type_name, field: key });
            }

            descriptors.push(FieldDescriptor::new(decl.name, key, decl.kind, decl.sequence));
            accessors.push(decl.accessor);
        }

        Ok(Schema::new(type_name, descriptors, accessors, self.internal))
    }
}
