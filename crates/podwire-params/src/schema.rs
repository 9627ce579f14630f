//! Built schemas: the ordered descriptor list of one option struct type.

use std::fmt;

use crate::{
    OptionStruct,
    descriptor::{FieldDescriptor, Optionality},
    errors::{ParamsError, Result},
    value::Value,
};

type Reader<T> = Box<dyn for<'a> Fn(&'a T) -> Value<'a> + Send + Sync>;

type SetCheck<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Reads one field out of an instance.
pub(crate) struct Accessor<T> {
    read: Reader<T>,
    is_set: SetCheck<T>,
}

impl<T> Accessor<T> {
    pub(crate) fn new(read: Reader<T>, is_set: SetCheck<T>) -> Self {
        Self { read, is_set }
    }

    /// Current value, converted for encoding.
    pub(crate) fn read<'a>(&self, instance: &'a T) -> Value<'a> {
        (self.read)(instance)
    }

    /// Whether an `Option` field holds a value. Never converts the value.
    pub(crate) fn is_set(&self, instance: &T) -> bool {
        (self.is_set)(instance)
    }
}

/// Ordered field descriptors of an option struct type.
///
/// Built once per type by [`crate::Registry::describe`]. Descriptor order is
/// declaration order and is the order parameters appear on the wire.
pub struct Schema<T> {
    type_name: &'static str,
    fields: Vec<FieldDescriptor>,
    accessors: Vec<Accessor<T>>,
    internal: Vec<(&'static str, &'static str)>,
}

impl<T> Schema<T> {
    pub(crate) fn new(
        type_name: &'static str,
        fields: Vec<FieldDescriptor>,
        accessors: Vec<Accessor<T>>,
        internal: Vec<(&'static str, &'static str)>,
    ) -> Self {
        Self { type_name, fields, accessors, internal }
    }

    /// Name of the described type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Wire field descriptors, in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Number of wire fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the type declares no wire fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up the descriptor for `name`.
    ///
    /// # Errors
    ///
    /// - `UnsupportedFieldKind` if `name` was declared internal-only
    /// - `InvalidFieldName` if the type has no such field
    pub fn field(&self, name: &str) -> Result<&FieldDescriptor> {
        self.entry(name).map(|(descriptor, _)| descriptor)
    }

    /// Descriptors paired with their accessors.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (&FieldDescriptor, &Accessor<T>)> {
        self.fields.iter().zip(&self.accessors)
    }

    fn entry(&self, name: &str) -> Result<(&FieldDescriptor, &Accessor<T>)> {
        if let Some(entry) = self.entries().find(|(descriptor, _)| descriptor.name() == name) {
            return Ok(entry);
        }

        match self.internal.iter().find(|(internal, _)| *internal == name) {
            Some((field, kind)) => Err(ParamsError::UnsupportedFieldKind {
                type_name: self.type_name,
                field: (*field).to_string(),
                kind: (*kind).to_string(),
            }),
            None => {
                Err(ParamsError::InvalidFieldName { type_name: self.type_name, field: name.to_string() })
            },
        }
    }
}

impl<T: OptionStruct> Schema<T> {
    /// Whether the caller explicitly assigned `name` on `instance`.
    ///
    /// Wrapper fields are present when they hold a value, whatever the value.
    /// Plain fields are present when their setter logged them.
    pub fn changed(&self, instance: &T, name: &str) -> Result<bool> {
        let (descriptor, accessor) = self.entry(name)?;
        Ok(is_present(descriptor, accessor, instance))
    }
}

pub(crate) fn is_present<T: OptionStruct>(
    descriptor: &FieldDescriptor,
    accessor: &Accessor<T>,
    instance: &T,
) -> bool {
    match descriptor.optionality() {
        Optionality::Wrapper => accessor.is_set(instance),
        Optionality::Plain => instance.presence().contains(descriptor.name()),
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .field("internal", &self.internal)
            .finish_non_exhaustive()
    }
}
