//! Field descriptors.
//!
//! A descriptor is the static metadata for one wire field: the Rust field
//! name, the wire key, the value kind and how presence is decided. They are
//! produced by [`crate::Fields`] and never change afterwards.

use crate::value::ValueKind;

/// How presence is decided for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Optionality {
    /// Present iff a setter recorded the field in the instance's presence log
    Plain,
    /// Present iff the `Option` wrapper holds a value
    Wrapper,
}

/// Wire shape of a sequence field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SequenceEncoding {
    /// One `key=element` entry per element
    Repeated,
    /// A single JSON array value
    #[default]
    Bracketed,
}

/// Static metadata for one wire field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    name: &'static str,
    key: String,
    kind: ValueKind,
    optionality: Optionality,
    sequence: SequenceEncoding,
}

impl FieldDescriptor {
    pub(crate) fn new(
        name: &'static str,
        key: String,
        kind: ValueKind,
        sequence: SequenceEncoding,
    ) -> Self {
        let optionality = match kind {
            ValueKind::Optional(_) => Optionality::Wrapper,
            _ => Optionality::Plain,
        };
        Self { name, key, kind, optionality, sequence }
    }

    /// Rust field name, as passed to setters and `changed`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Key used on the wire.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Declared value kind.
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// Presence strategy.
    pub fn optionality(&self) -> Optionality {
        self.optionality
    }

    /// Sequence shape. Only meaningful for sequence kinds.
    pub fn sequence(&self) -> SequenceEncoding {
        self.sequence
    }
}

/// Default wire key for a field name: lowercase, underscores dropped.
///
/// The engine matches query keys against its own field names
/// case-insensitively, so `infra_image` travels as `infraimage`.
pub fn wire_key(name: &str) -> String {
    name.chars().filter(|c| *c != '_').flat_map(char::to_lowercase).collect()
}
