//! Wire parameters for podwire option structs.
//!
//! Requests to the container engine take their optional arguments as query
//! parameters. Every option struct carries many fields, and most of them are
//! left alone by any given caller. Sending those untouched fields would put
//! their zero values on the wire and override whatever default the server
//! would have picked, so we only encode fields the caller actually assigned.
//!
//! # Components
//!
//! - [`Registry`]: builds and caches one [`Schema`] per option struct type
//! - [`Presence`]: per-instance log of fields written through setters
//! - [`Encoder`]: walks a schema in declaration order and emits a
//!   [`ParameterSet`] containing only the present fields
//!
//! # Presence
//!
//! Fields declared as `Option<T>` are present whenever they hold a value, so a
//! wrapped zero still reaches the wire. Every other field is present only if
//! its setter recorded it in the instance's [`Presence`] log. Nothing ever
//! clears presence.
//!
//! # Example
//!
//! ```
//! use podwire_params::{Fields, OptionStruct, Presence, Registry};
//!
//! #[derive(Debug, Default)]
//! struct CreateOptions {
//!     name: String,
//!     quota: Option<i64>,
//!     changed: Presence,
//! }
//!
//! impl CreateOptions {
//!     fn set_name(&mut self, name: &str) -> &mut Self {
//!         self.name = name.to_string();
//!         self.changed.mark("name");
//!         self
//!     }
//! }
//!
//! impl OptionStruct for CreateOptions {
//!     fn declare(fields: &mut Fields<Self>) {
//!         fields.field("name", |o| &o.name);
//!         fields.field("quota", |o| &o.quota);
//!     }
//!
//!     fn presence(&self) -> &Presence {
//!         &self.changed
//!     }
//! }
//!
//! let registry = Registry::new();
//! let mut opts = CreateOptions::default();
//! opts.set_name("x");
//! assert_eq!(opts.to_params(&registry)?.to_query_string(), "name=x");
//!
//! opts.quota = Some(0);
//! assert_eq!(opts.to_params(&registry)?.to_query_string(), "name=x&quota=0");
//! # Ok::<(), podwire_params::ParamsError>(())
//! ```
#![forbid(unsafe_code)]

pub mod descriptor;
pub mod encoder;
pub mod errors;
pub mod fields;
pub mod params;
pub mod presence;
pub mod registry;
pub mod schema;
pub mod value;

pub use descriptor::{FieldDescriptor, Optionality, SequenceEncoding};
pub use encoder::Encoder;
pub use errors::{ParamsError, Result};
pub use fields::{FieldDecl, Fields};
pub use params::{ParameterSet, escape_component};
pub use presence::Presence;
pub use registry::Registry;
pub use schema::Schema;
pub use value::{Value, ValueKind, WireValue};

/// A caller-populated record of request options.
///
/// Implementors declare their wire fields once through [`Fields`] and expose
/// the [`Presence`] log their setters write into. Plain fields should only be
/// mutated through setters that call [`Presence::mark`]; `Option<T>` fields
/// track presence through the wrapper itself.
pub trait OptionStruct: Sized + 'static {
    /// Declare the wire fields of this type, in wire order.
    fn declare(fields: &mut Fields<Self>);

    /// Presence log for plain-value fields.
    fn presence(&self) -> &Presence;

    /// Whether the caller explicitly assigned `field`.
    ///
    /// # Errors
    ///
    /// `InvalidFieldName` if the type declares no such field, and
    /// `UnsupportedFieldKind` if the field is internal-only.
    fn changed(&self, registry: &Registry, field: &str) -> Result<bool> {
        registry.describe::<Self>()?.changed(self, field)
    }

    /// Encode the present fields into wire parameters.
    fn to_params(&self, registry: &Registry) -> Result<ParameterSet> {
        Encoder::new(registry).encode(self)
    }
}
