//! Schema registry.
//!
//! Schemas are pure derived data, so each one is built at most once per
//! registry and kept until the registry is dropped. A process normally owns a
//! single registry for its whole lifetime and passes it to whatever encodes
//! requests.
//!
//! # Concurrency
//!
//! Every type gets a `OnceLock` slot. Threads racing on the first `describe`
//! for a type block on that slot while exactly one of them runs the type's
//! `declare`; everyone then shares the same `Arc<Schema<T>>`. Failed builds
//! are cached the same way.
//!
//! The type index is an `ArcSwap` snapshot. Looking up a slot is an atomic
//! load, so describing or encoding an already built type never waits on
//! anything. Only the first use of a type publishes a new snapshot, copying
//! the index and swapping it in.

use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock},
};

use arc_swap::ArcSwap;
use tracing::{debug, warn};

use crate::{
    OptionStruct,
    errors::{ParamsError, Result},
    fields::Fields,
    schema::Schema,
};

type Slot<T> = OnceLock<Result<Arc<Schema<T>>>>;

type ErasedSlot = Arc<dyn Any + Send + Sync>;

/// Per-type cache of option struct schemas.
#[derive(Default)]
pub struct Registry {
    slots: ArcSwap<HashMap<TypeId, ErasedSlot>>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema for `T`, built on first use.
    ///
    /// Repeated calls return the same `Arc` (or the same error) without
    /// running `T::declare` again.
    ///
    /// # Errors
    ///
    /// - `UnsupportedFieldKind` if a wire field has no encoding rule
    /// - `DuplicateField` if a field name or wire key is declared twice
    /// - `SlotMismatch` if the index holds a slot of another type under `T`
    pub fn describe<T: OptionStruct>(&self) -> Result<Arc<Schema<T>>> {
        self.slot::<T>()?.get_or_init(build::<T>).clone()
    }

    /// Number of types described so far.
    pub fn len(&self) -> usize {
        self.slots.load().len()
    }

    /// True if no type has been described yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot<T: OptionStruct>(&self) -> Result<Arc<Slot<T>>> {
        let id = TypeId::of::<T>();
        let existing = self.slots.load().get(&id).cloned();
        let erased = match existing {
            Some(slot) => slot,
            None => self.publish(id, Arc::new(Slot::<T>::new())),
        };

        erased.downcast::<Slot<T>>().map_err(|_| {
            let err = ParamsError::SlotMismatch { type_name: type_name::<T>() };
            warn!(error = %err, "schema slot has the wrong type");
            err
        })
    }

    /// Insert `fresh` under `id` unless another thread got there first, and
    /// return whichever slot ended up in the index.
    fn publish(&self, id: TypeId, fresh: ErasedSlot) -> ErasedSlot {
        let mut stored = Arc::clone(&fresh);
        self.slots.rcu(|current| {
            let mut next = HashMap::clone(current);
            stored = Arc::clone(next.entry(id).or_insert_with(|| Arc::clone(&fresh)));
            next
        });
        stored
    }
}

fn build<T: OptionStruct>() -> Result<Arc<Schema<T>>> {
    let mut fields = Fields::new(type_name::<T>());
    T::declare(&mut fields);

    match fields.finish() {
        Ok(schema) => {
            debug!(type_name = schema.type_name(), fields = schema.len(), "built option schema");
            Ok(Arc::new(schema))
        },
        Err(err) => {
            warn!(type_name = type_name::<T>(), error = %err, "rejected option schema");
            Err(err)
        },
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("types", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::mpsc, thread, time::Duration};

    use super::*;
    use crate::Presence;

    #[derive(Default)]
    struct Plain {
        name: String,
        changed: Presence,
    }

    impl OptionStruct for Plain {
        fn declare(fields: &mut Fields<Self>) {
            fields.field("name", |o| &o.name);
        }

        fn presence(&self) -> &Presence {
            &self.changed
        }
    }

    #[derive(Default)]
    struct Broken {
        changed: Presence,
    }

    impl OptionStruct for Broken {
        fn declare(fields: &mut Fields<Self>) {
            fields.internal("hook", "function").internal("hook", "function");
        }

        fn presence(&self) -> &Presence {
            &self.changed
        }
    }

    #[test]
    fn describe_is_cached() {
        let registry = Registry::new();
        assert!(registry.is_empty());

        let first = registry.describe::<Plain>().unwrap();
        let second = registry.describe::<Plain>().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);

        let mut plain = Plain::default();
        assert!(!plain.changed(&registry, "name").unwrap());
        plain.name = "web".into();
        plain.changed.mark("name");
        assert!(plain.changed(&registry, "name").unwrap());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn failed_build_is_cached() {
        let registry = Registry::new();

        let first = registry.describe::<Broken>().unwrap_err();
        let second = registry.describe::<Broken>().unwrap_err();

        assert!(matches!(first, ParamsError::DuplicateField { .. }));
        assert_eq!(first, second);
        assert_eq!(Broken::default().to_params(&registry), Err(first));
    }

    #[test]
    fn registries_are_independent() {
        let a = Registry::new();
        let b = Registry::new();
        a.describe::<Plain>().unwrap();

        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }

    #[test]
    fn built_schema_is_read_while_the_index_is_being_replaced() {
        let registry = Registry::new();
        registry.describe::<Plain>().unwrap();
        let (done, finished) = mpsc::channel();

        thread::scope(|scope| {
            registry.slots.rcu(|current| {
                let registry = &registry;
                let done = done.clone();
                scope.spawn(move || {
                    let mut plain = Plain::default();
                    plain.name = "web".into();
                    plain.changed.mark("name");
                    let _ = done.send(plain.to_params(registry).map(|p| p.to_query_string()));
                });

                let encoded = finished.recv_timeout(Duration::from_secs(5));
                assert_eq!(encoded, Ok(Ok("name=web".to_string())));
                HashMap::clone(current)
            });
        });
    }

    #[test]
    fn mismatched_slot_is_an_error_not_a_rebuild() {
        let registry = Registry::new();
        let wrong: ErasedSlot = Arc::new(Slot::<Broken>::new());
        registry.slots.store(Arc::new(HashMap::from([(TypeId::of::<Plain>(), wrong)])));

        let err = registry.describe::<Plain>().unwrap_err();
        assert_eq!(err, ParamsError::SlotMismatch { type_name: type_name::<Plain>() });
        assert_eq!(registry.describe::<Plain>().unwrap_err(), err);
        assert_eq!(registry.len(), 1);
    }
}
