//! Registry tests
//!
//! Schema construction, caching and determinism, including racing first use
//! from several threads.

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
        mpsc,
    },
    thread,
};

use podwire_params::{
    Fields, OptionStruct, Optionality, ParamsError, Presence, Registry, SequenceEncoding,
    ValueKind,
};

#[derive(Default)]
struct PodOptions {
    name: String,
    infra_image: String,
    timeout: Option<u32>,
    share: Vec<String>,
    changed: Presence,
}

impl OptionStruct for PodOptions {
    fn declare(fields: &mut Fields<Self>) {
        fields.field("name", |o| &o.name);
        fields.field("infra_image", |o| &o.infra_image);
        fields.field("timeout", |o| &o.timeout).key("t");
        fields.field("share", |o| &o.share).repeated();
    }

    fn presence(&self) -> &Presence {
        &self.changed
    }
}

static RACED_DECLARATIONS: AtomicUsize = AtomicUsize::new(0);

/// Only described by the race test, so the counter is exact.
struct RacedOptions {
    all: Option<bool>,
    changed: Presence,
}

impl OptionStruct for RacedOptions {
    fn declare(fields: &mut Fields<Self>) {
        RACED_DECLARATIONS.fetch_add(1, Ordering::SeqCst);
        thread::yield_now();
        fields.field("all", |o| &o.all);
    }

    fn presence(&self) -> &Presence {
        &self.changed
    }
}

#[allow(dead_code)]
struct EventOptions {
    since: String,
    stream: Option<mpsc::Sender<String>>,
    until: String,
    changed: Presence,
}

impl OptionStruct for EventOptions {
    fn declare(fields: &mut Fields<Self>) {
        fields.field("since", |o| &o.since);
        fields.field("stream", |o| &o.stream);
        fields.field("until", |o| &o.until);
    }

    fn presence(&self) -> &Presence {
        &self.changed
    }
}

#[test]
fn descriptors_carry_keys_kinds_and_modes() {
    let registry = Registry::new();
    let schema = registry.describe::<PodOptions>().unwrap();

    let summary: Vec<_> = schema
        .fields()
        .iter()
        .map(|d| (d.name(), d.key(), d.kind().to_string(), d.optionality()))
        .collect();

    assert_eq!(summary, [
        ("name", "name", "string".to_string(), Optionality::Plain),
        ("infra_image", "infraimage", "string".to_string(), Optionality::Plain),
        ("timeout", "t", "optional<unsigned integer>".to_string(), Optionality::Wrapper),
        ("share", "share", "sequence<string>".to_string(), Optionality::Plain),
    ]);
    assert_eq!(schema.fields()[3].sequence(), SequenceEncoding::Repeated);
    assert_eq!(schema.field("timeout").unwrap().kind(), &ValueKind::Optional(Box::new(ValueKind::Uint)));
}

#[test]
fn describe_is_deterministic_across_registries() {
    let first = Registry::new().describe::<PodOptions>().unwrap();
    let second = Registry::new().describe::<PodOptions>().unwrap();

    assert_eq!(first.fields(), second.fields());
    assert_eq!(first.type_name(), second.type_name());
}

#[test]
fn concurrent_first_use_builds_once() {
    let registry = Registry::new();

    let schemas: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| registry.describe::<RacedOptions>().unwrap()))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(RACED_DECLARATIONS.load(Ordering::SeqCst), 1);
    assert!(schemas.iter().all(|schema| Arc::ptr_eq(schema, &schemas[0])));
    assert!(schemas.iter().all(|schema| schema.fields() == schemas[0].fields()));
    assert_eq!(registry.len(), 1);

    let opts = RacedOptions { all: Some(false), changed: Presence::new() };
    assert_eq!(opts.to_params(&registry).unwrap().get("all"), Some("false"));
}

#[test]
fn unsupported_kind_names_exactly_that_field() {
    let registry = Registry::new();

    let err = registry.describe::<EventOptions>().unwrap_err();
    assert_eq!(err, ParamsError::UnsupportedFieldKind {
        type_name: std::any::type_name::<EventOptions>(),
        field: "stream".into(),
        kind: "channel".into(),
    });

    // Cached, so the same error comes back.
    assert_eq!(registry.describe::<EventOptions>().unwrap_err(), err);
}
