//! Pod option structs.
//!
//! Fields are private: plain fields must go through their setter so the
//! presence log sees them. `Option` fields are present whenever they hold a
//! value, including zero.

use std::collections::BTreeMap;

use podwire_params::{Fields, OptionStruct, Presence};
use serde::Serialize;

/// Host to container port forward for a new pod.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortMapping {
    /// Port on the host
    pub host_port: u16,
    /// Port inside the pod
    pub container_port: u16,
    /// `tcp`, `udp` or `sctp`
    pub protocol: String,
}

impl PortMapping {
    /// TCP forward from `host_port` to `container_port`.
    pub fn tcp(host_port: u16, container_port: u16) -> Self {
        Self { host_port, container_port, protocol: "tcp".to_string() }
    }
}

/// Options for creating a pod.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    name: String,
    hostname: String,
    infra: bool,
    infra_image: String,
    labels: BTreeMap<String, String>,
    share: Vec<String>,
    port_mappings: Vec<PortMapping>,
    cpu_quota: Option<i64>,
    changed: Presence,
}

impl CreateOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pod name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the pod name.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self.changed.mark("name");
        self
    }

    /// Hostname inside the pod.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Set the hostname inside the pod.
    pub fn set_hostname(&mut self, hostname: impl Into<String>) -> &mut Self {
        self.hostname = hostname.into();
        self.changed.mark("hostname");
        self
    }

    /// Whether the pod gets an infra container.
    pub fn infra(&self) -> bool {
        self.infra
    }

    /// Enable or disable the infra container.
    ///
    /// The engine creates one unless told otherwise, so only an explicit
    /// `false` changes anything.
    pub fn set_infra(&mut self, infra: bool) -> &mut Self {
        self.infra = infra;
        self.changed.mark("infra");
        self
    }

    /// Infra container image.
    pub fn infra_image(&self) -> &str {
        &self.infra_image
    }

    /// Set the infra container image.
    pub fn set_infra_image(&mut self, image: impl Into<String>) -> &mut Self {
        self.infra_image = image.into();
        self.changed.mark("infra_image");
        self
    }

    /// Pod labels.
    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    /// Replace the pod labels.
    pub fn set_labels(&mut self, labels: BTreeMap<String, String>) -> &mut Self {
        self.labels = labels;
        self.changed.mark("labels");
        self
    }

    /// Add one label.
    pub fn add_label(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.labels.insert(key.into(), value.into());
        self.changed.mark("labels");
        self
    }

    /// Namespaces shared between the pod's containers.
    pub fn share(&self) -> &[String] {
        &self.share
    }

    /// Set the shared namespaces. An empty list shares nothing.
    pub fn set_share(&mut self, namespaces: Vec<String>) -> &mut Self {
        self.share = namespaces;
        self.changed.mark("share");
        self
    }

    /// Port forwards.
    pub fn port_mappings(&self) -> &[PortMapping] {
        &self.port_mappings
    }

    /// Set the port forwards.
    pub fn set_port_mappings(&mut self, mappings: Vec<PortMapping>) -> &mut Self {
        self.port_mappings = mappings;
        self.changed.mark("port_mappings");
        self
    }

    /// CPU CFS quota, if set.
    pub fn cpu_quota(&self) -> Option<i64> {
        self.cpu_quota
    }

    /// Set the CPU CFS quota. Zero is a real value and is sent.
    pub fn set_cpu_quota(&mut self, quota: i64) -> &mut Self {
        self.cpu_quota = Some(quota);
        self
    }
}

impl OptionStruct for CreateOptions {
    fn declare(fields: &mut Fields<Self>) {
        fields.field("name", |o| &o.name);
        fields.field("hostname", |o| &o.hostname);
        fields.field("infra", |o| &o.infra);
        fields.field("infra_image", |o| &o.infra_image);
        fields.nested("labels", |o| &o.labels);
        fields.field("share", |o| &o.share).repeated();
        fields.nested("port_mappings", |o| &o.port_mappings);
        fields.field("cpu_quota", |o| &o.cpu_quota);
    }

    fn presence(&self) -> &Presence {
        &self.changed
    }
}

/// Options for inspecting a pod. The endpoint takes none today.
#[derive(Debug, Clone, Default)]
pub struct InspectOptions {
    changed: Presence,
}

impl InspectOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }
}

impl OptionStruct for InspectOptions {
    fn declare(_fields: &mut Fields<Self>) {}

    fn presence(&self) -> &Presence {
        &self.changed
    }
}

/// Options for signalling a pod.
#[derive(Debug, Clone, Default)]
pub struct KillOptions {
    signal: Option<String>,
    changed: Presence,
}

impl KillOptions {
    /// Empty options; the engine sends SIGKILL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal to send, if set.
    pub fn signal(&self) -> Option<&str> {
        self.signal.as_deref()
    }

    /// Set the signal, by name or number.
    pub fn set_signal(&mut self, signal: impl Into<String>) -> &mut Self {
        self.signal = Some(signal.into());
        self
    }
}

impl OptionStruct for KillOptions {
    fn declare(fields: &mut Fields<Self>) {
        fields.field("signal", |o| &o.signal);
    }

    fn presence(&self) -> &Presence {
        &self.changed
    }
}

/// Options for listing pods.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    filters: Option<BTreeMap<String, Vec<String>>>,
    changed: Presence,
}

impl ListOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters, if any were set.
    pub fn filters(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        self.filters.as_ref()
    }

    /// Replace all filters.
    pub fn set_filters(&mut self, filters: BTreeMap<String, Vec<String>>) -> &mut Self {
        self.filters = Some(filters);
        self
    }

    /// Add one `key=value` filter.
    pub fn add_filter(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.filters
            .get_or_insert_with(BTreeMap::new)
            .entry(key.into())
            .or_default()
            .push(value.into());
        self
    }
}

impl OptionStruct for ListOptions {
    fn declare(fields: &mut Fields<Self>) {
        fields.nested_optional("filters", |o| &o.filters);
    }

    fn presence(&self) -> &Presence {
        &self.changed
    }
}

/// Options for removing a pod.
#[derive(Debug, Clone, Default)]
pub struct RemoveOptions {
    force: Option<bool>,
    timeout: Option<u32>,
    changed: Presence,
}

impl RemoveOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force flag, if set.
    pub fn force(&self) -> Option<bool> {
        self.force
    }

    /// Stop running containers before removing.
    pub fn set_force(&mut self, force: bool) -> &mut Self {
        self.force = Some(force);
        self
    }

    /// Stop timeout in seconds, if set.
    pub fn timeout(&self) -> Option<u32> {
        self.timeout
    }

    /// Seconds to wait for containers to stop before killing them.
    pub fn set_timeout(&mut self, seconds: u32) -> &mut Self {
        self.timeout = Some(seconds);
        self
    }
}

impl OptionStruct for RemoveOptions {
    fn declare(fields: &mut Fields<Self>) {
        fields.field("force", |o| &o.force);
        fields.field("timeout", |o| &o.timeout);
    }

    fn presence(&self) -> &Presence {
        &self.changed
    }
}

/// Options for stopping a pod.
#[derive(Debug, Clone, Default)]
pub struct StopOptions {
    timeout: Option<i32>,
    changed: Presence,
}

impl StopOptions {
    /// Empty options; the engine uses each container's stop timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop timeout in seconds, if set.
    pub fn timeout(&self) -> Option<i32> {
        self.timeout
    }

    /// Seconds to wait before killing. Zero kills immediately, and -1 waits
    /// forever.
    pub fn set_timeout(&mut self, seconds: i32) -> &mut Self {
        self.timeout = Some(seconds);
        self
    }
}

impl OptionStruct for StopOptions {
    fn declare(fields: &mut Fields<Self>) {
        fields.field("timeout", |o| &o.timeout).key("t");
    }

    fn presence(&self) -> &Presence {
        &self.changed
    }
}

/// Options for pod resource statistics.
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    all: Option<bool>,
    names_or_ids: Vec<String>,
    changed: Presence,
}

impl StatsOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether stats for all pods were requested, if set.
    pub fn all(&self) -> Option<bool> {
        self.all
    }

    /// Request stats for every pod.
    pub fn set_all(&mut self, all: bool) -> &mut Self {
        self.all = Some(all);
        self
    }

    /// Pods to report on.
    pub fn names_or_ids(&self) -> &[String] {
        &self.names_or_ids
    }

    /// Set the pods to report on.
    pub fn set_names_or_ids(&mut self, pods: Vec<String>) -> &mut Self {
        self.names_or_ids = pods;
        self.changed.mark("names_or_ids");
        self
    }
}

impl OptionStruct for StatsOptions {
    fn declare(fields: &mut Fields<Self>) {
        fields.field("all", |o| &o.all);
        fields.field("names_or_ids", |o| &o.names_or_ids).key("namesOrIDs").repeated();
    }

    fn presence(&self) -> &Presence {
        &self.changed
    }
}

/// Options for listing a pod's processes.
#[derive(Debug, Clone, Default)]
pub struct TopOptions {
    descriptors: Option<Vec<String>>,
    changed: Presence,
}

impl TopOptions {
    /// Empty options; the engine picks its default columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// `ps` format descriptors, if set.
    pub fn descriptors(&self) -> Option<&[String]> {
        self.descriptors.as_deref()
    }

    /// Set the `ps` format descriptors (`pid`, `user`, `args`, ...).
    pub fn set_descriptors(&mut self, descriptors: Vec<String>) -> &mut Self {
        self.descriptors = Some(descriptors);
        self
    }
}

impl OptionStruct for TopOptions {
    fn declare(fields: &mut Fields<Self>) {
        fields.field("descriptors", |o| &o.descriptors).key("ps_args").repeated();
    }

    fn presence(&self) -> &Presence {
        &self.changed
    }
}
