//! Command line arguments to option structs.
//!
//! A setter is called only for a flag the user actually gave, so the request
//! carries exactly those parameters and the service applies its own defaults
//! for the rest.

use podwire_bindings::{
    Connection, Request,
    pods::{
        self, CreateOptions, InspectOptions, KillOptions, ListOptions, RemoveOptions,
        StatsOptions, StopOptions, TopOptions,
    },
};

use crate::{
    cli::{CreateArgs, KillArgs, PodCommand, PsArgs, RmArgs, StatsArgs, StopArgs, TopArgs},
    error::{CliError, Result},
};

/// Build the request for a pod command.
pub fn pod_request(conn: &Connection, command: &PodCommand) -> Result<Request> {
    let request = match command {
        PodCommand::Create(args) => pods::create(conn, &create_options(args)?)?,
        PodCommand::Inspect(args) => pods::inspect(conn, &args.pod, &InspectOptions::new())?,
        PodCommand::Kill(args) => pods::kill(conn, &args.pod, &kill_options(args))?,
        PodCommand::Ps(args) => pods::list(conn, &list_options(args)?)?,
        PodCommand::Rm(args) => pods::remove(conn, &args.pod, &remove_options(args))?,
        PodCommand::Stats(args) => pods::stats(conn, &stats_options(args))?,
        PodCommand::Stop(args) => pods::stop(conn, &args.pod, &stop_options(args))?,
        PodCommand::Top(args) => pods::top(conn, &args.pod, &top_options(args))?,
    };
    Ok(request)
}

/// Options for `pod create`.
pub fn create_options(args: &CreateArgs) -> Result<CreateOptions> {
    let mut opts = CreateOptions::new();
    if let Some(name) = &args.name {
        opts.set_name(name);
    }
    if let Some(hostname) = &args.hostname {
        opts.set_hostname(hostname);
    }
    if let Some(infra) = args.infra {
        opts.set_infra(infra);
    }
    if let Some(image) = &args.infra_image {
        opts.set_infra_image(image);
    }
    for label in &args.labels {
        let (key, value) = key_value("label", label)?;
        opts.add_label(key, value);
    }
    if let Some(share) = &args.share {
        opts.set_share(split_list(share));
    }
    if let Some(quota) = args.cpu_quota {
        opts.set_cpu_quota(quota);
    }
    Ok(opts)
}

fn kill_options(args: &KillArgs) -> KillOptions {
    let mut opts = KillOptions::new();
    if let Some(signal) = &args.signal {
        opts.set_signal(signal);
    }
    opts
}

fn list_options(args: &PsArgs) -> Result<ListOptions> {
    let mut opts = ListOptions::new();
    for filter in &args.filters {
        let (key, value) = key_value("filter", filter)?;
        opts.add_filter(key, value);
    }
    Ok(opts)
}

fn remove_options(args: &RmArgs) -> RemoveOptions {
    let mut opts = RemoveOptions::new();
    if args.force {
        opts.set_force(true);
    }
    if let Some(time) = args.time {
        opts.set_timeout(time);
    }
    opts
}

fn stats_options(args: &StatsArgs) -> StatsOptions {
    let mut opts = StatsOptions::new();
    if args.all {
        opts.set_all(true);
    }
    if !args.pods.is_empty() {
        opts.set_names_or_ids(args.pods.clone());
    }
    opts
}

fn stop_options(args: &StopArgs) -> StopOptions {
    let mut opts = StopOptions::new();
    if let Some(time) = args.time {
        opts.set_timeout(time);
    }
    opts
}

fn top_options(args: &TopArgs) -> TopOptions {
    let mut opts = TopOptions::new();
    if !args.descriptors.is_empty() {
        opts.set_descriptors(args.descriptors.clone());
    }
    opts
}

/// Split `KEY=VALUE`. The value may be empty or contain further `=`.
fn key_value<'a>(flag: &'static str, raw: &'a str) -> Result<(&'a str, &'a str)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(CliError::InvalidKeyValue { flag, value: raw.to_string() }),
    }
}

/// Comma separated list; empty items are dropped, so `""` is an empty list.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use podwire_bindings::OptionStruct;

    use super::*;

    #[test]
    fn key_value_keeps_extra_equals_in_value() {
        assert_eq!(key_value("label", "a=b=c").unwrap(), ("a", "b=c"));
        assert_eq!(key_value("label", "a=").unwrap(), ("a", ""));
    }

    #[test]
    fn key_value_rejects_missing_key() {
        for raw in ["novalue", "=x", ""] {
            let err = key_value("filter", raw).unwrap_err();
            assert!(matches!(err, CliError::InvalidKeyValue { flag: "filter", .. }), "{raw}");
        }
    }

    #[test]
    fn empty_share_is_an_empty_list() {
        assert!(split_list("").is_empty());
        assert_eq!(split_list("net, ipc,"), ["net", "ipc"]);
    }

    #[test]
    fn unset_flags_leave_options_untouched() {
        let opts = create_options(&CreateArgs::default()).unwrap();
        assert!(opts.presence().is_empty());
    }

    #[test]
    fn given_flags_mark_only_their_fields() {
        let args = CreateArgs {
            hostname: Some("box".into()),
            infra: Some(false),
            cpu_quota: Some(0),
            ..CreateArgs::default()
        };
        let opts = create_options(&args).unwrap();

        let marked: Vec<_> = opts.presence().iter().collect();
        assert_eq!(marked, ["hostname", "infra"]);
        assert_eq!(opts.cpu_quota(), Some(0));
        assert!(!opts.infra());
    }
}
