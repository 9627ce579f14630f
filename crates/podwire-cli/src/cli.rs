//! Command line definition.

use clap::{ArgAction, Args, Parser, Subcommand};

/// Default service base URL for a local engine socket.
pub const DEFAULT_URL: &str = "http://d/v3.0.0/libpod";

/// Prepare container engine pod requests without sending them.
#[derive(Parser, Debug)]
#[command(name = "podwire", version)]
pub struct Cli {
    /// Service base URL
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage pods
    #[command(subcommand)]
    Pod(PodCommand),
}

/// Pod commands.
#[derive(Subcommand, Debug)]
pub enum PodCommand {
    /// Create a new empty pod
    Create(CreateArgs),
    /// Display a pod configuration
    Inspect(InspectArgs),
    /// Send a signal to the containers of a pod
    Kill(KillArgs),
    /// List pods
    #[command(alias = "ls", alias = "list")]
    Ps(PsArgs),
    /// Remove a pod
    #[command(alias = "remove")]
    Rm(RmArgs),
    /// Display resource usage of pods
    Stats(StatsArgs),
    /// Stop a pod
    Stop(StopArgs),
    /// Display the running processes of a pod
    Top(TopArgs),
}

/// `pod create` flags.
#[derive(Args, Debug, Default)]
pub struct CreateArgs {
    /// Pod name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Hostname inside the pod
    #[arg(long)]
    pub hostname: Option<String>,

    /// Create an infra container
    #[arg(long)]
    pub infra: Option<bool>,

    /// Image for the infra container
    #[arg(long)]
    pub infra_image: Option<String>,

    /// Pod label (KEY=VALUE, repeatable)
    #[arg(short, long = "label")]
    pub labels: Vec<String>,

    /// Comma-separated namespaces to share; an empty value shares none
    #[arg(long)]
    pub share: Option<String>,

    /// CPU CFS quota in microseconds
    #[arg(long, allow_negative_numbers = true)]
    pub cpu_quota: Option<i64>,
}

/// `pod inspect` arguments.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Pod name or ID
    pub pod: String,
}

/// `pod kill` arguments.
#[derive(Args, Debug)]
pub struct KillArgs {
    /// Signal to send
    #[arg(short, long)]
    pub signal: Option<String>,

    /// Pod name or ID
    pub pod: String,
}

/// `pod ps` arguments.
#[derive(Args, Debug, Default)]
pub struct PsArgs {
    /// Filter output (KEY=VALUE, repeatable)
    #[arg(short, long = "filter")]
    pub filters: Vec<String>,
}

/// `pod rm` arguments.
#[derive(Args, Debug)]
pub struct RmArgs {
    /// Stop running containers before removal
    #[arg(short, long)]
    pub force: bool,

    /// Seconds to wait for containers to stop
    #[arg(short, long)]
    pub time: Option<u32>,

    /// Pod name or ID
    pub pod: String,
}

/// `pod stats` arguments.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {
    /// Report on all pods
    #[arg(short, long, conflicts_with = "pods")]
    pub all: bool,

    /// Pod names or IDs
    pub pods: Vec<String>,
}

/// `pod stop` arguments.
#[derive(Args, Debug)]
pub struct StopArgs {
    /// Seconds to wait before killing; -1 waits forever
    #[arg(short, long, allow_negative_numbers = true)]
    pub time: Option<i32>,

    /// Pod name or ID
    pub pod: String,
}

/// `pod top` arguments.
#[derive(Args, Debug)]
pub struct TopArgs {
    /// Pod name or ID
    pub pod: String,

    /// `ps` format descriptors
    pub descriptors: Vec<String>,
}
