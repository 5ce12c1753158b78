//! Clap derive structures for the `nfconsole` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// nfconsole -- command-line console for mobile-core network configuration
#[derive(Debug, Parser)]
#[command(
    name = "nfconsole",
    version,
    about = "Manage mobile-core network configuration from the command line",
    long_about = "Administer device groups, network slices, gNB and UPF inventory,\n\
        K4 keys and subscribers through the configuration service REST APIs.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "NFCONSOLE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Configuration service URL (overrides profile)
    #[arg(long, short = 's', env = "NFCONSOLE_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NFCONSOLE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, env = "NFCONSOLE_COLOR", default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "NFCONSOLE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "NFCONSOLE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one key per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage device groups (IMSI sets with IP domain and QoS)
    #[command(alias = "dg")]
    DeviceGroups(ResourceArgs),

    /// Manage network slices
    #[command(alias = "network-slices", alias = "ns")]
    Slices(ResourceArgs),

    /// Manage the gNB inventory
    Gnbs(ResourceArgs),

    /// Manage the UPF inventory
    Upfs(ResourceArgs),

    /// Manage K4 transport keys
    #[command(alias = "k4")]
    K4Keys(ResourceArgs),

    /// Manage subscribers and their authentication data
    #[command(alias = "subs")]
    Subscribers(ResourceArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RESOURCES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ResourceArgs {
    #[command(subcommand)]
    pub command: ResourceCommand,
}

#[derive(Debug, Subcommand)]
pub enum ResourceCommand {
    /// List all records
    #[command(alias = "ls")]
    List,

    /// Show one record
    Get {
        /// Natural key (name, hostname, serial number or IMSI)
        key: String,
    },

    /// Create a record
    Create(FormArgs),

    /// Update a record (the key itself cannot change)
    Update {
        /// Natural key of the record to update
        key: String,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Natural key of the record to delete
        key: String,
    },

    /// Describe the editable fields and their ids
    Fields,
}

/// Ways of supplying form values to create/update.
///
/// Sources layer in order: existing record (update only), `--from-file`,
/// `--set`, then interactive prompts.
#[derive(Debug, Args)]
pub struct FormArgs {
    /// Set a field: --set id=value (repeat for lists, e.g. one IMSI each)
    #[arg(long = "set", value_name = "ID=VALUE")]
    pub set: Vec<String>,

    /// Read the raw API payload from a JSON file
    #[arg(long, value_name = "PATH")]
    pub from_file: Option<PathBuf>,

    /// Prompt for every field
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key (server, config_base, subscriber_base, ca_cert, insecure, timeout)
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
