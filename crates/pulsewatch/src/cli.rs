//! Clap derive structures for the `pulsewatch` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use pulsewatch_api::models::Platform;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// pulsewatch -- CLI for the social media monitoring service
#[derive(Debug, Parser)]
#[command(
    name = "pulsewatch",
    version,
    about = "Inspect and control a social media monitoring service",
    long_about = "A CLI for the social media monitoring service: browse collected \n\
        posts, watch the collection loop, record manual entries, and manage \n\
        what the collectors track.",
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
    /// Service URL (overrides the config file)
    #[arg(long, short = 'u', env = "PULSEWATCH_URL", global = true)]
    pub url: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "PULSEWATCH_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
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

    /// Request timeout in seconds
    #[arg(long, env = "PULSEWATCH_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
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
    /// Plain text, one value per line (scripting)
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
    /// Browse collected posts
    #[command(alias = "p")]
    Posts(PostsArgs),

    /// Show aggregate post statistics
    #[command(alias = "st")]
    Stats,

    /// Control and watch the collection loop
    #[command(alias = "mon", alias = "m")]
    Monitoring(MonitoringArgs),

    /// Record and manage manual entries
    Manual(ManualArgs),

    /// View and update what the collectors track
    #[command(alias = "cfg")]
    Config(ConfigArgs),

    /// Generate and fetch reports
    Reports(ReportsArgs),
}

// ── Posts ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub command: PostsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PostsCommand {
    /// List posts, filtered and paginated
    #[command(alias = "ls")]
    List(PostsListArgs),

    /// List posts collected in the last N days
    Recent {
        /// How many days back to look
        #[arg(long, default_value = "7")]
        days: u32,

        /// Maximum number of posts
        #[arg(long, default_value = "20")]
        limit: u32,
    },
}

#[derive(Debug, Args)]
pub struct PostsListArgs {
    /// Only posts from this platform (youtube, twitter, meta, ...)
    #[arg(long, short = 'P')]
    pub platform: Option<String>,

    /// Only posts of this type (video, tweet, ...)
    #[arg(long, short = 't')]
    pub post_type: Option<String>,

    /// Only posts by this author
    #[arg(long, short = 'a')]
    pub author: Option<String>,

    /// Page size (1-100)
    #[arg(long, short = 'l', default_value = "50")]
    pub limit: u32,

    /// Offset into the result set
    #[arg(long, default_value = "0")]
    pub offset: u32,
}

// ── Monitoring ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MonitoringArgs {
    #[command(subcommand)]
    pub command: MonitoringCommand,
}

#[derive(Debug, Subcommand)]
pub enum MonitoringCommand {
    /// Show the current monitoring status
    Status {
        /// Keep polling and print every status change
        #[arg(long, short = 'w')]
        watch: bool,

        /// Stop watching after this many seconds (with --watch)
        #[arg(long = "for", value_name = "SECONDS")]
        duration: Option<u64>,
    },

    /// Start the collection loop
    Start {
        /// Collection interval in minutes (1-1440)
        #[arg(long, short = 'i', default_value = "30")]
        interval: u32,
    },

    /// Stop the collection loop
    Stop,

    /// Trigger an immediate collection pass
    Fetch,
}

// ── Manual entries ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ManualArgs {
    #[command(subcommand)]
    pub command: ManualCommand,
}

#[derive(Debug, Subcommand)]
pub enum ManualCommand {
    /// List all manual entries
    #[command(alias = "ls")]
    List,

    /// Record a new manual entry
    Add {
        /// The post text
        text: String,

        /// Source platform
        #[arg(long, short = 'P', default_value = "other")]
        platform: Platform,

        /// Post author
        #[arg(long, short = 'a')]
        author: Option<String>,

        /// Post URL
        #[arg(long)]
        url: Option<String>,

        /// Comma-separated tags
        #[arg(long, short = 't')]
        tags: Option<String>,
    },

    /// Delete a manual entry
    #[command(alias = "delete")]
    Rm {
        /// Entry id
        id: String,
    },
}

// ── Service configuration ────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the service configuration snapshot
    Show,

    /// Replace the monitored keyword list
    Keywords {
        /// The new keyword list
        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// Replace the monitored YouTube channels (NAME=CHANNEL_ID pairs)
    Youtube {
        /// Channels as name=channel_id
        #[arg(required = true)]
        channels: Vec<String>,
    },

    /// Replace the monitored Twitter accounts
    Twitter {
        /// The new account list
        #[arg(required = true)]
        accounts: Vec<String>,
    },
}

// ── Reports ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    /// Generate the dashboard report artifact
    Dashboard,

    /// Generate the trends report artifact
    Trends,

    /// Fetch the pre-aggregated dashboard data
    Data,
}
