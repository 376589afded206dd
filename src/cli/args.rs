use clap::{Parser, Subcommand};

use crate::model::event::DocEvent;
use crate::model::webhook::AuthType;

#[derive(Parser, Debug)]
#[command(
    name = "hookline",
    version,
    about = "Webhook configuration and delivery from the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v for verbose, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode: suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List configured webhooks
    List,

    /// Show a webhook's fields (secrets masked)
    Show(NameArgs),

    /// Add a webhook
    Add(AddArgs),

    /// Remove a webhook
    Rm(NameArgs),

    /// Enable a webhook
    Enable(NameArgs),

    /// Disable a webhook
    Disable(NameArgs),

    /// Subscribe a webhook to a document event
    Subscribe(SubscribeArgs),

    /// Fire a document event at every subscribed webhook
    Fire(FireArgs),

    /// View the delivery log
    Log(LogArgs),

    /// Launch the interactive TUI
    Ui,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for commands addressing one webhook by name.
#[derive(clap::Args, Debug)]
pub struct NameArgs {
    /// Webhook name
    pub name: String,
}

/// Arguments for the `hookline add` command.
#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Name for the webhook (e.g., billing, crm-sync)
    pub name: String,

    /// Authentication type
    #[arg(long, value_enum, default_value = "none")]
    pub auth: AuthType,

    /// Username for Basic Authentication (prompted for if omitted)
    #[arg(long)]
    pub username: Option<String>,

    /// Password for Basic Authentication (prompted for if omitted)
    #[arg(long)]
    pub password: Option<String>,

    /// Client key for OAuth 1
    #[arg(long)]
    pub client_key: Option<String>,

    /// Client secret for OAuth 1 (prompted for if omitted)
    #[arg(long)]
    pub client_secret: Option<String>,

    /// Resource owner key for OAuth 1
    #[arg(long)]
    pub resource_owner_key: Option<String>,

    /// Resource owner secret for OAuth 1 (prompted for if omitted)
    #[arg(long)]
    pub resource_owner_secret: Option<String>,

    /// Create the webhook disabled
    #[arg(long)]
    pub disabled: bool,
}

/// Arguments for the `hookline subscribe` command.
#[derive(clap::Args, Debug)]
pub struct SubscribeArgs {
    /// Webhook name
    pub name: String,

    /// Document type to listen for (e.g., Invoice)
    pub document: String,

    /// Document event: create, save, submit, cancel, delete
    pub event: DocEvent,

    /// Resource URI the event is delivered to
    pub uri: String,
}

/// Arguments for the `hookline fire` command.
#[derive(clap::Args, Debug)]
pub struct FireArgs {
    /// Document type the event happened to (e.g., Invoice)
    pub document: String,

    /// Document event: create, save, submit, cancel, delete
    pub event: DocEvent,

    /// JSON payload delivered with the event
    #[arg(long)]
    pub data: Option<String>,
}

/// Arguments for the `hookline log` command.
#[derive(clap::Args, Debug)]
pub struct LogArgs {
    /// Maximum number of entries to show
    #[arg(short = 'n', long, default_value = "20")]
    pub count: usize,

    /// Clear the delivery log
    #[arg(long)]
    pub clear: bool,
}

/// Arguments for the `hookline completions` command.
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
