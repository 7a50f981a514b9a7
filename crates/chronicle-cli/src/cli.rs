use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use chronicle_core::VERSION;

/// Chronicle - planner, journal and password vault kept in a local store
#[derive(Parser)]
#[command(name = "chronicle")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the store file
    #[arg(short, long, global = true, env = "CHRONICLE_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the store will be created
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Byte ceiling for the store (unlimited when omitted)
    #[arg(long, value_name = "N")]
    pub budget_bytes: Option<u64>,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `usage` command
#[derive(Args)]
pub struct UsageArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// Destination file (`-` for stdout)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,
}

/// Arguments for the `import` command
#[derive(Args)]
pub struct ImportArgs {
    /// Backup file to import (`-` for stdin)
    #[arg(value_name = "FILE")]
    pub file: String,
}

/// Arguments for the `clear` command
#[derive(Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct EventsArgs {
    #[command(subcommand)]
    pub command: EventsSubcommand,
}

#[derive(Subcommand)]
pub enum EventsSubcommand {
    /// List events
    List(EventsListArgs),
    /// Add an event
    Add(EventsAddArgs),
    /// Delete an event by ID
    Delete(IdArgs),
    /// Dismiss an event's reminder
    Dismiss(IdArgs),
}

/// Arguments for `events list`
#[derive(Args)]
pub struct EventsListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Only journal entries
    #[arg(long)]
    pub journal: bool,
}

/// Arguments for `events add`
#[derive(Args)]
pub struct EventsAddArgs {
    /// Event title
    #[arg(long)]
    pub title: String,

    /// Start date (YYYY-MM-DD, or "today")
    #[arg(long)]
    pub start: String,

    /// End date (defaults to the start date)
    #[arg(long)]
    pub end: Option<String>,

    /// Category name (defaults to the first category)
    #[arg(long)]
    pub category: Option<String>,

    /// Notes
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Mark as a journal entry
    #[arg(long)]
    pub journal: bool,

    /// Reminder (none, same-day, 1-day-before, 3-days-before, 1-week-before)
    #[arg(long, default_value = "none")]
    pub reminder: String,
}

/// Arguments carrying a single ID
#[derive(Args)]
pub struct IdArgs {
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `reminders` command
#[derive(Args)]
pub struct RemindersArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Evaluate reminders on this date instead of today
    #[arg(long, value_name = "DATE")]
    pub on: Option<String>,
}

#[derive(Args)]
pub struct CredentialsArgs {
    #[command(subcommand)]
    pub command: CredentialsSubcommand,
}

#[derive(Subcommand)]
pub enum CredentialsSubcommand {
    /// List stored credentials
    List(CredentialsListArgs),
    /// Add a credential
    Add(CredentialsAddArgs),
    /// Delete a credential by ID
    Delete(IdArgs),
}

/// Arguments for `credentials list`
#[derive(Args)]
pub struct CredentialsListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print passwords instead of masking them
    #[arg(long)]
    pub show_passwords: bool,
}

/// Arguments for `credentials add`
#[derive(Args)]
pub struct CredentialsAddArgs {
    /// Service name
    #[arg(long)]
    pub service: String,

    /// Login email
    #[arg(long)]
    pub email: String,

    /// Password (stored in plaintext)
    #[arg(long)]
    pub password: String,

    /// Category name (defaults to the first category)
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesSubcommand,
}

#[derive(Subcommand)]
pub enum CategoriesSubcommand {
    /// List categories
    List(CategoriesListArgs),
    /// Add a category
    Add(CategoriesAddArgs),
    /// Rename or recolor a category
    Update(CategoriesUpdateArgs),
    /// Delete a category by name
    Delete(NameArgs),
}

/// Arguments for `categories list`
#[derive(Args)]
pub struct CategoriesListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `categories add`
#[derive(Args)]
pub struct CategoriesAddArgs {
    /// Category name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Color token (defaults to the next unused palette color)
    #[arg(long)]
    pub color: Option<String>,
}

/// Arguments for `categories update`
#[derive(Args)]
pub struct CategoriesUpdateArgs {
    /// Current category name
    #[arg(value_name = "NAME")]
    pub name: String,

    /// New name
    #[arg(long)]
    pub rename: Option<String>,

    /// New color token
    #[arg(long)]
    pub color: Option<String>,
}

/// Arguments carrying a single name
#[derive(Args)]
pub struct NameArgs {
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Show the profile
    Show(ProfileShowArgs),
    /// Update profile fields
    Set(ProfileSetArgs),
}

/// Arguments for `profile show`
#[derive(Args)]
pub struct ProfileShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `profile set`
#[derive(Args)]
pub struct ProfileSetArgs {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Role or title
    #[arg(long)]
    pub role: Option<String>,

    /// Image file to use as the avatar (500KB max)
    #[arg(long, value_name = "FILE", conflicts_with = "clear_avatar")]
    pub avatar: Option<PathBuf>,

    /// Remove the avatar
    #[arg(long)]
    pub clear_avatar: bool,

    /// AI assistant API key
    #[arg(long, value_name = "KEY", conflicts_with = "clear_ai_key")]
    pub ai_key: Option<String>,

    /// Remove the AI assistant API key
    #[arg(long)]
    pub clear_ai_key: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write config and create an empty store
    Init(InitArgs),

    /// Show storage usage against the budget
    Usage(UsageArgs),

    /// Export every entity to a backup file
    Export(ExportArgs),

    /// Import a backup file (merges present entities)
    Import(ImportArgs),

    /// Delete all stored data
    Clear(ClearArgs),

    /// Manage events and journal entries
    Events(EventsArgs),

    /// Show reminders that are due
    Reminders(RemindersArgs),

    /// Manage the password vault
    Credentials(CredentialsArgs),

    /// Manage categories
    Categories(CategoriesArgs),

    /// Show or edit the user profile
    Profile(ProfileArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
