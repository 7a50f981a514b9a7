//! Chronicle CLI - planner, journal and password vault kept in a local store
//!
//! This is the command-line interface for Chronicle. It drives the
//! `chronicle-core` synchronizer over a file-backed store.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chronicle_core::VERSION;

use crate::app::AppContext;
use crate::cli::{
    CategoriesSubcommand, Cli, Commands, CredentialsSubcommand, EventsSubcommand,
    ProfileSubcommand,
};
use crate::commands::{categories, credentials, events, init, misc, profile, storage};
use crate::errors::{exit_code_for, hint_for};
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        tracing::debug!(error = ?e, "command failed");
        let ui_ctx = ctx.ui_context(false);
        let error_msg = format!("{}", e);
        let (message, hint) = match error_msg.split_once("\nHint:") {
            Some((message, rest)) => (message.to_string(), Some(format!("Hint:{}", rest))),
            None => (error_msg, hint_for(&e)),
        };
        print_error(&ui_ctx, &message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Log to stderr. `RUST_LOG` wins unless `--verbose` asks for debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Usage(args)) => {
            storage::handle_usage(ctx, args)?;
        }
        Some(Commands::Export(args)) => {
            storage::handle_export(ctx, args)?;
        }
        Some(Commands::Import(args)) => {
            storage::handle_import(ctx, args)?;
        }
        Some(Commands::Clear(args)) => {
            storage::handle_clear(ctx, args)?;
        }
        Some(Commands::Events(args)) => match &args.command {
            EventsSubcommand::List(list_args) => events::handle_list(ctx, list_args)?,
            EventsSubcommand::Add(add_args) => events::handle_add(ctx, add_args)?,
            EventsSubcommand::Delete(id_args) => events::handle_delete(ctx, id_args)?,
            EventsSubcommand::Dismiss(id_args) => events::handle_dismiss(ctx, id_args)?,
        },
        Some(Commands::Reminders(args)) => {
            events::handle_reminders(ctx, args)?;
        }
        Some(Commands::Credentials(args)) => match &args.command {
            CredentialsSubcommand::List(list_args) => credentials::handle_list(ctx, list_args)?,
            CredentialsSubcommand::Add(add_args) => credentials::handle_add(ctx, add_args)?,
            CredentialsSubcommand::Delete(id_args) => credentials::handle_delete(ctx, id_args)?,
        },
        Some(Commands::Categories(args)) => match &args.command {
            CategoriesSubcommand::List(list_args) => categories::handle_list(ctx, list_args)?,
            CategoriesSubcommand::Add(add_args) => categories::handle_add(ctx, add_args)?,
            CategoriesSubcommand::Update(update_args) => {
                categories::handle_update(ctx, update_args)?
            }
            CategoriesSubcommand::Delete(name_args) => categories::handle_delete(ctx, name_args)?,
        },
        Some(Commands::Profile(args)) => match &args.command {
            ProfileSubcommand::Show(show_args) => profile::handle_show(ctx, show_args)?,
            ProfileSubcommand::Set(set_args) => profile::handle_set(ctx, set_args)?,
        },
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("Chronicle v{}", VERSION);
            println!("\nQuickstart:");
            println!("  chronicle init");
            println!("  chronicle events add --title \"Trip\" --start 2024-06-01");
            println!("  chronicle reminders");
            println!("  chronicle export");
            println!("\nRun `chronicle --help` for full usage.");
        }
    }

    Ok(())
}
