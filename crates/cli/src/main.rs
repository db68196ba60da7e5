//! Backoffice CLI - settings store inspection and maintenance.
//!
//! # Usage
//!
//! ```bash
//! # Print all settings, or one section
//! bo-cli settings show
//! bo-cli settings show --section branding
//!
//! # Replace one section from a JSON file
//! bo-cli settings set branding --file branding.json
//!
//! # Restore every section to its default
//! bo-cli settings reset
//!
//! # Manage console users
//! bo-cli users add -e owner@example.com -r owner
//! bo-cli users role -i 0 -r staff
//! bo-cli users remove -i 0
//!
//! # Run admin database migrations
//! bo-cli migrate
//! ```
//!
//! The storage backend is chosen the same way as the admin server: a
//! database URL selects `PostgreSQL`, otherwise the JSON file is used.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bo-cli")]
#[command(author, version, about = "Backoffice settings CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit store settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Manage console users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Run admin database migrations
    Migrate,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print settings as JSON
    Show {
        /// Only print this section
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Replace one section with the contents of a JSON file
    Set {
        /// Section name (general, branding, integrations, notifications, users)
        section: String,

        /// JSON file holding the new section value
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Restore all settings to their defaults
    Reset,
}

#[derive(Subcommand)]
enum UsersAction {
    /// Invite a new console user
    Add {
        /// User email address
        #[arg(short, long)]
        email: String,

        /// User role (`owner`, `staff`, `viewer`)
        #[arg(short, long, default_value = "staff")]
        role: String,
    },
    /// Remove the user at a position
    Remove {
        /// Zero-based position in the user list
        #[arg(short, long)]
        index: usize,
    },
    /// Change the role of the user at a position
    Role {
        /// Zero-based position in the user list
        #[arg(short, long)]
        index: usize,

        /// New role (`owner`, `staff`, `viewer`)
        #[arg(short, long)]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Settings { action } => {
            let store = commands::open_store().await?;
            match action {
                SettingsAction::Show { section } => {
                    let json = commands::settings::show(&store, section.as_deref()).await?;
                    print_json(&json);
                }
                SettingsAction::Set { section, file } => {
                    commands::settings::set_from_file(&store, &section, &file).await?;
                }
                SettingsAction::Reset => commands::settings::reset(&store).await?,
            }
        }
        Commands::Users { action } => {
            let store = commands::open_store().await?;
            match action {
                UsersAction::Add { email, role } => {
                    commands::users::add(&store, &email, &role).await?;
                }
                UsersAction::Remove { index } => commands::users::remove(&store, index).await?,
                UsersAction::Role { index, role } => {
                    commands::users::change_role(&store, index, &role).await?;
                }
            }
        }
        Commands::Migrate => commands::migrate::run().await?,
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => tracing::error!("Failed to format settings: {e}"),
    }
}
