//! CLI interface module
//!
//! This module runs the one-shot commands of shortlinker-client.

pub mod commands;

use std::fmt;

use colored::Colorize;

use crate::app::App;
use crate::cli::{Commands, ConfigCommands};
use crate::config::get_config;
use crate::errors::ClientError;
use crate::models::LinkRecord;
use crate::notification::{Notification, NotificationLevel};
use commands::{clear_history, config_generate, copy_link, list_recent, shorten_url};

#[derive(Debug)]
pub enum CliError {
    ClientError(ClientError),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::ClientError(e) => format!("{} ({})", e.user_message(), e.code()),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        match self {
            CliError::ClientError(e) => format!(
                "{} {} {}",
                "✗".red().bold(),
                e.user_message().white(),
                format!("[{} {}]", e.code(), e.error_type()).dimmed()
            ),
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        CliError::ClientError(err)
    }
}

/// Render a notification as a single terminal line
pub fn render_notification(notification: &Notification) -> String {
    let icon = match notification.level {
        NotificationLevel::Success => "✓".bold().green(),
        NotificationLevel::Info => "ℹ".bold().blue(),
        NotificationLevel::Error => "✗".bold().red(),
    };
    format!("{} {}", icon, notification.message)
}

/// Render one recent-links entry
pub fn render_record(position: usize, record: &LinkRecord) -> String {
    let mut parts = vec![format!(
        "{:>2}. {} -> {}",
        position,
        record.short.cyan(),
        record.original.blue().underline()
    )];

    match record.expires_at {
        Some(_) if record.is_expired() => parts.push("(expired)".dimmed().red().to_string()),
        Some(expires_at) => parts.push(
            format!("(expires: {})", expires_at.format("%Y-%m-%d %H:%M:%S UTC"))
                .dimmed()
                .yellow()
                .to_string(),
        ),
        None => {}
    }

    parts.push(
        record
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .dimmed()
            .to_string(),
    );
    parts.join(" ")
}

/// Print the active notification, if any
pub fn print_notification(app: &App) {
    if let Some(notification) = app.notifications().current() {
        println!("{}", render_notification(&notification));
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        // Generate doesn't need the client, handle it separately
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force),
        cmd => {
            let app = App::from_config(&get_config())?;
            run_with_app(app, cmd).await
        }
    }
}

/// Run a command against an already assembled app
pub async fn run_with_app(mut app: App, cmd: Commands) -> Result<(), CliError> {
    match cmd {
        Commands::Shorten {
            url,
            alias,
            expires,
            copy,
        } => shorten_url(&mut app, url, alias, expires, copy).await,

        Commands::Recent => {
            list_recent(&app);
            Ok(())
        }

        Commands::Copy { index } => copy_link(&mut app, index),

        Commands::Clear => clear_history(&mut app),

        Commands::Shell => super::shell::run_shell(app).await,

        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force),
    }
}
