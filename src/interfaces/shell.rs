//! Interactive shell
//!
//! Reads one command per line from stdin. Notifications are printed as
//! they appear and a short marker is printed when one expires, so the
//! auto-dismiss timer stays visible while the prompt is idle.

use std::io::Write;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::app::{App, ShortenForm};
use crate::cli::{ShellCommand, ShellLine};
use crate::interfaces::cli::commands::list_recent;
use crate::interfaces::cli::{CliError, render_notification};

fn prompt() {
    print!("{} ", "shortlinker>".bold().cyan());
    let _ = std::io::stdout().flush();
}

fn print_welcome(app: &App) {
    println!(
        "{} {}",
        "shortlinker-client".bold().green(),
        format!("-> {}", app.endpoint()).dimmed()
    );
    println!(
        "  {}",
        "Commands: shorten <url> [-a alias] [-e days], recent, copy [n], clear, dismiss, quit"
            .dimmed()
    );
}

/// Run the shell until `quit` or end of input
pub async fn run_shell(mut app: App) -> Result<(), CliError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut notifications = app.notifications().subscribe();

    print_welcome(&app);
    prompt();

    loop {
        tokio::select! {
            changed = notifications.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = notifications.borrow_and_update().clone();
                match current {
                    Some(notification) => println!("\r{}", render_notification(&notification)),
                    None => println!("\r{}", "(notification cleared)".dimmed()),
                }
                prompt();
            }

            line = lines.next_line() => {
                let line = line.map_err(|e| CliError::CommandError(e.to_string()))?;
                let Some(line) = line else {
                    println!();
                    break;
                };
                if line.trim().is_empty() {
                    prompt();
                    continue;
                }

                let command = match ShellLine::parse_line(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        let _ = e.print();
                        prompt();
                        continue;
                    }
                };

                if command == ShellCommand::Quit {
                    break;
                }
                execute(&mut app, command).await;
                // Notifications raised by the command are printed by the watch branch
                if !notifications.has_changed().unwrap_or(false) {
                    prompt();
                }
            }
        }
    }

    debug!("Shell session finished");
    Ok(())
}

/// Errors are already surfaced as notifications by the app
async fn execute(app: &mut App, command: ShellCommand) {
    match command {
        ShellCommand::Shorten {
            url,
            alias,
            expires,
        } => {
            let form = ShortenForm {
                url,
                alias,
                expires_in_days: expires,
            };
            if let Ok(outcome) = app.submit(&form).await {
                println!("  {}", outcome.result.short_url.cyan().bold());
            }
        }
        ShellCommand::Recent => list_recent(app),
        ShellCommand::Copy { index: None } => {
            let _ = app.copy_result();
        }
        ShellCommand::Copy { index: Some(0) } => {
            println!("{} Positions start at 1", "ℹ".bold().blue());
        }
        ShellCommand::Copy { index: Some(n) } => {
            let _ = app.copy_recent(n - 1);
        }
        ShellCommand::Clear => {
            let _ = app.clear_history();
        }
        ShellCommand::Dismiss => app.dismiss_notification(),
        ShellCommand::Quit => {}
    }
}
