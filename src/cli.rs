//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for shortlinker-client using clap's derive macros,
//! plus the command set accepted inside the interactive shell.

use clap::{Parser, Subcommand};

/// shortlinker-client - shorten links from the terminal
#[derive(Parser)]
#[command(name = "shortlinker-client")]
#[command(version)]
#[command(about = "Shorten links from the terminal and keep a short local history", long_about = None)]
pub struct Cli {
    /// Path to the configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Shorten a URL
    ///
    /// A missing http:// or https:// scheme is filled in with https://
    Shorten {
        /// URL to shorten
        url: String,

        /// Custom alias (3-20 letters, numbers, '-' or '_')
        #[arg(long, short = 'a')]
        alias: Option<String>,

        /// Expire after this many days (1-365)
        #[arg(long, short = 'e')]
        expires: Option<String>,

        /// Copy the short URL to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// List recently shortened links
    Recent,

    /// Copy a recent link to the clipboard
    Copy {
        /// Position in the recent list (1 = newest)
        #[arg(default_value_t = 1)]
        index: usize,
    },

    /// Clear the recent links history
    Clear,

    /// Start an interactive session
    Shell,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite existing file without asking
        #[arg(long)]
        force: bool,
    },
}

/// One line typed into the interactive shell
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
#[command(name = "shell")]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands accepted by the interactive shell
#[derive(Subcommand, Debug, PartialEq)]
pub enum ShellCommand {
    /// Shorten a URL
    #[command(visible_alias = "s")]
    Shorten {
        url: String,
        #[arg(long, short = 'a')]
        alias: Option<String>,
        #[arg(long, short = 'e')]
        expires: Option<String>,
    },

    /// List recent links
    #[command(visible_alias = "ls")]
    Recent,

    /// Copy a link to the clipboard (no index: the last result)
    Copy { index: Option<usize> },

    /// Clear the recent links history
    Clear,

    /// Dismiss the current notification
    Dismiss,

    /// Leave the shell
    #[command(visible_alias = "exit")]
    Quit,
}

impl ShellLine {
    /// Parse a raw input line
    pub fn parse_line(line: &str) -> Result<ShellCommand, clap::Error> {
        Self::try_parse_from(line.split_whitespace()).map(|l| l.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shorten() {
        let cli = Cli::try_parse_from([
            "shortlinker-client",
            "shorten",
            "example.com",
            "--alias",
            "my-link",
            "-e",
            "7",
            "--copy",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Commands::Shorten {
                url: "example.com".to_string(),
                alias: Some("my-link".to_string()),
                expires: Some("7".to_string()),
                copy: true,
            }
        );
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["shortlinker-client", "recent", "-c", "custom.toml"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert_eq!(cli.command, Commands::Recent);
    }

    #[test]
    fn test_copy_default_index() {
        let cli = Cli::try_parse_from(["shortlinker-client", "copy"]).unwrap();
        assert_eq!(cli.command, Commands::Copy { index: 1 });
    }

    #[test]
    fn test_shell_line_parsing() {
        assert_eq!(
            ShellLine::parse_line("s example.com -a abc").unwrap(),
            ShellCommand::Shorten {
                url: "example.com".to_string(),
                alias: Some("abc".to_string()),
                expires: None,
            }
        );
        assert_eq!(ShellLine::parse_line("ls").unwrap(), ShellCommand::Recent);
        assert_eq!(
            ShellLine::parse_line("copy 2").unwrap(),
            ShellCommand::Copy { index: Some(2) }
        );
        assert_eq!(ShellLine::parse_line("exit").unwrap(), ShellCommand::Quit);
        assert!(ShellLine::parse_line("bogus").is_err());
    }
}
