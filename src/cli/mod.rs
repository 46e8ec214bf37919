//! CLI module for instance-flavor-check
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `check` - Determine the instance flavor (default)
//! - `cache` - Inspect the cached flavor
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Determine the flavor; the exit status is 10 (PAYG), 11 (BYOS) or 12 (undetermined)
//! instance-flavor-check
//!
//! # Same, as JSON
//! instance-flavor-check check --json
//!
//! # Generate shell completions
//! instance-flavor-check completions bash > /etc/bash_completion.d/instance-flavor-check
//! ```

pub mod cache;
pub mod check;
pub mod completions;
pub mod config;
pub mod output;

pub use cache::handle_cache_show;
pub use check::{handle_check, load_config_with_overrides};
pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::{LogFormat, DEFAULT_CONFIG_PATH};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Determine whether this cloud instance is PAYG or BYOS
#[derive(Parser, Debug)]
#[command(
    name = "instance-flavor-check",
    version,
    about = "Determine whether a cloud instance is PAYG or BYOS"
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "FLAVOR_CHECK_CONFIG",
        default_value = DEFAULT_CONFIG_PATH
    )]
    pub config: PathBuf,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, json)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Determine the instance flavor
    Check(CheckArgs),
    /// Inspect the cached flavor
    #[command(subcommand)]
    Cache(CacheCommands),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Check(CheckArgs::default())
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Override the cache file location
    #[arg(long)]
    pub cache_path: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheCommands {
    /// Print the cached flavor without contacting any server
    Show(CacheShowArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CacheShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Override the cache file location
    #[arg(long)]
    pub cache_path: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "instance-flavor-check.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_defaults_to_no_command() {
        let cli = Cli::try_parse_from(["instance-flavor-check"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.log_level.is_none());
        assert!(matches!(cli.command.unwrap_or_default(), Commands::Check(args) if !args.json));
    }

    #[test]
    fn test_cli_parse_check_with_options() {
        let cli = Cli::try_parse_from([
            "instance-flavor-check",
            "check",
            "--json",
            "--cache-path",
            "/tmp/flavor",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Check(args)) => {
                assert!(args.json);
                assert_eq!(args.cache_path, Some(PathBuf::from("/tmp/flavor")));
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "instance-flavor-check",
            "check",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "-c",
            "custom.toml",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
    }

    #[test]
    fn test_cli_parse_invalid_log_format() {
        assert!(Cli::try_parse_from(["instance-flavor-check", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn test_cli_parse_cache_show() {
        let cli = Cli::try_parse_from(["instance-flavor-check", "cache", "show", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Cache(CacheCommands::Show(args))) => assert!(args.json),
            _ => panic!("Expected Cache Show command"),
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["instance-flavor-check", "config", "init", "--force"]).unwrap();
        match cli.command {
            Some(Commands::Config(ConfigCommands::Init(args))) => {
                assert!(args.force);
                assert_eq!(args.output, PathBuf::from("instance-flavor-check.toml"));
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_cli_parse_completions() {
        let cli = Cli::try_parse_from(["instance-flavor-check", "completions", "zsh"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Completions(_))));
    }
}
