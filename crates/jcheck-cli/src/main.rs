//! jcheck CLI tool.
//!
//! Usage:
//! ```bash
//! jcheck check [OPTIONS] [PATH]
//! jcheck list-rules
//! jcheck init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Static checks for Java sources
#[derive(Parser)]
#[command(name = "jcheck")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "JCHECK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run checks
    Check {
        /// Path to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules, by name or code (comma-separated)
        #[arg(long)]
        rules: Option<String>,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Rule preset, overriding the configuration file
        #[arg(long)]
        preset: Option<String>,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Source excerpts rendered through miette.
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            rules,
            exclude,
            preset,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            let options = commands::check::CheckOptions {
                format,
                rules,
                exclude,
                preset,
            };
            let failed = commands::check::run(&path, &options, &source)?;
            if failed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_defaults_to_current_directory_and_text() {
        let cli = Cli::try_parse_from(["jcheck", "check"]).unwrap();
        match cli.command {
            Commands::Check {
                path,
                format,
                rules,
                preset,
                ..
            } => {
                assert_eq!(path, PathBuf::from("."));
                assert_eq!(format, OutputFormat::Text);
                assert!(rules.is_none());
                assert!(preset.is_none());
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from([
            "jcheck", "check", "src", "--format", "pretty", "-e", "**/gen/**", "-c", "ci.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
        match cli.command {
            Commands::Check {
                format, exclude, ..
            } => {
                assert_eq!(format, OutputFormat::Pretty);
                assert_eq!(exclude, vec!["**/gen/**".to_string()]);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["jcheck", "check", "--format", "xml"]).is_err());
    }
}
