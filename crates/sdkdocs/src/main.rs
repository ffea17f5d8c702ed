//! sdkdocs CLI - AzizbekID SDK documentation site.
//!
//! Provides commands for:
//! - `build`: Write the static site (one page per topic)
//! - `render`: Render a single page snapshot
//! - `topics`: List topics in sidebar order
//! - `theme`: Show or toggle the persisted theme preference
//! - `copy`: Copy a topic's code sample to the system clipboard

mod commands;
mod error;
mod headless;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CopyArgs, GlobalArgs, RenderArgs, ThemeArgs, TopicsArgs};
use output::Output;

/// sdkdocs - AzizbekID SDK documentation site.
#[derive(Parser)]
#[command(name = "sdkdocs", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the static documentation site.
    Build(BuildArgs),
    /// Render one page snapshot.
    Render(RenderArgs),
    /// List documentation topics.
    Topics(TopicsArgs),
    /// Show or toggle the theme preference.
    Theme(ThemeArgs),
    /// Copy a code sample to the clipboard.
    Copy(CopyArgs),
}

/// `--verbose` enables INFO, otherwise `RUST_LOG` applies, defaulting to WARN.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    match rust_log {
        Some(directives) if !directives.is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new("warn"),
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let filter = log_filter(cli.global.verbose, std::env::var("RUST_LOG").ok().as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let global = cli.global;
    let result = match cli.command {
        Commands::Build(args) => args.execute(&global),
        Commands::Render(args) => args.execute(&global),
        Commands::Topics(args) => args.execute(&global),
        Commands::Theme(args) => args.execute(&global),
        Commands::Copy(args) => args.execute(&global),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_defaults_to_warn() {
        assert_eq!(log_filter(false, None).to_string(), "warn");
        assert_eq!(log_filter(false, Some("")).to_string(), "warn");
    }

    #[test]
    fn test_log_filter_overrides() {
        assert_eq!(log_filter(true, Some("error")).to_string(), "info");
        assert_eq!(log_filter(false, Some("debug")).to_string(), "debug");
    }
}
