//! Bracket CLI - markup renderer.
//!
//! Provides commands for:
//! - `render`: Render bracket markup to HTML
//! - `strip`: Remove markup and print plain text

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, StripArgs};
use output::Output;

/// Bracket - markup renderer.
#[derive(Parser)]
#[command(name = "bracket", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render markup from a file or stdin to HTML.
    Render(RenderArgs),
    /// Strip markup from a file or stdin.
    Strip(StripArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::Strip(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Strip(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_args() {
        let cli = Cli::try_parse_from([
            "bracket", "render", "post.txt", "-w", "b", "--whitelist", "i", "--disable",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Render(_)));
    }

    #[test]
    fn test_parse_strip_args() {
        let cli = Cli::try_parse_from(["bracket", "strip", "--html", "--verbose"]).unwrap();
        assert!(matches!(cli.command, Commands::Strip(ref args) if args.verbose));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["bracket", "strip", "--whitelist", "b"]).is_err());
    }
}
