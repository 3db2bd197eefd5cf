//! `bracket strip` command implementation.

use clap::Args;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the strip command.
#[derive(Args)]
pub(crate) struct StripArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Also remove raw HTML tags and comments.
    #[arg(long)]
    html: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl StripArgs {
    /// Execute the strip command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or input fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let adapter = self.source.adapter()?;
        let input = self.source.read_input()?;
        let text = adapter.strip(&input, self.html)?;
        Output::new().result(&text)?;
        Ok(())
    }
}
