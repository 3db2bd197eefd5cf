//! `bracket render` command implementation.

use clap::Args;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Restrict this render to the given tags (repeatable).
    #[arg(short, long = "whitelist", value_name = "TAG")]
    whitelist: Vec<String>,

    /// Render markup as plain text.
    #[arg(long)]
    disable: bool,

    /// Enable verbose output (pipeline construction and markup warnings).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input or rendering fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let adapter = self.source.adapter()?;
        let input = self.source.read_input()?;

        adapter.before_render();
        let rendered =
            adapter.render_with_warnings(&input, self.whitelist.as_slice(), self.disable)?;
        if self.verbose {
            for warning in &rendered.warnings {
                output.warning(&format!("Warning: {warning}"));
            }
        }
        output.result(&rendered.html)?;
        Ok(())
    }
}
