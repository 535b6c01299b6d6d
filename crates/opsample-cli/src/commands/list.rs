//! Implementation of the `opsample list` command.

use opsample_adapters::SampleCatalog;

use crate::{
    cli::{ListArgs, ListFormat, OutputFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let catalog = SampleCatalog::builtin()?;
    let summaries = catalog.summaries();

    // JSON goes to stdout even in non-TTY pipes.
    if args.format == ListFormat::Json || output.format() == OutputFormat::Json {
        return output.json(&summaries);
    }

    output.header("Available samples:")?;
    for summary in &summaries {
        output.print(&format!(
            "  {:<12} {} [{} plugin, {} steps]",
            summary.name, summary.resource, summary.plugin, summary.steps
        ))?;
        output.print(&format!("  {:<12} {}", "", summary.description))?;
        output.print(&format!("  {:<12} -> {}", "", summary.workspace_dir))?;
    }

    Ok(())
}
