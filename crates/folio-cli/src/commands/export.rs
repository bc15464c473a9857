//! Export command
//!
//! Export an HTML document through the format pipeline.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use folio_core::config::FolioConfig;
use folio_core::content::Workspace;
use folio_core::export::{
    Delivery, ExportOptions, ExportOrchestrator, ExportReceipt, SerializerSet, TextPageRenderer,
};
use folio_core::format::FormatRegistry;
use folio_core::types::PanelSide;
use folio_storage::FileSystemDelivery;

use super::read_markup;
use crate::progress::TerminalReporter;

/// Editor panel selector
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PanelArg {
    Primary,
    Secondary,
}

impl From<PanelArg> for PanelSide {
    fn from(arg: PanelArg) -> Self {
        match arg {
            PanelArg::Primary => PanelSide::Primary,
            PanelArg::Secondary => PanelSide::Secondary,
        }
    }
}

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Format id (see `folio formats`); prompts when omitted
    #[arg(long, short)]
    pub format: Option<String>,

    /// HTML input file (stdin if not specified)
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// Second HTML file; exports both panels together
    #[arg(long)]
    pub secondary: Option<PathBuf>,

    /// Swap the two panels before exporting
    #[arg(long, requires = "secondary")]
    pub swap: bool,

    /// Append the secondary panel to the primary one before exporting
    #[arg(long, requires = "secondary", conflicts_with = "swap")]
    pub merge: bool,

    /// Save one panel's raw HTML instead of exporting a format
    #[arg(long, value_enum, conflicts_with = "format")]
    pub panel: Option<PanelArg>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Base filename, without extension
    #[arg(long)]
    pub filename: Option<String>,

    /// Document title
    #[arg(long)]
    pub title: Option<String>,

    /// Document author
    #[arg(long)]
    pub author: Option<String>,

    /// Skip the options and use a timestamped filename
    #[arg(long, conflicts_with_all = ["filename", "title", "author"])]
    pub quick: bool,

    /// Print the export receipt as JSON
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl ExportArgs {
    fn options(&self) -> ExportOptions {
        let mut options = ExportOptions::new();
        if let Some(filename) = &self.filename {
            options = options.filename(filename.clone());
        }
        if let Some(title) = &self.title {
            options = options.title(title.clone());
        }
        if let Some(author) = &self.author {
            options = options.author(author.clone());
        }
        options
    }
}

/// Execute the export command
pub fn execute(args: ExportArgs, config_path: Option<&Path>) -> Result<()> {
    use colored::Colorize;

    let config = super::load_config(config_path)?;
    let workspace = load_workspace(&args)?;
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.export.output_dir.clone());
    let mut delivery = FileSystemDelivery::new(&output_dir);

    if let Some(panel) = args.panel {
        let side = PanelSide::from(panel);
        let payload = workspace.panel_payload(side, Utc::now());
        let path = delivery
            .save(&payload)
            .with_context(|| format!("Failed to save {} panel", side))?;
        eprintln!("{} Saved {} panel to {}", "✓".green(), side, path.display());
        return Ok(());
    }

    let registry = Arc::new(FormatRegistry::builtin());
    let format_id = match args
        .format
        .clone()
        .or_else(|| config.export.default_format.clone())
    {
        Some(id) => id,
        None => match pick_format(&registry, args.input.is_some())? {
            Some(id) => id,
            None => {
                eprintln!("Export cancelled.");
                return Ok(());
            }
        },
    };

    let receipt = run_export(&args, &config, registry, delivery, &format_id, &workspace)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        eprintln!(
            "{} Exported to {} ({} bytes, {})",
            "✓".green(),
            output_dir.join(&receipt.filename).display(),
            receipt.size.to_string().yellow(),
            receipt.media_type.dimmed()
        );
    }

    Ok(())
}

fn load_workspace(args: &ExportArgs) -> Result<Workspace> {
    let primary = read_markup(args.input.as_deref())?;
    let mut workspace = match &args.secondary {
        Some(path) => Workspace::dual(primary, read_markup(Some(path))?),
        None => Workspace::single(primary),
    };

    if args.swap {
        workspace.swap_panels();
    }
    if args.merge {
        workspace.merge_panels();
    }
    Ok(workspace)
}

fn run_export(
    args: &ExportArgs,
    config: &FolioConfig,
    registry: Arc<FormatRegistry>,
    delivery: FileSystemDelivery,
    format_id: &str,
    workspace: &Workspace,
) -> Result<ExportReceipt> {
    let renderer = TextPageRenderer::new(config.page.layout());
    let serializers = SerializerSet::with_page_renderer(registry, Box::new(renderer));
    let reporter = TerminalReporter::new(!args.no_progress && console::user_attended_stderr());

    let mut orchestrator = ExportOrchestrator::new(serializers, reporter, delivery)
        .with_schedule(config.export.schedule())
        .with_defaults(config.export.defaults());

    let ticket = if args.quick {
        orchestrator.quick_export(format_id, Utc::now())?
    } else {
        orchestrator.select_format(format_id)?;
        orchestrator.start_export(args.options())?
    };

    let receipt = orchestrator.run_to_completion(ticket, workspace, std::thread::sleep)?;
    Ok(receipt)
}

/// Interactive format picker; `None` when dismissed
fn pick_format(registry: &FormatRegistry, input_from_file: bool) -> Result<Option<String>> {
    if !input_from_file || !console::user_attended_stderr() {
        bail!("No format specified. Use --format <ID> (see 'folio formats')");
    }

    let formats: Vec<_> = registry.iter().collect();
    let items: Vec<String> = formats
        .iter()
        .map(|f| format!("{:<5} {} (.{})", f.display_name, f.description, f.extension))
        .collect();

    let selection = dialoguer::Select::new()
        .with_prompt("Export format (Esc to cancel)")
        .items(&items)
        .default(0)
        .interact_on_opt(&console::Term::stderr())?;

    Ok(selection.map(|index| formats[index].id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ExportArgs,
    }

    #[test]
    fn test_options_from_args() {
        let cli = TestCli::parse_from(["folio", "-f", "txt", "--title", "Notes", "--author", "Ada"]);
        let options = cli.args.options();
        assert_eq!(options.title.as_deref(), Some("Notes"));
        assert_eq!(options.author.as_deref(), Some("Ada"));
        assert_eq!(options.filename, None);
    }

    #[test]
    fn test_quick_conflicts_with_title() {
        let result = TestCli::try_parse_from(["folio", "-f", "txt", "--quick", "--title", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_swap_requires_secondary() {
        assert!(TestCli::try_parse_from(["folio", "--swap"]).is_err());
        assert!(TestCli::try_parse_from(["folio", "--secondary", "b.html", "--swap"]).is_ok());
    }

    #[test]
    fn test_panel_values() {
        assert!(PanelArg::from_str("primary", true).is_ok());
        assert!(PanelArg::from_str("secondary", true).is_ok());
        assert_eq!(PanelSide::from(PanelArg::Secondary), PanelSide::Secondary);
    }

    #[test]
    fn test_picker_requires_terminal_input() {
        let registry = FormatRegistry::builtin();
        assert!(pick_format(&registry, false).is_err());
    }
}
