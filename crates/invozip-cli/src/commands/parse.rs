//! Parse command - extract invoices from a single PDF document.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use invozip_core::{parse_document, Invoice, RunStats};

use super::load_config;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input PDF file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let mut stats = RunStats::new();
    let invoices = parse_document(&args.input, &config, &mut stats)?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&invoices)?,
        OutputFormat::Text => format_text(&invoices),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    eprintln!("{} {}", style("ℹ").blue(), stats);

    Ok(())
}

fn format_text(invoices: &[Invoice]) -> String {
    let mut output = String::new();

    for invoice in invoices {
        output.push_str(&format!("Invoice: {}\n", invoice.id));
        output.push_str(&format!("Kind: {:?}\n", invoice.kind));
        output.push_str(&format!(
            "Date: {}\n",
            invoice.origin_date.format("%Y.%m.%d")
        ));
        output.push_str(&format!(
            "Payment due: {}\n",
            invoice.due_date.format("%Y.%m.%d")
        ));
        output.push_str(&format!("Amount: {}\n", invoice.total));
        if let Some(reference) = invoice.reference_id {
            output.push_str(&format!("Corrects invoice: {}\n", reference));
        }

        output.push_str("Entries:\n");
        for entry in &invoice.entries {
            output.push_str(&format!(
                "  {} {} {} x{} = {}\n",
                entry.code, entry.description, entry.unit, entry.quantity, entry.line_total
            ));
        }
        output.push('\n');
    }

    output
}
