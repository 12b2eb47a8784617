//! Run command - process a whole archive into a workbook.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use invozip_core::job;

use super::load_config;

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Input zip archive of invoice PDFs
    #[arg(required = true)]
    input: PathBuf,

    /// Directory receiving the workbook (also hosts the scratch dir)
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Workbook file name, overriding the configured one
    #[arg(long)]
    name: Option<String>,
}

pub fn run(args: RunArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let mut config = load_config(config_path)?;
    if let Some(name) = args.name {
        config.output.workbook_name = name;
    }

    if !args.input.exists() {
        anyhow::bail!("Input archive not found: {}", args.input.display());
    }

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );

    let report = job::run_with_progress(
        &args.input,
        &args.output_dir,
        &config,
        |index, total, document| {
            pb.set_length(total as u64);
            pb.set_position(index as u64);
            let name = document
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            pb.set_message(name);
        },
    )?;
    pb.finish_with_message("Done");

    println!(
        "{} Workbook written to {}",
        style("✓").green(),
        report.workbook_path.display()
    );
    println!("{}", report.stats);

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
