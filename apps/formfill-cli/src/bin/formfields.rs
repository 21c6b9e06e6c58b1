//! Extract form fields, nearby text labels and an example value map
//!
//! Usage: formfields [input.pdf] [combined.json] [example.json]

use anyhow::{bail, Result};
use clap::error::ErrorKind;
use clap::Parser;
use formfill_core::extract_file;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "formfields")]
#[command(version, about = "List PDF form fields with their labels and write an example value map")]
struct Args {
    /// PDF form to inspect
    #[arg(default_value = "input.pdf")]
    input: PathBuf,

    /// Output file for fields and labels
    #[arg(default_value = "fields_and_labels.json")]
    combined: PathBuf,

    /// Output file for the example value map
    #[arg(default_value = "fields_example.json")]
    example: PathBuf,
}

fn run(args: Args) -> Result<()> {
    if !args.input.exists() {
        bail!("File not found: {}", args.input.display());
    }

    let extraction = extract_file(&args.input)?;
    extraction.write(&args.combined, &args.example)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    formfill_cli::init_tracing();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
