//! Fill a PDF form from a JSON value map
//!
//! Usage: formfill <input.pdf> <data.json> <output.pdf> [flatten]

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use formfill_cli::config::{parse_flatten_token, FillConfig};
use formfill_core::fill_file;
use formfill_core::output::to_json_pretty;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "formfill")]
#[command(version, about = "Fill PDF form fields from a JSON file and optionally flatten them")]
struct Args {
    /// PDF form to fill
    input: PathBuf,

    /// JSON object mapping field names to values
    values: PathBuf,

    /// Where to write the filled PDF
    output: PathBuf,

    /// true, 1, flatten or flat to lock fields and drop the form
    flatten: Option<String>,

    /// Anything after the flatten token is accepted and ignored
    #[arg(hide = true)]
    rest: Vec<String>,
}

fn run(args: Args) -> Result<()> {
    let config = FillConfig::from_env()?;
    let working_dir = std::env::current_dir().context("Cannot determine working directory")?;
    let flatten = parse_flatten_token(args.flatten.as_deref());
    if !args.rest.is_empty() {
        tracing::debug!("Ignoring extra arguments: {:?}", args.rest);
    }

    let options = config.fill_options(working_dir, flatten);
    let report = fill_file(&args.input, &args.values, &args.output, &options)?;

    tracing::info!(
        "Filled {} widgets ({} names matched)",
        report.widgets_filled,
        report.log.fields_in_json_and_pdf.len()
    );
    println!("{}", to_json_pretty(&report.log)?);
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
