//! Stageload CLI - join column definitions and data into a CSV delivery
//!
//! ```bash
//! stageload                         # Run the full pipeline over data/
//! stageload --separator ';'         # Override any part of the layout
//! stageload --preview               # Print joined records as JSON, write nothing
//! ```

use clap::Parser;
use stageload::{join, parse_columns, parse_data, run, EtlOptions};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "stageload")]
#[command(about = "Join pipe-delimited column definitions and data into a CSV delivery", long_about = None)]
struct Cli {
    /// Column-definition file
    #[arg(long, default_value = "data/source/SOURCECOLUMNS.txt")]
    columns: PathBuf,

    /// Data file
    #[arg(long, default_value = "data/source/SOURCEDATA.txt")]
    data: PathBuf,

    /// Encoding of the input files ("auto" to detect)
    #[arg(long, default_value = "utf-8")]
    encoding: String,

    /// Field separator of the input files
    #[arg(long, default_value_t = '|')]
    separator: char,

    /// Stage path the CSV is written to before delivery
    #[arg(long, default_value = "data/stage/joined_output.csv")]
    stage: PathBuf,

    /// Destination directory of the delivered CSV
    #[arg(long, default_value = "data/destination")]
    destination: PathBuf,

    /// Write the run summary as pretty JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Parse and join only, print records as JSON to stdout, write nothing
    #[arg(long)]
    preview: bool,

    /// Number of records printed with --preview
    #[arg(long, default_value = "10")]
    preview_rows: usize,
}

fn main() {
    let cli = Cli::parse();

    let options = EtlOptions {
        columns_path: cli.columns,
        data_path: cli.data,
        encoding: cli.encoding,
        separator: cli.separator,
        stage_path: cli.stage,
        destination_dir: cli.destination,
    };

    let result = if cli.preview {
        cmd_preview(&options, cli.preview_rows)
    } else {
        cmd_run(&options, cli.summary_json.as_deref())
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_run(options: &EtlOptions, summary: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🚚 Beginning the ETL process...");
    let report = run(options)?;

    if let Some(path) = summary {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        println!("💾 Summary written to: {}", path.display());
    }

    Ok(())
}

fn cmd_preview(options: &EtlOptions, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!(
        "📄 Previewing join of {} and {}",
        options.columns_path.display(),
        options.data_path.display()
    );

    let layout = parse_columns(&options.columns_path, &options.encoding, options.separator)?;
    let data = parse_data(&options.data_path, &options.encoding, options.separator)?;
    let records = join(&layout, &data)?;

    let shown = records.len().min(limit);
    eprintln!("   {} records, showing {}", records.len(), shown);

    println!("{}", serde_json::to_string_pretty(&records[..shown])?);
    Ok(())
}
