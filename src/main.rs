use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use sheet_extract::excel;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source Excel file path
    input: PathBuf,

    /// Name of the worksheet to extract (case-sensitive)
    sheet_name: String,

    /// Destination .xlsx path, overwritten if it already exists
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version go to stdout with a zero exit; everything
            // else is a usage error
            if err.use_stderr() {
                eprintln!("{err}");
                std::process::exit(1);
            }
            err.print()?;
            return Ok(());
        }
    };

    let mut workbook = excel::open_workbook(&cli.input)?;

    if !workbook.contains_sheet(&cli.sheet_name) {
        eprintln!("Error: sheet '{}' not found", cli.sheet_name);
        eprintln!("Available sheets: {}", workbook.sheet_names().join(", "));
        std::process::exit(1);
    }

    workbook.keep_only(&cli.sheet_name)?;
    workbook.save_as(&cli.output)?;

    println!(
        "Extracted sheet '{}' to {}",
        cli.sheet_name,
        cli.output.display()
    );

    Ok(())
}
