//! ox-sheets CLI - inspect and rewrite spreadsheet packages

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ox_sheets::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "oxs")]
#[command(
    author,
    version,
    about = "Inspect and rewrite Office Open XML spreadsheets"
)]
struct Cli {
    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a spreadsheet
    Info {
        /// Input spreadsheet file
        input: PathBuf,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input spreadsheet file
        input: PathBuf,
    },

    /// Print every non-empty cell with its kind and text
    Dump {
        /// Input spreadsheet file
        input: PathBuf,

        /// Sheet index to dump (0-based, default: all)
        #[arg(short, long)]
        sheet: Option<usize>,

        /// Emit the decoded model as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Decode a spreadsheet and encode it again
    Rewrite {
        /// Input spreadsheet file
        input: PathBuf,

        /// Output file
        output: PathBuf,
    },
}

/// Writes log records to stderr so they never mix with command output
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{}: {}",
                record.level().as_str().to_lowercase(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

fn init_logging(verbose: bool) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        });
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => show_info(&input),
        Commands::Sheets { input } => list_sheets(&input),
        Commands::Dump { input, sheet, json } => dump(&input, sheet, json),
        Commands::Rewrite { input, output } => rewrite(&input, &output),
    }
}

fn open_workbook(input: &Path) -> Result<Workbook> {
    let package =
        Package::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;
    package
        .into_workbook()
        .with_context(|| format!("'{}' is not a spreadsheet", input.display()))
}

fn show_info(input: &Path) -> Result<()> {
    let package =
        Package::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    println!("File: {}", input.display());
    println!("Kind: {}", package.kind());

    let Some(workbook) = package.workbook() else {
        return Ok(());
    };
    println!("Sheets: {}", workbook.sheet_count());
    println!("Shared text entries: {}", workbook.shared_text().len());

    for (i, sheet) in workbook.worksheets().enumerate() {
        println!();
        println!("  Sheet {}: \"{}\"", i, sheet.name());
        println!(
            "    Grid: {} rows x {} columns",
            sheet.row_count(),
            sheet.column_count()
        );
        if sheet.freeze() != Freeze::None {
            println!("    Frozen: {:?}", sheet.freeze());
        }
        if let Some(filter) = sheet.filter() {
            println!(
                "    Filter: {}:{}",
                CellAddress::column_to_letters(filter.first_column),
                CellAddress::column_to_letters(filter.last_column)
            );
        }
    }

    Ok(())
}

fn list_sheets(input: &Path) -> Result<()> {
    let workbook = open_workbook(input)?;

    for (i, sheet) in workbook.worksheets().enumerate() {
        println!(
            "{}\t{}\t{}\t{}",
            i,
            sheet.id(),
            sheet.relationship_id(),
            sheet.name()
        );
    }

    Ok(())
}

fn dump(input: &Path, sheet_idx: Option<usize>, json: bool) -> Result<()> {
    let workbook = open_workbook(input)?;

    let sheets: Vec<(usize, &Worksheet)> = match sheet_idx {
        Some(i) => {
            let sheet = workbook
                .worksheet(i)
                .with_context(|| format!("Sheet index {} not found", i))?;
            vec![(i, sheet)]
        }
        None => workbook.worksheets().enumerate().collect(),
    };

    let mut stdout = io::stdout().lock();

    if json {
        let value = match sheets.as_slice() {
            [(_, sheet)] if sheet_idx.is_some() => serde_json::json!({
                "worksheet": sheet,
                "shared_text": workbook.shared_text(),
            }),
            _ => serde_json::to_value(&workbook).context("Failed to serialize workbook")?,
        };
        serde_json::to_writer_pretty(&mut stdout, &value).context("Failed to write JSON")?;
        writeln!(stdout).context("Failed to write to stdout")?;
        return Ok(());
    }

    for (i, sheet) in sheets {
        writeln!(stdout, "== Sheet {}: \"{}\"", i, sheet.name())
            .context("Failed to write to stdout")?;

        for (row, col, cell) in sheet.iter_cells() {
            if cell.expression().is_some_and(Expression::is_placeholder) {
                continue;
            }
            let text = cell
                .display_text(workbook.shared_text())
                .with_context(|| format!("Sheet {} row {} column {}", i, row + 1, col + 1))?
                .unwrap_or_default();
            let address = CellAddress::new(row as u32, col as u16);
            writeln!(stdout, "{}\t{}\t{}", address, cell.kind(), text)
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

fn rewrite(input: &Path, output: &Path) -> Result<()> {
    let mut package =
        Package::open(input).with_context(|| format!("Failed to open '{}'", input.display()))?;

    package
        .write_to(output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    let sheets = package.workbook().map_or(0, Workbook::sheet_count);
    eprintln!("Wrote {} sheets to '{}'", sheets, output.display());
    Ok(())
}
