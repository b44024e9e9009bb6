use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wordgrid::{
    ConversionReport, ConvertOptions, DetectMode, DetectOptions, OutputFormat, TableThresholds,
    convert_ocr_file, convert_ocr_json_to_string,
};

#[derive(Debug, Parser)]
#[command(
    name = "wordgrid",
    version,
    about = "Rebuild tables from OCR word boxes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Detect a table in an OCR JSON document and write it as TSV or CSV.
    Detect(DetectArgs),
}

#[derive(Debug, Args)]
struct DetectArgs {
    /// Input OCR JSON path.
    #[arg(short, long)]
    input: PathBuf,

    /// Output path. Writes to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Row grouping mode: fast or strict.
    #[arg(long, default_value = "fast")]
    mode: DetectMode,

    /// Output format: tsv or csv.
    #[arg(long, default_value = "tsv")]
    format: OutputFormat,

    /// CSV delimiter character.
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Minimum rows for a table.
    #[arg(long, default_value_t = wordgrid::DEFAULT_MIN_ROWS)]
    min_rows: usize,

    /// Minimum columns for a table.
    #[arg(long, default_value_t = wordgrid::DEFAULT_MIN_COLUMNS)]
    min_cols: usize,

    /// Minimum non-empty cells for a table.
    #[arg(long, default_value_t = wordgrid::DEFAULT_MIN_NON_EMPTY_CELLS)]
    min_cells: usize,

    /// Emit reading-order text when no table is detected.
    #[arg(long)]
    text_fallback: bool,

    /// Label recorded as the source image in reports.
    #[arg(long)]
    source: Option<String>,

    /// Print the detection report to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_options(args: &DetectArgs) -> Result<ConvertOptions> {
    if !args.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character");
    }

    Ok(ConvertOptions {
        detect: DetectOptions {
            mode: args.mode,
            thresholds: TableThresholds {
                min_rows: args.min_rows,
                min_columns: args.min_cols,
                min_non_empty_cells: args.min_cells,
            },
        },
        format: args.format,
        delimiter: args.delimiter as u8,
        source_label: args.source.clone(),
        fallback_text: args.text_fallback,
    })
}

fn log_report(report: &ConversionReport, verbose: bool) {
    if !verbose {
        return;
    }

    match report.rejection {
        None => eprintln!(
            "table: {} row(s) x {} column(s), {} non-empty cell(s), source={:?}",
            report.row_count, report.column_count, report.non_empty_cells, report.source
        ),
        Some(rejection) => eprintln!(
            "no table detected: {rejection} (source={:?})",
            report.source
        ),
    }
}

fn run_detect(args: &DetectArgs) -> Result<ConversionReport> {
    let options = parse_options(args)?;

    if let Some(output) = &args.output {
        return convert_ocr_file(&args.input, output, &options).with_context(|| {
            format!(
                "failed to convert '{}' into '{}'",
                args.input.display(),
                output.display()
            )
        });
    }

    let json = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read '{}'", args.input.display()))?;
    let (rendered, report) = convert_ocr_json_to_string(&json, &options)
        .with_context(|| format!("failed to convert '{}'", args.input.display()))?;

    if !rendered.is_empty() {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        if !rendered.ends_with('\n') {
            stdout.write_all(b"\n")?;
        }
    }
    Ok(report)
}

fn main() -> ExitCode {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wordgrid=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Detect(args) => match run_detect(&args) {
            Ok(report) => {
                log_report(&report, args.verbose);
                if report.is_table {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(2)
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
    }
}
