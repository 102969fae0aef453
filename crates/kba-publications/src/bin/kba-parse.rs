use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use kba_publications::{
    GlyphDecoding, PageSelection, ParseOptions, ParseReport, Publication, parse_pdf_file,
    write_csv, write_json,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "kba-parse",
    version,
    about = "Extract vehicle and energy source tables from KBA publication PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a publication and write its records.
    Parse(ParseArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Input PDF path.
    #[arg(short, long)]
    input: PathBuf,

    /// Output path; standard output when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Publication kind: vehicles (SV 4.2), taxonomy (SV 1) or auto.
    #[arg(short, long, default_value = "vehicles")]
    publication: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Page selection like 1-3,5.
    #[arg(long)]
    pages: Option<String>,

    /// Byte decoding of table text: latin1 or windows1252.
    #[arg(long, default_value = "latin1")]
    decoding: String,

    /// Indent JSON output.
    #[arg(long)]
    pretty: bool,

    /// List every dropped cell.
    #[arg(short, long)]
    verbose: bool,
}

fn parse_options(args: &ParseArgs) -> Result<ParseOptions> {
    let publication = Publication::from_str(&args.publication)
        .map_err(|error| anyhow!(error))
        .context("failed to parse --publication")?;

    let pages = args
        .pages
        .as_deref()
        .map(PageSelection::from_str)
        .transpose()
        .map_err(|error| anyhow!("invalid page selection: {error}"))
        .context("failed to parse --pages")?;

    let decoding = GlyphDecoding::from_str(&args.decoding)
        .map_err(|error| anyhow!(error))
        .context("failed to parse --decoding")?;

    Ok(ParseOptions {
        publication,
        pages,
        decoding,
    })
}

fn log_report(report: &ParseReport, verbose: bool) {
    if report.diagnostics.is_empty() {
        return;
    }

    eprintln!(
        "warning: {} cell(s) dropped from records",
        report.diagnostics.len()
    );
    if verbose {
        for diagnostic in &report.diagnostics {
            eprintln!(
                "  - {:?} page={:?} row={:?} field={:?}: {}",
                diagnostic.code,
                diagnostic.page,
                diagnostic.row,
                diagnostic.field,
                diagnostic.message
            );
        }
    }
}

fn write_report<W: Write>(writer: W, report: &ParseReport, args: &ParseArgs) -> Result<()> {
    match args.format {
        OutputFormat::Json => write_json(writer, report, args.pretty)?,
        OutputFormat::Csv => write_csv(writer, report)?,
    }
    Ok(())
}

fn run_parse(args: &ParseArgs) -> Result<ParseReport> {
    let options = parse_options(args)?;
    let report = parse_pdf_file(&args.input, &options)
        .with_context(|| format!("failed to parse '{}'", args.input.display()))?;

    if let Some(path) = &args.output {
        let file =
            File::create(path).with_context(|| format!("failed to create '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_report(&mut writer, &report, args)?;
        writer.flush()?;
    } else {
        let mut stdout = io::stdout().lock();
        write_report(&mut stdout, &report, args)?;
        // CSV already ends each record with a newline.
        if matches!(args.format, OutputFormat::Json) {
            writeln!(stdout)?;
        }
    }

    Ok(report)
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("kba_publications=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Parse(args) => match run_parse(&args) {
            Ok(report) => {
                log_report(&report, args.verbose);
                if report.record_count() > 0 {
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
