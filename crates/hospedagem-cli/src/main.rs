//! hospedagem CLI - Lodging report dashboard
//!
//! Command-line interface for listing dates, printing reports and exporting
//! PDF documents from the lodging workbook.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use hospedagem_core::{format_date, parse_date, Dashboard, ReportRenderer, TableRenderer};
use hospedagem_render::{
    combined_report_pdf, table_pdf, JsonReportRenderer, PdfArtifact, TextReportRenderer, TextTableRenderer,
};
use hospedagem_source::{load_workbook, SourceLayout, DEFAULT_WORKBOOK, TABLE_SHEET, TOTAL_SHEET};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "hospedagem")]
#[command(author, version, about = "Lodging report dashboard", long_about = None)]
struct Cli {
    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Workbook to read
    #[arg(long, value_name = "PATH", env = "HOSPEDAGEM_WORKBOOK", default_value = DEFAULT_WORKBOOK)]
    workbook: PathBuf,

    /// Sheet holding the daily totals
    #[arg(long, value_name = "NAME", default_value = TOTAL_SHEET)]
    total_sheet: String,

    /// Sheet holding the display table
    #[arg(long, value_name = "NAME", default_value = TABLE_SHEET)]
    table_sheet: String,

    /// First data row of the totals sheet (0-indexed)
    #[arg(long, value_name = "N", default_value_t = 3)]
    first_row: u32,

    /// Last data row of the totals sheet (0-indexed, inclusive)
    #[arg(long, value_name = "N", default_value_t = 11)]
    last_row: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the dates available in the workbook
    Dates,

    /// Print the report for one or more dates
    Report {
        /// Date to report (YYYY-MM-DD), repeatable
        #[arg(short, long = "date", value_name = "DATE", required = true, value_parser = parse_date)]
        dates: Vec<NaiveDate>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Also write the combined report as a PDF
        #[arg(long, value_name = "PATH")]
        pdf: Option<PathBuf>,
    },

    /// Print the display table
    Table {
        /// Also write the table as a PDF
        #[arg(long, value_name = "PATH")]
        pdf: Option<PathBuf>,
    },

    /// Write both PDF documents
    Export {
        /// Date to include (YYYY-MM-DD), repeatable
        #[arg(short, long = "date", value_name = "DATE", required = true, value_parser = parse_date)]
        dates: Vec<NaiveDate>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

impl Cli {
    fn layout(&self) -> SourceLayout {
        SourceLayout::new()
            .total_sheet(&self.total_sheet)
            .table_sheet(&self.table_sheet)
            .rows(self.first_row, self.last_row)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let dashboard = load_workbook(&cli.workbook, &cli.layout())
        .with_context(|| format!("failed to load workbook {}", cli.workbook.display()))?;

    match &cli.command {
        Commands::Dates => cmd_dates(&dashboard),
        Commands::Report { dates, format, pdf } => cmd_report(&dashboard, dates, *format, pdf.as_deref()),
        Commands::Table { pdf } => cmd_table(&dashboard, pdf.as_deref()),
        Commands::Export { dates, out_dir } => cmd_export(&dashboard, dates, out_dir),
    }
}

fn cmd_dates(dashboard: &Dashboard) -> Result<()> {
    for date in dashboard.available_dates() {
        println!("{}", format_date(date));
    }
    Ok(())
}

fn cmd_report(dashboard: &Dashboard, dates: &[NaiveDate], format: ReportFormat, pdf: Option<&Path>) -> Result<()> {
    let selection = dashboard.select(dates);
    debug!(requested = dates.len(), found = selection.found().count(), "selection resolved");

    match format {
        ReportFormat::Text => {
            let text = TextReportRenderer::new();
            for date in selection.missing() {
                eprintln!("warning: {}", text.not_found_notice(date));
            }
            let combined = text.render(&selection)?;
            if !combined.is_empty() {
                print!("{combined}");
            }
        }
        ReportFormat::Json => {
            let json = JsonReportRenderer::new().pretty().render(&selection)?;
            println!("{json}");
        }
    }

    if let Some(path) = pdf {
        write_artifact(&combined_report_pdf(&selection)?, path)?;
    }
    Ok(())
}

fn cmd_table(dashboard: &Dashboard, pdf: Option<&Path>) -> Result<()> {
    print!("{}", TextTableRenderer::new().render_table(dashboard.table())?);

    if let Some(path) = pdf {
        write_artifact(&table_pdf(dashboard.table())?, path)?;
    }
    Ok(())
}

fn cmd_export(dashboard: &Dashboard, dates: &[NaiveDate], out_dir: &Path) -> Result<()> {
    let selection = dashboard.select(dates);
    let text = TextReportRenderer::new();
    for date in selection.missing() {
        eprintln!("warning: {}", text.not_found_notice(date));
    }

    fs::create_dir_all(out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;

    for artifact in [combined_report_pdf(&selection)?, table_pdf(dashboard.table())?] {
        let path = out_dir.join(artifact.file_name);
        write_artifact(&artifact, &path)?;
        println!("{}", path.display());
    }
    Ok(())
}

fn write_artifact(artifact: &PdfArtifact, path: &Path) -> Result<()> {
    fs::write(path, artifact.bytes()).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), mime = artifact.mime, "document written");
    Ok(())
}
