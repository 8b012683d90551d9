mod config;
mod logging;
mod selector;

use std::fs::create_dir_all;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use config::{ConfigError, OutputFormat, Settings, load_settings};
use enrollstat_core::{DataError, Dataset, SelectionError};
use enrollstat_eval::{
    EvalError, ReportOptions, StatisticsEngine, render_dataset_header, render_document,
    render_report,
};
use logging::{LoggingError, init_logging};
use selector::prompt_for_school;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("data error: {0}")]
    Data(#[from] DataError),
    #[error("statistics error: {0}")]
    Eval(#[from] EvalError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("invalid selection: {0}")]
    Selection(#[from] SelectionError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "enrollstat", version, about = "School enrollment statistics")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Debug)]
struct GlobalArgs {
    /// Path to a TOML config file (defaults to ./enrollstat.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// School reference CSV with "School Name" and "School Code" columns.
    #[arg(long, global = true)]
    schools: Option<PathBuf>,
    /// JSON document of per-year enrollment sequences.
    #[arg(long, global = true)]
    enrollments: Option<PathBuf>,
    /// Append JSON logs to this file instead of logging to stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Select a school and print its statistics (default).
    Report(ReportArgs),
    /// Print the table shape and the school listing.
    Schools,
}

#[derive(Args, Debug, Default)]
struct ReportArgs {
    /// School name or code; prompts interactively when omitted.
    #[arg(long, value_name = "NAME_OR_CODE")]
    school: Option<String>,
    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Write the report to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Median is taken over figures strictly above this value.
    #[arg(long)]
    threshold: Option<u32>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.global.log_file.as_deref())?;

    let mut settings = load_settings(cli.global.config.as_deref())?;
    if let Some(path) = cli.global.schools {
        settings.schools_path = path;
    }
    if let Some(path) = cli.global.enrollments {
        settings.enrollments_path = path;
    }

    match cli.command.unwrap_or(Command::Report(ReportArgs::default())) {
        Command::Report(args) => run_report(&settings, args),
        Command::Schools => run_schools(&settings),
    }
}

fn run_schools(settings: &Settings) -> Result<(), CliError> {
    let dataset = Dataset::load(&settings.schools_path, &settings.enrollments_path)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(render_dataset_header(&dataset).as_bytes())?;
    Ok(())
}

fn run_report(settings: &Settings, args: ReportArgs) -> Result<(), CliError> {
    let ReportArgs {
        school,
        format,
        out,
        threshold,
    } = args;
    let format = format.unwrap_or(settings.format);
    let options = ReportOptions {
        median_threshold: threshold.unwrap_or(settings.median_threshold),
    };

    let dataset = Dataset::load(&settings.schools_path, &settings.enrollments_path)?;
    let mut stdout = io::stdout().lock();

    if format == OutputFormat::Text {
        writeln!(stdout, "{}", render_dataset_header(&dataset))?;
    }

    let school = match school {
        Some(raw) => {
            let school = dataset.directory().resolve(&raw)?;
            tracing::info!(event = "school_selected", code = %school.code);
            school
        }
        None => {
            let mut input = io::stdin().lock();
            match format {
                OutputFormat::Text => {
                    prompt_for_school(dataset.directory(), &mut input, &mut stdout)?
                }
                OutputFormat::Json => {
                    prompt_for_school(dataset.directory(), &mut input, &mut io::stderr())?
                }
            }
        }
    };

    let report = StatisticsEngine::new(options).run(&dataset, school)?;
    let rendered = match (format, out.is_some()) {
        (OutputFormat::Text, true) => render_document(&dataset, &report),
        (OutputFormat::Text, false) => render_report(&report),
        (OutputFormat::Json, _) => serde_json::to_string_pretty(&report)? + "\n",
    };

    match out {
        Some(path) => {
            write_output(&path, &rendered)?;
            tracing::info!(event = "report_written", path = %path.display());
        }
        None => {
            if format == OutputFormat::Text {
                writeln!(stdout)?;
            }
            stdout.write_all(rendered.as_bytes())?;
        }
    }

    Ok(())
}

fn write_output(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    std::fs::write(path, contents)
}
