use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cvscan_core::config_file::{self, ConfigFile};
use cvscan_core::{DEFAULT_MAX_FILE_SIZE, FileValidator, ParsedDocument, UploadedFile};
use cvscan_ingest::{CvParser, DEFAULT_MAX_ARCHIVE_SIZE, extract_archive, is_archive_name};
use cvscan_parsing::{HeuristicExtractor, ParsingConfigBuilder};

mod output;

use output::ColorMode;

/// CV parser - Extract candidate fields from PDF, DOCX and TXT résumés
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file to use instead of the platform and ./.cvscan.toml cascade
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse CV files (or .zip / .tar.gz bundles of them) and print the extracted fields
    Parse {
        /// Files to parse
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print a JSON array instead of the text report
        #[arg(long)]
        json: bool,

        /// Include the decoded text in the text report
        #[arg(long)]
        full_text: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Path to output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check files against the upload rules without decoding them
    Validate {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

/// Everything resolved from config file, environment and defaults.
struct Settings {
    parser: CvParser,
    max_archive_size: u64,
}

/// One file to report on: a path on disk or an entry inside an archive.
struct Input {
    label: String,
    file: Result<UploadedFile, String>,
}

enum Outcome {
    Parsed(ParsedDocument),
    Failed(String),
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Command::Parse {
            files,
            json,
            full_text,
            no_color,
            output,
        } => parse(&settings, &files, json, full_text, no_color, output),
        Command::Validate { files, no_color } => validate(&settings, &files, no_color),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// Resolve configuration: env vars > config file > defaults
fn load_settings(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    let file = match explicit {
        Some(path) => config_file::load_from_path(path)
            .with_context(|| format!("could not load config file {}", path.display()))?,
        None => config_file::load_config(),
    };

    let max_file_size = match std::env::var("CVSCAN_MAX_FILE_SIZE") {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("CVSCAN_MAX_FILE_SIZE is not a byte count: {v:?}"))?,
        Err(_) => file.max_file_size_bytes().unwrap_or(DEFAULT_MAX_FILE_SIZE),
    };
    let max_archive_size = file
        .max_archive_size_mb()
        .map(|mb| u64::from(mb) * 1024 * 1024)
        .unwrap_or(DEFAULT_MAX_ARCHIVE_SIZE);

    let parser = CvParser::new()
        .with_strategy(HeuristicExtractor::with_config(parsing_config(&file)?))
        .with_validator(FileValidator::new().with_max_size(max_file_size));

    tracing::debug!(max_file_size, max_archive_size, "settings resolved");
    Ok(Settings {
        parser,
        max_archive_size,
    })
}

fn parsing_config(file: &ConfigFile) -> anyhow::Result<cvscan_parsing::ParsingConfig> {
    ParsingConfigBuilder::new()
        .apply_config_file(file)
        .build()
        .context("invalid regex pattern in config file")
}

/// Expand archives and read plain files. Read failures are kept per input
/// so the rest of the batch still runs.
fn collect_inputs(paths: &[PathBuf], max_archive_size: u64, warnings: &mut Vec<String>) -> Vec<Input> {
    let mut inputs = Vec::new();

    for path in paths {
        let display = path.display().to_string();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| display.clone());

        if !is_archive_name(&name) {
            inputs.push(Input {
                label: display,
                file: UploadedFile::from_path(path).map_err(|e| format!("cannot read file: {e}")),
            });
            continue;
        }

        let contents = std::fs::read(path)
            .map_err(|e| format!("cannot read archive: {e}"))
            .and_then(|data| {
                extract_archive(&name, &data, max_archive_size).map_err(|e| e.to_string())
            });
        match contents {
            Ok(contents) => {
                warnings.extend(contents.warnings.into_iter().map(|w| format!("{display}: {w}")));
                for entry in contents.entries {
                    inputs.push(Input {
                        label: format!("{display}:{}", entry.path),
                        file: Ok(entry.into_uploaded_file()),
                    });
                }
            }
            Err(message) => inputs.push(Input {
                label: display,
                file: Err(message),
            }),
        }
    }

    inputs
}

fn progress_bar(len: usize) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    if len < 2 {
        return ProgressBar::hidden();
    }
    // Draws to stderr and stays hidden when stderr is not a terminal.
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.green/dim}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    bar
}

fn parse(
    settings: &Settings,
    files: &[PathBuf],
    json: bool,
    full_text: bool,
    no_color: bool,
    output: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let use_color = !no_color && !json && output.is_none();
    let color = ColorMode(use_color);

    let mut writer: Box<dyn Write> = if let Some(ref output_path) = output {
        Box::new(
            std::fs::File::create(output_path)
                .with_context(|| format!("cannot create {}", output_path.display()))?,
        )
    } else {
        Box::new(std::io::stdout())
    };

    let mut warnings = Vec::new();
    let inputs = collect_inputs(files, settings.max_archive_size, &mut warnings);

    let bar = progress_bar(inputs.len());
    let mut results = Vec::with_capacity(inputs.len());
    for input in inputs {
        bar.set_message(input.label.clone());
        let outcome = match input.file {
            Err(message) => Outcome::Failed(message),
            Ok(file) => {
                let verdict = settings.parser.validate(&file);
                if !verdict.valid {
                    Outcome::Failed(verdict.error.unwrap_or_default())
                } else {
                    match settings.parser.parse_cv(&file) {
                        Ok(doc) => Outcome::Parsed(doc),
                        Err(e) => Outcome::Failed(e.to_string()),
                    }
                }
            }
        };
        results.push((input.label, outcome));
        bar.inc(1);
    }
    bar.finish_and_clear();

    let failed = results
        .iter()
        .filter(|(_, o)| matches!(o, Outcome::Failed(_)))
        .count();

    if json {
        let array: Vec<serde_json::Value> = results
            .iter()
            .map(|(label, outcome)| match outcome {
                Outcome::Parsed(doc) => serde_json::json!({ "file": label, "document": doc }),
                Outcome::Failed(error) => serde_json::json!({ "file": label, "error": error }),
            })
            .collect();
        serde_json::to_writer_pretty(&mut writer, &array)?;
        writeln!(writer)?;
        for warning in &warnings {
            tracing::warn!("{warning}");
        }
    } else {
        for warning in &warnings {
            output::print_warning(&mut writer, warning, color)?;
        }
        for (label, outcome) in &results {
            match outcome {
                Outcome::Parsed(doc) => {
                    output::print_document(&mut writer, label, doc, full_text, color)?
                }
                Outcome::Failed(error) => output::print_failure(&mut writer, label, error, color)?,
            }
        }
        output::print_summary(&mut writer, results.len() - failed, failed, color)?;
    }
    writer.flush()?;

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn validate(settings: &Settings, files: &[PathBuf], no_color: bool) -> anyhow::Result<ExitCode> {
    let color = ColorMode(!no_color);
    let mut stdout = std::io::stdout().lock();
    let mut rejected = 0;

    for path in files {
        let label = path.display().to_string();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| label.clone());

        // Metadata only; the file is never opened for reading.
        let result = match std::fs::metadata(path) {
            Ok(meta) => settings
                .parser
                .validator()
                .validate_metadata(&name, None, meta.len()),
            Err(e) => {
                rejected += 1;
                output::print_failure(&mut stdout, &label, &format!("cannot read file: {e}"), color)?;
                continue;
            }
        };
        if !result.valid {
            rejected += 1;
        }
        output::print_validation(&mut stdout, &label, &result, color)?;
    }

    Ok(if rejected == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
