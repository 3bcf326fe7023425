//! `copymd`: convert a saved chat page or answer fragment to Markdown.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use copymd::{parse_html, select_html, ConvertError, ConvertOptions, MarkdownConverter};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "copymd", version, about = "Convert rendered chat answers (HTML) to Markdown")]
struct Cli {
    /// Input HTML file; `-` or absent reads stdin
    input: Option<PathBuf>,

    /// Write Markdown to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Convert every element matching this CSS selector instead of the whole input
    #[arg(short, long)]
    selector: Option<String>,

    /// JSON file with conversion options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Headings containing this phrase are dropped
    #[arg(long)]
    banner_phrase: Option<String>,

    /// Class of injected controls to strip (repeatable; replaces the defaults)
    #[arg(long = "marker-class")]
    marker_classes: Vec<String>,

    /// Spaces per list nesting level
    #[arg(long)]
    indent_width: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },

    #[error("invalid config {path}: {source}")]
    Config { path: String, source: serde_json::Error },

    #[error("selector {0:?} matched no elements")]
    NoMatch(String),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("copymd: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let options = load_options(cli)?;
    let converter = MarkdownConverter::with_options(options)?;
    let html = read_input(cli.input.as_ref())?;

    let markdown = match &cli.selector {
        Some(selector) => {
            let roots = select_html(&html, selector)?;
            if roots.is_empty() {
                return Err(CliError::NoMatch(selector.clone()));
            }
            info!(matches = roots.len(), selector = %selector, "converting selected elements");
            roots
                .iter()
                .map(|root| converter.convert(root))
                .collect::<Vec<_>>()
                .join("\n\n")
        }
        None => converter.convert(&parse_html(&html)),
    };

    write_output(cli.output.as_ref(), &markdown)
}

/// Defaults, then the config file, then command-line flags
fn load_options(cli: &Cli) -> Result<ConvertOptions, CliError> {
    let mut options = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str(&text).map_err(|source| CliError::Config {
                path: path.display().to_string(),
                source,
            })?
        }
        None => ConvertOptions::default(),
    };

    if let Some(phrase) = &cli.banner_phrase {
        options.banner_phrase = phrase.clone();
    }
    if !cli.marker_classes.is_empty() {
        options.marker_classes = cli.marker_classes.clone();
    }
    if let Some(width) = cli.indent_width {
        options.indent_unit = " ".repeat(width);
    }
    debug!(?options, "resolved conversion options");
    Ok(options)
}

fn read_input(input: Option<&PathBuf>) -> Result<String, CliError> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(path).map_err(|source| CliError::Read {
                path: path.display().to_string(),
                source,
            })
        }
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map_err(|source| CliError::Read {
                path: "<stdin>".to_string(),
                source,
            })?;
            Ok(buf)
        }
    }
}

fn write_output(output: Option<&PathBuf>, markdown: &str) -> Result<(), CliError> {
    let text = format!("{markdown}\n");
    match output {
        Some(path) => fs::write(path, text).map_err(|source| CliError::Write {
            path: path.display().to_string(),
            source,
        }),
        None => io::stdout().write_all(text.as_bytes()).map_err(|source| CliError::Write {
            path: "<stdout>".to_string(),
            source,
        }),
    }
}
