//! Intent UI CLI
//!
//! Usage:
//!   intent-ui [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>      Pipeline configuration (TOML format)
//!   -d, --max-depth <N>      Maximum component nesting depth
//!   -i, --indent <N>         Spaces per indent level
//!       --strict             Reject unknown fields
//!       --extract            Parse only the outermost {...} of the input
//!       --json               Print the validated tree as JSON instead of markup
//!       --schema             Print the JSON Schema for generator output
//!   -h, --help               Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use intent_ui::{parse_ui_with_config, render_markup, ui_schema, UiConfig};

#[derive(Parser)]
#[command(name = "intent-ui")]
#[command(about = "Validate generated UI component trees and render them to markup")]
struct Cli {
    /// Input file with the generator's JSON (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Pipeline configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum component nesting depth
    #[arg(short = 'd', long)]
    max_depth: Option<usize>,

    /// Spaces per indent level
    #[arg(short, long)]
    indent: Option<usize>,

    /// Reject object keys the schema does not define
    #[arg(long)]
    strict: bool,

    /// Parse only the outermost {...} of the input
    #[arg(long)]
    extract: bool,

    /// Print the validated tree as normalized JSON
    #[arg(long)]
    json: bool,

    /// Print the JSON Schema generators are asked to follow
    #[arg(long)]
    schema: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.schema {
        match serde_json::to_string_pretty(&ui_schema()) {
            Ok(schema) => {
                println!("{}", schema);
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    let mut config = match &cli.config {
        Some(path) => match UiConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => UiConfig::default(),
    };
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }
    if let Some(width) = cli.indent {
        config.markup = config.markup.with_indent_width(width);
    }
    config.strict |= cli.strict;
    config.extract_object |= cli.extract;
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    match parse_ui_with_config(&source, &config) {
        Ok(ui) if cli.json => {
            println!("{}", ui.to_json_pretty());
            ExitCode::SUCCESS
        }
        Ok(ui) => {
            print!("{}", render_markup(&ui, &config.markup));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprint!("{}", e.report(&source, &filename));
            eprintln!("{}: {}", e.kind(), e);
            ExitCode::FAILURE
        }
    }
}
