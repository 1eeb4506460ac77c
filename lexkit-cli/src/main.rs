//! Lexkit CLI - Command line interface
//!
//! 用内置文法扫描一个文本文件，输出 token 树或 JSON。

use std::path::PathBuf;
use std::process;

use clap::Parser;
use lexkit_config::{CliSettings, GrammarKind, LogFormat, LogLevel};
use lexkit_core::Lexer;
use tracing::{debug, info};

mod config;
mod grammar;
mod logging;
mod report;

use crate::config::{read_settings, read_source, CliError, Overrides, Settings};
use crate::grammar::CliKind;

/// CLI 日志 target
const CLI_TARGET: &str = "lexkit::cli";

#[derive(Parser)]
#[command(
    name = "lexkit",
    about = "Tokenize a text file with a built-in composable grammar",
    version = "0.1.0"
)]
struct Cli {
    /// File to tokenize
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Grammar: words, plain, brackets
    #[arg(short, long)]
    grammar: Option<GrammarKind>,

    /// Skip unrecognized text instead of emitting TEXT filler tokens
    #[arg(long)]
    no_filler: bool,

    /// Print tokens as JSON
    #[arg(long)]
    json: bool,

    /// Log level: silent, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Log format: pretty, compact, json
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// JSON settings file, overridden by command line flags
    #[arg(short, long, value_name = "SETTINGS")]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            grammar: self.grammar,
            no_filler: self.no_filler,
            json: self.json,
            log_level: self.log_level,
            log_format: self.log_format,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let file_settings = match &cli.config {
        Some(path) => match read_settings(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => CliSettings::default(),
    };
    let settings = Settings::resolve(file_settings, &cli.overrides());
    logging::init(&settings.log, settings.log_format);
    debug!(target: CLI_TARGET, "Settings: {:?}", settings);

    let source = match read_source(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match run(&source, &settings) {
        Ok(output) => print!("{}", output),
        Err(CliError::Scan(err)) => {
            report::print_scan_error(&err, &source);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// 扫描并渲染输出
fn run(source: &str, settings: &Settings) -> Result<String, CliError> {
    let recognizer = grammar::build(settings.grammar)?;
    let filler = settings.filler.then_some(CliKind::Text);
    let parsed = Lexer::new(recognizer).filler(filler).tokenize(source)?;
    info!(
        target: CLI_TARGET,
        "{} tokens from {} chars",
        parsed.len(),
        source.chars().count()
    );

    if settings.json {
        let mut json = serde_json::to_string_pretty(parsed.tokens())
            .map_err(CliError::Output)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(parsed.pretty())
    }
}
