//! Text Processor CLI
//!
//! Usage:
//!   text-processor [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>      Configuration file (TOML format)
//!   -s, --set <KEY=VALUE>    Set a configuration value
//!   -a, --arg <VALUE>        Positional argument for ${0}, ${1}, ...
//!   --max-depth <N>          Limit conditional nesting
//!   --check                  Report template problems instead of expanding
//!   -d, --debug              Debug logging
//!   -h, --help               Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use log::debug;

use text_processor::{check_with_config_and_args, ConfigFile, TextProcessor, Value};

#[derive(Parser)]
#[command(name = "text-processor")]
#[command(about = "Expand ${...} placeholders in text templates")]
struct Cli {
    /// Template file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set a configuration value, overriding the configuration file
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Positional argument, referenced as ${0}, ${1}, ...
    #[arg(short, long = "arg", value_name = "VALUE")]
    args: Vec<String>,

    /// Maximum nesting of conditional patterns
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Report unterminated and unresolved placeholders instead of expanding
    #[arg(long)]
    check: bool,

    /// Debug mode: log dropped and unresolved placeholders
    #[arg(short, long)]
    debug: bool,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load configuration
    let mut file = match &cli.config {
        Some(path) => match ConfigFile::from_file(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error loading configuration '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ConfigFile::default(),
    };
    for (key, value) in &cli.set {
        file.values.set_value(key.as_str(), value.as_str());
    }
    if let Some(limit) = cli.max_depth {
        file.processor.max_depth = Some(limit);
    }
    debug!(
        "{} configuration values, max depth {:?}",
        file.values.len(),
        file.processor.max_depth
    );

    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let args: Vec<Value<'_>> = cli.args.iter().map(|a| Value::from(a.as_str())).collect();

    if cli.check {
        let diagnostics = check_with_config_and_args(&source, Some(&file.values), &args);
        for diagnostic in &diagnostics {
            eprint!("{}", diagnostic.format(&source, &filename));
        }
        if diagnostics.iter().any(|d| d.is_error()) {
            std::process::exit(1);
        }
        return;
    }

    let processor = TextProcessor::with_config(file.processor.clone());
    match processor.process_with_config_and_args(&source, Some(&file.values), &args) {
        Ok(text) => {
            print!("{}", text);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"Text Processor - Expand ${{...}} placeholders in text templates

USAGE:
    text-processor [OPTIONS] [FILE]
    echo '<template>' | text-processor

OPTIONS:
    -c, --config <FILE>    Configuration values (TOML file)
    -s, --set KEY=VALUE    Set a configuration value
    -a, --arg VALUE        Positional argument for ${{0}}, ${{1}}, ...
    --max-depth N          Limit conditional nesting
    --check                Report template problems
    -d, --debug            Log dropped and unresolved placeholders
    -h, --help             Print help

SYNTAX:
    ${{name}}              Value of name; kept as-is if name is unknown
    ${{name?text}}         text if the value is non-empty
    ${{!name?text}}        text if the value is empty
    $, {{, }}               Literal unless $ is directly followed by {{

QUICK START:
    echo 'Hello ${{0}}${{greet? (${{greet}})}}' | text-processor -a World -s greet=hi"#
    );
}
