//! pinframe CLI
//!
//! Usage:
//!   pinframe [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>    Layout configuration (TOML format)
//!       --rtl              Resolve start/end/before/after right-to-left
//!   -f, --format <FORMAT>  Output format: text or toml
//!   -v, --verbose          Increase logging verbosity (repeatable)
//!   -h, --help             Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use pinframe::{run_script, LayoutConfig, LayoutDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Toml,
}

#[derive(Parser)]
#[command(name = "pinframe")]
#[command(about = "Resolve view frames from pin scripts")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Layout configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Resolve start/end/before/after right-to-left
    #[arg(long)]
    rtl: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase logging verbosity (default: warn, -v: warnings per pin, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbosity: u8,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbosity {
        0 | 1 => "warn",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    // If no input file and stdin is a terminal (interactive), show usage
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Load config
    let mut config = match &cli.config {
        Some(path) => match LayoutConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => LayoutConfig::default(),
    };
    if cli.rtl {
        config = config.with_direction(LayoutDirection::Rtl);
    }
    // Warnings are part of the report; only echo them to the log when asked to
    config = config.with_log_warnings(cli.verbosity > 0);

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

    let report = match run_script(&source, &config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    match cli.format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Toml => match report.to_toml() {
            Ok(toml) => print!("{}", toml),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                std::process::exit(1);
            }
        },
    }
}

fn print_intro() {
    println!(
        r#"pinframe - resolve view frames from pin scripts

USAGE:
    pinframe [OPTIONS] [FILE]
    echo '<script>' | pinframe

OPTIONS:
    -c, --config     Layout configuration (TOML file)
    --rtl            Right-to-left reading direction
    -f, --format     Output format: text (default) or toml
    -v, --verbose    Log warnings; repeat for debug/trace output
    -h, --help       Print help

QUICK START:
    echo 'view root [width: 400, height: 300] {{ view header }}
          pin header: top().horizontally().height(60)' | pinframe

This prints every view's frame, followed by any warnings raised while resolving."#
    );
}
