//! colorexp command-line entry point
//!
//! Reads lines from stdin and writes them to stdout with every match of
//! the given patterns wrapped in terminal color codes.

use std::io::{self, BufWriter, ErrorKind};
use std::process;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use colorexp::cli::Cli;
use colorexp::config::Config;
use colorexp::{ColorexpError, Highlighter, PatternSet, Result};

/// Environment variable holding the log filter
const LOG_ENV: &str = "COLOREXP_LOG";

fn main() {
    init_logging();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => {}
        Err(ColorexpError::Output(e)) if e.kind() == ErrorKind::BrokenPipe => {
            debug!("output closed early");
        }
        Err(e) => {
            eprintln!("colorexp: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = if cli.no_config {
        Config::default()
    } else {
        Config::load(cli.config.as_deref())?
    };
    config.apply_cli(cli);

    let options = config.match_options(cli.patterns.len())?;
    let patterns = PatternSet::compile(&cli.patterns, config.compile_options(), options)?;
    let palette = config.palette()?;
    info!(
        patterns = patterns.len(),
        colors = patterns.total_colors(),
        palette = palette.len(),
        mode = ?config.mode,
        "starting"
    );

    let highlighter = Highlighter::new(patterns, palette, config.matching_lines);
    let stdin = io::stdin();
    let stdout = io::stdout();
    highlighter.run(
        stdin.lock(),
        BufWriter::new(stdout.lock()),
        config.max_line_length,
    )?;

    Ok(())
}
