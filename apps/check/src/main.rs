#![allow(clippy::print_stderr, clippy::print_stdout)]

use anyhow::{Context, Result, bail};
use clap::Parser;
use enxlog::{LogLevel, Logger};
use enxlog_config::{ConfigDocument, ConfigError, SinkFactory};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Validates an enxlog YAML configuration.
#[derive(Debug, Parser)]
#[command(name = "enxlog-check", version, about)]
struct Cli {
    /// Configuration file to check.
    config: PathBuf,

    /// Print the parsed filter tree.
    #[arg(long)]
    print_tree: bool,

    /// Install the configuration and emit one record per level for every `--logger`.
    #[arg(long)]
    emit: bool,

    /// Dotted logger path to emit records from (repeatable).
    #[arg(long = "logger", value_name = "PATH")]
    loggers: Vec<String>,

    /// Show the library's own diagnostics.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
            .with_writer(std::io::stderr)
            .init();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ConfigError>().and_then(ConfigError::location) {
                Some((line, column)) => eprintln!("{}:{line}:{column}: {e:#}", cli.config.display()),
                None => eprintln!("{}: {e:#}", cli.config.display()),
            }
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> Result<()> {
    let document = ConfigDocument::from_file(&cli.config)?;
    debug!(sinks = document.sinks.len(), "Configuration read");

    println!("default level: {}", document.default_level);
    for (index, sink) in document.sinks.iter().enumerate() {
        let parameters: Vec<String> =
            sink.iter().filter(|(k, _)| *k != "type").map(|(k, v)| format!("{k}={v}")).collect();
        println!("sink {index}: {} {}", sink.sink_type()?, parameters.join(" "));
    }

    if cli.print_tree {
        print!("{}", document.filter);
    }

    let dispatcher = document.build(&SinkFactory::with_builtin())?;

    if !cli.emit {
        return Ok(());
    }
    if cli.loggers.is_empty() {
        bail!("--emit needs at least one --logger");
    }

    enxlog::init(dispatcher).context("Could not install the dispatcher")?;
    for path in &cli.loggers {
        let parts: Vec<&str> = path.split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            enxlog::shutdown();
            bail!("invalid logger path '{path}'");
        }
        let logger = Logger::new(&parts);
        for level in LogLevel::ALL.into_iter().skip(1) {
            enxlog::dispatch(&logger, level, module_path!(), line!(), format_args!("sample {level} record"));
        }
    }
    enxlog::shutdown();
    Ok(())
}
