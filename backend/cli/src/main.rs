use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use logfacade::{ErrorLogWriter, Level, LogFlags, Logger};

#[derive(Parser)]
#[command(name = "logfacade")]
#[command(about = "Try logfacade level and format settings from the shell")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    log: LogFlags,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one record at the given level
    Emit {
        /// Extra field attached to the record, may be repeated
        #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,

        level: Level,

        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Log every line read from stdin at level error
    Pipe,
    /// Print the effective level and format
    Check,
}

fn main() -> Result<()> {
    // Diagnostics about the logger itself, e.g. RUST_LOG=logfacade=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let logger = logfacade::base();
    cli.log
        .apply(&logger)
        .with_context(|| format!("failed to apply --log.format {}", cli.log.format))?;

    match cli.command {
        Commands::Emit {
            fields,
            level,
            message,
        } => emit(&logger, &fields, level, &message.join(" ")),
        Commands::Pipe => pipe(logger)?,
        Commands::Check => {
            println!("level={} format={}", logger.level(), logger.format());
        }
    }

    Ok(())
}

fn emit(logger: &Logger, fields: &[(String, String)], level: Level, message: &str) {
    let logger = fields
        .iter()
        .fold(logger.clone(), |logger, (key, value)| logger.with(key.as_str(), value.as_str()));
    logger.log(level, format_args!("{message}"));
}

fn pipe(logger: Logger) -> Result<()> {
    let mut writer = ErrorLogWriter::new(logger);
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        writer.write_all(line.as_bytes())?;
    }
    Ok(())
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    if key.is_empty() {
        return Err(format!("empty field name in {raw:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}
