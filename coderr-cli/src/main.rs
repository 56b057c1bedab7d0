//! # coderr CLI
//!
//! Command-line interface for inspecting structured error messages.
//!
//! Usage:
//!   coderr parse <MESSAGE>... [--json]
//!   coderr check [FILE]
//!   coderr is <MESSAGE> <TARGET>... [--all]
//!   coderr of <MESSAGE> <ANCESTOR>
//!   coderr wrap <MESSAGE>...
//!   coderr group <MESSAGE>...
//!
//! Examples:
//!   coderr parse "[net/http] can't start server: listen tcp :80: bind: address already in use"
//!   coderr check errors.log
//!   coderr is "[a] top: [b] bottom" "[b] any reason"
//!   coderr of "[storage/tx/done] already committed" "[storage] storage"

mod input;
mod report;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use coderr::{Error, Failure};
use report::Report;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "coderr")]
#[command(author, version, about = "coderr - structured error messages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse messages and show their cause chains
    Parse {
        #[arg(required = true)]
        messages: Vec<String>,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate one message per line of a file (stdin when omitted)
    Check {
        file: Option<PathBuf>,
    },
    /// Check if a message matches any (or all) of the targets
    Is {
        message: String,

        #[arg(required = true)]
        targets: Vec<String>,

        /// Require every target to match
        #[arg(long)]
        all: bool,
    },
    /// Check if a message's code descends from the ancestor's code
    Of { message: String, ancestor: String },
    /// Wrap messages left to right, the first one outermost
    Wrap {
        #[arg(required = true)]
        messages: Vec<String>,
    },
    /// Group messages into one
    Group {
        #[arg(required = true)]
        messages: Vec<String>,
    },
}

fn setup_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Parse a message that must be valid
fn parse_strict(msg: &str) -> Result<Error> {
    coderr::parse(msg).map_err(|err| anyhow!("invalid error message {:?}: {}", msg, err))
}

/// Parse a message, keeping invalid ones as plain text
fn parse_lenient(msg: &str) -> Failure {
    match coderr::parse(msg) {
        Ok(err) => err.into(),
        Err(err) => {
            warn!(input = msg, error = %err, "keeping message as plain text");
            Failure::msg(msg)
        }
    }
}

fn verdict(matched: bool) -> ExitCode {
    println!("{}", matched);
    if matched {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_parse(messages: &[String], json: bool) -> Result<ExitCode> {
    let reports: Vec<Report> = messages.iter().map(|m| Report::parse(m)).collect();
    let invalid = reports.iter().filter(|r| !r.valid).count();

    if json {
        let out = serde_json::to_string_pretty(&reports).context("failed to encode reports")?;
        println!("{}", out);
    } else {
        for report in &reports {
            print!("{}", report);
        }
    }

    debug!(total = reports.len(), invalid, "parsed messages");
    Ok(if invalid == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Line numbers and parse errors of every invalid line
fn invalid_lines(lines: &[input::Line]) -> Vec<(usize, Error)> {
    lines
        .iter()
        .filter_map(|line| coderr::parse(&line.text).err().map(|err| (line.number, err)))
        .collect()
}

fn run_check(file: Option<PathBuf>) -> Result<ExitCode> {
    let lines = input::read_lines(file.as_deref()).context("failed to load messages")?;

    let invalid = invalid_lines(&lines);
    for (number, err) in &invalid {
        println!("line {}: {}", number, err);
    }

    info!(checked = lines.len(), invalid = invalid.len(), "check finished");
    Ok(if invalid.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_is(message: &str, targets: &[String], all: bool) -> Result<ExitCode> {
    let err = parse_lenient(message);
    let targets = targets
        .iter()
        .map(|t| parse_strict(t))
        .collect::<Result<Vec<_>>>()?;

    debug!(depth = report::depth(&err), targets = targets.len(), all, "matching");
    let matched = if all {
        coderr::all(&err, &targets)
    } else {
        coderr::any(&err, &targets)
    };
    Ok(verdict(matched))
}

fn run_of(message: &str, ancestor: &str) -> Result<ExitCode> {
    let err = parse_strict(message)?;
    let ancestor = parse_strict(ancestor)?;
    Ok(verdict(coderr::of(&err, &ancestor)))
}

fn run_wrap(messages: &[String]) -> Result<ExitCode> {
    let wrapped = coderr::wrap_all(messages.iter().map(|m| Some(parse_lenient(m))))
        .context("nothing to wrap")?;
    println!("{}", wrapped);
    Ok(ExitCode::SUCCESS)
}

fn run_group(messages: &[String]) -> Result<ExitCode> {
    let group = coderr::group(messages.iter().map(|m| parse_lenient(m)));
    println!("{}", group);
    Ok(ExitCode::SUCCESS)
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Parse { messages, json } => run_parse(&messages, json),
        Commands::Check { file } => run_check(file),
        Commands::Is {
            message,
            targets,
            all,
        } => run_is(&message, &targets, all),
        Commands::Of { message, ancestor } => run_of(&message, &ancestor),
        Commands::Wrap { messages } => run_wrap(&messages),
        Commands::Group { messages } => run_group(&messages),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}
