//! CLI interface for actionlog.
//!
//! Each subcommand wires producers to a small reducer over the dispatch
//! channel and renders the resulting log lines to stdout:
//!
//! - `actionlog log`: dispatch one log statement.
//! - `actionlog events`: translate a stream of platform events.

mod format;
mod reduce;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::thread;

use clap::{Parser, Subcommand, ValueEnum};

use crate::action::{ErrorAction, LogAction, PanicAction, PlatformEventAction};
use crate::config::{Config, OutputFormat};
use crate::dispatch::{self, DispatchError, Dispatcher};
use crate::model::{Fields, Level, ManifestName, PlatformEvent, SpanId};
use crate::summary::ChangeSummary;

use reduce::{Output, reduce};

/// Actionlog: turn occurrences into log lines.
#[derive(Debug, Parser)]
#[command(name = "actionlog", after_long_help = USAGE_HELP)]
pub struct Cli {
    /// Output format. Overrides `format` in the config file.
    #[arg(long, global = true, value_enum)]
    format: Option<FormatArg>,

    /// Lowest level to render. Overrides `min-level` in the config file.
    #[arg(long, global = true)]
    min_level: Option<Level>,

    #[command(subcommand)]
    pub command: Command,
}

const USAGE_HELP: &str = r#"Examples:
  actionlog log "deploy finished"
  actionlog log --manifest web --span build:web:3 --field image=web:dev "built image"
  kubectl get events -o json | jq -c '.items[]' | actionlog events --manifest web
  actionlog events --manifest web --input events.jsonl --format json"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Dispatch a single log line.
    ///
    /// Without `--manifest` or `--span` the line is global.
    Log {
        /// Manifest the line belongs to.
        #[arg(long)]
        manifest: Option<String>,

        /// Span grouping related lines.
        #[arg(long)]
        span: Option<String>,

        /// Severity.
        #[arg(long, default_value = "info")]
        level: Level,

        /// Structured field as `key=value`. Can be specified multiple times.
        #[arg(long, value_parser = parse_field)]
        field: Vec<(String, String)>,

        /// The message.
        message: String,
    },

    /// Translate platform events (one JSON object per line) into log lines.
    Events {
        /// Manifest the events are attributed to.
        #[arg(long)]
        manifest: String,

        /// Read events from this file instead of stdin.
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

/// CLI-facing output format, mapped to the config `OutputFormat`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

impl FormatArg {
    fn to_domain(self) -> OutputFormat {
        match self {
            Self::Text => OutputFormat::Text,
            Self::Json => OutputFormat::Json,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();

    let output = Output {
        format: cli.format.map_or(config.format, FormatArg::to_domain),
        min_level: cli.min_level.unwrap_or(config.min_level),
    };

    match cli.command {
        Command::Log {
            manifest,
            span,
            level,
            field,
            message,
        } => cmd_log(&output, manifest, span, level, field, &message),
        Command::Events { manifest, input } => cmd_events(&output, manifest.into(), input),
    }
}

fn cmd_log(
    output: &Output,
    manifest: Option<String>,
    span: Option<String>,
    level: Level,
    field: Vec<(String, String)>,
    message: &str,
) -> Result<(), String> {
    let mut line = message.to_string();
    if !line.ends_with('\n') {
        line.push('\n');
    }

    let action = if manifest.is_none() && span.is_none() && field.is_empty() {
        LogAction::global(level, line.as_bytes())
    } else {
        LogAction::new(
            manifest.map(ManifestName::from).unwrap_or_default(),
            span.map(SpanId::from).unwrap_or_default(),
            level,
            field.into_iter().collect::<Fields>(),
            line.as_bytes(),
        )
    };

    let (dispatcher, queue) = dispatch::channel();
    dispatcher.dispatch(action).map_err(|e| e.to_string())?;
    drop(dispatcher);

    reduce(&queue, output, &mut io::stdout().lock())?;
    Ok(())
}

fn cmd_events(
    output: &Output,
    manifest: ManifestName,
    input: Option<PathBuf>,
) -> Result<(), String> {
    let reader: Box<dyn BufRead + Send> = match &input {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("failed to open {}: {e}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    run_events(output, manifest, reader, &mut io::stdout().lock())?;
    Ok(())
}

/// Produces events on a scoped thread while reducing on this one.
fn run_events(
    output: &Output,
    manifest: ManifestName,
    reader: impl BufRead + Send,
    out: &mut impl Write,
) -> Result<ChangeSummary, String> {
    let (dispatcher, queue) = dispatch::channel();

    thread::scope(|scope| {
        scope.spawn(move || produce_guarded(&dispatcher, reader, &manifest));
        let reduced = reduce(&queue, output, out);
        // The producer's next dispatch fails once the queue is gone, so it
        // stops even when the reducer bailed out early.
        drop(queue);
        reduced
    })
}

/// Runs the event producer, reporting a panic as a [`PanicAction`].
fn produce_guarded(dispatcher: &Dispatcher, reader: impl BufRead, manifest: &ManifestName) {
    let produced = panic::catch_unwind(AssertUnwindSafe(|| {
        produce_events(dispatcher, reader, manifest)
    }));

    match produced {
        // A closed queue means the reducer has gone away; nothing left to tell.
        Ok(Ok(()) | Err(DispatchError::Closed)) => {}
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "event producer panicked".to_string());
            let _ = dispatcher.dispatch(PanicAction::new(message));
        }
    }
}

/// Dispatches one [`PlatformEventAction`] per JSON line.
///
/// Lines that fail to parse (including ones that are not UTF-8) are reported
/// as [`ErrorAction`]s and skipped. A read failure is reported and ends the
/// stream.
fn produce_events(
    dispatcher: &Dispatcher,
    mut reader: impl BufRead,
    manifest: &ManifestName,
) -> Result<(), DispatchError> {
    let mut line = Vec::new();
    let mut number = 0usize;

    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) => break,
            Ok(_) => number += 1,
            Err(e) => {
                dispatcher.dispatch(ErrorAction::new(e))?;
                break;
            }
        }
        if line.trim_ascii().is_empty() {
            continue;
        }

        match serde_json::from_slice::<PlatformEvent>(&line) {
            Ok(event) => dispatcher.dispatch(PlatformEventAction::new(event, manifest.clone()))?,
            Err(e) => {
                dispatcher.dispatch(ErrorAction::new(format!("line {number}: {e}")))?;
            }
        }
    }
    Ok(())
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got `{s}`")),
    }
}
