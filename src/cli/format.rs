//! Output formatting for reduced log lines.

use std::borrow::Cow;
use std::fmt::Write as _;

use jiff::Timestamp;
use serde::Serialize;

use crate::action::LogAction;
use crate::config::OutputFormat;
use crate::model::{Fields, Level};

/// Render a log action as a single output line, without the trailing newline.
pub(super) fn render(log: &LogAction, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(render_text(log)),
        OutputFormat::Json => serde_json::to_string(&LogRecord::from(log))
            .map_err(|e| format!("failed to serialize log line: {e}")),
    }
}

fn render_text(log: &LogAction) -> String {
    let mut line = format!("{} {:<7} ", log.timestamp(), log.level());
    if !log.manifest().is_empty() {
        let _ = write!(line, "[{}] ", log.manifest());
    }
    line.push_str(String::from_utf8_lossy(log.message()).trim_end_matches('\n'));
    for (key, value) in log.fields() {
        let _ = write!(line, " {key}={value}");
    }
    line
}

/// The JSON shape of a rendered log line.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LogRecord<'a> {
    timestamp: Timestamp,
    level: Level,
    #[serde(skip_serializing_if = "str::is_empty")]
    manifest: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    span_id: &'a str,
    #[serde(skip_serializing_if = "Fields::is_empty")]
    fields: &'a Fields,
    message: Cow<'a, str>,
}

impl<'a> From<&'a LogAction> for LogRecord<'a> {
    fn from(log: &'a LogAction) -> Self {
        Self {
            timestamp: log.timestamp(),
            level: log.level(),
            manifest: log.manifest().as_str(),
            span_id: log.span_id().as_str(),
            fields: log.fields(),
            message: String::from_utf8_lossy(log.message()),
        }
    }
}
