//! Log actions: the canonical log record.

use std::fmt;

use jiff::Timestamp;

use crate::clock::{Clock, SystemClock};
use crate::model::{Fields, Level, ManifestName, SpanId};
use crate::summary::ChangeSummary;

use super::Action;

/// A single, immutable log line.
///
/// The message is owned: constructors copy the caller's bytes, so the caller
/// may reuse its buffer as soon as the constructor returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogAction {
    manifest: ManifestName,
    span_id: SpanId,
    timestamp: Timestamp,
    level: Level,
    fields: Fields,
    message: Vec<u8>,
}

impl Action for LogAction {
    fn summarize(&self, summary: &mut ChangeSummary) {
        summary.mark_log();
    }
}

impl LogAction {
    /// A log line attributed to a manifest and span, stamped now.
    pub fn new(
        manifest: ManifestName,
        span_id: SpanId,
        level: Level,
        fields: Fields,
        message: &[u8],
    ) -> Self {
        Self::new_with_clock(&SystemClock, manifest, span_id, level, fields, message)
    }

    /// Like [`LogAction::new`], stamped by `clock`.
    pub fn new_with_clock(
        clock: &dyn Clock,
        manifest: ManifestName,
        span_id: SpanId,
        level: Level,
        fields: Fields,
        message: &[u8],
    ) -> Self {
        Self {
            manifest,
            span_id,
            timestamp: clock.now(),
            level,
            fields,
            message: message.to_vec(),
        }
    }

    /// A log line not attributable to any one manifest or span.
    pub fn global(level: Level, message: &[u8]) -> Self {
        Self::global_with_clock(&SystemClock, level, message)
    }

    /// Like [`LogAction::global`], stamped by `clock`.
    pub fn global_with_clock(clock: &dyn Clock, level: Level, message: &[u8]) -> Self {
        Self::new_with_clock(
            clock,
            ManifestName::default(),
            SpanId::default(),
            level,
            Fields::new(),
            message,
        )
    }

    /// Assembles a log line from an already-owned message and a known time.
    pub(super) fn from_parts(
        manifest: ManifestName,
        span_id: SpanId,
        timestamp: Timestamp,
        level: Level,
        message: Vec<u8>,
    ) -> Self {
        Self {
            manifest,
            span_id,
            timestamp,
            level,
            fields: Fields::new(),
            message,
        }
    }

    pub fn manifest(&self) -> &ManifestName {
        &self.manifest
    }

    pub fn span_id(&self) -> &SpanId {
        &self.span_id
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "manifest: {}, spanID: {}, msg: \"", self.manifest, self.span_id)?;
        // Bytes that are not UTF-8 are escaped one by one, never replaced.
        for chunk in self.message.utf8_chunks() {
            write!(f, "{}", chunk.valid().escape_debug())?;
            for byte in chunk.invalid() {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        f.write_str("\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::clock::FixedClock;

    fn at(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn message_is_copied_not_borrowed() {
        let mut buf = b"first line\n".to_vec();
        let action = LogAction::new(
            "web".into(),
            "build:1".into(),
            Level::Info,
            Fields::new(),
            &buf,
        );

        buf.fill(b'x');
        buf.extend_from_slice(b"more");

        assert_eq!(action.message(), b"first line\n");
    }

    #[test]
    fn global_message_is_copied_too() {
        let mut buf = *b"global\n";
        let action = LogAction::global(Level::Warn, &buf);
        buf[0] = b'G';

        assert_eq!(action.message(), b"global\n");
    }

    #[test]
    fn global_has_no_attribution() {
        for level in [Level::Debug, Level::Info, Level::Error] {
            let action = LogAction::global(level, b"anything");
            assert!(action.manifest().is_empty());
            assert!(action.span_id().is_empty());
            assert!(action.fields().is_empty());
            assert_eq!(action.level(), level);
        }
    }

    #[test]
    fn empty_message_is_fine() {
        let action = LogAction::global(Level::Info, b"");
        assert!(action.message().is_empty());
    }

    #[test]
    fn timestamp_comes_from_the_clock() {
        let clock = FixedClock(at("2022-02-02T10:00:00Z"));
        let action = LogAction::global_with_clock(&clock, Level::Info, b"tick\n");
        assert_eq!(action.timestamp(), at("2022-02-02T10:00:00Z"));
    }

    #[test]
    fn fields_are_kept_verbatim() {
        let mut fields = Fields::new();
        fields.insert("progressID".into(), "layer-3".into());
        fields.insert("attempt".into(), "2".into());

        let action = LogAction::new(
            "api".into(),
            "build:api:4".into(),
            Level::Verbose,
            fields.clone(),
            b"pulling\n",
        );

        assert_eq!(action.fields(), &fields);
        assert_eq!(action.manifest().as_str(), "api");
        assert_eq!(action.span_id().as_str(), "build:api:4");
    }

    #[test]
    fn summarize_marks_log() {
        let mut summary = ChangeSummary::new();
        LogAction::global(Level::Info, b"x").summarize(&mut summary);
        assert!(summary.log_changed());
    }

    #[test]
    fn display_shows_manifest_span_and_quoted_message() {
        let action = LogAction::new(
            "web".into(),
            "build:1".into(),
            Level::Info,
            Fields::new(),
            b"hello \"world\"\n",
        );

        assert_eq!(
            action.to_string(),
            r#"manifest: web, spanID: build:1, msg: "hello \"world\"\n""#
        );
    }

    #[test]
    fn display_escapes_invalid_bytes_instead_of_replacing_them() {
        let raw = LogAction::global(Level::Info, b"bad \xff byte\n");
        let replaced = LogAction::global(Level::Info, "bad \u{fffd} byte\n".as_bytes());

        assert_eq!(
            raw.to_string(),
            r#"manifest: , spanID: , msg: "bad \xff byte\n""#
        );
        assert_ne!(raw.to_string(), replaced.to_string());
    }
}
