//! Core data model for action logs.
//!
//! These types are shared by every producer: manifests and spans for
//! attribution, severity levels, structured fields, and the platform
//! events that get translated into log lines.

mod event;
mod level;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use event::{ObjectReference, PlatformEvent};
pub use level::{Level, ParseLevelError};

/// Structured metadata attached to a log line.
///
/// Ordered by key so rendering is stable.
pub type Fields = BTreeMap<String, String>;

/// A named scope that logs and events are attributed to.
///
/// The empty name is the global scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestName(String);

impl ManifestName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the global (unscoped) manifest.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ManifestName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ManifestName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ManifestName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Groups log lines from one logical operation or stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanId(String);

impl SpanId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The span shared by every platform event translated for a manifest.
    pub fn events(manifest: &ManifestName) -> Self {
        Self(format!("events:{manifest}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpanId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SpanId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
