//! Platform events: occurrences reported by the orchestration platform.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// The object a platform event is about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    #[serde(default)]
    pub kind: String,

    /// Empty for cluster-scoped objects.
    #[serde(default)]
    pub namespace: String,

    #[serde(default)]
    pub name: String,
}

impl ObjectReference {
    /// Renders the reference for a log line, e.g. `pod web-1` or
    /// `deployment kube-system/coredns`.
    ///
    /// The namespace is omitted when empty or `default`.
    pub fn human_readable(&self) -> String {
        let kind = self.kind.to_lowercase();
        if self.namespace.is_empty() || self.namespace == "default" {
            format!("{kind} {}", self.name)
        } else {
            format!("{kind} {}/{}", self.namespace, self.name)
        }
    }
}

/// An event as reported by the platform's watch stream.
///
/// Only the fields used for translation are kept; anything else in the
/// source JSON (type, reason, counts) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformEvent {
    pub involved_object: ObjectReference,

    #[serde(default)]
    pub message: String,

    /// When the platform last observed this event. Unset (or null) on events
    /// recorded through the newer events API, which fill `event_time` instead.
    #[serde(default)]
    pub last_timestamp: Option<Timestamp>,

    #[serde(default)]
    pub event_time: Option<Timestamp>,
}

impl PlatformEvent {
    /// When the event happened according to the platform.
    ///
    /// Prefers `last_timestamp`, then `event_time`. An event carrying neither
    /// is stamped at the Unix epoch rather than dropped.
    pub fn observed_at(&self) -> Timestamp {
        self.last_timestamp
            .or(self.event_time)
            .unwrap_or(Timestamp::UNIX_EPOCH)
    }
}
