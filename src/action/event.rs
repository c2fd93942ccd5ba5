//! Platform event actions and their translation into log lines.

use crate::model::{Level, ManifestName, PlatformEvent, SpanId};

use super::{Action, LogAction};

/// A platform event, attributed to the manifest whose objects it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformEventAction {
    pub event: PlatformEvent,
    pub manifest: ManifestName,
}

impl Action for PlatformEventAction {}

impl PlatformEventAction {
    pub fn new(event: PlatformEvent, manifest: ManifestName) -> Self {
        Self { event, manifest }
    }

    /// Renders the event as an info line for `manifest`.
    ///
    /// The line keeps the event's own timestamp (see
    /// [`PlatformEvent::observed_at`]), not the time of translation, and lands
    /// in the manifest's `events:` span.
    pub fn to_log_action(&self, manifest: &ManifestName) -> LogAction {
        let message = format!(
            "[event: {}] {}\n",
            self.event.involved_object.human_readable(),
            self.event.message.trim()
        );

        LogAction::from_parts(
            manifest.clone(),
            SpanId::events(manifest),
            self.event.observed_at(),
            Level::Info,
            message.into_bytes(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;

    use crate::clock::{Clock, FixedClock};
    use crate::model::ObjectReference;
    use crate::summary::ChangeSummary;

    fn at(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn event(namespace: &str, message: &str, last: Timestamp) -> PlatformEvent {
        PlatformEvent {
            involved_object: ObjectReference {
                kind: "Pod".into(),
                namespace: namespace.into(),
                name: "web-1".into(),
            },
            message: message.into(),
            last_timestamp: Some(last),
            event_time: None,
        }
    }

    #[test]
    fn message_is_trimmed_and_prefixed() {
        let action = PlatformEventAction::new(
            event("", "  started\n", at("2023-01-01T00:00:00Z")),
            "web".into(),
        );
        let log = action.to_log_action(&"web".into());

        assert_eq!(log.message(), b"[event: pod web-1] started\n");
    }

    #[test]
    fn namespaced_object_is_qualified() {
        let action = PlatformEventAction::new(
            event("staging", "Pulling image", at("2023-01-01T00:00:00Z")),
            "web".into(),
        );
        let log = action.to_log_action(&"web".into());

        assert_eq!(log.message(), b"[event: pod staging/web-1] Pulling image\n");
    }

    #[test]
    fn keeps_the_event_time_not_translation_time() {
        let observed = at("2019-05-05T05:05:05Z");
        let translated_at = FixedClock(at("2030-01-01T00:00:00Z"));

        let action = PlatformEventAction::new(event("", "Scheduled", observed), "web".into());
        let log = action.to_log_action(&"web".into());

        assert_eq!(log.timestamp(), observed);
        assert_ne!(log.timestamp(), translated_at.now());
    }

    #[test]
    fn event_without_last_timestamp_is_still_translated() {
        let mut evt = event("", "Scheduled", at("2023-01-01T00:00:00Z"));
        evt.last_timestamp = None;
        evt.event_time = Some(at("2023-06-01T08:00:00Z"));

        let log = PlatformEventAction::new(evt, "web".into()).to_log_action(&"web".into());

        assert_eq!(log.timestamp(), at("2023-06-01T08:00:00Z"));
        assert_eq!(log.message(), b"[event: pod web-1] Scheduled\n");
    }

    #[test]
    fn info_level_in_the_events_span() {
        let action = PlatformEventAction::new(
            event("", "Back-off restarting failed container", at("2023-01-01T00:00:00Z")),
            "web".into(),
        );
        let log = action.to_log_action(&"web".into());

        assert_eq!(log.level(), Level::Info);
        assert_eq!(log.span_id().as_str(), "events:web");
        assert!(log.fields().is_empty());
    }

    #[test]
    fn translation_manifest_can_differ_from_attribution() {
        let action = PlatformEventAction::new(
            event("", "Created", at("2023-01-01T00:00:00Z")),
            "web".into(),
        );
        let log = action.to_log_action(&"web-sidecar".into());

        assert_eq!(log.manifest().as_str(), "web-sidecar");
        assert_eq!(log.span_id().as_str(), "events:web-sidecar");
        assert_eq!(action.manifest.as_str(), "web");
    }

    #[test]
    fn translation_is_deterministic() {
        let action = PlatformEventAction::new(
            event("ns", "Killing", at("2023-01-01T00:00:00Z")),
            "web".into(),
        );
        let manifest = ManifestName::from("web");
        assert_eq!(
            action.to_log_action(&manifest),
            action.to_log_action(&manifest)
        );
    }

    #[test]
    fn the_event_itself_does_not_summarize() {
        let action = PlatformEventAction::new(
            event("", "Created", at("2023-01-01T00:00:00Z")),
            "web".into(),
        );
        let mut summary = ChangeSummary::new();
        action.summarize(&mut summary);
        assert!(summary.is_empty());
    }
}
