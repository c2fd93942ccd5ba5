//! Change summaries: which categories of state a batch of actions touched.
//!
//! The reducer starts each dispatch cycle with an empty summary and lets every
//! action in the batch mark what it changed. Flags only ever go from unset to
//! set, so the result is the OR over the batch regardless of order.

use crate::action::Action;

/// Which categories of state changed during one dispatch cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[must_use]
pub struct ChangeSummary {
    log: bool,
}

impl ChangeSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarizes a batch of actions into a fresh summary.
    pub fn of(actions: &[Box<dyn Action>]) -> Self {
        let mut summary = Self::new();
        for action in actions {
            action.summarize(&mut summary);
        }
        summary
    }

    /// Records that log data changed.
    pub fn mark_log(&mut self) {
        self.log = true;
    }

    pub fn log_changed(&self) -> bool {
        self.log
    }

    /// Folds another summary into this one.
    pub fn add(&mut self, other: &ChangeSummary) {
        self.log |= other.log;
    }

    /// True when nothing was marked.
    pub fn is_empty(&self) -> bool {
        !self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::action::{
        AnalyticsNudgeSurfacedAction, ErrorAction, LogAction, UserStartedCloudRegistrationAction,
    };
    use crate::model::Level;

    fn log_action() -> Box<dyn Action> {
        Box::new(LogAction::global(Level::Info, b"hello\n"))
    }

    #[test]
    fn empty_batch_changes_nothing() {
        let summary = ChangeSummary::of(&[]);
        assert!(summary.is_empty());
        assert!(!summary.log_changed());
    }

    #[test]
    fn batch_without_logs_leaves_log_unset() {
        let batch: Vec<Box<dyn Action>> = vec![
            Box::new(AnalyticsNudgeSurfacedAction),
            Box::new(ErrorAction::new("boom")),
            Box::new(UserStartedCloudRegistrationAction),
        ];
        assert!(!ChangeSummary::of(&batch).log_changed());
    }

    #[test]
    fn one_log_in_a_mixed_batch_marks_log() {
        let batch: Vec<Box<dyn Action>> = vec![
            Box::new(AnalyticsNudgeSurfacedAction),
            log_action(),
            Box::new(ErrorAction::new("boom")),
        ];
        assert!(ChangeSummary::of(&batch).log_changed());
    }

    #[test]
    fn later_actions_never_clear_a_flag() {
        let batch: Vec<Box<dyn Action>> = vec![
            log_action(),
            Box::new(AnalyticsNudgeSurfacedAction),
            Box::new(UserStartedCloudRegistrationAction),
        ];
        assert!(ChangeSummary::of(&batch).log_changed());
    }

    #[test]
    fn add_is_an_or() {
        let mut marked = ChangeSummary::new();
        marked.mark_log();

        let mut acc = ChangeSummary::new();
        acc.add(&marked);
        assert!(acc.log_changed());

        acc.add(&ChangeSummary::new());
        assert!(acc.log_changed());
    }
}
