//! A minimal reducer: renders log actions as they come off the queue.

use std::io::Write;

use crate::action::{Action, ErrorAction, LogAction, PanicAction, PlatformEventAction};
use crate::config::OutputFormat;
use crate::dispatch::ActionQueue;
use crate::model::Level;
use crate::summary::ChangeSummary;

use super::format::render;

/// How reduced log lines are written.
#[derive(Debug, Clone, Copy)]
pub(super) struct Output {
    pub format: OutputFormat,
    pub min_level: Level,
}

/// Reduces every batch until the producers are done.
///
/// Error actions are reported and skipped; a panic action stops the run.
pub(super) fn reduce(
    queue: &ActionQueue,
    output: &Output,
    out: &mut impl Write,
) -> Result<ChangeSummary, String> {
    let mut total = ChangeSummary::new();
    let mut reduced = 0usize;

    while let Some(batch) = queue.next_batch() {
        let mut summary = batch.summary;

        for action in &batch.actions {
            reduce_one(&**action, output, out, &mut summary)?;
        }
        out.flush()
            .map_err(|e| format!("failed to write output: {e}"))?;

        reduced += batch.actions.len();
        tracing::debug!(
            actions = batch.actions.len(),
            log_changed = summary.log_changed(),
            "reduced batch"
        );
        total.add(&summary);
    }

    tracing::info!(actions = reduced, log_changed = total.log_changed(), "done");
    Ok(total)
}

fn reduce_one(
    action: &dyn Action,
    output: &Output,
    out: &mut impl Write,
    summary: &mut ChangeSummary,
) -> Result<(), String> {
    if let Some(log) = action.downcast_ref::<LogAction>() {
        write_log(log, output, out)
    } else if let Some(event) = action.downcast_ref::<PlatformEventAction>() {
        let log = event.to_log_action(&event.manifest);
        log.summarize(summary);
        write_log(&log, output, out)
    } else if let Some(err) = action.downcast_ref::<ErrorAction>() {
        tracing::warn!(error = %err.error, "skipped input");
        Ok(())
    } else if let Some(panic) = action.downcast_ref::<PanicAction>() {
        Err(format!("producer panicked: {}", panic.error))
    } else {
        tracing::debug!(?action, "ignored action");
        Ok(())
    }
}

fn write_log(log: &LogAction, output: &Output, out: &mut impl Write) -> Result<(), String> {
    if !log.level().is_at_least(output.min_level) {
        return Ok(());
    }
    let line = render(log, output.format)?;
    writeln!(out, "{line}").map_err(|e| format!("failed to write output: {e}"))
}
