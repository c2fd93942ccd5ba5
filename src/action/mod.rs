//! Actions: immutable units of occurrence handed to the reducer.
//!
//! Anything can be an action as long as it implements [`Action`]. The trait
//! asks for nothing beyond being dispatchable; actions that change state the
//! reducer tracks incrementally also override [`Action::summarize`].
//! The reducer routes on concrete types with `downcast_ref`.
//!
//! Every action is frozen at construction and consumed exactly once.

mod event;
mod log;
mod notify;

use std::any::Any;
use std::fmt;

use crate::summary::ChangeSummary;

pub use event::PlatformEventAction;
pub use log::LogAction;
pub use notify::{
    AnalyticsNudgeSurfacedAction, AnalyticsOpt, AnalyticsUserOptAction, CloudStatusReceivedAction,
    ErrorAction, PanicAction, ParseOptError, UserStartedCloudRegistrationAction,
};

/// A value that can be dispatched to the reducer.
pub trait Action: Any + fmt::Debug + Send {
    /// Marks which categories of state this action changes.
    ///
    /// Implementations may only set flags. The default marks nothing.
    fn summarize(&self, _summary: &mut ChangeSummary) {}
}

impl dyn Action {
    /// Whether this action is a `T`.
    pub fn is<T: Action>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Borrows this action as a `T`, if it is one.
    pub fn downcast_ref<T: Action>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}
