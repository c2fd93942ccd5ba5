//! Actionlog: normalizes occurrences into immutable, time-ordered actions.
//!
//! Producers (log statements, the platform event stream, error sites) build
//! [`action::Action`] values and hand them to a [`dispatch::Dispatcher`]. The
//! reducer pulls them off the [`dispatch::ActionQueue`] in batches and asks
//! each one what it changed via a [`summary::ChangeSummary`].

pub mod action;
pub mod cli;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod logger;
pub mod model;
pub mod observability;
pub mod summary;
