//! Notification actions: typed payloads with no logic of their own.
//!
//! The reducer decides what each one means. Fields are not validated here.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Action;

type BoxError = Box<dyn Error + Send + Sync>;

/// An error raised somewhere in the process, carried to the reducer.
///
/// Whether it is fatal is the reducer's call.
#[derive(Debug)]
pub struct ErrorAction {
    pub error: BoxError,
}

impl Action for ErrorAction {}

impl ErrorAction {
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// A panic caught on some producer thread.
#[derive(Debug)]
pub struct PanicAction {
    pub error: BoxError,
}

impl Action for PanicAction {}

impl PanicAction {
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// The user's analytics choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalyticsOpt {
    /// No explicit choice made.
    #[default]
    Default,
    OptIn,
    OptOut,
}

impl fmt::Display for AnalyticsOpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::OptIn => "opt-in",
            Self::OptOut => "opt-out",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown analytics opt: {0}")]
pub struct ParseOptError(String);

impl FromStr for AnalyticsOpt {
    type Err = ParseOptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "opt-in" => Ok(Self::OptIn),
            "opt-out" => Ok(Self::OptOut),
            _ => Err(ParseOptError(s.to_string())),
        }
    }
}

/// The user changed their analytics choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsUserOptAction {
    pub opt: AnalyticsOpt,
}

impl Action for AnalyticsUserOptAction {}

/// The analytics opt-in nudge was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsNudgeSurfacedAction;

impl Action for AnalyticsNudgeSurfacedAction {}

/// The cloud account lookup came back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloudStatusReceivedAction {
    pub found: bool,
    pub username: String,
    pub team_name: String,

    /// Set when the lookup was triggered by the user finishing registration.
    pub is_post_registration_lookup: bool,

    /// Newest client version the cloud recommends. Empty when none.
    pub suggested_version: String,
}

impl Action for CloudStatusReceivedAction {}

/// The user began cloud registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStartedCloudRegistrationAction;

impl Action for UserStartedCloudRegistrationAction {}
