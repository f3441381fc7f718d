//! Application records, job handles and the per-app upgrade state machine.
//!
//! Pure types only: no I/O, no async.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::ApiError;

// ── Records ──────────────────────────────────────────────────────────────────

/// Opaque application identifier, sent back verbatim in the upgrade request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub serde_json::Value);

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

/// One entry of the management API's app inventory.
///
/// Fields beyond these three are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    pub id: AppId,
    pub name: String,
    #[serde(default)]
    pub upgrade_available: bool,
}

/// Opaque token returned by the upgrade trigger and handed to the job wait call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(String);

impl JobHandle {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keep only the records flagged as upgradable, in inventory order.
#[must_use]
pub fn filter_upgradable(apps: Vec<AppRecord>) -> Vec<AppRecord> {
    apps.into_iter().filter(|a| a.upgrade_available).collect()
}

// ── Outcomes ─────────────────────────────────────────────────────────────────

/// Terminal result of processing one app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// Trigger accepted and the job finished successfully.
    Upgraded,
    /// The upgrade request itself was rejected or never reached the server.
    TriggerFailed(ApiError),
    /// The job was created but waiting on it failed.
    WaitFailed(ApiError),
}

impl UpgradeOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Upgraded)
    }

    /// Short machine-readable label used in the JSON summary.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upgraded => "upgraded",
            Self::TriggerFailed(_) => "trigger_failed",
            Self::WaitFailed(_) => "wait_failed",
        }
    }

    /// The API failure behind this outcome, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            Self::Upgraded => None,
            Self::TriggerFailed(e) | Self::WaitFailed(e) => Some(e),
        }
    }
}

// ── State machine ────────────────────────────────────────────────────────────

/// Lifecycle of a single app during a run.
///
/// ```text
/// Pending → TriggerRequested → TriggerFailed
///                            → JobAwaiting → Upgraded
///                                          → WaitFailed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeState {
    Pending,
    TriggerRequested,
    TriggerFailed,
    JobAwaiting,
    Upgraded,
    WaitFailed,
}

impl UpgradeState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::TriggerFailed | Self::Upgraded | Self::WaitFailed)
    }

    /// Move to `next`, returning `None` when the transition is not allowed.
    #[must_use]
    pub fn advance(self, next: Self) -> Option<Self> {
        use UpgradeState::{
            JobAwaiting, Pending, TriggerFailed, TriggerRequested, Upgraded, WaitFailed,
        };
        match (self, next) {
            (Pending, TriggerRequested)
            | (TriggerRequested, TriggerFailed | JobAwaiting)
            | (JobAwaiting, Upgraded | WaitFailed) => Some(next),
            _ => None,
        }
    }
}

impl From<&UpgradeOutcome> for UpgradeState {
    fn from(outcome: &UpgradeOutcome) -> Self {
        match outcome {
            UpgradeOutcome::Upgraded => Self::Upgraded,
            UpgradeOutcome::TriggerFailed(_) => Self::TriggerFailed,
            UpgradeOutcome::WaitFailed(_) => Self::WaitFailed,
        }
    }
}
