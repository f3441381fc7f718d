//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::cli`, or `crate::output`.

use crate::domain::{AppId, AppRecord, ApiError, JobHandle, NotifyError};

// ── Management API Port ───────────────────────────────────────────────────────

/// The three management API calls an upgrade run needs.
#[allow(async_fn_in_trait)]
pub trait ManagementApi {
    /// Fetch the full app inventory, in server order.
    async fn list_apps(&self) -> Result<Vec<AppRecord>, ApiError>;
    /// Ask the server to upgrade one app. Returns the job to wait on.
    async fn trigger_upgrade(&self, id: &AppId) -> Result<JobHandle, ApiError>;
    /// Block until the server reports the job as finished.
    ///
    /// May take arbitrarily long; implementations must not add a timeout.
    async fn wait_for_job(&self, job: &JobHandle) -> Result<(), ApiError>;
}

// ── Notification Port ─────────────────────────────────────────────────────────

/// Chat notification side channel.
///
/// Failures are returned, never panicked or retried; callers decide whether
/// to log them.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    /// Deliver one message.
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
