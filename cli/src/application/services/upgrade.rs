//! Application service for the upgrade run use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.
//!
//! A run is strictly sequential: apps are upgraded one at a time in the order
//! the inventory returned them. Only a failed inventory fetch aborts the run;
//! every per-app failure is reported and the loop moves on.

use std::time::Duration;

use crate::application::ports::{ManagementApi, Notifier, ProgressReporter};
use crate::domain::notification;
use crate::domain::{
    AppRecord, ApiError, JobHandle, UpgradeError, UpgradeOutcome, UpgradeState, filter_upgradable,
};

// ── Public types ──────────────────────────────────────────────────────────────

/// Knobs for a single run.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Pause between two consecutive apps.
    pub delay: Duration,
    /// List upgradable apps without triggering anything.
    pub dry_run: bool,
}

/// Result of processing one app.
#[derive(Debug, Clone)]
pub struct AppResult {
    pub app: AppRecord,
    pub outcome: UpgradeOutcome,
}

/// Everything a finished run produced, in processing order.
///
/// Each outcome was already logged and notified when it happened; this is
/// only handed back for rendering.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Apps that had an upgrade available.
    pub upgradable: Vec<AppRecord>,
    /// One entry per processed app. Empty on a dry run.
    pub results: Vec<AppResult>,
    pub dry_run: bool,
}

impl RunSummary {
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_success()).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

// ── Use-case ──────────────────────────────────────────────────────────────────

/// Run one full upgrade pass.
///
/// Start notification → fetch (fatal on failure) → count notification →
/// for each upgradable app: trigger, await, notify, delay → completion
/// notification. A dry run stops after the fetch and sends nothing.
///
/// # Errors
///
/// Returns [`UpgradeError::Fetch`] if the inventory cannot be fetched. No
/// upgrade is attempted in that case. Per-app failures are not errors.
pub async fn run_upgrades(
    api: &impl ManagementApi,
    notifier: &impl Notifier,
    reporter: &impl ProgressReporter,
    options: RunOptions,
) -> Result<RunSummary, UpgradeError> {
    let notify = !options.dry_run;

    if notify {
        notify_best_effort(notifier, &notification::run_started()).await;
    }

    let upgradable = match fetch_upgradable_apps(api).await {
        Ok(apps) => apps,
        Err(err) => {
            tracing::error!(error = %err, "failed to fetch apps");
            if notify {
                let UpgradeError::Fetch(cause) = &err;
                notify_best_effort(notifier, &notification::fetch_failed(cause)).await;
            }
            return Err(err);
        }
    };

    tracing::info!(count = upgradable.len(), "found apps with upgrade available");

    if options.dry_run {
        for app in &upgradable {
            reporter.step(&format!("{} ({}) has an upgrade available", app.name, app.id));
        }
        return Ok(RunSummary {
            upgradable,
            results: Vec::new(),
            dry_run: true,
        });
    }

    notify_best_effort(notifier, &notification::apps_found(upgradable.len())).await;

    let mut results = Vec::with_capacity(upgradable.len());
    for (index, app) in upgradable.iter().enumerate() {
        if index > 0 && !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }
        let outcome = upgrade_app(api, notifier, reporter, app).await;
        results.push(AppResult {
            app: app.clone(),
            outcome,
        });
    }

    tracing::info!("done with all upgrades");
    notify_best_effort(notifier, &notification::run_finished()).await;

    Ok(RunSummary {
        upgradable,
        results,
        dry_run: false,
    })
}

/// Fetch the inventory and keep only apps with an upgrade available.
///
/// # Errors
///
/// Returns [`UpgradeError::Fetch`] on any inventory failure: non-success
/// status, transport error or undecodable body.
pub async fn fetch_upgradable_apps(
    api: &impl ManagementApi,
) -> Result<Vec<AppRecord>, UpgradeError> {
    let apps = api.list_apps().await.map_err(UpgradeError::Fetch)?;
    tracing::debug!(total = apps.len(), "fetched app inventory");
    Ok(filter_upgradable(apps))
}

/// Drive one app through its upgrade state machine and report the outcome.
///
/// Never fails: the outcome carries any error so the caller can continue.
pub async fn upgrade_app(
    api: &impl ManagementApi,
    notifier: &impl Notifier,
    reporter: &impl ProgressReporter,
    app: &AppRecord,
) -> UpgradeOutcome {
    let name = app.name.as_str();
    let mut state = UpgradeState::Pending;

    tracing::info!(app = name, id = %app.id, "upgrading");
    reporter.step(&format!("Upgrading {name}..."));
    notify_best_effort(notifier, &notification::upgrading(name)).await;

    transition(&mut state, UpgradeState::TriggerRequested, name);
    let outcome = match api.trigger_upgrade(&app.id).await {
        Err(err) => {
            tracing::error!(app = name, error = %err, "failed to initiate upgrade");
            UpgradeOutcome::TriggerFailed(err)
        }
        Ok(job) => {
            transition(&mut state, UpgradeState::JobAwaiting, name);
            match await_job(api, &job).await {
                Ok(()) => UpgradeOutcome::Upgraded,
                Err(err) => {
                    tracing::error!(app = name, job = %job, error = %err, "failed to await job");
                    UpgradeOutcome::WaitFailed(err)
                }
            }
        }
    };
    transition(&mut state, UpgradeState::from(&outcome), name);
    debug_assert!(state.is_terminal(), "{name} left in {state:?}");

    match &outcome {
        UpgradeOutcome::Upgraded => {
            tracing::info!(app = name, "upgrade finished");
            reporter.success(&format!("{name} upgraded"));
        }
        UpgradeOutcome::TriggerFailed(err) | UpgradeOutcome::WaitFailed(err) => {
            reporter.warn(&format!("{name} failed to upgrade: {err}"));
        }
    }
    notify_best_effort(notifier, &notification::outcome(name, &outcome)).await;

    outcome
}

/// Block on the server until `job` completes.
///
/// No client-side timeout: resolving the job is the server's business.
///
/// # Errors
///
/// Returns the [`ApiError`] of the wait call unchanged.
pub async fn await_job(api: &impl ManagementApi, job: &JobHandle) -> Result<(), ApiError> {
    tracing::info!(job = %job, "waiting for job to complete");
    api.wait_for_job(job).await
}

/// Send a notification, logging instead of propagating any failure.
pub async fn notify_best_effort(notifier: &impl Notifier, message: &str) {
    if let Err(err) = notifier.notify(message).await {
        tracing::warn!(error = %err, "notification not delivered");
    }
}

fn transition(state: &mut UpgradeState, next: UpgradeState, app: &str) {
    match state.advance(next) {
        Some(advanced) => {
            tracing::debug!(app, from = ?*state, to = ?advanced, "state transition");
            *state = advanced;
        }
        None => tracing::warn!(app, from = ?*state, to = ?next, "ignored invalid state transition"),
    }
}
