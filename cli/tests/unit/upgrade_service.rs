//! Tests for the `upgrade` application service.
//!
//! Drives `run_upgrades()` and `upgrade_app()` through scripted ports and
//! asserts the call sequence, the per-app outcomes and the notifications.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use app_upgrader::application::services::upgrade::{
    RunOptions, fetch_upgradable_apps, run_upgrades, upgrade_app,
};
use app_upgrader::domain::{ApiError, UpgradeError, UpgradeOutcome};

use crate::mocks::{
    Call, NoopReporter, RecordingNotifier, ScriptedApi, abc_inventory, app, status,
};

fn no_delay() -> RunOptions {
    RunOptions {
        delay: Duration::ZERO,
        dry_run: false,
    }
}

// ── Filtering ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_keeps_only_upgradable_apps_in_inventory_order() {
    let api = ScriptedApi::new(abc_inventory());
    let apps = fetch_upgradable_apps(&api).await.expect("fetch ok");
    let names: Vec<&str> = apps.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["A", "C"]);
}

#[tokio::test]
async fn fetch_failure_is_a_fetch_error() {
    let api = ScriptedApi::failing_inventory(status(500));
    let err = fetch_upgradable_apps(&api).await.unwrap_err();
    assert!(matches!(err, UpgradeError::Fetch(ApiError::Status { status: 500, .. })));
}

// ── Full run: the A/B/C scenario ─────────────────────────────────────────────

#[tokio::test]
async fn run_skips_b_continues_after_a_fails_and_upgrades_c() {
    let api = ScriptedApi::new(abc_inventory())
        .trigger_err(1, status(500))
        .trigger_ok(3, "job-42")
        .wait_ok("job-42");
    let notifier = RecordingNotifier::new();

    let summary = run_upgrades(&api, &notifier, &NoopReporter, no_delay())
        .await
        .expect("per-app failures do not fail the run");

    assert_eq!(
        api.calls(),
        [
            Call::List,
            Call::Trigger("1".to_string()),
            Call::Trigger("3".to_string()),
            Call::Wait("job-42".to_string()),
        ]
    );

    assert_eq!(summary.results.len(), 2);
    assert_eq!(summary.results[0].app.name, "A");
    assert_eq!(
        summary.results[0].outcome,
        UpgradeOutcome::TriggerFailed(status(500))
    );
    assert_eq!(summary.results[1].app.name, "C");
    assert_eq!(summary.results[1].outcome, UpgradeOutcome::Upgraded);
    assert_eq!(summary.succeeded(), 1);
    assert_eq!(summary.failed(), 1);

    assert_eq!(
        notifier.messages(),
        [
            "**TrueNAS App Upgrade**: Starting upgrade run.",
            "**TrueNAS App Upgrade**: Found 2 apps with an upgrade available.",
            "**Upgrading**: A...",
            "**Upgrade FAILED** for A. (Status 500)",
            "**Upgrading**: C...",
            "**Upgrade succeeded** for C.",
            "**TrueNAS App Upgrade**: Done with all upgrades.",
        ]
    );
}

#[tokio::test]
async fn fetch_failure_aborts_before_any_upgrade() {
    let api = ScriptedApi::failing_inventory(status(401));
    let notifier = RecordingNotifier::new();

    let err = run_upgrades(&api, &notifier, &NoopReporter, no_delay())
        .await
        .unwrap_err();

    assert!(matches!(err, UpgradeError::Fetch(_)));
    assert_eq!(api.calls(), [Call::List]);
    assert_eq!(
        notifier.messages(),
        [
            "**TrueNAS App Upgrade**: Starting upgrade run.",
            "**TrueNAS App Upgrade**: Unable to fetch apps (Status 401)",
        ]
    );
}

#[tokio::test]
async fn wait_failure_is_reported_and_the_loop_proceeds() {
    let api = ScriptedApi::new(vec![app(1, "A", true), app(3, "C", true)])
        .trigger_ok(1, "7")
        .wait_err("7", status(500))
        .trigger_ok(3, "8")
        .wait_ok("8");
    let notifier = RecordingNotifier::new();

    let summary = run_upgrades(&api, &notifier, &NoopReporter, no_delay())
        .await
        .expect("run ok");

    assert_eq!(summary.results[0].outcome, UpgradeOutcome::WaitFailed(status(500)));
    assert_eq!(summary.results[1].outcome, UpgradeOutcome::Upgraded);
    assert!(
        notifier
            .messages()
            .contains(&"**Upgrade FAILED** for A. (Status 500)".to_string())
    );
}

#[tokio::test]
async fn empty_inventory_still_sends_count_and_completion() {
    let api = ScriptedApi::new(vec![app(2, "B", false)]);
    let notifier = RecordingNotifier::new();

    let summary = run_upgrades(&api, &notifier, &NoopReporter, no_delay())
        .await
        .expect("run ok");

    assert!(summary.results.is_empty());
    assert_eq!(api.calls(), [Call::List]);
    assert_eq!(notifier.messages().len(), 3);
    assert_eq!(
        notifier.messages()[1],
        "**TrueNAS App Upgrade**: Found 0 apps with an upgrade available."
    );
}

// ── Delay between apps ────────────────────────────────────────────────────────

#[tokio::test]
async fn fixed_delay_separates_consecutive_apps_even_after_failures() {
    let delay = Duration::from_millis(40);
    // Every trigger fails (unscripted), so only the delay separates the calls.
    let api = ScriptedApi::new(vec![
        app(1, "A", true),
        app(2, "B", true),
        app(3, "C", true),
    ]);
    let notifier = RecordingNotifier::new();

    run_upgrades(
        &api,
        &notifier,
        &NoopReporter,
        RunOptions {
            delay,
            dry_run: false,
        },
    )
    .await
    .expect("run ok");

    let times = api.trigger_times();
    assert_eq!(times.len(), 3);
    for pair in times.windows(2) {
        let gap = pair[1].duration_since(pair[0]);
        assert!(gap >= delay, "gap {gap:?} shorter than {delay:?}");
    }
}

// ── Notification side channel ─────────────────────────────────────────────────

#[tokio::test]
async fn failing_notifier_never_changes_the_run() {
    let script = || {
        ScriptedApi::new(abc_inventory())
            .trigger_err(1, status(500))
            .trigger_ok(3, "job-42")
            .wait_ok("job-42")
    };

    let healthy_api = script();
    let healthy = run_upgrades(&healthy_api, &RecordingNotifier::new(), &NoopReporter, no_delay())
        .await
        .expect("run ok");

    let broken_api = script();
    let broken_notifier = RecordingNotifier::failing();
    let broken = run_upgrades(&broken_api, &broken_notifier, &NoopReporter, no_delay())
        .await
        .expect("notification failures are swallowed");

    assert_eq!(healthy_api.calls(), broken_api.calls());
    let outcomes = |s: &app_upgrader::application::services::upgrade::RunSummary| {
        s.results.iter().map(|r| r.outcome.clone()).collect::<Vec<_>>()
    };
    assert_eq!(outcomes(&healthy), outcomes(&broken));
    assert_eq!(broken_notifier.messages().len(), 7);
}

// ── Dry run ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn dry_run_lists_without_triggering_or_notifying() {
    let api = ScriptedApi::new(abc_inventory());
    let notifier = RecordingNotifier::new();

    let summary = run_upgrades(
        &api,
        &notifier,
        &NoopReporter,
        RunOptions {
            delay: Duration::ZERO,
            dry_run: true,
        },
    )
    .await
    .expect("run ok");

    assert!(summary.dry_run);
    assert_eq!(summary.upgradable.len(), 2);
    assert!(summary.results.is_empty());
    assert_eq!(api.calls(), [Call::List]);
    assert!(notifier.messages().is_empty());
}

// ── Single app ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn trigger_transport_error_skips_the_wait() {
    let api = ScriptedApi::new(Vec::new())
        .trigger_err(5, ApiError::Transport("connection reset".to_string()));
    let notifier = RecordingNotifier::new();

    let outcome = upgrade_app(&api, &notifier, &NoopReporter, &app(5, "plex", true)).await;

    assert!(matches!(outcome, UpgradeOutcome::TriggerFailed(ApiError::Transport(_))));
    assert_eq!(api.calls(), [Call::Trigger("5".to_string())]);
    assert_eq!(notifier.messages().len(), 2);
}

#[tokio::test]
async fn job_handle_is_passed_to_the_wait_call_verbatim() {
    let api = ScriptedApi::new(Vec::new())
        .trigger_ok(9, "\"job-42\"")
        .wait_ok("\"job-42\"");

    let outcome =
        upgrade_app(&api, &RecordingNotifier::new(), &NoopReporter, &app(9, "C", true)).await;

    assert_eq!(outcome, UpgradeOutcome::Upgraded);
    assert_eq!(api.calls()[1], Call::Wait("\"job-42\"".to_string()));
}
