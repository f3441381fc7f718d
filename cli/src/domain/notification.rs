//! Text of the chat notifications sent at each milestone of a run.

use crate::domain::app::UpgradeOutcome;
use crate::domain::error::ApiError;

const TITLE: &str = "**TrueNAS App Upgrade**";

#[must_use]
pub fn run_started() -> String {
    format!("{TITLE}: Starting upgrade run.")
}

#[must_use]
pub fn fetch_failed(err: &ApiError) -> String {
    format!("{TITLE}: Unable to fetch apps ({})", reason(err))
}

#[must_use]
pub fn apps_found(count: usize) -> String {
    format!("{TITLE}: Found {count} apps with an upgrade available.")
}

#[must_use]
pub fn upgrading(name: &str) -> String {
    format!("**Upgrading**: {name}...")
}

#[must_use]
pub fn outcome(name: &str, outcome: &UpgradeOutcome) -> String {
    match outcome.error() {
        None => format!("**Upgrade succeeded** for {name}."),
        Some(err) => format!("**Upgrade FAILED** for {name}. ({})", reason(err)),
    }
}

#[must_use]
pub fn run_finished() -> String {
    format!("{TITLE}: Done with all upgrades.")
}

#[must_use]
pub fn config_failed(err: &dyn std::error::Error) -> String {
    format!("{TITLE}: Configuration error: {err}")
}

fn reason(err: &ApiError) -> String {
    match err.status() {
        Some(status) => format!("Status {status}"),
        None => err.to_string(),
    }
}
