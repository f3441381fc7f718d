//! JSON output helpers for `--json`.
//!
//! Run summary:
//! ```json
//! {
//!   "dry_run": false,
//!   "upgradable": 2,
//!   "succeeded": 1,
//!   "failed": 1,
//!   "results": [
//!     { "id": 1, "name": "A", "outcome": "trigger_failed", "error": "status 500" },
//!     { "id": 3, "name": "C", "outcome": "upgraded", "error": null }
//!   ]
//! }
//! ```
//! On a dry run `results` lists the upgradable apps with `"outcome": "pending"`.

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::application::services::upgrade::RunSummary;

/// Render a finished run as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_summary(summary: &RunSummary) -> Result<String> {
    let results: Vec<Value> = if summary.dry_run {
        summary
            .upgradable
            .iter()
            .map(|app| {
                json!({
                    "id": app.id,
                    "name": app.name,
                    "outcome": "pending",
                    "error": Value::Null,
                })
            })
            .collect()
    } else {
        summary
            .results
            .iter()
            .map(|r| {
                json!({
                    "id": r.app.id,
                    "name": r.app.name,
                    "outcome": r.outcome.label(),
                    "error": r.outcome.error().map(ToString::to_string),
                })
            })
            .collect()
    };

    let obj = json!({
        "dry_run": summary.dry_run,
        "upgradable": summary.upgradable.len(),
        "succeeded": summary.succeeded(),
        "failed": summary.failed(),
        "results": results,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format a JSON error object for a fatal failure.
///
/// ```json
/// { "error": true, "message": "...", "code": "..." }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
