//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::Parser;
use clap::builder::{BoolishValueParser, FalseyValueParser};

use crate::application::services::upgrade::{RunOptions, notify_best_effort, run_upgrades};
use crate::domain::config::DEFAULT_DELAY_SECS;
use crate::domain::{ConfigError, Settings, UpgraderConfig, notification};
use crate::infra::{HttpManagementApi, WebhookNotifier, http};
use crate::output::{OutputContext, TerminalReporter, json};

/// Upgrade every app with a pending update on a TrueNAS-style server, one at a time
#[derive(Parser)]
#[command(name = "app-upgrader", version)]
pub struct Cli {
    /// Server address, e.g. https://nas.local
    #[arg(long, env = "BASE_URL")]
    pub base_url: Option<String>,

    /// API key sent as a bearer token
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Discord-compatible webhook for progress notifications
    #[arg(long, env = "DISCORD_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,

    /// Seconds to wait between two apps
    #[arg(long, env = "UPGRADE_DELAY_SECS", default_value_t = DEFAULT_DELAY_SECS)]
    pub delay_secs: u64,

    /// Verify the server's TLS certificate
    #[arg(long, env = "VERIFY_TLS", value_parser = BoolishValueParser::new())]
    pub verify_tls: bool,

    /// List apps with an upgrade available without upgrading them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,
}

impl Cli {
    /// Execute one upgrade run.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the app inventory
    /// cannot be fetched. Individual app failures do not make the run fail.
    pub async fn run(self) -> Result<()> {
        // Progress lines go to stdout, which belongs to the JSON document in --json mode.
        let ctx = OutputContext::new(self.no_color, self.quiet || self.json);

        let config = match UpgraderConfig::from_settings(self.settings()) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!(error = %err, "invalid configuration");
                if !self.dry_run {
                    notify_config_error(self.webhook_url.clone(), &err).await;
                }
                return Err(self.fail(err.into(), "config_error"));
            }
        };
        tracing::debug!(?config, "configuration loaded");

        let api = HttpManagementApi::new(
            http::api_client(&config.api_key, config.verify_tls)?,
            config.api_root.clone(),
        );
        let notifier = WebhookNotifier::new(http::webhook_client()?, config.webhook_url.clone());
        if !notifier.is_configured() && !self.dry_run {
            tracing::info!("DISCORD_WEBHOOK_URL is not set, notifications disabled");
        }
        let reporter = TerminalReporter::new(&ctx);
        let options = RunOptions {
            delay: config.delay,
            dry_run: self.dry_run,
        };

        let summary = match run_upgrades(&api, &notifier, &reporter, options).await {
            Ok(summary) => summary,
            Err(err) => return Err(self.fail(err.into(), "fetch_failed")),
        };

        if self.json {
            println!("{}", json::format_summary(&summary)?);
        } else {
            ctx.summary(&summary);
        }
        Ok(())
    }

    fn settings(&self) -> Settings {
        Settings {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            webhook_url: self.webhook_url.clone(),
            delay_secs: self.delay_secs,
            verify_tls: self.verify_tls,
        }
    }

    /// Emit the JSON error object when `--json` is active, then hand the error back.
    fn fail(&self, err: anyhow::Error, code: &str) -> anyhow::Error {
        if self.json {
            match json::format_error(&err.to_string(), code) {
                Ok(obj) => println!("{obj}"),
                Err(e) => tracing::warn!(error = %e, "could not render JSON error"),
            }
        }
        err
    }
}

/// Best-effort notification for a configuration error.
///
/// Only possible when the webhook itself is usable.
async fn notify_config_error(webhook_url: Option<String>, err: &ConfigError) {
    if matches!(err, ConfigError::InvalidWebhookUrl(_)) {
        return;
    }
    let url = webhook_url.filter(|u| !u.trim().is_empty());
    if url.is_none() {
        return;
    }
    match http::webhook_client() {
        Ok(client) => {
            let notifier = WebhookNotifier::new(client, url);
            notify_best_effort(&notifier, &notification::config_failed(err)).await;
        }
        Err(e) => tracing::warn!(error = %e, "notification not delivered"),
    }
}
