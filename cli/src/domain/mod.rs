//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::cli`,
//! `crate::application`, `tokio`, or `reqwest`.
//! All functions are synchronous and take data in, returning data out.

pub mod app;
pub mod config;
pub mod error;
pub mod notification;

pub use app::{AppId, AppRecord, JobHandle, UpgradeOutcome, UpgradeState, filter_upgradable};
pub use config::{ApiKey, Settings, UpgraderConfig};
pub use error::{ApiError, ConfigError, NotifyError, UpgradeError};
