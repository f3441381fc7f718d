//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: the management API client
//! and the notification webhook.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::cli` or `crate::output` are forbidden.

pub mod http;
pub mod management_api;
pub mod webhook;

pub use management_api::HttpManagementApi;
pub use webhook::WebhookNotifier;
