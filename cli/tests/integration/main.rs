//! Integration tests for app-upgrader
//!
//! These tests talk HTTP to `wiremock` servers and spawn the actual binary.
//! They are slower and should be run separately from unit tests.
