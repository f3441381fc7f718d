//! Application services: use-case orchestration.

pub mod upgrade;
