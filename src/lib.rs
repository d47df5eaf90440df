//! EcoWork Hub firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod decision;
pub mod error;
pub mod link;
pub mod pins;
pub mod render;
pub mod scheduler;
pub mod telemetry;

// Hardware-facing modules.  On the host the drivers are exercised through
// embedded-hal mocks and the adapters run their simulation paths.
pub mod adapters;
pub mod drivers;
pub mod sensors;
