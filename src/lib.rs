//! SoilProbe firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;

pub mod pins;

// The adapter and sensor modules compile on both targets; the actual
// hardware paths are guarded by cfg attributes inside.
pub mod adapters;
pub mod sensors;
