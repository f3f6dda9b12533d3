//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the SoilProbe system:
//! session gating, ratio computation, and the acquire-and-submit cycle.
//! All interaction with hardware, credentials, and persistence happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals or a backend.

pub mod events;
pub mod ports;
pub mod ratios;
pub mod service;
pub mod session;
