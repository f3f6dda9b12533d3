//! Sensor subsystem — timing primitives and the individual drivers.
//!
//! [`pulse`] holds the generic pulse-width / frequency machinery, [`color`]
//! the TCS3200 driver built on top of it, and [`climate`] the DHT11 driver.
//! The hardware adapter owns the drivers and exposes them to the
//! application core through `SensorPort`.

pub mod climate;
pub mod color;
pub mod pulse;
