//! GPIO pin assignments for the SoilProbe carrier board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// TCS3200 colour sensor (frequency output)
// ---------------------------------------------------------------------------

/// Output-frequency scaling select, bit 0.  Held HIGH at boot.
/// Together with S1 LOW this selects the 20 % scaling range.
pub const COLOR_S0_GPIO: i32 = 20;
/// Output-frequency scaling select, bit 1.  Held LOW at boot.
pub const COLOR_S1_GPIO: i32 = 21;
/// Photodiode filter select, bit 0.
pub const COLOR_S2_GPIO: i32 = 22;
/// Photodiode filter select, bit 1.
pub const COLOR_S3_GPIO: i32 = 23;
/// Square-wave output of the sensor — frequency tracks light intensity
/// on the selected filter.  Input with pull-up.
pub const COLOR_OUT_GPIO: i32 = 24;

// ---------------------------------------------------------------------------
// DHT11 temperature / humidity sensor (single-wire)
// ---------------------------------------------------------------------------

/// DHT11 data line.  Open-drain with external pull-up; the driver switches
/// the pin between output (start signal) and input (response frame).
pub const DHT_GPIO: i32 = 4;
