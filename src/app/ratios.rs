//! Normalised channel ratios.
//!
//! Each colour channel's share of the total intensity, rescaled so the
//! three ratios sum to 6.  The scale is part of the probe's nutrient
//! calibration (downstream tooling expects the 0–6 range).

use crate::sensors::color::IntensityTriple;

/// The three ratios always sum to this value.
pub const RATIO_SCALE: f32 = 6.0;

/// One ratio per colour channel.  A single dominant channel can approach
/// the full scale (sum as low as 1 with 255 on one channel); only the sum
/// across all three is fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioTriple {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

/// All three channels read zero — no proportion exists.
///
/// Surfaced as a typed error rather than letting the division produce
/// NaN; the caller aborts the acquisition and reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroIntensity;

/// Convert an intensity triple into normalised ratios.
pub fn compute_ratios(intensities: &IntensityTriple) -> Result<RatioTriple, ZeroIntensity> {
    let sum =
        u32::from(intensities.red) + u32::from(intensities.green) + u32::from(intensities.blue);
    if sum == 0 {
        return Err(ZeroIntensity);
    }
    let sum = sum as f32;
    Ok(RatioTriple {
        red: f32::from(intensities.red) / sum * RATIO_SCALE,
        green: f32::from(intensities.green) / sum * RATIO_SCALE,
        blue: f32::from(intensities.blue) / sum * RATIO_SCALE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(red: u8, green: u8, blue: u8) -> IntensityTriple {
        IntensityTriple { red, green, blue }
    }

    #[test]
    fn single_dominant_channel_takes_full_scale() {
        let r = compute_ratios(&triple(255, 0, 0)).unwrap();
        assert_eq!(r.red, 6.0);
        assert_eq!(r.green, 0.0);
        assert_eq!(r.blue, 0.0);
    }

    #[test]
    fn equal_channels_split_evenly() {
        let r = compute_ratios(&triple(85, 85, 85)).unwrap();
        assert!((r.red - 2.0).abs() < 1e-6);
        assert!((r.green - 2.0).abs() < 1e-6);
        assert!((r.blue - 2.0).abs() < 1e-6);
    }

    #[test]
    fn all_zero_is_an_error() {
        assert_eq!(compute_ratios(&triple(0, 0, 0)), Err(ZeroIntensity));
    }

    #[test]
    fn minimal_sum_still_normalises() {
        let r = compute_ratios(&triple(0, 1, 0)).unwrap();
        assert_eq!(r.green, 6.0);
        assert_eq!(r.red + r.green + r.blue, 6.0);
    }
}
