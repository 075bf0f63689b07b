//! Magnet health classification from the `STATUS`, `MAGNITUDE` and `AGC`
//! registers

use core::ops::RangeInclusive;

use crate::register::StatusRegister;

/// Magnitude band considered optimal for a correctly placed magnet
pub const OPTIMAL_MAGNITUDE: RangeInclusive<u16> = 1500..=3000;

/// Snapshot of the magnetic field health
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagnetStatus {
    /// `MD`: a magnet was detected
    pub detected: bool,
    /// `MH`: AGC minimum gain overflow, the magnet is too close or too strong
    pub too_strong: bool,
    /// `ML`: AGC maximum gain overflow, the magnet is too far or too weak
    pub too_weak: bool,
    /// CORDIC magnitude (12-bit)
    pub magnitude: u16,
    /// Automatic gain control value
    ///
    /// The usable range depends on the supply voltage: 0-255 at 5V, 0-128
    /// at 3.3V.
    pub agc: u8,
    /// Detected, neither flag raised, and magnitude inside
    /// [`OPTIMAL_MAGNITUDE`]
    pub optimal: bool,
}

/// Single actionable reading of a [`MagnetStatus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagnetVerdict {
    /// Move the magnet away from the sensor
    TooStrong,
    /// Move the magnet closer to the sensor
    TooWeak,
    /// No magnet in range
    NotDetected,
    /// Usable, but the magnitude is outside the optimal band
    OutsideOptimalBand,
    Optimal,
}

/// Combine the status flags and magnitude into a [`MagnetStatus`]
#[must_use]
pub fn classify(status: StatusRegister, magnitude: u16, agc: u8) -> MagnetStatus {
    let detected = status.md();
    let too_strong = status.mh();
    let too_weak = status.ml();
    let optimal = detected && !too_strong && !too_weak && OPTIMAL_MAGNITUDE.contains(&magnitude);

    MagnetStatus {
        detected,
        too_strong,
        too_weak,
        magnitude,
        agc,
        optimal,
    }
}

impl MagnetStatus {
    /// Check if the magnetic field strength is within the sensor's
    /// acceptable range
    ///
    /// Returns `true` if neither `MH` nor `ML` is set
    #[must_use]
    pub const fn magnetic_field_ok(&self) -> bool {
        !self.too_strong && !self.too_weak
    }

    #[must_use]
    pub const fn verdict(&self) -> MagnetVerdict {
        if self.too_strong {
            MagnetVerdict::TooStrong
        } else if self.too_weak {
            MagnetVerdict::TooWeak
        } else if !self.detected {
            MagnetVerdict::NotDetected
        } else if self.optimal {
            MagnetVerdict::Optimal
        } else {
            MagnetVerdict::OutsideOptimalBand
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MD: u8 = 0b0010_0000;
    const ML: u8 = 0b0001_0000;
    const MH: u8 = 0b0000_1000;

    #[test]
    fn detected_in_band_is_optimal() {
        let status = classify(StatusRegister(MD), 2000, 128);
        assert!(status.detected);
        assert!(status.optimal);
        assert!(status.magnetic_field_ok());
        assert_eq!(status.agc, 128);
        assert_eq!(status.verdict(), MagnetVerdict::Optimal);
    }

    #[test]
    fn agc_does_not_affect_classification() {
        for agc in [0, 1, 127, 255] {
            assert!(classify(StatusRegister(MD), 2000, agc).optimal);
        }
    }

    #[test]
    fn band_edges_are_inclusive() {
        assert!(classify(StatusRegister(MD), 1500, 0).optimal);
        assert!(classify(StatusRegister(MD), 3000, 0).optimal);
        assert!(!classify(StatusRegister(MD), 1499, 0).optimal);
        assert!(!classify(StatusRegister(MD), 3001, 0).optimal);
    }

    #[test]
    fn weak_magnitude_is_not_optimal() {
        let status = classify(StatusRegister(MD), 500, 128);
        assert!(status.detected);
        assert!(!status.optimal);
        assert_eq!(status.verdict(), MagnetVerdict::OutsideOptimalBand);
    }

    #[test]
    fn too_strong_is_never_optimal() {
        for magnitude in [0, 500, 2000, 4095] {
            let status = classify(StatusRegister(MD | MH), magnitude, 0);
            assert!(status.too_strong);
            assert!(!status.optimal);
            assert!(!status.magnetic_field_ok());
            assert_eq!(status.verdict(), MagnetVerdict::TooStrong);
        }
    }

    #[test]
    fn too_weak_is_never_optimal() {
        let status = classify(StatusRegister(MD | ML), 2000, 255);
        assert!(status.too_weak);
        assert!(!status.optimal);
        assert_eq!(status.verdict(), MagnetVerdict::TooWeak);
    }

    #[test]
    fn missing_magnet() {
        let status = classify(StatusRegister(0), 2000, 255);
        assert!(!status.detected);
        assert!(!status.optimal);
        assert_eq!(status.verdict(), MagnetVerdict::NotDetected);
    }
}
