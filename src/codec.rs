//! Conversions between raw 12-bit angle codes, decimal degrees and
//! degrees/minutes/seconds.

/// Number of raw codes in one revolution (12-bit: 0-4095, representing 0-360°)
pub const ANGLE_MAX: u16 = 0x0FFF + 1;

/// Angle covered by a single raw code, in degrees (≈0.0879°, 316.4")
pub const RESOLUTION_DEGREES: f32 = 360.0 / ANGLE_MAX as f32;

/// An angle split into degrees, arc-minutes and arc-seconds
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dms {
    pub degrees: i32,
    pub minutes: i32,
    pub seconds: f32,
}

/// Convert a raw 12-bit code to decimal degrees
///
/// The scale is linear, `raw * 360 / 4096`, so 0 maps to 0° and 4095 to
/// ~359.912°.
#[must_use]
pub fn raw_to_degrees(raw: u16) -> f32 {
    f32::from(raw) * 360.0 / f32::from(ANGLE_MAX)
}

/// Convert decimal degrees to the raw code that covers them
///
/// The input is wrapped into [0, 360) first and the result is rounded down.
#[must_use]
pub fn degrees_to_raw(degrees: f32) -> u16 {
    let wrapped = degrees % 360.0;
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let raw = (wrapped * f32::from(ANGLE_MAX) / 360.0) as u16;
    raw.min(ANGLE_MAX - 1)
}

/// Split decimal degrees into degrees, minutes and seconds
///
/// Each unit is truncated toward zero before the remainder is carried down.
/// There is no carry back up: an input a hair below a minute boundary can
/// produce `seconds == 60.0`.
#[must_use]
pub fn decimal_to_dms(decimal: f32) -> Dms {
    #[allow(clippy::cast_possible_truncation)]
    let degrees = decimal as i32;
    #[allow(clippy::cast_precision_loss)]
    let remainder = (decimal - degrees as f32) * 60.0;
    #[allow(clippy::cast_possible_truncation)]
    let minutes = remainder as i32;
    #[allow(clippy::cast_precision_loss)]
    let seconds = (remainder - minutes as f32) * 60.0;

    Dms {
        degrees,
        minutes,
        seconds,
    }
}

/// Compose degrees, minutes and seconds back into decimal degrees
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn dms_to_decimal(degrees: i32, minutes: i32, seconds: f32) -> f32 {
    degrees as f32 + (minutes as f32 / 60.0) + (seconds / 3600.0)
}

/// Express an angular error in arc-seconds
#[must_use]
pub fn error_in_arc_seconds(error_degrees: f32) -> f32 {
    error_degrees * 3600.0
}

impl Dms {
    /// Compose back into decimal degrees
    #[must_use]
    pub fn to_decimal(&self) -> f32 {
        dms_to_decimal(self.degrees, self.minutes, self.seconds)
    }
}

impl From<f32> for Dms {
    fn from(decimal: f32) -> Self {
        decimal_to_dms(decimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32, eps: f32) -> bool {
        let d = a - b;
        (if d < 0.0 { -d } else { d }) <= eps
    }

    #[test]
    fn raw_scale_endpoints() {
        assert_eq!(raw_to_degrees(0), 0.0);
        assert!(close(raw_to_degrees(4095), 359.912, 1e-3));
        assert_eq!(raw_to_degrees(1024), 90.0);
        assert_eq!(raw_to_degrees(2048), 180.0);
    }

    #[test]
    fn raw_scale_is_monotonic() {
        let mut previous = raw_to_degrees(0);
        for raw in 1..ANGLE_MAX {
            let degrees = raw_to_degrees(raw);
            assert!(degrees >= previous, "decreased at raw {raw}");
            assert!(degrees < 360.0);
            previous = degrees;
        }
    }

    #[test]
    fn degrees_to_raw_inverts_raw_scale() {
        for raw in [0, 1, 1024, 2047, 2048, 4095] {
            assert_eq!(degrees_to_raw(raw_to_degrees(raw)), raw);
        }
        assert_eq!(degrees_to_raw(360.0), 0);
        assert_eq!(degrees_to_raw(-90.0), 3072);
        assert_eq!(degrees_to_raw(450.0), 1024);
    }

    #[test]
    fn dms_of_quadrant_angles() {
        assert_eq!(
            decimal_to_dms(180.0),
            Dms {
                degrees: 180,
                minutes: 0,
                seconds: 0.0
            }
        );
        assert_eq!(
            decimal_to_dms(raw_to_degrees(1024)),
            Dms {
                degrees: 90,
                minutes: 0,
                seconds: 0.0
            }
        );
    }

    #[test]
    fn dms_splits_fraction() {
        let dms = decimal_to_dms(12.5125);
        assert_eq!(dms.degrees, 12);
        assert_eq!(dms.minutes, 30);
        assert!(close(dms.seconds, 45.0, 1e-2));
    }

    #[test]
    fn dms_round_trip() {
        let mut decimal = 0.0_f32;
        while decimal < 360.0 {
            let dms = decimal_to_dms(decimal);
            assert!((0..60).contains(&dms.minutes));
            assert!(close(dms.to_decimal(), decimal, 1e-3), "{decimal}");
            decimal += 0.377;
        }
        for raw in (0..ANGLE_MAX).step_by(7) {
            let decimal = raw_to_degrees(raw);
            assert!(close(Dms::from(decimal).to_decimal(), decimal, 1e-3));
        }
    }

    #[test]
    fn negative_input_truncates_toward_zero() {
        let dms = decimal_to_dms(-10.5);
        assert_eq!(dms.degrees, -10);
        assert_eq!(dms.minutes, -30);
        assert!(close(dms_to_decimal(dms.degrees, dms.minutes, dms.seconds), -10.5, 1e-4));
    }

    #[test]
    fn arc_seconds() {
        assert_eq!(error_in_arc_seconds(1.0), 3600.0);
        assert_eq!(error_in_arc_seconds(0.0), 0.0);
        assert!(close(error_in_arc_seconds(RESOLUTION_DEGREES), 316.406, 1e-2));
    }
}
