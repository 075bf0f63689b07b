use crate::codec::{self, Dms};

/// One angle sample with its conversions
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AngleMeasurement {
    /// Raw 12-bit code (0-4095)
    pub raw: u16,
    /// Decimal degrees in [0, 360)
    pub degrees: f32,
    pub dms: Dms,
    /// Milliseconds from the [`TimeSource`](crate::TimeSource) at sampling
    pub timestamp_ms: u64,
}

impl AngleMeasurement {
    #[must_use]
    pub fn new(raw: u16, timestamp_ms: u64) -> Self {
        let degrees = codec::raw_to_degrees(raw);
        Self {
            raw,
            degrees,
            dms: codec::decimal_to_dms(degrees),
            timestamp_ms,
        }
    }
}
