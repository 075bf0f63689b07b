//! Register addresses for AS5600 sensor.

/// Register addresses for AS5600
///
/// Two-byte registers are addressed by their high byte; the low byte lives at
/// the next address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
#[repr(u8)]
pub enum Register {
    /// Number of permanent zero/max position programming cycles
    Zmco = 0x00,
    /// Zero position (12-bit)
    Zpos = 0x01,
    /// Maximum position (12-bit)
    Mpos = 0x03,
    /// Maximum angle (12-bit)
    Mang = 0x05,
    /// Configuration word (14-bit)
    Conf = 0x07,

    /// Magnet status
    Status = 0x0B,
    /// Unscaled and unmodified angle (12-bit)
    RawAngle = 0x0C,
    /// Scaled angle, honouring ZPOS/MPOS/MANG (12-bit)
    Angle = 0x0E,

    /// Automatic gain control
    Agc = 0x1A,
    /// CORDIC magnitude (12-bit)
    Magnitude = 0x1B,
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg as u8
    }
}

bitfield::bitfield! {
    /// STATUS
    #[derive(Clone, Copy, PartialEq, Eq, Default)]
    pub struct StatusRegister(u8);
    impl Debug;
    /// Magnet was detected
    pub md, _: 5;
    /// AGC maximum gain overflow, magnet too weak
    pub ml, _: 4;
    /// AGC minimum gain overflow, magnet too strong
    pub mh, _: 3;
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusRegister {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "StatusRegister {{ md: {}, ml: {}, mh: {} }}",
            self.md(),
            self.ml(),
            self.mh()
        );
    }
}

bitfield::bitfield! {
    /// ZMCO
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ZmcoRegister(u8);
    impl Debug;
    u8;
    /// How many times ZPOS and MPOS have been permanently written (0-3)
    pub zmco, _: 1, 0;
}

bitfield::bitfield! {
    /// CONF
    ///
    /// The two most significant bits are blank and may hold factory settings.
    #[derive(Clone, Copy, PartialEq, Eq)]
    pub struct ConfigRegister(u16);
    impl Debug;
    u8;
    /// Watchdog
    pub wd, _: 13;
    /// Fast filter threshold
    pub fth, _: 12, 10;
    /// Slow filter
    ///
    /// - `00` = 16x
    /// - `01` = 8x
    /// - `10` = 4x
    /// - `11` = 2x
    pub sf, _: 9, 8;
    /// PWM frequency
    pub pwmf, _: 7, 6;
    /// Output stage
    ///
    /// - `00` = analog (full range)
    /// - `01` = analog (reduced range)
    /// - `10` = digital PWM
    pub outs, _: 5, 4;
    /// Hysteresis in LSBs
    pub hyst, _: 3, 2;
    /// Power mode
    pub pm, _: 1, 0;
}

/// Mask for the 12-bit angle, position and magnitude outputs
pub(crate) const DATA_MASK_12BIT: u16 = 0x0FFF;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bits_decode() {
        let status = StatusRegister(0b0010_0000);
        assert!(status.md());
        assert!(!status.ml());
        assert!(!status.mh());

        let status = StatusRegister(0b0011_1000);
        assert!(status.md() && status.ml() && status.mh());
    }

    #[test]
    fn config_fields_decode() {
        // WD on, SF = 2x, OUTS = digital PWM, PM = LPM3
        let conf = ConfigRegister(0b10_0011_0010_0011);
        assert!(conf.wd());
        assert_eq!(conf.fth(), 0);
        assert_eq!(conf.sf(), 0b11);
        assert_eq!(conf.outs(), 0b10);
        assert_eq!(conf.hyst(), 0);
        assert_eq!(conf.pm(), 0b11);
    }

    #[test]
    fn zmco_ignores_reserved_bits() {
        assert_eq!(ZmcoRegister(0b1111_1110).zmco(), 0b10);
    }
}
