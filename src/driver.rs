//! Blocking driver for AS5600 magnetic position sensor

use embedded_hal::i2c::I2c;

use crate::{
    codec,
    diagnostics::{self, MagnetStatus},
    error::Error,
    measurement::AngleMeasurement,
    register::{ConfigRegister, DATA_MASK_12BIT, Register, StatusRegister, ZmcoRegister},
    time::TimeSource,
    tracker::{RevolutionTracker, Update},
    utils,
};

/// Factory-programmed I2C address of the AS5600
pub const DEFAULT_I2C_ADDRESS: u8 = 0x36;

/// AS5600 driver instance (blocking)
///
/// Owns the bus handle and one [`RevolutionTracker`].
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct As5600<I2C> {
    i2c: I2C,
    address: u8,
    tracker: RevolutionTracker,
}

impl<I2C, E> As5600<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Create a new AS5600 driver instance at [`DEFAULT_I2C_ADDRESS`]
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(DEFAULT_I2C_ADDRESS, i2c)
    }

    /// Create a new AS5600 driver instance at a custom address
    pub fn with_address(address: u8, i2c: I2C) -> Self {
        Self {
            i2c,
            address,
            tracker: RevolutionTracker::new(),
        }
    }

    /// Replace the revolution tracker, e.g. with one that checks slew rate
    #[must_use]
    pub fn with_tracker(mut self, tracker: RevolutionTracker) -> Self {
        self.tracker = tracker;
        self
    }

    /// Release the I2C bus, consuming the driver
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Probe the sensor with an address-only write
    pub fn is_connected(&mut self) -> bool {
        let present = self.i2c.write(self.address, &[]).is_ok();

        #[cfg(feature = "defmt")]
        if !present {
            defmt::warn!("No ACK from AS5600 at 0x{:02X}", self.address);
        }

        present
    }

    /// Check that the sensor answers on the bus
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] if the sensor does not acknowledge its
    /// address. No retries are made.
    pub fn init(&mut self) -> Result<(), Error<E>> {
        if self.is_connected() {
            #[cfg(feature = "defmt")]
            defmt::debug!("AS5600 found at 0x{:02X}", self.address);
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }

    fn read_address(&mut self, address: u8) -> Result<u8, Error<E>> {
        let mut buffer = [0u8; 1];
        self.i2c
            .write_read(self.address, &[address], &mut buffer)
            .map_err(Error::Communication)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Register 0x{:02X} value: 0x{:02X}", address, buffer[0]);

        Ok(buffer[0])
    }

    /// Read a single-byte register
    fn read_register8(&mut self, register: Register) -> Result<u8, Error<E>> {
        self.read_address(register.into())
    }

    /// Read a two-byte register
    ///
    /// This is two single-byte reads: the high byte at the register address,
    /// then the low byte at the next address.
    fn read_register16(&mut self, register: Register) -> Result<u16, Error<E>> {
        let address = u8::from(register);
        let high = self.read_address(address)?;
        let low = self.read_address(address + 1)?;

        let value = utils::combine_bytes(high, low);
        #[cfg(feature = "defmt")]
        defmt::debug!("Register 0x{:02X} value: 0x{:04X}", address, value);

        Ok(value)
    }

    fn read_12bit(&mut self, register: Register) -> Result<u16, Error<E>> {
        Ok(self.read_register16(register)? & DATA_MASK_12BIT)
    }

    /// Get the unscaled 12-bit angle
    ///
    /// Value ranges from 0 to 4095 (0° to 359.912°)
    /// Use [`ANGLE_MAX`](crate::ANGLE_MAX) for conversion calculations
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn raw_angle(&mut self) -> Result<u16, Error<E>> {
        self.read_12bit(Register::RawAngle)
    }

    /// Get the 12-bit angle scaled by the programmed ZPOS/MPOS/MANG range
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn angle(&mut self) -> Result<u16, Error<E>> {
        self.read_12bit(Register::Angle)
    }

    /// Get the raw angle in decimal degrees, [0, 360)
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn angle_degrees(&mut self) -> Result<f32, Error<E>> {
        self.raw_angle().map(codec::raw_to_degrees)
    }

    /// Read the raw angle and convert it to degrees and DMS, stamped with
    /// `time`
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn read_precise_angle<T: TimeSource>(
        &mut self,
        time: &T,
    ) -> Result<AngleMeasurement, Error<E>> {
        let raw = self.raw_angle()?;
        Ok(AngleMeasurement::new(raw, time.now_ms()))
    }

    /// Zero the revolution count and take the current angle as reference
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails; the tracker is left
    /// untouched in that case
    pub fn reset_revolution_count(&mut self) -> Result<(), Error<E>> {
        let angle = self.angle_degrees()?;
        self.tracker.reset(angle);
        Ok(())
    }

    /// Sample the angle and feed it to the revolution tracker
    ///
    /// Must be called often enough that the shaft turns less than half a
    /// revolution between calls, see [`max_poll_interval_ms`](crate::max_poll_interval_ms).
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails; the tracker is left
    /// untouched in that case
    pub fn update_multi_revolution(&mut self) -> Result<Update, Error<E>> {
        let angle = self.angle_degrees()?;
        Ok(self.tracker.update(angle))
    }

    pub fn revolution_count(&self) -> i32 {
        self.tracker.revolution_count()
    }

    /// Continuous angle in degrees across revolutions
    pub fn total_angle(&self) -> f32 {
        self.tracker.total_angle()
    }

    pub fn tracker(&self) -> &RevolutionTracker {
        &self.tracker
    }

    /// Get the `STATUS` register
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn status(&mut self) -> Result<StatusRegister, Error<E>> {
        self.read_register8(Register::Status).map(StatusRegister)
    }

    /// Read status, magnitude and AGC and classify the magnet
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn magnet_status(&mut self) -> Result<MagnetStatus, Error<E>> {
        let status = self.status()?;
        let magnitude = self.magnitude()?;
        let agc = self.agc()?;
        Ok(diagnostics::classify(status, magnitude, agc))
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn is_magnet_detected(&mut self) -> Result<bool, Error<E>> {
        self.status().map(|status| status.md())
    }

    /// Get the 12-bit CORDIC magnitude
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn magnitude(&mut self) -> Result<u16, Error<E>> {
        self.read_12bit(Register::Magnitude)
    }

    /// Get the automatic gain control value
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn agc(&mut self) -> Result<u8, Error<E>> {
        self.read_register8(Register::Agc)
    }

    /// Number of times ZPOS and MPOS have been burned (0-3)
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn zmco(&mut self) -> Result<u8, Error<E>> {
        self.read_register8(Register::Zmco)
            .map(|v| ZmcoRegister(v).zmco())
    }

    /// Get the configuration word as read, blank factory bits included
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn config(&mut self) -> Result<u16, Error<E>> {
        self.read_register16(Register::Conf)
    }

    /// Get the configuration word decoded into its fields
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn config_register(&mut self) -> Result<ConfigRegister, Error<E>> {
        self.config().map(ConfigRegister)
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn zero_position(&mut self) -> Result<u16, Error<E>> {
        self.read_12bit(Register::Zpos)
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn maximum_position(&mut self) -> Result<u16, Error<E>> {
        self.read_12bit(Register::Mpos)
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn maximum_angle(&mut self) -> Result<u16, Error<E>> {
        self.read_12bit(Register::Mang)
    }
}
