//! Asynchronous driver for AS5600 magnetic position sensor
//!
//! Same register surface as [`As5600`](crate::As5600) over
//! `embedded-hal-async`. Conversions, tracking and classification are shared.

use embedded_hal_async::i2c::I2c;

use crate::{
    codec,
    diagnostics::{self, MagnetStatus},
    driver::DEFAULT_I2C_ADDRESS,
    error::Error,
    measurement::AngleMeasurement,
    register::{ConfigRegister, DATA_MASK_12BIT, Register, StatusRegister, ZmcoRegister},
    time::TimeSource,
    tracker::{RevolutionTracker, Update},
    utils,
};

/// AS5600 driver instance (asynchronous)
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct As5600Async<I2C> {
    i2c: I2C,
    address: u8,
    tracker: RevolutionTracker,
}

impl<I2C, E> As5600Async<I2C>
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

    pub async fn is_connected(&mut self) -> bool {
        let present = self.i2c.write(self.address, &[]).await.is_ok();

        #[cfg(feature = "defmt")]
        if !present {
            defmt::warn!("No ACK from AS5600 at 0x{:02X}", self.address);
        }

        present
    }

    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] if the sensor does not acknowledge its
    /// address
    pub async fn init(&mut self) -> Result<(), Error<E>> {
        if self.is_connected().await {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }

    async fn read_address(&mut self, address: u8) -> Result<u8, Error<E>> {
        let mut buffer = [0u8; 1];
        self.i2c
            .write_read(self.address, &[address], &mut buffer)
            .await
            .map_err(Error::Communication)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Register 0x{:02X} value: 0x{:02X}", address, buffer[0]);

        Ok(buffer[0])
    }

    async fn read_register8(&mut self, register: Register) -> Result<u8, Error<E>> {
        self.read_address(register.into()).await
    }

    /// High byte first, then low byte at the next address
    async fn read_register16(&mut self, register: Register) -> Result<u16, Error<E>> {
        let address = u8::from(register);
        let high = self.read_address(address).await?;
        let low = self.read_address(address + 1).await?;
        Ok(utils::combine_bytes(high, low))
    }

    async fn read_12bit(&mut self, register: Register) -> Result<u16, Error<E>> {
        Ok(self.read_register16(register).await? & DATA_MASK_12BIT)
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn raw_angle(&mut self) -> Result<u16, Error<E>> {
        self.read_12bit(Register::RawAngle).await
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn angle(&mut self) -> Result<u16, Error<E>> {
        self.read_12bit(Register::Angle).await
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn angle_degrees(&mut self) -> Result<f32, Error<E>> {
        self.raw_angle().await.map(codec::raw_to_degrees)
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn read_precise_angle<T: TimeSource>(
        &mut self,
        time: &T,
    ) -> Result<AngleMeasurement, Error<E>> {
        let raw = self.raw_angle().await?;
        Ok(AngleMeasurement::new(raw, time.now_ms()))
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn reset_revolution_count(&mut self) -> Result<(), Error<E>> {
        let angle = self.angle_degrees().await?;
        self.tracker.reset(angle);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn update_multi_revolution(&mut self) -> Result<Update, Error<E>> {
        let angle = self.angle_degrees().await?;
        Ok(self.tracker.update(angle))
    }

    pub fn revolution_count(&self) -> i32 {
        self.tracker.revolution_count()
    }

    pub fn total_angle(&self) -> f32 {
        self.tracker.total_angle()
    }

    pub fn tracker(&self) -> &RevolutionTracker {
        &self.tracker
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn status(&mut self) -> Result<StatusRegister, Error<E>> {
        self.read_register8(Register::Status).await.map(StatusRegister)
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn magnet_status(&mut self) -> Result<MagnetStatus, Error<E>> {
        let status = self.status().await?;
        let magnitude = self.magnitude().await?;
        let agc = self.agc().await?;
        Ok(diagnostics::classify(status, magnitude, agc))
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn is_magnet_detected(&mut self) -> Result<bool, Error<E>> {
        self.status().await.map(|status| status.md())
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn magnitude(&mut self) -> Result<u16, Error<E>> {
        self.read_12bit(Register::Magnitude).await
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn agc(&mut self) -> Result<u8, Error<E>> {
        self.read_register8(Register::Agc).await
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn zmco(&mut self) -> Result<u8, Error<E>> {
        self.read_register8(Register::Zmco)
            .await
            .map(|v| ZmcoRegister(v).zmco())
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn config(&mut self) -> Result<u16, Error<E>> {
        self.read_register16(Register::Conf).await
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn config_register(&mut self) -> Result<ConfigRegister, Error<E>> {
        self.config().await.map(ConfigRegister)
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn zero_position(&mut self) -> Result<u16, Error<E>> {
        self.read_12bit(Register::Zpos).await
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn maximum_position(&mut self) -> Result<u16, Error<E>> {
        self.read_12bit(Register::Mpos).await
    }

    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn maximum_angle(&mut self) -> Result<u16, Error<E>> {
        self.read_12bit(Register::Mang).await
    }
}
