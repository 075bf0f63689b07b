/// Error type for AS5600 operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the sensor
    Communication(E),
    /// The sensor did not acknowledge its address during [`init`](crate::As5600::init)
    NotConnected,
}
