#![no_std]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

mod codec;
mod diagnostics;
mod driver;
mod driver_async;
mod error;
mod measurement;
mod register;
mod time;
mod tracker;
mod utils;

pub use codec::{
    ANGLE_MAX, Dms, RESOLUTION_DEGREES, decimal_to_dms, degrees_to_raw, dms_to_decimal,
    error_in_arc_seconds, raw_to_degrees,
};
pub use diagnostics::{MagnetStatus, MagnetVerdict, OPTIMAL_MAGNITUDE, classify};
pub use driver::{As5600, DEFAULT_I2C_ADDRESS};
pub use driver_async::As5600Async;
pub use error::Error;
pub use measurement::AngleMeasurement;
pub use register::{ConfigRegister, Register, StatusRegister, ZmcoRegister};
pub use time::TimeSource;
pub use tracker::{
    LOWER_THRESHOLD, RevolutionTracker, TrackerState, UPPER_THRESHOLD, Update, Wrap,
    max_poll_interval_ms,
};
