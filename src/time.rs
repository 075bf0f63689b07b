//! Monotonic time used to stamp measurements.

/// Millisecond clock supplied by the runtime
///
/// Implemented for any `Fn() -> u64`, so a closure over the platform timer is
/// enough:
///
/// ```
/// use as5600::TimeSource;
///
/// let clock = || 42_u64;
/// assert_eq!(clock.now_ms(), 42);
/// ```
pub trait TimeSource {
    /// Milliseconds since an arbitrary epoch, usually boot
    fn now_ms(&self) -> u64;
}

impl<F> TimeSource for F
where
    F: Fn() -> u64,
{
    fn now_ms(&self) -> u64 {
        self()
    }
}
