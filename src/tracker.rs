//! Multi-revolution angle tracking
//!
//! Turns a sequence of bounded angle samples in [0, 360) into one continuous
//! signed angle by counting wraps through the 0°/360° boundary.
//!
//! A wrap is only counted when the previous sample sits above
//! [`UPPER_THRESHOLD`] and the new one below [`LOWER_THRESHOLD`] (or the
//! reverse). Samples that stay between the thresholds never change the count,
//! and a sample that jitters back across 0° undoes the wrap it just caused.
//!
//! The tracker cannot see what happens between two samples. Consecutive samples
//! must be less than half a revolution apart; a shaft that moves further than
//! that between polls is aliased and the count goes wrong. Use
//! [`max_poll_interval_ms`] to size the polling period, and
//! [`RevolutionTracker::with_slew_limit`] to get told when a step looked too
//! large.

use crate::utils;

/// Samples above this angle, followed by one below [`LOWER_THRESHOLD`], count
/// as a forward wrap
pub const UPPER_THRESHOLD: f32 = 270.0;

/// Samples below this angle, followed by one above [`UPPER_THRESHOLD`], count
/// as a reverse wrap
pub const LOWER_THRESHOLD: f32 = 90.0;

/// Direction of a wrap detected by a single update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wrap {
    /// The count did not change
    #[default]
    None,
    /// Crossed 360° → 0°, the count went up
    Forward,
    /// Crossed 0° → 360°, the count went down
    Reverse,
}

/// Snapshot of the tracker
///
/// `total_angle == revolutions * 360 + last_angle` holds after every
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TrackerState {
    pub last_angle: f32,
    pub revolutions: i32,
    pub total_angle: f32,
}

impl TrackerState {
    /// Start tracking from `current_angle` with a zero revolution count
    #[must_use]
    pub const fn new(current_angle: f32) -> Self {
        Self {
            last_angle: current_angle,
            revolutions: 0,
            total_angle: current_angle,
        }
    }

    /// Apply one sample and return the next state
    #[must_use]
    pub fn step(self, current_angle: f32) -> (Self, Wrap) {
        let wrap = if self.last_angle > UPPER_THRESHOLD && current_angle < LOWER_THRESHOLD {
            Wrap::Forward
        } else if self.last_angle < LOWER_THRESHOLD && current_angle > UPPER_THRESHOLD {
            Wrap::Reverse
        } else {
            Wrap::None
        };

        let revolutions = match wrap {
            Wrap::None => self.revolutions,
            Wrap::Forward => self.revolutions.wrapping_add(1),
            Wrap::Reverse => self.revolutions.wrapping_sub(1),
        };

        #[allow(clippy::cast_precision_loss)]
        let total_angle = revolutions as f32 * 360.0 + current_angle;

        let next = Self {
            last_angle: current_angle,
            revolutions,
            total_angle,
        };
        (next, wrap)
    }
}

/// Outcome of [`RevolutionTracker::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Update {
    /// Wrap detected by this sample
    pub wrap: Wrap,
    /// The step from the previous sample exceeded the configured slew limit
    ///
    /// Always `false` when no limit is configured.
    pub slew_exceeded: bool,
}

/// Stateful revolution counter
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RevolutionTracker {
    state: TrackerState,
    slew_limit: Option<f32>,
}

impl RevolutionTracker {
    /// Create a tracker at 0° with no slew check
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: TrackerState::new(0.0),
            slew_limit: None,
        }
    }

    /// Create a tracker that flags steps larger than `max_step_degrees`
    ///
    /// The flag is advisory, the count is updated the same way either way.
    #[must_use]
    pub const fn with_slew_limit(max_step_degrees: f32) -> Self {
        Self {
            state: TrackerState::new(0.0),
            slew_limit: Some(max_step_degrees),
        }
    }

    /// Set the reference point: count goes to zero and tracking restarts from
    /// `current_angle`
    pub fn reset(&mut self, current_angle: f32) {
        self.state = TrackerState::new(current_angle);
    }

    /// Feed a freshly sampled angle in [0, 360)
    pub fn update(&mut self, current_angle: f32) -> Update {
        let slew_exceeded = self.slew_limit.is_some_and(|limit| {
            utils::angular_distance(self.state.last_angle, current_angle) > limit
        });

        #[cfg(feature = "defmt")]
        if slew_exceeded {
            defmt::warn!(
                "Angle step {} -> {} exceeds slew limit, revolution count may alias",
                self.state.last_angle,
                current_angle
            );
        }

        let (next, wrap) = self.state.step(current_angle);
        self.state = next;

        #[cfg(feature = "defmt")]
        if wrap != Wrap::None {
            defmt::debug!("{} wrap, revolutions = {}", wrap, next.revolutions);
        }

        Update {
            wrap,
            slew_exceeded,
        }
    }

    /// Signed number of completed revolutions since the last reset
    #[must_use]
    pub fn revolution_count(&self) -> i32 {
        self.state.revolutions
    }

    /// Continuous angle in degrees, `revolution_count() * 360 + last sample`
    #[must_use]
    pub fn total_angle(&self) -> f32 {
        self.state.total_angle
    }

    /// Last sample fed to the tracker
    #[must_use]
    pub fn last_angle(&self) -> f32 {
        self.state.last_angle
    }

    #[must_use]
    pub fn state(&self) -> TrackerState {
        self.state
    }

    #[must_use]
    pub fn slew_limit(&self) -> Option<f32> {
        self.slew_limit
    }
}

/// Longest polling interval that keeps the shaft under half a revolution per
/// sample at `max_speed_rpm`
///
/// Returns `f32::INFINITY` for a stationary shaft. Poll well below this; at
/// exactly this interval a step lands on 180° and the direction is ambiguous.
#[must_use]
pub fn max_poll_interval_ms(max_speed_rpm: f32) -> f32 {
    let rpm = if max_speed_rpm < 0.0 {
        -max_speed_rpm
    } else {
        max_speed_rpm
    };
    if rpm == 0.0 {
        return f32::INFINITY;
    }
    // 180° at rpm * 360° per 60 000 ms
    30_000.0 / rpm
}
