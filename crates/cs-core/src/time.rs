//! Simulation time.
//!
//! The host runs a discrete-event clock in seconds since midnight of the
//! first simulated day.  Walk and drive legs produce fractional durations, so
//! time is a wrapped `f64` rather than an integer tick.

use std::fmt;

/// Absolute simulation time in seconds.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Whole seconds, truncated.  Audit lines use this resolution.
    #[inline]
    pub fn whole_secs(self) -> i64 {
        self.0 as i64
    }

    /// Build a time of day from `(h, m, s)`.
    pub fn hms(h: u32, m: u32, s: u32) -> SimTime {
        SimTime((h * 3_600 + m * 60 + s) as f64)
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::AddAssign<f64> for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: f64) {
        self.0 += rhs;
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.whole_secs())
    }
}
