use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::time::{Resolution, TimeSource};

/// A wall-clock time source that reads [`SystemTime::now`] on every call.
///
/// The wall clock is trusted as-is: if it is stepped backward, the next tick
/// simply differs from the last one and the ticker resets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemClock {
    resolution: Resolution,
}

impl SystemClock {
    pub const fn new(resolution: Resolution) -> Self {
        Self { resolution }
    }

    /// A clock ticking once per second.
    pub const fn seconds() -> Self {
        Self::new(Resolution::Seconds)
    }

    /// A clock ticking once per millisecond.
    pub const fn millis() -> Self {
        Self::new(Resolution::Millis)
    }

    fn ticks(&self) -> u128 {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        self.resolution.ticks_in(elapsed)
    }
}

impl TimeSource<u64> for SystemClock {
    fn current_ticks(&self) -> u64 {
        u64::try_from(self.ticks()).unwrap_or(u64::MAX)
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }
}

impl TimeSource<u128> for SystemClock {
    fn current_ticks(&self) -> u128 {
        self.ticks()
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_and_millis_agree() {
        let secs: u64 = SystemClock::seconds().current_ticks();
        let millis: u64 = SystemClock::millis().current_ticks();
        let diff = (millis / 1_000).abs_diff(secs);
        assert!(diff <= 1, "secs={secs} millis={millis}");
        // Sanity: after 2020-01-01.
        assert!(secs > 1_577_836_800);
    }

    #[test]
    fn wide_ticks_match_narrow() {
        let clock = SystemClock::seconds();
        let narrow: u64 = clock.current_ticks();
        let wide: u128 = clock.current_ticks();
        assert!(wide >= u128::from(narrow));
        assert_eq!(TimeSource::<u128>::resolution(&clock), Resolution::Seconds);
    }
}
