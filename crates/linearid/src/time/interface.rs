use core::time::Duration;

/// The unit of one timestamp tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// One tick per second. This is the unit the predefined layouts are
    /// sized for: their 32/33-bit timestamps hold Unix seconds until 2106
    /// and 2242.
    #[default]
    Seconds,
    /// One tick per millisecond.
    ///
    /// Unix milliseconds already need 41 bits, so this resolution requires a
    /// custom layout with a timestamp at least that wide. Readings that do not
    /// fit are pinned to the field's maximum.
    Millis,
}

impl Resolution {
    /// Milliseconds in one tick.
    pub const fn millis_per_tick(self) -> u64 {
        match self {
            Self::Seconds => 1_000,
            Self::Millis => 1,
        }
    }

    /// Converts a duration since the Unix epoch into whole ticks.
    pub const fn ticks_in(self, elapsed: Duration) -> u128 {
        match self {
            Self::Seconds => elapsed.as_secs() as u128,
            Self::Millis => elapsed.as_millis(),
        }
    }

    /// Converts a tick count into a wall duration.
    pub const fn duration_of(self, ticks: u64) -> Duration {
        match self {
            Self::Seconds => Duration::from_secs(ticks),
            Self::Millis => Duration::from_millis(ticks),
        }
    }
}

/// A trait for time sources that return the current tick.
///
/// This abstraction allows you to plug in a real system clock, a monotonic
/// timer, or a mocked time source in tests.
///
/// The tick type `T` is generic (`u64` or `u128`) and counts
/// [`TimeSource::resolution`] units since the Unix epoch.
///
/// # Example
///
/// ```
/// use linearid::time::{Resolution, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource<u64> for FixedTime {
///     fn current_ticks(&self) -> u64 {
///         1234
///     }
///
///     fn resolution(&self) -> Resolution {
///         Resolution::Seconds
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_ticks(), 1234);
/// ```
pub trait TimeSource<T> {
    /// Returns the number of ticks elapsed since the Unix epoch.
    fn current_ticks(&self) -> T;

    /// Returns the length of one tick.
    fn resolution(&self) -> Resolution {
        Resolution::Seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_conversions() {
        let elapsed = Duration::from_millis(1_700_000_000_123);
        assert_eq!(Resolution::Seconds.ticks_in(elapsed), 1_700_000_000);
        assert_eq!(Resolution::Millis.ticks_in(elapsed), 1_700_000_000_123);
        assert_eq!(Resolution::Seconds.duration_of(2), Duration::from_secs(2));
        assert_eq!(Resolution::Millis.duration_of(2), Duration::from_millis(2));
        assert_eq!(Resolution::Seconds.millis_per_tick(), 1_000);
        assert_eq!(Resolution::default(), Resolution::Seconds);
    }
}
