use core::time::Duration;
use std::{
    sync::{
        Arc, OnceLock,
        atomic::{AtomicU64, Ordering},
    },
    thread::{self, JoinHandle},
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use crate::time::{Resolution, TimeSource};

/// Shared ticker thread that updates every millisecond.
#[derive(Debug)]
struct SharedTickerInner {
    elapsed_ms: AtomicU64,
    _handle: OnceLock<JoinHandle<()>>,
}

/// A monotonic time source anchored to the Unix epoch.
///
/// The wall clock is read once at construction. After that, time advances
/// from a monotonic [`Instant`] measured by a background thread, so the clock
/// never steps backward when the system clock is adjusted.
///
/// Cloning shares the same ticker thread. The thread exits once the last
/// clone is dropped.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    inner: Arc<SharedTickerInner>,
    epoch_offset_ms: u64,
    resolution: Resolution,
}

impl Default for MonotonicClock {
    /// A seconds clock, matching the predefined layouts.
    fn default() -> Self {
        Self::seconds()
    }
}

impl MonotonicClock {
    /// Constructs a monotonic clock with the given tick length.
    ///
    /// Spawns a ticker thread that stores the elapsed milliseconds since
    /// construction into a shared atomic once per millisecond. Reads on the
    /// hot path are a single relaxed load.
    ///
    /// # Example
    ///
    /// ```
    /// use linearid::time::{MonotonicClock, Resolution, TimeSource};
    ///
    /// let clock = MonotonicClock::new(Resolution::Millis);
    /// let a: u64 = clock.current_ticks();
    /// std::thread::sleep(std::time::Duration::from_millis(5));
    /// let b: u64 = clock.current_ticks();
    /// assert!(b >= a);
    /// ```
    pub fn new(resolution: Resolution) -> Self {
        let start = Instant::now();
        let epoch_offset_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));

        let inner = Arc::new(SharedTickerInner {
            elapsed_ms: AtomicU64::new(0),
            _handle: OnceLock::new(),
        });

        let weak_inner = Arc::downgrade(&inner);
        let handle = thread::spawn(move || {
            let mut tick = 0;

            loop {
                let Some(inner_ref) = weak_inner.upgrade() else {
                    break;
                };

                let target = start + Duration::from_millis(tick);
                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                // Re-measure after waking; sleep may overshoot.
                let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                inner_ref.elapsed_ms.store(now_ms, Ordering::Relaxed);

                tick = now_ms.saturating_add(1);
            }
        });

        // The cell was created just above, so this is its only writer.
        let _ = inner._handle.set(handle);

        Self {
            inner,
            epoch_offset_ms,
            resolution,
        }
    }

    /// A monotonic clock ticking once per second.
    pub fn seconds() -> Self {
        Self::new(Resolution::Seconds)
    }

    fn now_ms(&self) -> u64 {
        self.epoch_offset_ms
            .saturating_add(self.inner.elapsed_ms.load(Ordering::Relaxed))
    }
}

impl TimeSource<u64> for MonotonicClock {
    fn current_ticks(&self) -> u64 {
        self.now_ms() / self.resolution.millis_per_tick()
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }
}

impl TimeSource<u128> for MonotonicClock {
    fn current_ticks(&self) -> u128 {
        u128::from(<Self as TimeSource<u64>>::current_ticks(self))
    }

    fn resolution(&self) -> Resolution {
        self.resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::SystemClock;

    #[test]
    fn never_goes_backward() {
        let clock = MonotonicClock::default();
        let mut last: u64 = clock.current_ticks();
        for _ in 0..1_000 {
            let now: u64 = clock.current_ticks();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn default_ticks_in_seconds() {
        let clock = MonotonicClock::default();
        assert_eq!(TimeSource::<u64>::resolution(&clock), Resolution::Seconds);
        let wall: u64 = SystemClock::seconds().current_ticks();
        let ticks: u64 = clock.current_ticks();
        assert!(wall.abs_diff(ticks) <= 1, "wall={wall} mono={ticks}");
    }

    #[test]
    fn anchored_to_unix_epoch() {
        let mono = MonotonicClock::seconds();
        let wall: u64 = SystemClock::seconds().current_ticks();
        let ticks: u64 = mono.current_ticks();
        assert!(wall.abs_diff(ticks) <= 1, "wall={wall} mono={ticks}");
    }

    #[test]
    fn advances_while_sleeping() {
        let clock = MonotonicClock::new(Resolution::Millis);
        let before: u64 = clock.current_ticks();
        thread::sleep(Duration::from_millis(20));
        let after: u64 = clock.current_ticks();
        assert!(after > before);
    }
}
